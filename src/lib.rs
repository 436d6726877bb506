//! Legal Scenario Simulator - contract clause outcomes for startup episodes.

pub mod app;
pub mod catalog;
pub mod config;
pub mod display;
pub mod history;
pub mod narrator;
pub mod scenario;
pub mod server;
pub mod simulation;
