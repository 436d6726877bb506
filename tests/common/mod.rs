//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use legal_simulator::catalog::{Catalog, Clause, Episode};
use legal_simulator::narrator::Narrator;
use legal_simulator::simulation::SimulationService;
use serde_json::json;

pub fn episode(id: &str, conflict_type: &str, title: &str) -> Episode {
    serde_json::from_value(json!({
        "episode_id": id,
        "title": title,
        "conflict_type": conflict_type,
        "scene": format!("Scene for {id}"),
        "legal_stakes": format!("Stakes for {id}"),
    }))
    .unwrap()
}

pub fn clause(id: &str, conflict_type: &str, bias: &str, founder: u32, vc: u32) -> Clause {
    serde_json::from_value(json!({
        "clause_id": id,
        "conflict_type": conflict_type,
        "bias": bias,
        "clause_type": format!("Type {id}"),
        "short_text": format!("Short {id}"),
        "explanation": format!("Explanation of {id}"),
        "risk_score_founder": founder,
        "risk_score_vc": vc,
    }))
    .unwrap()
}

/// The board-control pilot with one VC and one founder clause.
pub fn pilot_catalog() -> Catalog {
    Catalog::new(
        vec![
            episode("S1E1", "board_control", "Minimum Viable Product"),
            episode("S1E2", "seed_funding", "The Cap Table"),
        ],
        vec![
            clause("C1", "board_control", "VC_bias", 90, 10),
            clause("C2", "board_control", "Founder_bias", 10, 90),
            clause("C3", "ip_ownership", "Neutral", 40, 40),
        ],
    )
}

pub fn pilot_service() -> SimulationService {
    SimulationService::new(
        Arc::new(pilot_catalog()),
        Arc::new(Narrator::fallback_only()),
    )
}
