//! Static episode and clause data.

mod error;
mod store;
mod types;

pub use error::CatalogError;
pub use store::{load_records, Catalog};
pub use types::{Bias, Clause, Episode};

#[cfg(test)]
pub(crate) use store::fixtures;
