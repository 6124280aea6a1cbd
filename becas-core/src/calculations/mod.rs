//! Tabulador calculations: table lookups, contribution amounts, and the
//! inverse mapping from a target discount back to a tabulador.

pub mod common;
pub mod engine;

pub use engine::{EngineConfig, TabuladorEngine, compute_amount_due};
