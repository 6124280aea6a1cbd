//! Scholarship discount schedules ("tabuladores") and the calculations that
//! turn household income into a discount percentage and a monthly
//! contribution, and back.

pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::{EngineConfig, TabuladorEngine, compute_amount_due};
pub use error::{ConfigurationError, InvalidInput, TabuladorError};
pub use models::*;
