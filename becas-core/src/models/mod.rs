mod assignment;
mod catalog;
mod choices;
mod discount_percent;
mod discount_table;
mod household;
mod quote;
mod tabulador_id;

pub use assignment::{Assignment, CapSelection, OUT_OF_RANGE_LABEL, OUT_OF_RANGE_VALUE};
pub use catalog::TabuladorCatalog;
pub use choices::{FormChoice, percent_choices, tabulador_choices};
pub use discount_percent::DiscountPercent;
pub use discount_table::{DiscountTable, DiscountTier, lookup_discount};
pub use household::Household;
pub use quote::{FormValues, Quote};
pub use tabulador_id::TabuladorId;
