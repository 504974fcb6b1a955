// Engine-internal data models. Response shapes live in the `shared` crate.
pub mod period;

pub use period::{Dataset, PeriodRecord};
