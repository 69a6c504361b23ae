mod breakdown;
mod engine;
mod error;

pub use breakdown::CostBreakdown;
pub use engine::{CostEngine, CostEngineConfig, DaySamplingPolicy};
pub use error::CostEngineError;
