mod error;
mod map;
mod murmur;

pub use error::TurnCostError;
pub use map::{RawTurnCost, TurnCostMap, DEFAULT_COST};
