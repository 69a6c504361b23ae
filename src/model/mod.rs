pub mod cost;
pub mod graph;
pub mod heuristic;
pub mod ids;
pub mod mapping;
pub mod overlay;
pub mod profile;
pub mod temporal;
pub mod time_unit;
pub mod transition;
pub mod turn;

pub use ids::{EdgeId, LandmarkId, NodeId, ProfileId, DEFAULT_PROFILE_ID, NO_PREDECESSOR};
pub use time_unit::TimeUnit;
