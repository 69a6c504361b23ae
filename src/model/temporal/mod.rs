mod binder;
mod error;
mod offset_cache;
mod strategy;
mod timezone;

pub use binder::{bind_temporal_context, TemporalConfig};
pub use error::TemporalConfigError;
pub use offset_cache::OffsetCache;
pub use strategy::{ResolvedTemporalContext, TemporalTraitKind};
pub use timezone::{ResolvedZone, TimezonePolicyId};
