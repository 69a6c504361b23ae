mod error;
mod store;

pub use error::ProfileError;
pub use store::{ProfileMetadata, ProfileStore, RawProfile, DEFAULT_MULTIPLIER};
