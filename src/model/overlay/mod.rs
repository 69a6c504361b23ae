mod error;
mod live;

pub use error::LiveOverlayError;
pub use live::{LiveLookup, LiveOverlay, OverlayState, RawLiveEntry};
