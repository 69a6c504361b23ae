mod error;
mod raw;
mod runtime;

pub use error::{GraphError, GraphWarning};
pub use raw::RawGraphBuffers;
pub use runtime::{GraphRuntime, ValidationReport};
