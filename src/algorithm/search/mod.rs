mod core;
mod error;
mod priority_queue;
mod request;
mod session;
mod state;
mod visited;

pub use core::SearchCore;
pub use error::SearchError;
pub use request::{Algorithm, Request, Response, SearchTelemetry};
pub use session::SearchSession;
pub use state::SearchState;
pub use visited::VisitedSet;
