//! `taro` is a read-only, time-dependent and profile-aware shortest-path
//! engine for road-like directed graphs.
//!
//! The graph, turn-cost table, temporal profiles, live overlay, and
//! landmark tables are loaded once from validated buffers and never
//! mutated. Queries run through [`algorithm::search::SearchSession`],
//! which owns all mutable per-query scratch state.

pub mod algorithm;
pub mod error;
pub mod model;
pub mod util;

pub use error::TaroError;
