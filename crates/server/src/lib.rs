//! Server crate for the movie metadata API.
//!
//! - **service**: `MovieQueryService`, every read-only query over a `DataIndex`
//! - **routes**: axum router exposing those queries over HTTP
//! - **responses** / **error**: JSON bodies and error mapping

pub mod error;
pub mod responses;
pub mod routes;
pub mod service;

pub use error::{QueryError, QueryResult};
pub use routes::{AppState, router, serve};
pub use service::{DEFAULT_MIN_VOTES, MovieQueryService};
