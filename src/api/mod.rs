//! HTTP API layer

mod routes;
mod handlers;

pub use handlers::{envelope_for, BfhlRequest, Envelope};
pub use routes::{create_router, AppState};
