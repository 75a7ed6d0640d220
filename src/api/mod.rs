//! HTTP API surface

pub mod ask;
pub mod feedback;
pub mod health;
pub mod router;
pub mod state;
pub mod types;

pub use router::{create_router, create_router_with_state};
