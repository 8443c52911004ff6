//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers go through the atomic `with_user` / `with_collection`
//! primitives; query handlers only load.

pub mod handlers;
mod state;

pub use handlers::*;
pub use state::EngineState;
