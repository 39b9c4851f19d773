//! HTTP API module for the Benefit Engine.
//!
//! This module provides the REST API endpoints for resolving benefit
//! eligibility and rates per competence period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::ApiError;
pub use state::AppState;
