pub mod config;
pub mod error;
pub mod handlers;
pub mod logging_middleware;
pub mod metrics;
pub mod observability;
pub mod routes;
pub mod state;
pub mod validation;
