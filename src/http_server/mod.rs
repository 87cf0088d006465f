//! # HTTP Server Module
//!
//! Axum server exposing the catalog.
//!
//! # Endpoints
//!
//! - `/` and `/health` - Liveness
//! - `/films`, `/films/{id}` - Film CRUD
//! - `/distributors`, `/distributors/{id}` - Distributor CRUD

pub mod config;
pub mod errors;
pub mod extract;
pub mod observability_routes;
pub mod resource_routes;
pub mod server;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, HttpServer};
