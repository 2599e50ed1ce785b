//! HTTP layer for Hydra.
//!
//! Axum-based surface with three routes: `/chat`, `/clear_history`, and
//! `/health`, plus CORS and request tracing middleware.

pub mod error;
pub mod handlers;
pub mod router;
