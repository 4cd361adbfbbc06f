//! Request handlers.
//!
//! Handlers delegate to the repositories in `vigil_db` and the dispatcher in
//! `vigil_notify`, mapping errors via [`AppError`](crate::error::AppError).

pub mod alerts;
