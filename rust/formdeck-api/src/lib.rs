//! Formdeck API - form builder service
//!
//! This crate provides a REST API for building forms, sharing them via a
//! public link, collecting submissions, and reporting results:
//!
//! - **Forms**: create/read/update/delete with nested, ordered field
//!   definitions
//! - **Sharing**: every form gets a public share token distinct from its
//!   primary key
//! - **Submissions**: collected per respondent and paired back against the
//!   form's current fields for review and CSV export
//! - **Builder logic**: the client-side draft editor and answer
//!   accumulation as plain library modules
//!
//! # Architecture
//!
//! The service is organized into several key modules:
//!
//! - [`config`]: Configuration management and environment loading
//! - [`domain`]: Core domain models (forms, fields, submissions, reports)
//! - [`database`]: SQLite-backed persistence
//! - [`api`]: HTTP API endpoints
//! - [`builder`]: Client-side editor and renderer logic
//!
//! # Example
//!
//! ```rust,ignore
//! use formdeck_api::{config::AppConfig, server::create_app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let app = create_app(config).await?;
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod builder;
pub mod config;
pub mod database;
pub mod domain;
pub mod logging;
pub mod server;

use std::sync::Arc;

use config::AppConfig;
use database::FormStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Form store backing every endpoint.
    pub store: FormStore,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"AppConfig")
            .field("store", &self.store)
            .finish()
    }
}
