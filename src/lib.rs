// ABOUTME: Main library entry point for the Fitweave fitness tracking backend
// ABOUTME: Provides encrypted health integrations, activity stores, and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Fitweave Server
//!
//! A fitness-tracking backend: authenticated users keep health profiles,
//! daily activity logs, and workout sessions, and connect third-party
//! health services (Google Fit) whose OAuth tokens are encrypted at rest.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` (via `sqlx`) stores with atomic upsert semantics
//!   and an AES-256-GCM token cipher at the credential boundary
//! - **Providers**: per-service sync orchestration (Google Fit)
//! - **Routes**: axum REST endpoints that validate, delegate, and redact
//! - **Config**: environment-only configuration; the encryption key is
//!   mandatory and startup fails without it
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitweave_server::config::environment::ServerConfig;
//! use fitweave_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fitweave server configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management (environment-only)
pub mod config;

/// Dependency injection context shared by route handlers
pub mod context;

/// Unified error handling with HTTP response mapping
pub mod errors;

/// Production logging setup
pub mod logging;

/// Common data models for users, profiles, activities, and integrations
pub mod models;

/// JWT bearer authentication
pub mod auth;

/// Database stores with token encryption at the credential boundary
pub mod database;

/// Third-party health service sync orchestration
pub mod providers;

/// External API clients (`OpenAI` suggestion generation)
pub mod external;

/// `HTTP` routes for the REST API
pub mod routes;
