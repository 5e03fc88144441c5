//! HTTP backend for a bakery storefront.
//!
//! Lists the catalogue, seeds sample items and accepts orders, persisting documents through
//! [`bakery_store`].
//!
//! - **Configuration** ([`config`]) - Environment variables read at startup
//! - **Database adapter** ([`database`]) - The store handle shared by all handlers
//! - **Schemas** ([`schemas`]) - Stored document types, collection names and validation
//! - **HTTP API** ([`api`]) - Routes and middleware
//!
//! # Example
//!
//! ```ignore
//! use bakery_api::{AppState, Config, Database, build_app};
//!
//! let config = Config::from_env()?;
//! let db = Database::connect(&config).await;
//! let app = build_app(AppState::new(config, db));
//! ```

#[allow(unused_extern_crates)]
extern crate self as bakery_api;

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod json;
pub mod schemas;
pub mod seed;
pub mod state;

pub use api::build_app;
pub use config::Config;
pub use database::{Database, DatabaseStatus};
pub use state::AppState;
