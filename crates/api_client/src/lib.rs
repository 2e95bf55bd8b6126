//! The Cloud API client — shared between console commands and the TUI.
//!
//! This crate is the single source of truth for the wire contract:
//! credential storage, authenticated GETs, envelope unwrapping, and the
//! record types the dashboard pages render.
//!
//! No UI concepts. No retries. No caching.

mod client;
mod credentials;
mod types;

pub use client::{api_base_from_env, ApiClient, ApiError, API_URL_ENV, DEFAULT_API_URL};
pub use credentials::{credentials_file_path, load_api_key, save_api_key};
pub use types::{DashboardStats, Event, Instance, StorageObject, Summary, Vpc};
