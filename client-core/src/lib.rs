pub mod api_config;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod i18n;
pub mod models;
pub mod redact;
pub mod routes;
pub mod transport;

pub use client::BackupServiceClient;
pub use error::{BackupError, Result};
