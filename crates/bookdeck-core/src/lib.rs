pub mod config;
pub mod controller;
pub mod error;
pub mod models;

pub use config::{AppConfig, ServerConfig, UiConfig};
pub use controller::{Action, CatalogController, Notice, Ticket, ViewState};
pub use error::{CatalogError, ConfigError, Result};
pub use models::{Book, BookInsight, CatalogPage, DraftField};
