pub mod config;
pub mod error;
pub mod format;
pub mod marketplaces;
pub mod state;
