//! Configuration loading for the roster engine.
//!
//! This module loads engine settings, default opening hours and seed
//! vocabularies from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Listening on {}", config.engine().server.bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, PayrollConfig, RosterConfig, ServerConfig, VocabularySeed};
