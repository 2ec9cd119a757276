//! Sortscope Config - persistent run settings
//!
//! Loads and saves the user's default run parameters as TOML and converts
//! them into the types [`sortscope_core`] consumes.
//!
//! # Example
//!
//! ```rust
//! use sortscope_config::Settings;
//!
//! let settings = Settings::from_toml("element_count = 120\nspeed = 80\n").unwrap();
//! settings.validate().unwrap();
//!
//! let config = settings.session_config();
//! assert_eq!(config.elements, 120);
//! assert_eq!(settings.pacing().speed(), 80);
//! ```
//!
//! # TOML Format
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! algorithm = "quick"
//! element_count = 50
//! speed = 50
//! min_delay_ms = 1
//! max_delay_ms = 150
//! sweep = true
//! seed = 42
//! ```

pub mod error;
pub mod paths;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use paths::{settings_path, user_config_dir};
pub use settings::{MAX_ELEMENTS, Settings};
pub use validation::ValidationError;
