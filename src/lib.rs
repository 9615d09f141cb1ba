pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod layout;
pub mod provision;

pub use config::Config;
pub use error::SetupError;
pub use provision::{SetupMode, SetupReport};
