pub mod logger;

mod error;

pub use error::TelemetryError;
pub use logger::init;
pub use logger::reload_log_level;
