pub mod config;
pub mod constants;
pub mod errors;
pub mod status;

// Re-export commonly used types
pub use config::{Config, ConfigManager, EnvironmentConfig};
pub use status::{
    check_dialect_status, CallOutcome, Dialect, HostStatus, NodeClient, StatusReport,
    TracingDiagnostics,
};
