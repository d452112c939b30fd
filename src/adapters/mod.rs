// Adapters - External system implementations

pub mod exec_process;
pub mod scripted_process;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_process::TokioProcessAdapter;
pub use scripted_process::{ScriptedProcessAdapter, ScriptedStep};
pub use toml_config::AmbimuxConfig;
pub use tracing_log::{init_logging, LogFormat};
