pub mod cli;
pub mod config;
pub mod gateway;
pub mod service_handle;

pub use cli::run_cli;
pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use service_handle::ServiceHandle;
