pub use configuration::*;
pub use startup::build_email_client;
pub use telemetry::setup_tracing;

mod configuration;
mod startup;
mod telemetry;
