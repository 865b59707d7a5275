use std::env;
use std::env::VarError;

use config::{
    Config,
    ConfigError,
    File,
};
use custom_error::custom_error;
use derivative::Derivative;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    #[derivative(Debug = "ignore")]
    pub server_token: String,
    #[derivative(Debug = "ignore")]
    pub account_token: String,
}

custom_error! {
///! Custom error for missing env variable or invalid configuration files.
pub ConfigurationError
    MissingAppEnv{source:VarError} = "`APP_ENVIRONMENT` is not set \
    (possible values: [`local`|`production`]).",
    InvalidConfig{source:ConfigError} = "{source}",
}

/// Load the configuration from the directory: `configuration`.
///
/// It fails if:
/// - the `APP_ENVIRONMENT` env variable is not set
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
///
/// Tokens are best left out of the files and passed as `APP_EMAIL_CLIENT__SERVER_TOKEN`
/// and `APP_EMAIL_CLIENT__ACCOUNT_TOKEN`.
///
/// # Examples
///
/// ```no_run
/// use postmark::app::load_configuration;
///
/// let settings = load_configuration().unwrap();
/// println!("{}", settings.email_client.base_url);
/// ```
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let mut config = Config::new();
    config.merge(File::with_name("configuration/base").required(true))?;
    let app_environment = env::var("APP_ENVIRONMENT")?;
    config.merge(File::with_name(&format!("configuration/{}", app_environment)).required(true))?;

    // Settings from environment variables win, with a prefix of APP and `__` as separator:
    // `APP_EMAIL_CLIENT__TIMEOUT_SECS=5` sets `Settings.email_client.timeout_secs`.
    config.merge(config::Environment::with_prefix("app").separator("__"))?;

    Ok(config.try_into()?)
}
