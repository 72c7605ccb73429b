use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value could not be parsed.
    ///
    /// Numeric Discord identifiers and the revocation policy must match the
    /// expected format; anything else fails startup instead of limping along
    /// with a half-configured service.
    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidValue { name: String, value: String },
}
