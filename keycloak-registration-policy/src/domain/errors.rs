use thiserror::Error;

/// Domain-specific errors for client registration policy operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("component with id {id} is not a client registration policy")]
    NotClientRegistrationPolicy { id: String },

    #[error("no client registration policy found with name '{name}' in realm '{realm}'")]
    PolicyNotFound { name: String, realm: String },

    #[error(
        "multiple client registration policies found with name '{name}': {}. Use provider_id and/or sub_type to filter.",
        .candidates.join(", ")
    )]
    MultiplePoliciesFound {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Invalid import. Supported import formats: {{{{realmId}}}}/{{{{policyId}}}}, got '{id}'")]
    InvalidImportId { id: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Response to POST {path} carried no Location header")]
    MissingLocation { path: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    /// True when the remote server answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::Transport(TransportError::Status { status: 404, .. })
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by the HTTP transport talking to the admin API
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{method} {path} failed with status {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to encode request body: {message}")]
    Encode { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network {
            message: err.to_string(),
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
        }
    }
}
