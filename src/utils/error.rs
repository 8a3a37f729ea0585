use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteamEtlError {
    #[error("{field} environment variable is not set")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// The underlying reqwest error has its URL stripped, since the query string carries the API key.
    #[error("Request to {endpoint} failed: {source}")]
    TransportError {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not decode {endpoint} response: {source}")]
    DecodeError {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No player found for Steam ID {steam_id}")]
    NotFoundError { steam_id: String },

    #[error("No games to output")]
    EmptyInputError,

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Transport,
    Decode,
    NotFound,
    EmptyInput,
    Write,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Config => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::Decode => 4,
            ErrorCategory::NotFound => 5,
            ErrorCategory::EmptyInput => 6,
            ErrorCategory::Write => 7,
        }
    }
}

impl SteamEtlError {
    pub fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        SteamEtlError::TransportError {
            endpoint: endpoint.to_string(),
            source: source.without_url(),
        }
    }

    pub fn decode(endpoint: &str, source: serde_json::Error) -> Self {
        SteamEtlError::DecodeError {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        SteamEtlError::WriteError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SteamEtlError::MissingConfigError { .. }
            | SteamEtlError::InvalidConfigValueError { .. }
            | SteamEtlError::ConfigError { .. } => ErrorCategory::Config,
            SteamEtlError::TransportError { .. } => ErrorCategory::Transport,
            SteamEtlError::DecodeError { .. } => ErrorCategory::Decode,
            SteamEtlError::NotFoundError { .. } => ErrorCategory::NotFound,
            SteamEtlError::EmptyInputError => ErrorCategory::EmptyInput,
            SteamEtlError::WriteError { .. } | SteamEtlError::CsvError(_) => ErrorCategory::Write,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// One-line message for the console, prefixed by the pipeline step that failed.
    pub fn user_friendly_message(&self) -> String {
        let message = match self.category() {
            ErrorCategory::Config => format!("Error: {}", self),
            ErrorCategory::Transport | ErrorCategory::Decode => {
                format!("Error talking to the Steam API: {}", self)
            }
            ErrorCategory::NotFound => format!("Error getting personaname: {}", self),
            ErrorCategory::EmptyInput | ErrorCategory::Write => {
                format!("Error outputting to CSV: {}", self)
            }
        };
        // Upstream error text (io, reqwest) may carry line breaks.
        message.replace(['\r', '\n'], " ")
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Config => {
                "Set STEAM_API_KEY and STEAM_ID, or pass --credentials with a TOML file"
            }
            ErrorCategory::Transport => "Check network connectivity and that the API key is valid",
            ErrorCategory::Decode => "The Steam API returned an unexpected payload; retry later",
            ErrorCategory::NotFound => "Check that STEAM_ID is a 64-bit Steam ID of an existing account",
            ErrorCategory::EmptyInput => {
                "The library is empty or private; make game details public in Steam privacy settings"
            }
            ErrorCategory::Write => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SteamEtlError>;
