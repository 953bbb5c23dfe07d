use thiserror::Error;

/// Errors produced while building [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Local validation failures. These are raised before any request is sent
/// and are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste some comments.")]
    EmptyText,

    #[error("No valid comments found.")]
    NoComments,

    #[error("Please enter a valid URL.")]
    EmptyUrl,

    #[error("No comments found in CSV.")]
    EmptyCsv,

    #[error("Please enter a creator name (@handle).")]
    MissingCreatorName,

    #[error("Please add at least one URL or Manual Source.")]
    NoCreatorSources,

    #[error("unknown platform '{0}'; expected instagram, tiktok, twitter, or other")]
    UnknownPlatform(String),
}

/// Failures reading or writing the client-side session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read session store {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write session store {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session store {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
