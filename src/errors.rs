use thiserror::Error;

#[derive(Error, Debug)]
pub enum HgResourceError {
    #[error("Malformed branch reference '{0}': expected <name>:<revision>")]
    MalformedBranchRef(String),

    #[error("Command `{command}` failed: {stderr}")]
    ExternalProcess { command: String, stderr: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HgResourceError>;
