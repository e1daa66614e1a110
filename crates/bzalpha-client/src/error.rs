use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request could not be completed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("backend payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
    #[error("no token cookie found in {}", .0.display())]
    MissingToken(PathBuf),
    #[error("cookie file {} could not be accessed: {source}", path.display())]
    CookieFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
