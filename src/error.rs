use thiserror::Error;

#[derive(Error, Debug)]
pub enum GiveawayError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid decimals: {0} (expected 0..=77)")]
    InvalidDecimals(u32),

    #[error("Short string too long: {len} characters (max 31)")]
    TooLong { len: usize },

    #[error("Short string has a character above U+00FF: {0:?}")]
    UnencodableChar(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Hash service unavailable: {0}")]
    HashServiceUnavailable(String),

    #[error("Invalid giveaway: {0}")]
    InvalidGiveaway(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GiveawayError>;
