// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing Flodesk API credential")]
    MissingCredential,
    #[error("provider returned status {status}: {body}")]
    ProviderStatus { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
