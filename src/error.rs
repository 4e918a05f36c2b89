use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("HTTP error: {0}")]
    #[diagnostic(code(ctrlq::http), help("is the decision service running?"))]
    Http(#[from] reqwest::Error),

    #[error("decision service returned {status}: {body}")]
    #[diagnostic(code(ctrlq::status))]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    #[diagnostic(code(ctrlq::decode))]
    Decode(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    #[diagnostic(code(ctrlq::config))]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}
