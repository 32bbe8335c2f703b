//! Hotel server Error module.
use thiserror::Error;

/// Represents errors that can occur while running the hotel server.
#[derive(Error, Debug)]
pub enum Error {
    /// An [`std::io::Error`] occurred, possibly while binding or serving.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
