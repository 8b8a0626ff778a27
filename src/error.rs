use std::io;

use thiserror::Error;

use crate::fsgate::GatewayError;

#[derive(Debug, Error)]
pub enum SpexError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
