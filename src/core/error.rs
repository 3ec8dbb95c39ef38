//! Error types for option positioning analysis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PositioningError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty option chain for {symbol}")]
    EmptyChain { symbol: String },

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type PositioningResult<T> = Result<T, PositioningError>;

impl PositioningError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn empty_chain(symbol: impl Into<String>) -> Self {
        Self::EmptyChain {
            symbol: symbol.into(),
        }
    }
}
