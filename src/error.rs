//! Error types for the mana algebra

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManaError {
    /// A single token (the contents of one `{...}` group) is not a
    /// recognized mana symbol
    #[error("Malformed mana symbol: {0:?}")]
    MalformedSymbol(String),

    /// A cost string is not solely composed of complete `{...}` groups
    #[error("Malformed mana cost: {0:?}")]
    MalformedCost(String),

    /// Generic symbols never carry a negative amount
    #[error("Negative generic mana value: {0}")]
    NegativeGenericValue(i64),
}

pub type Result<T> = std::result::Result<T, ManaError>;
