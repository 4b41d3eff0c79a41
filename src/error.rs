use thiserror::Error;

use crate::board::Token;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    #[error("player {id} with mark {mark} is not part of this match")]
    InvalidPlayer { id: u8, mark: Token },

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
