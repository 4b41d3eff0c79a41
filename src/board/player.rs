use std::fmt;

use crate::error::{Error, Result};
use crate::Adversary;

/// The content of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Empty,
    X,
    O,
}

impl Token {
    pub fn to_char(self) -> char {
        match self {
            Token::Empty => '.',
            Token::X => 'X',
            Token::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Token> {
        match c {
            '.' | '_' => Some(Token::Empty),
            'X' | 'x' => Some(Token::X),
            'O' | 'o' => Some(Token::O),
            _ => None,
        }
    }

    /// The other player's mark; `Empty` stays `Empty`.
    pub fn opposite(self) -> Token {
        match self {
            Token::Empty => Token::Empty,
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One side of a match: an ordinal plus the mark it claims cells with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    id: u8,
    mark: Token,
}

impl Player {
    pub const X: Player = Player { id: 0, mark: Token::X };
    pub const O: Player = Player { id: 1, mark: Token::O };

    pub fn new(id: u8, mark: Token) -> Result<Self> {
        if id > 1 || mark == Token::Empty {
            return Err(Error::InvalidPlayer { id, mark });
        }
        Ok(Self { id, mark })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn mark(&self) -> Token {
        self.mark
    }
}

impl Adversary for Player {
    fn opponent(&self) -> Self {
        Self {
            id: 1 - self.id,
            mark: self.mark.opposite(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark)
    }
}
