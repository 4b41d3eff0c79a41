//! Board state for `size × size` tic-tac-toe.
//!
//! A [`BoardModel`] owns the grid and the player to move. Cells are written at
//! most once: a write to a claimed cell is absorbed without an error, and
//! claiming a cell never advances the turn on its own. Search code goes
//! through the [`GameState`] impl, which pairs a claim with a turn change.

mod lines;
mod moves;
mod player;

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::{Adversary, GameState, Score};

use lines::Line;
pub use moves::{Coordinate, Move};
pub use player::{Player, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    size: usize,
    /// Row-major, `y * size + x`.
    cells: Vec<Token>,
    players: [Player; 2],
    active_player: Player,
}

impl BoardModel {
    /// An empty board with the standard pair, X to move.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_players(size, Player::X)
    }

    /// An empty board for `first` and its opponent, `first` to move.
    pub fn with_players(size: usize, first: Player) -> Result<Self> {
        if size == 0 {
            return Err(Error::Configuration(
                "board size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            size,
            cells: vec![Token::Empty; size * size],
            players: [first, first.opponent()],
            active_player: first,
        })
    }

    /// Reads a position from rows of token characters.
    ///
    /// Rows are separated by `/` or newlines, whitespace inside a row is
    /// ignored, and the row count must equal the row length.
    ///
    /// ```
    /// use ttt_ai::{BoardModel, Player, Token};
    ///
    /// let board = BoardModel::parse("X.O/.X./..O", Player::X).unwrap();
    /// assert_eq!(board.value_at(2, 2).unwrap(), Token::O);
    /// ```
    pub fn parse(text: &str, to_move: Player) -> Result<Self> {
        let rows: Vec<Vec<char>> = text
            .split(|c: char| c == '/' || c == '\n')
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        let mut board = Self::with_players(size, to_move)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::Configuration(format!(
                    "row {y} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (x, &c) in row.iter().enumerate() {
                let token = Token::from_char(c).ok_or_else(|| {
                    Error::Configuration(format!("unknown cell character '{c}' at ({x}, {y})"))
                })?;
                board.cells[y * size + x] = token;
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, player: Player) -> bool {
        self.players.contains(&player)
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(Error::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y * self.size + x)
    }

    fn check_player(&self, player: Player) -> Result<()> {
        if !self.contains(player) {
            return Err(Error::InvalidPlayer {
                id: player.id(),
                mark: player.mark(),
            });
        }
        Ok(())
    }

    pub fn value_at(&self, x: usize, y: usize) -> Result<Token> {
        let idx = self.check_bounds(x, y)?;
        Ok(self.cells[idx])
    }

    /// Claims an empty cell for `token`.
    ///
    /// Returns `Ok(false)` and leaves the board untouched when the cell is
    /// already claimed (or `token` is `Empty`). The turn is not advanced.
    pub fn place(&mut self, x: usize, y: usize, token: Token) -> Result<bool> {
        let idx = self.check_bounds(x, y)?;
        if token == Token::Empty {
            trace!(x, y, "empty token written; nothing to claim");
            return Ok(false);
        }
        if self.cells[idx] != Token::Empty {
            trace!(x, y, %token, existing = %self.cells[idx], "write to claimed cell ignored");
            return Ok(false);
        }
        self.cells[idx] = token;
        Ok(true)
    }

    pub fn set_active_player(&mut self, player: Player) -> Result<()> {
        self.check_player(player)?;
        self.active_player = player;
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&t| t != Token::Empty).count()
    }

    /// Empties every cell; players and the player to move are kept.
    pub fn clear(&mut self) {
        self.cells.fill(Token::Empty);
    }

    fn player_with_mark(&self, mark: Token) -> Option<Player> {
        self.players.iter().copied().find(|p| p.mark() == mark)
    }

    fn line_owner(&self, line: Line) -> Option<Token> {
        let mut cells = line.cells(self.size).map(|(x, y)| self.cells[y * self.size + x]);
        let first = cells.next()?;
        if first == Token::Empty {
            return None;
        }
        cells.all(|t| t == first).then_some(first)
    }
}

impl GameState<Move, Player> for BoardModel {
    type Error = Error;

    fn players(&self) -> [Player; 2] {
        self.players
    }

    fn active_player(&self) -> Player {
        self.active_player
    }

    fn advance_turn(&mut self) {
        self.active_player = self.active_player.opponent();
    }

    /// One move per empty cell in row-major order; nothing once the board is
    /// full or `player` has already won.
    fn legal_moves(&self, player: Player) -> Result<Vec<Move>> {
        self.check_player(player)?;
        if self.is_full() || self.winner() == Some(player) {
            return Ok(Vec::new());
        }

        let size = self.size;
        let moves = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cells[y * size + x] == Token::Empty)
            .map(Move::new)
            .collect();
        Ok(moves)
    }

    fn apply(&mut self, action: &Move) {
        let (x, y) = action.coordinate();
        let mark = self.active_player.mark();
        if let Err(err) = self.place(x, y, mark) {
            trace!(%err, "move ignored");
        }
        self.advance_turn();
    }

    fn winner(&self) -> Option<Player> {
        Line::all(self.size)
            .find_map(|line| self.line_owner(line))
            .and_then(|mark| self.player_with_mark(mark))
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|&t| t != Token::Empty)
    }

    fn score(&self, player: Player) -> Score {
        if self.winner() == Some(player) {
            Score::Win
        } else {
            Score::None
        }
    }
}

impl fmt::Display for BoardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|t| t.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
