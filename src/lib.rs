//! Depth-bounded minimax play for tic-tac-toe and its `size × size`
//! generalizations.
//!
//! The crate is split along two seams: a [`GameState`] (anything that can be
//! copied, advanced by a move and scored) and a [`Strategist`] (anything that
//! picks a move for a player given a state). [`BoardModel`] and
//! [`MinmaxStrategist`] are the implementations; [`Match`] wires one of each
//! together for a front end.
//!
//! ```
//! use ttt_ai::{BoardModel, GameState, MinmaxStrategist, StrategistConfig, Strategist, Player};
//!
//! let board = BoardModel::parse("XX./OO./...", Player::X).unwrap();
//! let config = StrategistConfig::for_board_size(3).with_seed(7);
//! let mut strategist = MinmaxStrategist::from_config(config).unwrap();
//!
//! let best = strategist.best_move(&board, board.active_player()).unwrap();
//! assert_eq!(best.coordinate(), (2, 0));
//! ```

mod ai;
mod board;
mod error;
mod session;

use std::fmt::Debug;
use std::hash::Hash;

pub use ai::{
    game_tree::{node::SearchTreeNode, score::CandidateScore, SearchTree},
    minimax::{MinmaxStrategist, StrategistConfig, WIN_VALUE},
    random::{random_playout, RandomStrategist},
    random_source::{RandomSource, SeededRandomSource},
};
pub use board::{BoardModel, Coordinate, Move, Player, Token};
pub use error::{Error, Result};
pub use session::{GameStatus, Match, MatchConfig};

pub trait Action: Clone + Debug {
    /// Annotates the action with the score the search found for it.
    fn with_score_hint(self, _hint: Score) -> Self {
        self
    }
}

pub trait Adversary: 'static + Copy + Clone + Debug + Hash + Eq + PartialEq {
    fn opponent(&self) -> Self;
}

/// A two-player position the strategists can search.
///
/// Every node a search explores is a private [`GameState::copy`], so
/// implementations must not share mutable storage between copies.
pub trait GameState<A: Action, P: Adversary>: Sized + Clone {
    type Error: Debug;

    fn players(&self) -> [P; 2];
    fn active_player(&self) -> P;

    /// Hands the turn to the opponent of the active player.
    fn advance_turn(&mut self);

    fn legal_moves(&self, player: P) -> std::result::Result<Vec<A>, Self::Error>;

    /// Plays `action` for the active player, then advances the turn.
    fn apply(&mut self, action: &A);

    fn winner(&self) -> Option<P>;
    fn is_full(&self) -> bool;
    fn score(&self, player: P) -> Score;

    fn copy(&self) -> Self {
        self.clone()
    }

    fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    fn outcome(&self) -> Option<Outcome<P>> {
        if let Some(winner) = self.winner() {
            Some(Outcome::Winner(winner))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

pub trait Strategist<S: GameState<A, P>, A: Action, P: Adversary> {
    /// Chooses a move for `player`, or `None` when there is nothing to choose.
    fn best_move(&mut self, state: &S, player: P) -> Option<A>;
}

/// Two-level static evaluation of a position for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Score {
    #[default]
    None,
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<P: Adversary> {
    Winner(P),
    Draw,
}
