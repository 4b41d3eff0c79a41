//! A single match between a human and the minimax strategist.
//!
//! [`Match`] owns the real board. Front ends feed it human moves and ask it
//! for the strategist's reply; everything they need to draw the game comes
//! back through [`Match::board`] and [`Match::status`].

use std::fmt;

use tracing::{debug, info};

use crate::ai::minimax::{MinmaxStrategist, StrategistConfig};
use crate::ai::random_source::{RandomSource, SeededRandomSource};
use crate::board::{BoardModel, Coordinate, Move, Player, Token};
use crate::error::{Error, Result};
use crate::{Adversary, GameState, Strategist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub size: usize,
    /// Defaults to `2·size − 1` when unset.
    pub max_look_ahead_depth: Option<usize>,
    pub random_seed: Option<u64>,
    /// Mark of the player who opens; drawn at random when unset.
    pub first_player: Option<Token>,
    pub alpha_beta: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: 3,
            max_look_ahead_depth: None,
            random_seed: None,
            first_player: None,
            alpha_beta: true,
        }
    }
}

impl MatchConfig {
    pub fn strategist_config(&self) -> StrategistConfig {
        let defaults = StrategistConfig::for_board_size(self.size);
        StrategistConfig {
            max_look_ahead_depth: self
                .max_look_ahead_depth
                .unwrap_or(defaults.max_look_ahead_depth),
            random_seed: self.random_seed,
            alpha_beta: self.alpha_beta,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Configuration(
                "board size must be at least 1".to_string(),
            ));
        }
        if self.first_player == Some(Token::Empty) {
            return Err(Error::Configuration(
                "the opening player needs a mark".to_string(),
            ));
        }
        self.strategist_config().validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress { to_move: Player },
    Won(Player),
    Draw,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { to_move } => write!(f, "{to_move}'s Turn"),
            GameStatus::Won(player) => write!(f, "{player} Win"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

pub struct Match<R: RandomSource = SeededRandomSource> {
    config: MatchConfig,
    board: BoardModel,
    strategist: MinmaxStrategist<R>,
    history: Vec<(Player, Move)>,
}

impl Match<SeededRandomSource> {
    pub fn new(config: MatchConfig) -> Result<Self> {
        Self::with_random_source(config, SeededRandomSource::new(config.random_seed))
    }
}

impl<R: RandomSource> Match<R> {
    /// Starts a match whose tie-breaks and opening draw use `random_source`.
    pub fn with_random_source(config: MatchConfig, random_source: R) -> Result<Self> {
        config.validate()?;
        let strategist = MinmaxStrategist::new(config.strategist_config(), random_source)?;
        let mut new_match = Self {
            config,
            board: BoardModel::new(config.size)?,
            strategist,
            history: Vec::new(),
        };
        new_match.reset();
        Ok(new_match)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    /// Clears the board and picks the opening player again.
    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();

        let opener = match self.config.first_player {
            Some(Token::O) => Player::O,
            Some(_) => Player::X,
            None => {
                let players = self.board.players();
                let draw = self.strategist.random_source_mut().next_int(players.len());
                players[draw % players.len()]
            }
        };
        if let Err(err) = self.board.set_active_player(opener) {
            debug!(%err, "kept previous opener");
        }
        info!(
            size = self.config.size,
            depth = self.strategist.config().max_look_ahead_depth,
            %opener,
            "new match"
        );
    }

    pub fn status(&self) -> GameStatus {
        match self.board.outcome() {
            Some(crate::Outcome::Winner(player)) => GameStatus::Won(player),
            Some(crate::Outcome::Draw) => GameStatus::Draw,
            None => GameStatus::InProgress {
                to_move: self.board.active_player(),
            },
        }
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn status_message(&self) -> String {
        self.status().to_string()
    }

    /// Claims `coordinate` for the player to move.
    ///
    /// Off-board, already claimed or post-game moves leave the match
    /// untouched and return `false`.
    pub fn apply_human_move(&mut self, coordinate: Coordinate) -> bool {
        if self.is_over() {
            debug!(?coordinate, "game already decided");
            return false;
        }

        let (x, y) = coordinate;
        match self.board.value_at(x, y) {
            Ok(Token::Empty) => {}
            Ok(token) => {
                debug!(?coordinate, %token, "cell already claimed");
                return false;
            }
            Err(err) => {
                debug!(%err, "rejected human move");
                return false;
            }
        }

        self.record(coordinate.into());
        true
    }

    /// Asks the strategist for the player to move and plays its choice.
    pub fn play_strategist_move(&mut self) -> Option<Move> {
        if self.is_over() {
            return None;
        }
        let player = self.board.active_player();
        let chosen = self.strategist.best_move(&self.board, player)?;
        self.record(chosen);
        Some(chosen)
    }

    fn record(&mut self, mv: Move) {
        let player = self.board.active_player();
        self.board.apply(&mv);
        self.history.push((player, mv));
        debug!(%player, %mv, next = %player.opponent(), "move applied");

        if self.is_over() {
            info!(result = %self.status(), moves = self.history.len(), "match over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64, first: Token) -> Match {
        Match::new(MatchConfig {
            random_seed: Some(seed),
            first_player: Some(first),
            ..MatchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn rejects_bad_configuration() {
        let zero_depth = MatchConfig {
            max_look_ahead_depth: Some(0),
            ..MatchConfig::default()
        };
        assert!(matches!(Match::new(zero_depth), Err(Error::Configuration(_))));

        let no_board = MatchConfig {
            size: 0,
            ..MatchConfig::default()
        };
        assert!(Match::new(no_board).is_err());
    }

    #[test]
    fn default_depth_follows_size() {
        let config = MatchConfig {
            size: 4,
            ..MatchConfig::default()
        };
        assert_eq!(config.strategist_config().max_look_ahead_depth, 7);

        let m = Match::new(config).unwrap();
        assert_eq!(m.config().size, 4);
        assert_eq!(m.board().size(), 4);
    }

    #[test]
    fn human_move_advances_turn() {
        let mut m = seeded(5, Token::X);
        assert_eq!(m.status_message(), "X's Turn");

        assert!(m.apply_human_move((1, 1)));
        assert_eq!(m.board().value_at(1, 1), Ok(Token::X));
        assert_eq!(m.status(), GameStatus::InProgress { to_move: Player::O });
        assert_eq!(m.history(), &[(Player::X, Move::new((1, 1)))]);
    }

    #[test]
    fn invalid_human_moves_change_nothing() {
        let mut m = seeded(5, Token::X);
        assert!(m.apply_human_move((0, 0)));
        let before = m.board().clone();

        assert!(!m.apply_human_move((0, 0)));
        assert!(!m.apply_human_move((3, 1)));
        assert_eq!(m.board(), &before);
        assert_eq!(m.history().len(), 1);
    }

    #[test]
    fn strategist_replies_on_an_empty_cell() {
        let mut m = seeded(9, Token::X);
        assert!(m.apply_human_move((0, 0)));

        let reply = m.play_strategist_move().unwrap();
        let (x, y) = reply.coordinate();
        assert_ne!((x, y), (0, 0));
        assert_eq!(m.board().value_at(x, y), Ok(Token::O));
        assert_eq!(m.board().active_player(), Player::X);
    }

    #[test]
    fn full_depth_self_play_ends_in_a_draw() {
        let mut m = Match::new(MatchConfig {
            max_look_ahead_depth: Some(9),
            random_seed: Some(21),
            first_player: Some(Token::X),
            ..MatchConfig::default()
        })
        .unwrap();
        while m.play_strategist_move().is_some() {}

        assert!(m.is_over());
        assert_eq!(m.status(), GameStatus::Draw);
        assert_eq!(m.status_message(), "Draw");
        assert_eq!(m.play_strategist_move(), None);
        assert!(!m.apply_human_move((0, 0)));
    }

    #[test]
    fn win_message_names_the_winner() {
        let mut m = seeded(2, Token::O);
        for coordinate in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)] {
            assert!(m.apply_human_move(coordinate));
        }
        assert_eq!(m.status(), GameStatus::Won(Player::O));
        assert_eq!(m.status_message(), "O Win");
    }

    #[test]
    fn reset_clears_the_board() {
        let mut m = seeded(4, Token::O);
        m.apply_human_move((2, 2));
        m.reset();
        assert_eq!(m.board().occupied_count(), 0);
        assert!(m.history().is_empty());
        assert_eq!(m.board().active_player(), Player::O);
    }

    #[test]
    fn random_opener_is_reproducible() {
        let config = MatchConfig {
            random_seed: Some(77),
            ..MatchConfig::default()
        };
        let a = Match::new(config).unwrap();
        let b = Match::new(config).unwrap();
        assert_eq!(a.board().active_player(), b.board().active_player());
    }
}
