use tracing::{debug, instrument};

use crate::ai::game_tree::SearchTree;
use crate::ai::random_source::{RandomSource, SeededRandomSource};
use crate::error::{Error, Result};
use crate::{Action, Adversary, GameState, Score, Strategist};

/// Value of a win found at the root. Each ply of distance costs one point,
/// so nearer wins and farther losses are preferred.
pub const WIN_VALUE: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategistConfig {
    /// Plies searched before falling back to the static score. At least 1.
    pub max_look_ahead_depth: usize,
    pub random_seed: Option<u64>,
    /// Prune with alpha-beta. The selected move is the same either way.
    pub alpha_beta: bool,
}

impl Default for StrategistConfig {
    fn default() -> Self {
        Self::for_board_size(3)
    }
}

impl StrategistConfig {
    /// `2·size − 1` plies: enough to see the end of a game the searching
    /// player opens.
    pub fn for_board_size(size: usize) -> Self {
        Self {
            max_look_ahead_depth: (2 * size).saturating_sub(1).max(1),
            random_seed: None,
            alpha_beta: true,
        }
    }

    pub fn with_depth(self, max_look_ahead_depth: usize) -> Self {
        Self {
            max_look_ahead_depth,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            ..self
        }
    }

    pub fn with_alpha_beta(self, alpha_beta: bool) -> Self {
        Self { alpha_beta, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_look_ahead_depth < 1 {
            return Err(Error::Configuration(format!(
                "max look-ahead depth must be at least 1, got {}",
                self.max_look_ahead_depth
            )));
        }
        Ok(())
    }
}

/// Static value of `state` from `perspective_player`'s side, `ply` moves
/// below the search root.
pub(crate) fn static_value<S, A, P>(state: &S, perspective_player: P, ply: usize) -> i32
where
    S: GameState<A, P>,
    A: Action,
    P: Adversary,
{
    // Capped so a win never scores below zero, however deep the search goes.
    let distance = i32::try_from(ply).unwrap_or(i32::MAX).min(WIN_VALUE - 1);
    if state.score(perspective_player) == Score::Win {
        WIN_VALUE - distance
    } else if state.score(perspective_player.opponent()) == Score::Win {
        distance - WIN_VALUE
    } else {
        0
    }
}

/// Depth-bounded minimax with random tie-breaking.
#[derive(Debug, Clone)]
pub struct MinmaxStrategist<R: RandomSource = SeededRandomSource> {
    config: StrategistConfig,
    random_source: R,
}

impl MinmaxStrategist<SeededRandomSource> {
    /// Builds a strategist whose tie-breaks come from the configured seed.
    pub fn from_config(config: StrategistConfig) -> Result<Self> {
        Self::new(config, SeededRandomSource::new(config.random_seed))
    }
}

impl<R: RandomSource> MinmaxStrategist<R> {
    pub fn new(config: StrategistConfig, random_source: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            random_source,
        })
    }

    pub fn config(&self) -> &StrategistConfig {
        &self.config
    }

    pub fn random_source_mut(&mut self) -> &mut R {
        &mut self.random_source
    }

    /// Every candidate move for `player` with its exact propagated value.
    pub fn score_moves<S, A, P>(&self, state: &S, player: P) -> Vec<(A, i32)>
    where
        S: GameState<A, P>,
        A: Action,
        P: Adversary,
    {
        let Some((root, moves)) = search_root(state, player) else {
            return Vec::new();
        };
        let mut nodes = 0;
        self.score_candidates(&root, player, moves, false, &mut nodes)
    }

    /// Runs the search without pruning and keeps every visited position.
    pub fn explore<S, A, P>(&self, state: &S, player: P) -> Option<SearchTree<S, A, P>>
    where
        S: GameState<A, P>,
        A: Action,
        P: Adversary,
    {
        let (root, _) = search_root(state, player)?;
        Some(SearchTree::build(
            root,
            player,
            self.config.max_look_ahead_depth,
        ))
    }

    /// Values each root candidate. With `narrow_window` set, candidates that
    /// cannot reach the best value so far are cut off early and come back as
    /// upper bounds; the ones tied at the best value are always exact.
    fn score_candidates<S, A, P>(
        &self,
        root: &S,
        player: P,
        moves: Vec<A>,
        narrow_window: bool,
        nodes: &mut u64,
    ) -> Vec<(A, i32)>
    where
        S: GameState<A, P>,
        A: Action,
        P: Adversary,
    {
        let depth = self.config.max_look_ahead_depth - 1;
        let mut best = i32::MIN;
        let mut scored = Vec::with_capacity(moves.len());

        for action in moves {
            let mut child = root.copy();
            child.apply(&action);

            let alpha = if narrow_window && self.config.alpha_beta {
                best.saturating_sub(1)
            } else {
                i32::MIN
            };
            let value = self.minimax(&child, player, depth, 1, alpha, i32::MAX, nodes);

            best = best.max(value);
            scored.push((action, value));
        }

        scored
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax<S, A, P>(
        &self,
        state: &S,
        perspective_player: P,
        depth_remaining: usize,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32
    where
        S: GameState<A, P>,
        A: Action,
        P: Adversary,
    {
        *nodes += 1;

        if depth_remaining == 0 || state.is_terminal() {
            return static_value(state, perspective_player, ply);
        }

        let mover = state.active_player();
        let moves = match state.legal_moves(mover) {
            Ok(moves) if !moves.is_empty() => moves,
            _ => return static_value(state, perspective_player, ply),
        };

        let maximizing = mover == perspective_player;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for action in moves {
            let mut child = state.copy();
            child.apply(&action);

            let value = self.minimax(
                &child,
                perspective_player,
                depth_remaining - 1,
                ply + 1,
                alpha,
                beta,
                nodes,
            );

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        best
    }
}

impl<S, A, P, R> Strategist<S, A, P> for MinmaxStrategist<R>
where
    S: GameState<A, P>,
    A: Action,
    P: Adversary,
    R: RandomSource,
{
    #[instrument(level = "debug", skip(self, state))]
    fn best_move(&mut self, state: &S, player: P) -> Option<A> {
        let (root, moves) = search_root(state, player)?;
        let candidates = moves.len();
        // Same position, same draw: repeated calls agree.
        self.random_source.rewind();

        let mut nodes = 0;
        let scored = self.score_candidates(&root, player, moves, true, &mut nodes);

        let best_value = scored.iter().map(|(_, value)| *value).max()?;
        let mut tied: Vec<A> = scored
            .into_iter()
            .filter(|(_, value)| *value == best_value)
            .map(|(action, _)| action)
            .collect();

        let ties = tied.len();
        let pick = self.random_source.next_int(ties).min(ties - 1);
        let hint = if best_value > 0 { Score::Win } else { Score::None };
        let chosen = tied.swap_remove(pick).with_score_hint(hint);

        debug!(
            candidates,
            ties,
            value = best_value,
            nodes,
            chosen = ?chosen,
            "selected move"
        );
        Some(chosen)
    }
}

/// The position to search from, with `player` to move, and its candidates.
///
/// `None` when `player` is not in the match or has no legal move.
fn search_root<S, A, P>(state: &S, player: P) -> Option<(S, Vec<A>)>
where
    S: GameState<A, P>,
    A: Action,
    P: Adversary,
{
    if !state.players().contains(&player) {
        debug!(?player, "player is not part of this match");
        return None;
    }

    let mut root = state.copy();
    if root.active_player() != player {
        root.advance_turn();
    }

    let moves = root.legal_moves(player).ok()?;
    if moves.is_empty() {
        debug!(?player, "no legal moves");
        return None;
    }
    Some((root, moves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardModel, Move, Player, Token};

    struct FirstTie;

    impl RandomSource for FirstTie {
        fn next_int(&mut self, _upper: usize) -> usize {
            0
        }
    }

    struct LastTie;

    impl RandomSource for LastTie {
        fn next_int(&mut self, upper: usize) -> usize {
            upper.saturating_sub(1)
        }
    }

    fn board(text: &str, to_move: Player) -> BoardModel {
        BoardModel::parse(text, to_move).unwrap()
    }

    #[test]
    fn depth_below_one_is_rejected() {
        let config = StrategistConfig::default().with_depth(0);
        assert!(matches!(
            MinmaxStrategist::from_config(config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn default_depth_follows_board_size() {
        assert_eq!(StrategistConfig::for_board_size(3).max_look_ahead_depth, 5);
        assert_eq!(StrategistConfig::for_board_size(4).max_look_ahead_depth, 7);
        assert_eq!(StrategistConfig::for_board_size(1).max_look_ahead_depth, 1);
    }

    #[test]
    fn takes_the_immediate_win() {
        let b = board("XX./OO./...", Player::X);
        let mut strategist = MinmaxStrategist::new(StrategistConfig::default(), LastTie).unwrap();

        let best = strategist.best_move(&b, Player::X).unwrap();
        assert_eq!(best.coordinate(), (2, 0));
        assert_eq!(best.score_hint(), Score::Win);
    }

    #[test]
    fn blocks_the_opponent() {
        let b = board("OO./X../...", Player::X);
        for depth in [2, 3, 5] {
            let config = StrategistConfig::default().with_depth(depth);
            let mut strategist = MinmaxStrategist::new(config, LastTie).unwrap();
            let best = strategist.best_move(&b, Player::X).unwrap();
            assert_eq!(best.coordinate(), (2, 0), "depth {depth}");
        }
    }

    #[test]
    fn depth_one_sees_only_wins_on_the_next_ply() {
        let b = board("OO./X../...", Player::X);
        let config = StrategistConfig::default().with_depth(1);
        let strategist = MinmaxStrategist::new(config, FirstTie).unwrap();

        let scores = strategist.score_moves(&b, Player::X);
        assert_eq!(scores.len(), 6);
        assert!(scores.iter().all(|(_, value)| *value == 0));
    }

    #[test]
    fn ties_resolved_by_random_source() {
        let b = BoardModel::new(3).unwrap();
        let config = StrategistConfig::default().with_depth(1);

        let mut first = MinmaxStrategist::new(config, FirstTie).unwrap();
        let mut last = MinmaxStrategist::new(config, LastTie).unwrap();

        assert_eq!(first.best_move(&b, Player::X), Some(Move::new((0, 0))));
        assert_eq!(last.best_move(&b, Player::X), Some(Move::new((2, 2))));
    }

    #[test]
    fn no_move_on_full_board_or_foreign_player() {
        let full = board("XOX/XOO/OXX", Player::X);
        let mut strategist = MinmaxStrategist::new(StrategistConfig::default(), FirstTie).unwrap();
        assert_eq!(strategist.best_move(&full, Player::X), None);

        let open = BoardModel::new(3).unwrap();
        let stranger = Player::new(1, Token::X).unwrap();
        assert_eq!(strategist.best_move(&open, stranger), None);
    }

    #[test]
    fn repeated_calls_pick_the_same_move() {
        let empty = BoardModel::new(3).unwrap();
        let config = StrategistConfig::default().with_depth(1).with_seed(5);
        let mut strategist = MinmaxStrategist::from_config(config).unwrap();

        let picks: Vec<Move> = (0..6)
            .map(|_| strategist.best_move(&empty, Player::X).unwrap())
            .collect();
        assert!(picks.iter().all(|mv| *mv == picks[0]), "{picks:?}");

        // Another position in between does not shift the next draw.
        let other = board("X../.../...", Player::O);
        strategist.best_move(&other, Player::O).unwrap();
        assert_eq!(strategist.best_move(&empty, Player::X), Some(picks[0]));
    }

    #[test]
    fn no_move_once_the_game_is_won() {
        let won = board("XXX/OO./...", Player::X);
        let mut strategist = MinmaxStrategist::new(StrategistConfig::default(), FirstTie).unwrap();
        assert_eq!(strategist.best_move(&won, Player::X), None);
        assert_eq!(strategist.best_move(&won, Player::O), None);
        assert!(strategist.score_moves(&won, Player::X).is_empty());
    }

    #[test]
    fn win_value_keeps_its_sign_at_any_depth() {
        let won = board("XXX/OO./...", Player::O);
        let value = |player, ply| static_value::<BoardModel, Move, Player>(&won, player, ply);
        assert_eq!(value(Player::X, 0), WIN_VALUE);
        assert_eq!(value(Player::X, 5_000), 1);
        assert_eq!(value(Player::O, 5_000), -1);
        assert_eq!(value(Player::O, usize::MAX), -1);
    }

    #[test]
    fn searches_for_the_player_not_on_turn() {
        let b = board("XX./OO./...", Player::X);
        let mut strategist = MinmaxStrategist::new(StrategistConfig::default(), FirstTie).unwrap();

        let best = strategist.best_move(&b, Player::O).unwrap();
        assert_eq!(best.coordinate(), (2, 1));
        assert_eq!(b.active_player(), Player::X, "the caller's board is untouched");
    }

    #[test]
    fn pruning_keeps_the_same_tie_set() {
        let b = board("X../.O./...", Player::X);
        let pruned = MinmaxStrategist::new(StrategistConfig::default(), FirstTie).unwrap();
        let full = MinmaxStrategist::new(
            StrategistConfig::default().with_alpha_beta(false),
            FirstTie,
        )
        .unwrap();

        assert_eq!(pruned.score_moves(&b, Player::X), full.score_moves(&b, Player::X));

        let mut pruned_nodes = 0;
        let mut full_nodes = 0;
        let (root, moves) = search_root(&b, Player::X).unwrap();
        let narrowed = pruned.score_candidates(&root, Player::X, moves.clone(), true, &mut pruned_nodes);
        let exact = full.score_candidates(&root, Player::X, moves, true, &mut full_nodes);

        let best = exact.iter().map(|(_, v)| *v).max().unwrap();
        let ties = |scored: &[(Move, i32)]| -> Vec<Move> {
            scored.iter().filter(|(_, v)| *v == best).map(|(m, _)| *m).collect()
        };
        assert_eq!(ties(&narrowed[..]), ties(&exact[..]));
        assert!(pruned_nodes < full_nodes);
    }
}
