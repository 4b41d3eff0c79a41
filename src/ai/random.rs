use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Action, Adversary, GameState, Outcome, Strategist};

/// Picks a uniformly random legal move. Useful as a baseline opponent.
#[derive(Debug, Clone)]
pub struct RandomStrategist<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomStrategist<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<S, A, P, R> Strategist<S, A, P> for RandomStrategist<R>
where
    S: GameState<A, P>,
    A: Action,
    P: Adversary,
    R: Rng,
{
    fn best_move(&mut self, state: &S, player: P) -> Option<A> {
        let actions = state.legal_moves(player).ok()?;
        actions.choose(&mut self.rng).cloned()
    }
}

/// Plays random moves from `game` until the game ends.
///
/// Returns `None` if a non-terminal position offers no move.
pub fn random_playout<R, S, A, P>(game: &S, rng: &mut R) -> Option<Outcome<P>>
where
    R: Rng + ?Sized,
    S: GameState<A, P>,
    A: Action,
    P: Adversary,
{
    let mut game = game.copy();

    loop {
        if let Some(outcome) = game.outcome() {
            return Some(outcome);
        }

        let actions = game.legal_moves(game.active_player()).ok()?;
        let action = actions.choose(rng)?;
        game.apply(action);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{BoardModel, Player};

    #[test]
    fn random_moves_are_legal() {
        let board = BoardModel::parse("XO./.X./O..", Player::O).unwrap();
        let mut strategist = RandomStrategist::new(StdRng::seed_from_u64(3));

        for _ in 0..20 {
            let mv = strategist.best_move(&board, Player::O).unwrap();
            let (x, y) = mv.coordinate();
            assert_eq!(board.value_at(x, y), Ok(crate::Token::Empty));
        }
    }

    #[test]
    fn stepping_rng_takes_first_move() {
        let board = BoardModel::parse("XO./.../...", Player::X).unwrap();
        let mut strategist = RandomStrategist::new(StepRng::new(0, 0));
        let mv = strategist.best_move(&board, Player::X).unwrap();
        assert_eq!(mv.coordinate(), (2, 0));
    }

    #[test]
    fn playout_reaches_an_outcome() {
        let board = BoardModel::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            assert!(random_playout(&board, &mut rng).is_some());
        }
        assert_eq!(board.occupied_count(), 0);
    }
}
