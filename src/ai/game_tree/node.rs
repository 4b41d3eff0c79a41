use std::marker::PhantomData;
use crate::{Action, Adversary, GameState};

pub struct SearchTreeNode<S, A, P> where S: GameState<A, P>, A: Action, P: Adversary {
    pub state: S,
    /// Plies below the search root.
    pub ply: usize,
    /// Minimax value from the searching player's side.
    pub value: i32,
    _phantom_data: PhantomData<(A, P)>,
}

impl<S, A, P> SearchTreeNode<S, A, P> where S: GameState<A, P>, A: Action, P: Adversary {
    pub fn new(state: S, ply: usize) -> Self {
        Self {
            state,
            ply,
            value: 0,
            _phantom_data: Default::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.ply == 0
    }
}
