use crate::{Action, Adversary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore<A, P> where A: Action, P: Adversary {
    pub action: A,
    pub player: P,
    pub value: i32,
    /// Positions explored below this candidate, itself included.
    pub subtree_size: usize,
}
