pub mod game_tree;
pub mod minimax;
pub mod random;
pub mod random_source;
