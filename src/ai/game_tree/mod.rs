pub mod node;
pub mod score;

use petgraph::prelude::*;
use petgraph::visit::Dfs;

use crate::ai::game_tree::node::SearchTreeNode;
use crate::ai::game_tree::score::CandidateScore;
use crate::ai::minimax::static_value;
use crate::{Action, Adversary, GameState};

/// A fully expanded minimax search, kept as a graph for inspection.
///
/// Nodes hold the explored positions with their backed-up values, edges are
/// the moves leading from parent to child. Nothing is pruned, so the tree grows
/// as `O(b^d)`; keep the depth small.
pub struct SearchTree<S, A, P> where S: GameState<A, P>, A: Action, P: Adversary {
    root_node_idx: NodeIndex,
    perspective_player: P,
    graph: Graph<SearchTreeNode<S, A, P>, A, Directed>,
}

impl<S, A, P> SearchTree<S, A, P> where S: GameState<A, P>, A: Action, P: Adversary {
    /// Expands `state` to `max_depth` plies. `state` must have
    /// `perspective_player` to move.
    pub fn build(state: S, perspective_player: P, max_depth: usize) -> Self {
        let mut graph: Graph<SearchTreeNode<S, A, P>, A, Directed> = Graph::new();
        let root_node_idx = graph.add_node(SearchTreeNode::new(state, 0));
        let mut tree = Self {
            root_node_idx,
            perspective_player,
            graph,
        };
        tree.expand(root_node_idx, max_depth);
        tree
    }

    pub fn root(&self) -> &SearchTreeNode<S, A, P> {
        &self.graph[self.root_node_idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Expands a node and returns its backed-up value.
    ///
    /// The root is always expanded; any other terminal position is a leaf.
    fn expand(&mut self, node_idx: NodeIndex, depth_remaining: usize) -> i32 {
        let node = &self.graph[node_idx];
        let ply = node.ply;
        let leaf_value = static_value(&node.state, self.perspective_player, ply);

        if depth_remaining == 0 || (!node.is_root() && node.state.is_terminal()) {
            self.graph[node_idx].value = leaf_value;
            return leaf_value;
        }

        let mover = node.state.active_player();
        let children: Vec<(A, S)> = match node.state.legal_moves(mover) {
            Ok(actions) => actions
                .into_iter()
                .map(|action| {
                    let mut state = node.state.copy();
                    state.apply(&action);
                    (action, state)
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        let maximizing = mover == self.perspective_player;
        let mut best: Option<i32> = None;

        for (action, state) in children {
            let child_idx = self.graph.add_node(SearchTreeNode::new(state, ply + 1));
            self.graph.add_edge(node_idx, child_idx, action);

            let value = self.expand(child_idx, depth_remaining - 1);
            best = Some(match best {
                None => value,
                Some(b) if maximizing => b.max(value),
                Some(b) => b.min(value),
            });
        }

        let value = best.unwrap_or(leaf_value);
        self.graph[node_idx].value = value;
        value
    }

    fn subtree_size(&self, node_idx: NodeIndex) -> usize {
        let mut dfs = Dfs::new(&self.graph, node_idx);
        let mut count = 0;
        while dfs.next(&self.graph).is_some() {
            count += 1;
        }
        count
    }

    /// The root's candidate moves with their values, in generation order.
    pub fn root_scores(&self) -> Vec<CandidateScore<A, P>> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(self.root_node_idx, Outgoing)
            .collect();
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .map(|edge| CandidateScore {
                action: edge.weight().clone(),
                player: self.perspective_player,
                value: self.graph[edge.target()].value,
                subtree_size: self.subtree_size(edge.target()),
            })
            .collect()
    }

    /// Every root move that reaches the root's value.
    pub fn best_moves(&self) -> Vec<A> {
        let best = self.root().value;
        self.root_scores()
            .into_iter()
            .filter(|score| score.value == best)
            .map(|score| score.action)
            .collect()
    }

    /// The line of play both sides follow under minimax, first choice on ties.
    pub fn principal_variation(&self) -> Vec<A> {
        let mut line = Vec::new();
        let mut current = self.root_node_idx;

        loop {
            let value = self.graph[current].value;
            let mut edges: Vec<_> = self.graph.edges_directed(current, Outgoing).collect();
            edges.sort_by_key(|edge| edge.id());

            let Some(edge) = edges
                .into_iter()
                .find(|edge| self.graph[edge.target()].value == value)
            else {
                break;
            };
            line.push(edge.weight().clone());
            current = edge.target();
        }

        line
    }
}
