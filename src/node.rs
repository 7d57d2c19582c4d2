//! Game tree built from a real position

use rayon::prelude::*;

use crate::board::{Board, Player};

/// A hypothetical position reached from the root by a sequence of moves
///
/// Each node owns its children, one per legal move in increasing column
/// order. The score is only set once the node has been evaluated or searched.
#[derive(Clone, Debug)]
pub struct Node {
    board: Board,
    // 0-indexed column of the move that created this node, `None` for the root
    move_column: Option<usize>,
    to_move: Player,
    pub(crate) score: Option<i32>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Creates a root node holding the real board, with `to_move` to play next
    pub fn root(board: Board, to_move: Player) -> Self {
        Self {
            board,
            move_column: None,
            to_move,
            score: None,
            children: Vec::new(),
        }
    }

    fn child(&self, column: usize) -> Self {
        let mut board = self.board.clone();
        board.play(column, self.to_move);

        Self {
            board,
            move_column: Some(column),
            to_move: self.to_move.opponent(),
            score: None,
            children: Vec::new(),
        }
    }

    /// Grows the tree below this node until it is `depth` plies deep
    ///
    /// Decided positions are never expanded. Existing children are kept and
    /// deepened, so repeated calls only ever add nodes.
    pub fn expand(&mut self, depth: usize) {
        if depth == 0 || self.is_terminal() {
            return;
        }

        if self.children.is_empty() {
            let children: Vec<Node> = self
                .board
                .legal_moves()
                .map(|column| self.child(column))
                .collect();
            self.children = children;
        }

        self.children
            .par_iter_mut()
            .for_each(|child| child.expand(depth - 1));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_column(&self) -> Option<usize> {
        self.move_column
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The cached evaluation or search score, `None` until the node is visited
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The visited child with the greatest score, leftmost on ties
    pub fn best_child(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for child in self.children.iter() {
            let score = match child.score {
                Some(score) => score,
                // pruned before it was searched
                None => continue,
            };
            match best.and_then(|node| node.score) {
                Some(best_score) if score <= best_score => (),
                _ => best = Some(child),
            }
        }
        best
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Number of nodes in this subtree, including this one
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Length of the longest path below this node
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
