//! An agent choosing moves by minimax search over a game tree

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use rayon::prelude::*;

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use crate::{
    board::{Board, Player},
    evaluation::{evaluate, LOSS_SCORE, WIN_SCORE},
    node::Node,
    SEARCH_DEPTH,
};

// no i32 score widens to this
const PENDING: i64 = i64::MIN;

/// Scores of the children of one node, published as each child search completes
///
/// A child only tightens its window with the scores of siblings to its left,
/// which keeps the chosen move independent of the order threads finish in.
struct SiblingScores {
    scores: Vec<AtomicI64>,
}

impl SiblingScores {
    fn new(len: usize) -> Self {
        Self {
            scores: (0..len).map(|_| AtomicI64::new(PENDING)).collect(),
        }
    }

    fn publish(&self, index: usize, score: i32) {
        self.scores[index].store(score as i64, Ordering::Release);
    }

    fn completed(&self, end: usize) -> impl Iterator<Item = i32> + '_ {
        self.scores[..end].iter().filter_map(|score| {
            match score.load(Ordering::Acquire) {
                PENDING => None,
                score => Some(score as i32),
            }
        })
    }

    /// The alpha-beta window for the child at `index`
    fn window(&self, index: usize, mut alpha: i32, mut beta: i32, maximizing: bool) -> (i32, i32) {
        for score in self.completed(index) {
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
        (alpha, beta)
    }

    fn best(&self, maximizing: bool) -> i32 {
        let end = self.scores.len();
        if maximizing {
            self.completed(end).fold(LOSS_SCORE, i32::max)
        } else {
            self.completed(end).fold(WIN_SCORE, i32::min)
        }
    }
}

/// An agent that picks moves for [`Player::Engine`]
///
/// # Notes
/// Every decision builds a fresh game tree from the given board, `depth`
/// plies deep, and searches it with minimax and alpha-beta pruning. The
/// children of each node are searched in parallel on the rayon thread pool.
///
/// # Position Scoring
/// Leaves are scored by [`evaluate`]: positive scores favour the engine,
/// negative scores the opponent, with won and lost positions at the
/// extremes of `i32`.
pub struct Engine {
    depth: usize,
    node_count: AtomicUsize,
}

impl Engine {
    /// Creates a new `Engine` searching [`SEARCH_DEPTH`] plies
    pub fn new() -> Self {
        Self::with_depth(SEARCH_DEPTH)
    }

    /// Creates a new `Engine` searching `depth` plies
    ///
    /// A depth of 0 behaves like 1: every legal move is still evaluated.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            node_count: AtomicUsize::new(0),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of nodes visited by the most recent search (for diagnostics only)
    pub fn node_count(&self) -> usize {
        self.node_count.load(Ordering::Relaxed)
    }

    /// Builds the game tree for the engine's next move
    pub fn build_tree(&self, board: &Board) -> Node {
        let mut root = Node::root(board.clone(), Player::Engine);
        root.expand(self.search_depth());
        root
    }

    fn search_depth(&self) -> usize {
        self.depth.max(1)
    }

    /// Performs minimax search with alpha-beta pruning
    ///
    /// Returns the score of `node` with `side` to move, caching it and the
    /// scores of every visited descendant in the tree. Children left out by
    /// pruning keep no score.
    pub fn search(&self, node: &mut Node, depth: usize, alpha: i32, beta: i32, side: Player) -> i32 {
        self.node_count.fetch_add(1, Ordering::Relaxed);

        // a non-terminal node without children was not expanded this deep
        if depth == 0 || node.is_terminal() || node.children.is_empty() {
            let score = evaluate(node.board());
            node.score = Some(score);
            return score;
        }

        let maximizing = side == Player::Engine;
        let siblings = SiblingScores::new(node.children.len());

        node.children
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, child)| {
                let (alpha, beta) = siblings.window(index, alpha, beta, maximizing);
                // the other side already has a better alternative
                if index > 0 && beta <= alpha {
                    return;
                }
                let score = self.search(child, depth - 1, alpha, beta, side.opponent());
                siblings.publish(index, score);
            });

        let best = siblings.best(maximizing);
        node.score = Some(best);
        best
    }

    /// Chooses the engine's move in the given position
    ///
    /// Returns the 1-indexed column to play, or an error if the game is
    /// already over.
    pub fn choose_move(&self, board: &Board) -> Result<usize> {
        if board.is_terminal() || board.legal_moves().next().is_none() {
            warn!("move requested for a finished game:\n{}", board);
            return Err(anyhow!("No legal move, the game is over"));
        }

        self.node_count.store(0, Ordering::Relaxed);
        let depth = self.search_depth();

        let mut root = self.build_tree(board);
        debug!("built a tree of {} nodes, {} plies deep", root.size(), root.depth());

        let score = self.search(&mut root, depth, LOSS_SCORE, WIN_SCORE, Player::Engine);
        for child in root.children() {
            if let Some(column) = child.move_column() {
                debug!("column {}: {:?}", column + 1, child.score());
            }
        }

        let column = root
            .best_child()
            .and_then(Node::move_column)
            .ok_or_else(|| anyhow!("No legal move, the game is over"))?;

        info!(
            "playing column {} with score {} after visiting {} nodes",
            column + 1,
            score,
            self.node_count()
        );
        Ok(column + 1)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
