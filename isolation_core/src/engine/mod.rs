use crate::engine::clock::SearchClock;
use crate::logic::board::Cell;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::mpsc::Sender;

pub mod clock;
pub mod config;
pub mod deepening;
pub mod eval;
pub mod minimax;
pub mod search;

#[cfg(test)]
mod test_support;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// Player whose turn it is after `ply_count` half-moves.
    #[must_use]
    pub const fn to_move(ply_count: u32) -> Self {
        if ply_count % 2 == 0 {
            Self::First
        } else {
            Self::Second
        }
    }
}

/// Read-only view of one ply of a two-player game.
///
/// Implementations are immutable values: `result` builds a successor and
/// never touches the receiver. `utility` is only asked for once
/// `terminal_test` holds.
pub trait GameState {
    type Action: Copy + Eq + Debug;

    /// Legal actions for the player to move, in a stable order.
    fn actions(&self) -> Vec<Self::Action>;

    #[must_use]
    fn result(&self, action: Self::Action) -> Self
    where
        Self: Sized;

    /// True iff the player to move has no legal action.
    fn terminal_test(&self) -> bool;

    /// Terminal payoff from `player`'s point of view.
    fn utility(&self, player: Player) -> f64;

    /// Current cell of `player`'s token, `None` before it is placed.
    fn loc(&self, player: Player) -> Option<Cell>;

    /// Cells reachable in one move from `loc`.
    fn liberties(&self, loc: Option<Cell>) -> Vec<Cell>;

    fn ply_count(&self) -> u32;
}

/// Outcome of one completed depth-limited pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<A> {
    pub best_move: Option<A>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

pub trait Evaluator<S: GameState> {
    fn evaluate(&self, state: &S) -> f64;
}

/// Per-turn bookkeeping shared by every searcher, independent of the game.
pub trait SearchControl {
    /// Resets per-turn counters and installs the clock polled during search.
    fn start_turn(&mut self, clock: SearchClock);

    fn nodes_searched(&self) -> u64;
}

pub trait Searcher<S: GameState>: SearchControl {
    /// Searches exactly `depth` plies. Returns `None` when the clock cut the
    /// pass off; a partial pass carries no usable result.
    fn search(&mut self, state: &S, depth: u8) -> Option<SearchResult<S::Action>>;
}

/// Where a player reports its current choice. Later publishes overwrite
/// earlier ones.
pub trait ActionSink<A> {
    fn publish(&self, action: A);
}

impl<A> ActionSink<A> for Sender<A> {
    fn publish(&self, action: A) {
        if self.send(action).is_err() {
            log::debug!("Action receiver dropped, turn already closed");
        }
    }
}
