use crate::engine::{Evaluator, GameState, Player};
use crate::logic::board::{distance, Cell, CENTER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scoring policy, fixed when the evaluator is built.
///
/// Every policy starts from the mobility difference (own liberties minus
/// opponent liberties) and adds at most one positional term measured as
/// Euclidean distance on the decoded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Mobility difference only.
    #[default]
    Mobility,
    /// Penalises distance from the board centre.
    Centrality,
    /// Penalises distance to the opponent.
    Aggressive,
    /// Rewards distance from the opponent.
    Evasive,
}

impl Heuristic {
    pub const ALL: [Self; 4] = [
        Self::Mobility,
        Self::Centrality,
        Self::Aggressive,
        Self::Evasive,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mobility => "mobility",
            Self::Centrality => "centrality",
            Self::Aggressive => "aggressive",
            Self::Evasive => "evasive",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown heuristic '{s}'"))
    }
}

/// Static evaluator scoring states for one fixed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicEvaluator {
    heuristic: Heuristic,
    player: Player,
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(heuristic: Heuristic, player: Player) -> Self {
        Self { heuristic, player }
    }

    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }
}

impl<S: GameState> Evaluator<S> for HeuristicEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        let own = state.loc(self.player);
        let opp = state.loc(self.player.opponent());
        let score = mobility(state, self.player);

        match self.heuristic {
            Heuristic::Mobility => score,
            Heuristic::Centrality => score - own.map_or(0.0, center_distance),
            Heuristic::Aggressive => score - token_distance(own, opp),
            Heuristic::Evasive => score + token_distance(own, opp),
        }
    }
}

/// Own liberties minus opponent liberties.
#[allow(clippy::cast_precision_loss)]
pub fn mobility<S: GameState>(state: &S, player: Player) -> f64 {
    let own = state.liberties(state.loc(player)).len();
    let opp = state.liberties(state.loc(player.opponent())).len();
    own as f64 - opp as f64
}

fn center_distance(cell: Cell) -> f64 {
    distance(cell.coords(), CENTER)
}

// Zero until both tokens are on the board.
fn token_distance(own: Option<Cell>, opp: Option<Cell>) -> f64 {
    match (own, opp) {
        (Some(a), Some(b)) => a.distance(b),
        _ => 0.0,
    }
}
