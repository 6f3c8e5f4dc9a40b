use crate::engine::clock::SearchClock;
use crate::engine::config::AgentConfig;
use crate::engine::deepening::IterativeDeepening;
use crate::engine::eval::{Heuristic, HeuristicEvaluator};
use crate::engine::minimax::MinimaxEngine;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{ActionSink, GameState, Player, SearchControl, SearchStats, Searcher};
use crate::logic::board::Cell;
use crate::logic::game::Isolation;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Depth of the sample minimax opponent.
pub const MINIMAX_DEPTH: u8 = 3;

/// Anything that can take a seat in a match.
///
/// `get_action` must publish at least one legal action before the clock
/// runs out; only the last one published in time counts.
pub trait IsolationPlayer: Send {
    fn name(&self) -> &'static str;

    fn get_action(&mut self, state: &Isolation, clock: SearchClock, sink: &dyn ActionSink<Cell>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Random,
    Greedy,
    Minimax,
    AlphaBeta,
}

impl PlayerKind {
    pub const ALL: [Self; 4] = [Self::Random, Self::Greedy, Self::Minimax, Self::AlphaBeta];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alpha_beta",
        }
    }

    /// Seats a fresh player of this kind. Only the alpha-beta agent reads
    /// the heuristic and depth settings; every kind honours the seed.
    #[must_use]
    pub fn build(self, player: Player, config: &AgentConfig) -> Box<dyn IsolationPlayer> {
        match self {
            Self::Random => Box::new(RandomPlayer::new(config.seed)),
            Self::Greedy => Box::new(GreedyPlayer::new(player)),
            Self::Minimax => Box::new(MinimaxPlayer::new(player, config.seed)),
            Self::AlphaBeta => Box::new(AlphaBetaPlayer::new(player, config)),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown player '{s}'"))
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: rng_from(seed) }
    }
}

impl IsolationPlayer for RandomPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::Random.name()
    }

    fn get_action(&mut self, state: &Isolation, _clock: SearchClock, sink: &dyn ActionSink<Cell>) {
        if let Some(&action) = state.actions().choose(&mut self.rng) {
            sink.publish(action);
        }
    }
}

/// Takes whichever move leaves its own token the most jumps.
pub struct GreedyPlayer {
    player: Player,
}

impl GreedyPlayer {
    #[must_use]
    pub const fn new(player: Player) -> Self {
        Self { player }
    }
}

impl IsolationPlayer for GreedyPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::Greedy.name()
    }

    fn get_action(&mut self, state: &Isolation, _clock: SearchClock, sink: &dyn ActionSink<Cell>) {
        let mut best: Option<(Cell, usize)> = None;
        for action in state.actions() {
            let next = state.result(action);
            let score = next.liberties(next.loc(self.player)).len();
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((action, score));
            }
        }
        if let Some((action, _)) = best {
            sink.publish(action);
        }
    }
}

/// Fixed-depth minimax on the mobility difference. Opens at random.
pub struct MinimaxPlayer {
    engine: MinimaxEngine<HeuristicEvaluator>,
    rng: StdRng,
}

impl MinimaxPlayer {
    #[must_use]
    pub fn new(player: Player, seed: Option<u64>) -> Self {
        Self {
            engine: MinimaxEngine::new(
                player,
                HeuristicEvaluator::new(Heuristic::Mobility, player),
            ),
            rng: rng_from(seed),
        }
    }
}

impl IsolationPlayer for MinimaxPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::Minimax.name()
    }

    fn get_action(&mut self, state: &Isolation, clock: SearchClock, sink: &dyn ActionSink<Cell>) {
        if state.ply_count < 2 {
            if let Some(&action) = state.actions().choose(&mut self.rng) {
                sink.publish(action);
            }
            return;
        }
        self.engine.start_turn(clock);
        if let Some(action) = self
            .engine
            .search(state, MINIMAX_DEPTH)
            .and_then(|result| result.best_move)
        {
            sink.publish(action);
        }
    }
}

/// The search agent: iterative deepening over alpha-beta.
pub struct AlphaBetaPlayer {
    driver: IterativeDeepening<AlphaBetaEngine<HeuristicEvaluator>>,
    last_stats: SearchStats,
}

impl AlphaBetaPlayer {
    #[must_use]
    pub fn new(player: Player, config: &AgentConfig) -> Self {
        let engine = AlphaBetaEngine::with_heuristic(config.heuristic, player);
        Self {
            driver: IterativeDeepening::new(engine, config),
            last_stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub const fn last_stats(&self) -> SearchStats {
        self.last_stats
    }
}

impl IsolationPlayer for AlphaBetaPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::AlphaBeta.name()
    }

    fn get_action(&mut self, state: &Isolation, clock: SearchClock, sink: &dyn ActionSink<Cell>) {
        self.last_stats = self.driver.run(state, clock, sink);
        log::debug!(
            "{:?} searched to depth {} ({} nodes, {} ms)",
            self.driver.searcher().player(),
            self.last_stats.depth,
            self.last_stats.nodes,
            self.last_stats.time_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Board;
    use std::sync::mpsc;

    fn cell(x: u8, y: u8) -> Cell {
        Cell::new(x, y).unwrap()
    }

    fn ask(player: &mut dyn IsolationPlayer, state: &Isolation) -> Vec<Cell> {
        let (tx, rx) = mpsc::channel();
        player.get_action(state, SearchClock::unbounded(), &tx);
        rx.try_iter().collect()
    }

    fn midgame() -> Isolation {
        Isolation::new()
            .result(cell(0, 0))
            .result(cell(10, 8))
            .result(cell(2, 1))
            .result(cell(8, 7))
    }

    #[test]
    fn test_every_kind_publishes_a_legal_move() {
        let config = AgentConfig {
            max_depth: 3,
            seed: Some(1),
            ..AgentConfig::default()
        };
        for state in [Isolation::new(), midgame()] {
            for kind in PlayerKind::ALL {
                let mut player = kind.build(state.player(), &config);
                let published = ask(player.as_mut(), &state);
                assert!(!published.is_empty(), "{kind}");
                assert!(published.iter().all(|a| state.actions().contains(a)), "{kind}");
            }
        }
    }

    #[test]
    fn test_greedy_prefers_open_squares() {
        // First at (0, 0) may go to (1, 2) or (2, 1). Both see five jumps on
        // an open board, so the first one wins the tie.
        let state = Isolation::new().result(cell(0, 0)).result(cell(10, 8));
        let mut greedy = GreedyPlayer::new(Player::First);
        assert_eq!(ask(&mut greedy, &state), vec![cell(1, 2)]);

        // With (3, 3) and (2, 4) closed, (2, 1) keeps four jumps against three.
        let open = Board::new()
            .open_cells()
            .filter(|&c| c != cell(3, 3) && c != cell(2, 4));
        let state = Isolation::custom(open, [Some(cell(0, 0)), Some(cell(10, 8))], 2);
        assert_eq!(ask(&mut greedy, &state), vec![cell(2, 1)]);
    }

    #[test]
    fn test_alpha_beta_records_stats() {
        let config = AgentConfig {
            max_depth: 2,
            ..AgentConfig::default()
        };
        let state = midgame();
        let mut agent = AlphaBetaPlayer::new(state.player(), &config);
        let published = ask(&mut agent, &state);
        assert_eq!(published.len(), 2);
        assert_eq!(agent.last_stats().depth, 2);
    }

    #[test]
    fn test_kind_names_parse() {
        for kind in PlayerKind::ALL {
            assert_eq!(kind.name().parse::<PlayerKind>(), Ok(kind));
        }
        assert_eq!("alpha-beta".parse::<PlayerKind>(), Ok(PlayerKind::AlphaBeta));
        assert!("human".parse::<PlayerKind>().is_err());
    }
}
