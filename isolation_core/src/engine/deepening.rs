use crate::engine::clock::SearchClock;
use crate::engine::config::AgentConfig;
use crate::engine::{ActionSink, GameState, SearchStats, Searcher};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

/// Anytime driver around a depth-limited searcher.
///
/// Searches depth 1, 2, ... up to the configured ceiling and publishes the
/// best move of every pass that ran to completion, so the sink always holds
/// the result of the deepest finished pass. A pass cut off by the clock is
/// dropped: a half-searched alpha-beta tree says nothing reliable about the
/// root.
pub struct IterativeDeepening<T> {
    searcher: T,
    max_depth: u8,
    random_opening: bool,
    rng: StdRng,
}

impl<T> IterativeDeepening<T> {
    pub fn new(searcher: T, config: &AgentConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            searcher,
            max_depth: config.depth_ceiling(),
            random_opening: config.random_opening,
            rng,
        }
    }

    pub const fn searcher(&self) -> &T {
        &self.searcher
    }

    /// Plays one turn. Returns the statistics of the deepest completed pass
    /// (depth 0 when no pass completed or the opening move was random).
    pub fn run<S, K>(&mut self, state: &S, clock: SearchClock, sink: &K) -> SearchStats
    where
        S: GameState,
        T: Searcher<S>,
        K: ActionSink<S::Action> + ?Sized,
    {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        // Nothing to learn from searching the empty board.
        if self.random_opening && state.ply_count() == 0 {
            if let Some(&action) = state.actions().choose(&mut self.rng) {
                log::trace!("Opening with random move {action:?}");
                sink.publish(action);
            }
            return stats;
        }

        self.searcher.start_turn(clock);
        for depth in 1..=self.max_depth {
            let Some(result) = self.searcher.search(state, depth) else {
                log::debug!("Depth {depth} interrupted, keeping depth {}", stats.depth);
                break;
            };
            let Some(action) = result.best_move else {
                break;
            };
            sink.publish(action);
            stats.depth = depth;
            stats.nodes = self.searcher.nodes_searched();
            log::debug!(
                "Depth {depth}: best {action:?}, score {}, nodes {}",
                result.score,
                stats.nodes
            );
        }

        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        stats
    }
}
