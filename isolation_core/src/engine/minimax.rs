use crate::engine::clock::SearchClock;
use crate::engine::search::{expand, Expansion};
use crate::engine::{Evaluator, GameState, Player, SearchControl, SearchResult, Searcher};

/// Exhaustive depth-limited minimax. Explores every node `AlphaBetaEngine`
/// would, plus the ones it prunes; same move, same score.
pub struct MinimaxEngine<E> {
    player: Player,
    evaluator: E,
    clock: SearchClock,
    nodes_searched: u64,
}

impl<E> MinimaxEngine<E> {
    pub fn new(player: Player, evaluator: E) -> Self {
        Self {
            player,
            evaluator,
            clock: SearchClock::unbounded(),
            nodes_searched: 0,
        }
    }

    fn value<S>(&mut self, state: &S, depth: u8, maximizing: bool) -> Option<f64>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.nodes_searched += 1;
        if self.clock.expired(self.nodes_searched) {
            return None;
        }

        let actions = match expand(state, depth, self.player, &self.evaluator) {
            Expansion::Leaf(score) => return Some(score),
            Expansion::Children(actions) => actions,
        };

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for action in actions {
            let v = self.value(&state.result(action), depth - 1, !maximizing)?;
            best = if maximizing { best.max(v) } else { best.min(v) };
        }
        Some(best)
    }
}

impl<E> SearchControl for MinimaxEngine<E> {
    fn start_turn(&mut self, clock: SearchClock) {
        self.clock = clock;
        self.nodes_searched = 0;
    }

    fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl<S, E> Searcher<S> for MinimaxEngine<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn search(&mut self, state: &S, depth: u8) -> Option<SearchResult<S::Action>> {
        if depth == 0 {
            return Some(SearchResult {
                best_move: None,
                score: self.evaluator.evaluate(state),
            });
        }

        let mut best = SearchResult {
            best_move: None,
            score: f64::NEG_INFINITY,
        };
        for action in state.actions() {
            let score = self.value(&state.result(action), depth - 1, false)?;
            if score > best.score || best.best_move.is_none() {
                best = SearchResult {
                    best_move: Some(action),
                    score,
                };
            }
        }
        if best.best_move.is_none() {
            best.score = state.utility(self.player);
        }
        Some(best)
    }
}
