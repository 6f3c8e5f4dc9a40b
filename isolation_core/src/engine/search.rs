use crate::engine::clock::SearchClock;
use crate::engine::eval::{Heuristic, HeuristicEvaluator};
use crate::engine::{Evaluator, GameState, Player, SearchControl, SearchResult, Searcher};

/// How a node is scored: directly, or by recursing into its actions.
pub(crate) enum Expansion<A> {
    Leaf(f64),
    Children(Vec<A>),
}

/// Terminal positions are scored by utility before the depth cutoff is
/// looked at, so wins and losses never reach the heuristic.
pub(crate) fn expand<S, E>(
    state: &S,
    depth: u8,
    player: Player,
    evaluator: &E,
) -> Expansion<S::Action>
where
    S: GameState,
    E: Evaluator<S>,
{
    if state.terminal_test() {
        return Expansion::Leaf(state.utility(player));
    }
    if depth == 0 {
        return Expansion::Leaf(evaluator.evaluate(state));
    }
    let actions = state.actions();
    if actions.is_empty() {
        // Inconsistent state: no actions but not terminal. Score it as over.
        return Expansion::Leaf(state.utility(player));
    }
    Expansion::Children(actions)
}

/// Depth-limited fail-soft alpha-beta search for a fixed player.
pub struct AlphaBetaEngine<E> {
    player: Player,
    evaluator: E,
    clock: SearchClock,
    nodes_searched: u64,
}

impl AlphaBetaEngine<HeuristicEvaluator> {
    #[must_use]
    pub fn with_heuristic(heuristic: Heuristic, player: Player) -> Self {
        Self::new(player, HeuristicEvaluator::new(heuristic, player))
    }
}

impl<E> AlphaBetaEngine<E> {
    pub fn new(player: Player, evaluator: E) -> Self {
        Self {
            player,
            evaluator,
            clock: SearchClock::unbounded(),
            nodes_searched: 0,
        }
    }

    pub const fn player(&self) -> Player {
        self.player
    }

    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    fn max_value<S>(&mut self, state: &S, mut alpha: f64, beta: f64, depth: u8) -> Option<f64>
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

        let mut value = f64::NEG_INFINITY;
        for action in actions {
            value = value.max(self.min_value(&state.result(action), alpha, beta, depth - 1)?);
            if value >= beta {
                return Some(value);
            }
            alpha = alpha.max(value);
        }
        Some(value)
    }

    fn min_value<S>(&mut self, state: &S, alpha: f64, mut beta: f64, depth: u8) -> Option<f64>
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

        let mut value = f64::INFINITY;
        for action in actions {
            value = value.min(self.max_value(&state.result(action), alpha, beta, depth - 1)?);
            // The maximiser already has something at least this good elsewhere.
            if value <= alpha {
                return Some(value);
            }
            beta = beta.min(value);
        }
        Some(value)
    }
}

impl<E> SearchControl for AlphaBetaEngine<E> {
    fn start_turn(&mut self, clock: SearchClock) {
        self.clock = clock;
        self.nodes_searched = 0;
    }

    fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl<S, E> Searcher<S> for AlphaBetaEngine<E>
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

        let actions = state.actions();
        if actions.is_empty() {
            return Some(SearchResult {
                best_move: None,
                score: state.utility(self.player),
            });
        }

        // Root is unbounded above; alpha tightens as siblings improve on it.
        let beta = f64::INFINITY;
        let mut alpha = f64::NEG_INFINITY;
        let mut best = SearchResult {
            best_move: None,
            score: f64::NEG_INFINITY,
        };

        for action in actions {
            let score = self.min_value(&state.result(action), alpha, beta, depth - 1)?;
            // Strictly greater keeps the first of equal moves. The first move
            // is always taken so a lost position still yields a legal move.
            if score > best.score || best.best_move.is_none() {
                best = SearchResult {
                    best_move: Some(action),
                    score,
                };
                alpha = alpha.max(score);
            }
        }
        Some(best)
    }
}
