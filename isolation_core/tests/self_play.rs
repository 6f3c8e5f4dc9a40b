use isolation_core::engine::clock::SearchClock;
use isolation_core::engine::config::AgentConfig;
use isolation_core::engine::eval::Heuristic;
use isolation_core::engine::search::AlphaBetaEngine;
use isolation_core::engine::{GameState, Player, Searcher};
use isolation_core::logic::board::Cell;
use isolation_core::logic::game::Isolation;
use isolation_core::players::{IsolationPlayer, PlayerKind};
use std::sync::mpsc;

fn last_action(player: &mut dyn IsolationPlayer, state: &Isolation) -> Option<Cell> {
    let (tx, rx) = mpsc::channel();
    player.get_action(state, SearchClock::unbounded(), &tx);
    rx.try_iter().last()
}

/// Plays a full game without a clock and returns the move list and winner.
fn play_out(first: PlayerKind, second: PlayerKind, config: &AgentConfig) -> (Vec<Cell>, Player) {
    let mut seats = [
        first.build(Player::First, config),
        second.build(Player::Second, config),
    ];
    let mut state = Isolation::new();
    let mut moves = Vec::new();
    while !state.terminal_test() {
        let seat = &mut seats[state.player().index()];
        let action = last_action(seat.as_mut(), &state)
            .unwrap_or_else(|| panic!("{} gave no move at ply {}", seat.name(), state.ply_count));
        state = state
            .apply(action)
            .unwrap_or_else(|e| panic!("{} played {e:?} at ply {}", seat.name(), state.ply_count));
        moves.push(action);
    }
    let winner = state.winner().expect("finished game has a winner");
    (moves, winner)
}

fn shallow(heuristic: Heuristic, seed: u64) -> AgentConfig {
    AgentConfig {
        heuristic,
        max_depth: 3,
        seed: Some(seed),
        ..AgentConfig::default()
    }
}

#[test]
fn test_self_play_is_legal_to_the_end() {
    for heuristic in Heuristic::ALL {
        let config = shallow(heuristic, 17);
        let (moves, _) = play_out(PlayerKind::AlphaBeta, PlayerKind::AlphaBeta, &config);
        assert!(moves.len() >= 3, "{heuristic}: {} moves", moves.len());
    }
}

#[test]
fn test_agent_against_sample_players() {
    for opponent in [PlayerKind::Random, PlayerKind::Greedy, PlayerKind::Minimax] {
        let config = shallow(Heuristic::Mobility, 9);
        play_out(PlayerKind::AlphaBeta, opponent, &config);
        play_out(opponent, PlayerKind::AlphaBeta, &config);
    }
}

#[test]
fn test_seeded_games_repeat() {
    let config = shallow(Heuristic::Aggressive, 123);
    let first = play_out(PlayerKind::AlphaBeta, PlayerKind::Random, &config);
    let second = play_out(PlayerKind::AlphaBeta, PlayerKind::Random, &config);
    assert_eq!(first, second);
}

#[test]
fn test_search_always_has_a_move_while_game_is_live() {
    let config = shallow(Heuristic::Mobility, 31);
    let mut random = PlayerKind::Random.build(Player::First, &config);
    let mut state = Isolation::new()
        .result(Cell::new(2, 3).expect("on board"))
        .result(Cell::new(8, 5).expect("on board"));
    while !state.terminal_test() {
        let player = state.player();
        for depth in 1..=4 {
            let mut engine = AlphaBetaEngine::with_heuristic(Heuristic::Evasive, player);
            let result = engine.search(&state, depth).expect("unbounded search completes");
            let action = result.best_move.expect("live position has a move");
            assert!(state.actions().contains(&action));
        }
        let action = last_action(random.as_mut(), &state).expect("random always moves");
        state = state.result(action);
    }
}
