use isolation_core::engine::config::AgentConfig;
use isolation_core::engine::Player;
use isolation_core::logic::game::Isolation;
use isolation_core::players::{IsolationPlayer, PlayerKind};
use isolation_core::worker::run_turn;
use serde::Serialize;
use std::time::Duration;

/// Everything needed to run a series of games against the agent.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub agent: AgentConfig,
    pub opponent: PlayerKind,
    pub rounds: u32,
    /// Also play every round with the seats swapped.
    pub fair: bool,
    pub time_limit: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub first: String,
    pub second: String,
    pub moves: Vec<(u8, u8)>,
    pub winner: Player,
    /// The loser ran out of time or played an illegal move.
    pub forfeit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub games: u32,
    pub agent_wins: u32,
    pub opponent_wins: u32,
    pub forfeits: u32,
}

impl MatchSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.agent_wins) / f64::from(self.games)
    }

    /// Logs the final tally and returns it as a one-line report.
    pub fn report(&self, opponent: PlayerKind) -> String {
        let win_rate = self.win_rate();
        tracing::info!(
            agent_wins = self.agent_wins,
            opponent_wins = self.opponent_wins,
            forfeits = self.forfeits,
            win_rate,
            "Match finished against {opponent}"
        );
        format!(
            "agent {} - {} {opponent} ({} forfeits), win rate {win_rate:.1}%",
            self.agent_wins, self.opponent_wins, self.forfeits
        )
    }
}

/// Plays one game to the end. A player that returns nothing in time, or
/// returns an illegal move, loses on the spot.
pub fn play_game(
    first: &mut dyn IsolationPlayer,
    second: &mut dyn IsolationPlayer,
    time_limit: Duration,
) -> GameRecord {
    let names = (first.name().to_string(), second.name().to_string());
    let mut state = Isolation::new();
    let mut moves = Vec::new();

    let (winner, forfeit) = loop {
        if let Some(winner) = state.winner() {
            break (winner, false);
        }
        let mover = state.player();
        let player: &mut dyn IsolationPlayer = match mover {
            Player::First => &mut *first,
            Player::Second => &mut *second,
        };

        let Some(action) = run_turn(player, &state, time_limit) else {
            tracing::warn!("{mover:?} ({}) gave no move in time", player.name());
            break (mover.opponent(), true);
        };
        match state.apply(action) {
            Ok(next) => {
                tracing::trace!("Ply {}: {mover:?} -> {action}", state.ply_count);
                moves.push(action.coords());
                state = next;
            }
            Err(err) => {
                tracing::warn!("{mover:?} ({}) forfeits: {err:?}", player.name());
                break (mover.opponent(), true);
            }
        }
    };

    tracing::debug!("Final position after {} plies:\n{state}", state.ply_count);
    GameRecord {
        first: names.0,
        second: names.1,
        moves,
        winner,
        forfeit,
    }
}

/// Plays `rounds` games with the agent moving first, plus the mirrored games
/// when `fair` is set.
pub fn run_matches(settings: &MatchSettings) -> (MatchSummary, Vec<GameRecord>) {
    let mut seatings = vec![Player::First];
    if settings.fair {
        seatings.push(Player::Second);
    }

    let mut summary = MatchSummary::default();
    let mut records = Vec::new();
    let mut game_index = 0_u64;

    for round in 1..=settings.rounds {
        for &agent_seat in &seatings {
            // Vary the seed per game so seeded rounds are not replays.
            let config = AgentConfig {
                seed: settings.agent.seed.map(|seed| seed.wrapping_add(game_index)),
                ..settings.agent.clone()
            };
            game_index += 1;

            let mut agent = PlayerKind::AlphaBeta.build(agent_seat, &config);
            let mut opponent = settings.opponent.build(agent_seat.opponent(), &config);
            let (first, second) = match agent_seat {
                Player::First => (agent.as_mut(), opponent.as_mut()),
                Player::Second => (opponent.as_mut(), agent.as_mut()),
            };
            let record = play_game(first, second, settings.time_limit);

            summary.games += 1;
            if record.winner == agent_seat {
                summary.agent_wins += 1;
            } else {
                summary.opponent_wins += 1;
            }
            if record.forfeit {
                summary.forfeits += 1;
            }
            tracing::info!(
                round,
                agent = ?agent_seat,
                winner = ?record.winner,
                moves = record.moves.len(),
                forfeit = record.forfeit,
                "Game finished"
            );
            records.push(record);
        }
    }

    (summary, records)
}
