use crate::engine::clock::{SearchClock, StopSignal};
use crate::logic::board::Cell;
use crate::logic::game::Isolation;
use crate::players::IsolationPlayer;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Runs one turn of `player` against a wall-clock budget.
///
/// The player searches on its own thread and publishes actions as it goes.
/// Once the budget is spent (or the player returns) the stop signal is
/// raised, the thread is joined and the last action received in time is
/// returned. `None` means the player never answered.
pub fn run_turn(
    player: &mut dyn IsolationPlayer,
    state: &Isolation,
    time_limit: Duration,
) -> Option<Cell> {
    let stop = StopSignal::new();
    let clock = SearchClock::new(stop.clone(), Some(time_limit));
    let governor = clock.clone();
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        let handle = scope.spawn(move || {
            player.get_action(state, clock, &tx);
        });

        let mut last = None;
        loop {
            let remaining = governor.remaining().unwrap_or_default();
            match rx.recv_timeout(remaining) {
                Ok(action) => last = Some(action),
                Err(RecvTimeoutError::Timeout) => {
                    log::trace!("Turn budget of {time_limit:?} spent");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        stop.raise();
        if handle.join().is_err() {
            log::warn!("Player thread panicked during its turn");
        }
        last
    })
}
