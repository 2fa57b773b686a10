//! Shared game session for the gravity timer and input handling
//!
//! One mutex guards the whole game. Every command, tick, and snapshot holds it
//! for its full duration, so nobody observes a lock sequence half done.

use crate::game::{Action, Control, Game, Snapshot};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Cloneable handle to a single game
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Run one command against the game
    pub fn apply(&self, action: Action) -> Control {
        let mut game = self.inner.lock();
        let control = game.process_action(action);
        trace!(?action, state = ?game.state(), "applied action");
        control
    }

    /// Gravity step; see [`Game::tick`]
    pub fn tick(&self) -> bool {
        self.inner.lock().tick()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    /// Read the game under the lock
    pub fn with<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&*self.inner.lock())
    }
}

/// Spawn a task that ticks gravity every `period`.
///
/// Ticks that fire while the game isn't running do nothing, and late ticks
/// are skipped rather than replayed. Abort the returned handle to stop it.
pub fn spawn_gravity(handle: &Handle, game: SharedGame, period: Duration) -> JoinHandle<()> {
    debug!(?period, "starting gravity");
    handle.spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if game.tick() {
                trace!("gravity tick");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use std::thread;

    #[test]
    fn test_apply_and_snapshot() {
        let shared = SharedGame::new(Game::with_seed(8));
        assert_eq!(shared.snapshot().state, GameState::Ready);
        assert!(!shared.tick());

        assert_eq!(shared.apply(Action::Start), Control::Continue);
        assert_eq!(shared.with(|g| g.state()), GameState::Running);
        assert!(shared.tick());
        assert_eq!(shared.apply(Action::Quit), Control::Quit);
    }

    #[test]
    fn test_concurrent_commands_stay_consistent() {
        let shared = SharedGame::new(Game::with_seed(21));
        shared.apply(Action::Start);

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let actions = [Action::MoveLeft, Action::Rotate, Action::MoveRight, Action::Drop];
                    for n in 0..200 {
                        if (n + i) % 3 == 0 {
                            shared.tick();
                        } else {
                            shared.apply(actions[(n + i) % actions.len()]);
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.score.points, snapshot.score.lines * 20);
        assert!(snapshot.current.cells().iter().all(|c| (0..10).contains(&c.col)));
        assert!(!snapshot.board.overlaps(snapshot.current.cells()) || snapshot.state == GameState::Over);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_moves_running_game() {
        let shared = SharedGame::new(Game::with_seed(4));
        shared.apply(Action::Start);
        let top = shared.with(|g| g.current_piece().top_row());

        let period = Duration::from_millis(100);
        let task = spawn_gravity(&Handle::current(), shared.clone(), period);
        time::sleep(period * 3 + period / 2).await;

        assert_eq!(shared.with(|g| g.current_piece().top_row()), top + 3);
        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_skips_paused_game() {
        let shared = SharedGame::new(Game::with_seed(4));
        shared.apply(Action::Start);
        shared.apply(Action::Pause);
        let before = shared.snapshot();

        let period = Duration::from_millis(100);
        let task = spawn_gravity(&Handle::current(), shared.clone(), period);
        time::sleep(period * 5).await;

        assert_eq!(shared.snapshot(), before);
        task.abort();
    }
}
