//! Entry points for callers: each action takes the current shared game and hands back the next
//! one. When an action does not apply, the very same `Arc` comes back so callers can detect it
//! with `Arc::ptr_eq`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::*;

pub fn start_game(seed: u32, difficulty: Difficulty) -> Result<Arc<Game>> {
    log::debug!("Starting {:?} game with seed {}", difficulty, seed);
    Ok(Arc::new(Game::new(seed, difficulty)?))
}

/// Resumes a game from a decoded snapshot.
pub fn load_game(snapshot: Game) -> Result<Arc<Game>> {
    snapshot.validate()?;
    log::debug!("Loaded game in {:?} state", snapshot.status());
    Ok(Arc::new(snapshot))
}

pub fn reveal_cell(state: &Arc<Game>, coords: Coordinate) -> Result<Arc<Game>> {
    Ok(keep_or_replace(state, state.reveal(coords)?))
}

pub fn toggle_flag(state: &Arc<Game>, coords: Coordinate) -> Result<Arc<Game>> {
    Ok(keep_or_replace(state, state.toggle_flag(coords)?))
}

pub fn tick_timer(state: &Arc<Game>) -> Result<Arc<Game>> {
    Ok(Arc::new(state.tick()?))
}

pub fn undo_losing_move(state: &Arc<Game>) -> Result<Arc<Game>> {
    Ok(Arc::new(state.undo_losing_move()?))
}

fn keep_or_replace(state: &Arc<Game>, next: Option<Game>) -> Arc<Game> {
    match next {
        Some(next) => Arc::new(next),
        None => Arc::clone(state),
    }
}

/// Actions a caller can issue against the current game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Start { seed: u32, difficulty: Difficulty },
    Load(Box<Game>),
    Reveal(Coordinate),
    ToggleFlag(Coordinate),
    Tick,
    UndoLosingMove,
}

/// Applies `action` to `state`. Every action but `Start` and `Load` needs a game to act on.
pub fn reduce(state: Option<&Arc<Game>>, action: Action) -> Result<Arc<Game>> {
    match (action, state) {
        (Action::Start { seed, difficulty }, _) => start_game(seed, difficulty),
        (Action::Load(snapshot), _) => load_game(*snapshot),
        (Action::Reveal(coords), Some(state)) => reveal_cell(state, coords),
        (Action::ToggleFlag(coords), Some(state)) => toggle_flag(state, coords),
        (Action::Tick, Some(state)) => tick_timer(state),
        (Action::UndoLosingMove, Some(state)) => undo_losing_move(state),
        (_, None) => Err(GameError::IllegalState("no game has been started")),
    }
}

/// Port to whatever drives the one-second ticks in real time.
///
/// The store calls `start` when a game begins running and `stop` when it leaves that state; the
/// implementation is expected to dispatch [`Action::Tick`] back into the store in between.
pub trait TickScheduler {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Scheduler that only remembers whether ticks are wanted, for callers that tick by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    active: bool,
    starts: u32,
}

impl ManualScheduler {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times ticking was (re)started.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self) {
        self.active = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.active = false;
    }
}

/// Holds the current game together with its timer.
#[derive(Debug)]
pub struct GameStore<S> {
    state: Option<Arc<Game>>,
    scheduler: S,
    ticking: bool,
}

impl<S: TickScheduler> GameStore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            state: None,
            scheduler,
            ticking: false,
        }
    }

    pub fn state(&self) -> Option<&Arc<Game>> {
        self.state.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Runs `action` and keeps the scheduler in step with the resulting status.
    pub fn dispatch(&mut self, action: Action) -> Result<Arc<Game>> {
        let next = reduce(self.state.as_ref(), action)?;
        self.sync_timer(next.status());
        self.state = Some(Arc::clone(&next));
        Ok(next)
    }

    fn sync_timer(&mut self, status: GameStatus) {
        let wanted = status.is_running();
        match (self.ticking, wanted) {
            (false, true) => {
                log::debug!("Timer started");
                self.scheduler.start();
            }
            (true, false) => {
                log::debug!("Timer stopped");
                self.scheduler.stop();
            }
            _ => {}
        }
        self.ticking = wanted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: Coord, y: Coord) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn small() -> Difficulty {
        Difficulty::new(3, 3, 3).unwrap()
    }

    #[test]
    fn no_op_returns_same_reference() {
        let ready = start_game(6, small()).unwrap();
        let flagged = toggle_flag(&ready, c(0, 0)).unwrap();
        assert!(Arc::ptr_eq(&ready, &flagged));

        let running = reveal_cell(&ready, c(0, 0)).unwrap();
        assert!(!Arc::ptr_eq(&ready, &running));
        let again = reveal_cell(&running, c(0, 0)).unwrap();
        assert!(Arc::ptr_eq(&running, &again));
    }

    #[test]
    fn actions_need_a_game() {
        assert_eq!(
            reduce(None, Action::Tick),
            Err(GameError::IllegalState("no game has been started"))
        );
    }

    #[test]
    fn start_replaces_previous_game() {
        let first = start_game(6, small()).unwrap();
        let first = reveal_cell(&first, c(0, 0)).unwrap();
        let second = reduce(
            Some(&first),
            Action::Start {
                seed: 7,
                difficulty: small(),
            },
        )
        .unwrap();
        assert_eq!(second.status(), GameStatus::Ready);
        assert_eq!(second.seed(), 7);
    }

    #[test]
    fn store_follows_running_state() {
        let mut store = GameStore::new(ManualScheduler::default());
        store
            .dispatch(Action::Start {
                seed: 6,
                difficulty: small(),
            })
            .unwrap();
        assert!(!store.scheduler().is_active());

        store.dispatch(Action::Reveal(c(0, 0))).unwrap();
        assert!(store.scheduler().is_active());

        let lost = store.dispatch(Action::Reveal(c(2, 2))).unwrap();
        assert_eq!(lost.status(), GameStatus::Loss);
        assert!(!store.scheduler().is_active());

        store.dispatch(Action::UndoLosingMove).unwrap();
        assert!(store.scheduler().is_active());
        assert_eq!(store.scheduler().starts(), 2);
    }

    #[test]
    fn store_keeps_state_on_error() {
        let mut store = GameStore::new(ManualScheduler::default());
        let started = store
            .dispatch(Action::Start {
                seed: 6,
                difficulty: small(),
            })
            .unwrap();
        assert!(store.dispatch(Action::UndoLosingMove).is_err());
        assert!(Arc::ptr_eq(store.state().unwrap(), &started));
    }

    #[test]
    fn store_resumes_ticking_for_loaded_running_game() {
        let running = start_game(6, small()).unwrap();
        let running = reveal_cell(&running, c(0, 0)).unwrap();

        let mut store = GameStore::new(ManualScheduler::default());
        store
            .dispatch(Action::Load(Box::new((*running).clone())))
            .unwrap();
        assert!(store.scheduler().is_active());
    }
}
