//! Session driver
//!
//! The only mutator of [`GameState`]. Hosts push input events and feed frame
//! deltas; the session turns them into fixed 60 Hz ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, InputEvent, InputQueue, TickInput, tick};
use crate::snapshot::Snapshot;
use crate::tuning::{Tuning, TuningError};

/// One player's session: current run, RNG, pending input and high score
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    seed: u64,
    rng: Pcg32,
    queue: InputQueue,
    input: TickInput,
    accumulator: f32,
}

impl Session {
    /// New session on the title screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom tuning. Values the tick loop cannot run with
    /// are rejected here rather than at the first spawn.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            queue: InputQueue::new(),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Queue a player action for the next update
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Begin a fresh run. The RNG stream carries on so runs differ.
    pub fn start(&mut self) {
        self.state.start();
        self.queue.clear();
        self.input = TickInput::default();
        self.accumulator = 0.0;
    }

    /// Halt ticking and discard the run, including pending effect timers
    pub fn stop(&mut self) {
        self.state.reset();
        self.queue.clear();
        self.input = TickInput::default();
        self.accumulator = 0.0;
        log::info!("Session stopped");
    }

    /// Route queued events by phase. Jumps during a run collapse into the
    /// next tick's command; on the title screen a jump starts the game; after
    /// a game over only an explicit start does anything.
    fn handle_input(&mut self) {
        let mut pending = TickInput::default();
        let jumped = self.queue.drain_into(&mut pending);
        // Only starts are left
        let restart = !self.queue.is_empty();
        self.queue.clear();

        match self.state.phase {
            _ if restart => self.start(),
            GamePhase::Ready if jumped => self.start(),
            GamePhase::Playing => self.input.jump |= pending.jump,
            _ => {}
        }
    }

    /// Run one tick and clear the one-shot input
    fn run_tick(&mut self) {
        tick(&mut self.state, &self.input, &mut self.rng);
        self.input = TickInput::default();
    }

    /// Advance by a frame delta (seconds). Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        self.handle_input();
        if self.state.phase != GamePhase::Playing {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run_tick();
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.state.phase == GamePhase::GameOver {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    /// Handle input and run exactly one tick (hosts with their own 60 Hz timer).
    /// Returns false if no tick ran because the game is not in play.
    pub fn step(&mut self) -> bool {
        self.handle_input();
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.run_tick();
        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenes
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score.best()
    }

    pub fn pending_input(&self) -> usize {
        self.queue.len()
    }

    /// View for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}
