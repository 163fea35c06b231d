//! Player input queue
//!
//! Input callbacks only enqueue; the driver drains the queue once per frame
//! and folds the events into the next tick's [`TickInput`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A discrete player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Click / tap / space
    Jump,
    /// Start or "Try Again" button
    Start,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump if grounded
    pub jump: bool,
}

/// FIFO of pending input events
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Fold pending jumps into `input`, leaving other events queued.
    /// Returns true if at least one jump was pending.
    pub fn drain_into(&mut self, input: &mut TickInput) -> bool {
        let before = self.events.len();
        self.events.retain(|e| *e != InputEvent::Jump);
        let jumped = self.events.len() != before;
        input.jump |= jumped;
        jumped
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
