//! State machine for tracking the sweep workflow
//!
//! Unlike a resumable pipeline there is no state file: a sweep runs to
//! completion or fatal error and cannot be resumed partway, so the
//! machine and its transition history live in memory only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sweep state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SweepState {
    Idle,
    ValidatingArguments,
    ReadingRecords,
    InstallingCredentials,
    Scanning,
    Done,
    Failed,
}

/// State transition
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateTransition {
    /// From state
    pub from: SweepState,

    /// To state
    pub to: SweepState,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

/// State machine for tracking the sweep workflow
pub struct SweepStateMachine {
    current_state: SweepState,
    transitions: Vec<StateTransition>,
}

impl Default for SweepStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepStateMachine {
    /// Create a new state machine in the `Idle` state
    pub fn new() -> Self {
        Self {
            current_state: SweepState::Idle,
            transitions: Vec::new(),
        }
    }

    /// Transition to a new state
    pub fn transition(&mut self, to: SweepState) {
        self.transitions.push(StateTransition {
            from: self.current_state,
            to,
            timestamp: Utc::now(),
        });
        self.current_state = to;
    }

    /// Get current state
    pub fn state(&self) -> SweepState {
        self.current_state
    }

    /// Get the recorded transition history
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Check whether the sweep has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.current_state, SweepState::Done | SweepState::Failed)
    }
}
