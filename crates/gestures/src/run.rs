use std::time::Duration;

use dispatch::Surface;
use shared::error::FakeTouchError;
use tracing::{debug, info};

use crate::{
    library::GestureName,
    program::{GestureProgram, Step},
};

/// Invoked once, after the terminating end event.
pub type Completion = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending { due: Duration },
    Completed,
    Cancelled,
}

pub struct GestureRun {
    name: GestureName,
    program: Box<dyn GestureProgram>,
    state: RunState,
    now: Duration,
    on_complete: Option<Completion>,
}

impl GestureRun {
    pub fn start(
        name: GestureName,
        mut program: Box<dyn GestureProgram>,
        surface: &mut dyn Surface,
        on_complete: Option<Completion>,
    ) -> Result<Self, FakeTouchError> {
        let step = program.begin(surface)?;
        let mut run = Self {
            name,
            program,
            state: RunState::Pending {
                due: Duration::ZERO,
            },
            now: Duration::ZERO,
            on_complete,
        };
        run.settle(step);
        Ok(run)
    }

    pub fn name(&self) -> &GestureName {
        &self.name
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.now
    }

    pub fn next_due(&self) -> Option<Duration> {
        match self.state {
            RunState::Pending { due } => Some(due),
            RunState::Completed | RunState::Cancelled => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next_due().is_none()
    }

    /// Drops the completion callback uncalled.
    pub fn cancel(&mut self) {
        if let RunState::Pending { .. } = self.state {
            info!(gesture = %self.name, elapsed_ms = self.now.as_millis() as u64, "gesture cancelled");
            self.state = RunState::Cancelled;
            self.on_complete = None;
        }
    }

    /// Returns whether the run has finished.
    pub fn advance(&mut self, surface: &mut dyn Surface, by: Duration) -> Result<bool, FakeTouchError> {
        let until = self.now.saturating_add(by);
        while let RunState::Pending { due } = self.state {
            if due > until {
                break;
            }
            self.fire(surface, due)?;
        }
        if !self.is_finished() {
            self.now = until;
        }
        Ok(self.is_finished())
    }

    pub fn step(&mut self, surface: &mut dyn Surface) -> Result<Option<Duration>, FakeTouchError> {
        let Some(due) = self.next_due() else {
            return Ok(None);
        };
        self.fire(surface, due)?;
        Ok(Some(due))
    }

    pub fn run_to_completion(&mut self, surface: &mut dyn Surface) -> Result<Duration, FakeTouchError> {
        while self.step(surface)?.is_some() {}
        Ok(self.now)
    }

    fn fire(&mut self, surface: &mut dyn Surface, due: Duration) -> Result<(), FakeTouchError> {
        self.now = due;
        debug!(gesture = %self.name, at_ms = due.as_millis() as u64, "gesture tick");
        match self.program.tick(surface) {
            Ok(step) => {
                self.settle(step);
                Ok(())
            }
            Err(err) => {
                self.state = RunState::Cancelled;
                self.on_complete = None;
                Err(err)
            }
        }
    }

    fn settle(&mut self, step: Step) {
        match step {
            Step::Wait(delay) => {
                self.state = RunState::Pending {
                    due: self.now.saturating_add(delay),
                };
            }
            Step::Done => {
                self.state = RunState::Completed;
                info!(gesture = %self.name, elapsed_ms = self.now.as_millis() as u64, "gesture completed");
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
