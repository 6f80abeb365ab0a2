use std::time::Duration;

use dispatch::Surface;
use shared::error::FakeTouchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Wait(Duration),
    Done,
}

/// Positions produced depend on the number of ticks, never on wall clock time.
pub trait GestureProgram: Send {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError>;

    /// Never called after `Step::Done`.
    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError>;
}
