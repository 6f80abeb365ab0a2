//! Renders simulated contacts into touch, mouse and pointer events.

use shared::{
    domain::{Phase, Point},
    error::FakeTouchError,
};

pub mod composer;
pub mod contact_set;
pub mod controller;
pub mod host;
pub mod sink;

pub use contact_set::{ContactSet, Delta};
pub use controller::{DispatchConfig, DispatchController, DispatchOutcome};
pub use host::{HostCapabilities, TouchListFactory};
pub use sink::{EventSink, RecordingSink};

pub trait Surface {
    fn set_touches(&mut self, touches: Vec<Point>) -> &[Point];

    fn contacts(&self) -> &[Point];

    fn trigger(
        &mut self,
        phase: Phase,
        touches: Option<Vec<Point>>,
    ) -> Result<DispatchOutcome, FakeTouchError>;

    /// Translates the contacts and always dispatches a move afterwards.
    fn move_by(&mut self, delta: Delta) -> Result<&[Point], FakeTouchError>;

    fn trigger_start(&mut self) -> Result<DispatchOutcome, FakeTouchError> {
        self.trigger(Phase::Start, None)
    }

    fn trigger_move(&mut self) -> Result<DispatchOutcome, FakeTouchError> {
        self.trigger(Phase::Move, None)
    }

    fn trigger_move_to(&mut self, touches: Vec<Point>) -> Result<DispatchOutcome, FakeTouchError> {
        self.trigger(Phase::Move, Some(touches))
    }

    fn trigger_end(&mut self) -> Result<DispatchOutcome, FakeTouchError> {
        self.trigger(Phase::End, None)
    }

    fn trigger_cancel(&mut self) -> Result<DispatchOutcome, FakeTouchError> {
        self.trigger(Phase::Cancel, None)
    }
}
