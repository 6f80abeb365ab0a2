use std::{fmt, str::FromStr, time::Duration};

use dispatch::{Delta, Surface};
use shared::{domain::Point, error::FakeTouchError};

use crate::program::{GestureProgram, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinGesture {
    Tap,
    DoubleTap,
    Hold,
    DragLeft,
    DragRight,
    SwipeRight,
    PinchOut,
    PinchIn,
    Rotate,
}

impl BuiltinGesture {
    pub const ALL: [BuiltinGesture; 9] = [
        BuiltinGesture::Tap,
        BuiltinGesture::DoubleTap,
        BuiltinGesture::Hold,
        BuiltinGesture::DragLeft,
        BuiltinGesture::DragRight,
        BuiltinGesture::SwipeRight,
        BuiltinGesture::PinchOut,
        BuiltinGesture::PinchIn,
        BuiltinGesture::Rotate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinGesture::Tap => "Tap",
            BuiltinGesture::DoubleTap => "DoubleTap",
            BuiltinGesture::Hold => "Hold",
            BuiltinGesture::DragLeft => "DragLeft",
            BuiltinGesture::DragRight => "DragRight",
            BuiltinGesture::SwipeRight => "SwipeRight",
            BuiltinGesture::PinchOut => "PinchOut",
            BuiltinGesture::PinchIn => "PinchIn",
            BuiltinGesture::Rotate => "Rotate",
        }
    }

    pub fn program(self) -> Box<dyn GestureProgram> {
        match self {
            BuiltinGesture::Tap => Box::new(Tap::default()),
            BuiltinGesture::DoubleTap => Box::new(DoubleTap::default()),
            BuiltinGesture::Hold => Box::new(Hold::default()),
            BuiltinGesture::DragLeft => Box::new(RepeatedMove::drag_left()),
            BuiltinGesture::DragRight => Box::new(RepeatedMove::drag_right()),
            BuiltinGesture::SwipeRight => Box::new(RepeatedMove::swipe_right()),
            BuiltinGesture::PinchOut => Box::new(RepeatedMove::pinch_out()),
            BuiltinGesture::PinchIn => Box::new(RepeatedMove::pinch_in()),
            BuiltinGesture::Rotate => Box::new(Rotate::default()),
        }
    }
}

impl fmt::Display for BuiltinGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinGesture {
    type Err = FakeTouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gesture| gesture.as_str() == s)
            .ok_or_else(|| FakeTouchError::invalid_gesture(s))
    }
}

const TAP_POINT: Point = Point::new(100.0, 100.0);

fn single(point: Point) -> Vec<Point> {
    vec![point]
}

#[derive(Debug, Clone)]
pub struct Tap {
    pub at: Point,
}

impl Default for Tap {
    fn default() -> Self {
        Self { at: TAP_POINT }
    }
}

impl GestureProgram for Tap {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.set_touches(single(self.at));
        surface.trigger_start()?;
        surface.trigger_end()?;
        Ok(Step::Done)
    }

    fn tick(&mut self, _surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        Ok(Step::Done)
    }
}

#[derive(Debug, Clone)]
pub struct DoubleTap {
    pub at: Point,
    pub gap: Duration,
}

impl Default for DoubleTap {
    fn default() -> Self {
        Self {
            at: TAP_POINT,
            gap: Duration::from_millis(50),
        }
    }
}

impl GestureProgram for DoubleTap {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.set_touches(single(self.at));
        surface.trigger_start()?;
        surface.trigger_end()?;
        Ok(Step::Wait(self.gap))
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.trigger_start()?;
        surface.trigger_end()?;
        Ok(Step::Done)
    }
}

#[derive(Debug, Clone)]
pub struct Hold {
    pub at: Point,
    pub duration: Duration,
}

impl Default for Hold {
    fn default() -> Self {
        Self {
            at: TAP_POINT,
            duration: Duration::from_millis(600),
        }
    }
}

impl GestureProgram for Hold {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.set_touches(single(self.at));
        surface.trigger_start()?;
        Ok(Step::Wait(self.duration))
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.trigger_end()?;
        Ok(Step::Done)
    }
}

/// Ends on the tick after the last move.
#[derive(Debug, Clone)]
pub struct RepeatedMove {
    touches: Vec<Point>,
    interval: Duration,
    moves: u32,
    delta: fn(u32) -> Delta,
    performed: u32,
}

impl RepeatedMove {
    pub fn new(touches: Vec<Point>, interval: Duration, moves: u32, delta: fn(u32) -> Delta) -> Self {
        Self {
            touches,
            interval,
            moves,
            delta,
            performed: 0,
        }
    }

    pub fn drag_left() -> Self {
        Self::new(
            single(Point::new(220.0, 100.0)),
            Duration::from_millis(30),
            20,
            |_| Delta::uniform(-6.0, 1.0),
        )
    }

    pub fn drag_right() -> Self {
        Self::new(
            single(TAP_POINT),
            Duration::from_millis(10),
            40,
            |_| Delta::uniform(1.5, 1.0),
        )
    }

    pub fn swipe_right() -> Self {
        Self::new(
            single(TAP_POINT),
            Duration::from_millis(5),
            50,
            |tick| Delta::uniform(1.2 * f64::from(tick), 1.0),
        )
    }

    pub fn pinch_out() -> Self {
        Self::new(
            vec![Point::new(150.0, 50.0), Point::new(50.0, 150.0)],
            Duration::from_millis(30),
            20,
            |_| Delta::per_contact([(1.0, -1.0), (-1.0, 1.0)]),
        )
    }

    pub fn pinch_in() -> Self {
        Self::new(
            vec![Point::new(150.0, 50.0), Point::new(50.0, 150.0)],
            Duration::from_millis(30),
            20,
            |_| Delta::per_contact([(-1.0, 1.0), (1.0, -1.0)]),
        )
    }
}

impl GestureProgram for RepeatedMove {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        self.performed = 0;
        surface.set_touches(self.touches.clone());
        surface.trigger_start()?;
        Ok(Step::Wait(self.interval))
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        if self.performed == self.moves {
            surface.trigger_end()?;
            return Ok(Step::Done);
        }
        surface.move_by((self.delta)(self.performed))?;
        self.performed += 1;
        Ok(Step::Wait(self.interval))
    }
}

/// Always rotates the positions captured at start.
#[derive(Debug, Clone)]
pub struct Rotate {
    touches: Vec<Point>,
    center: Point,
    step_degrees: f64,
    interval: Duration,
    duration: Duration,
    origin: Vec<Point>,
    rotation: f64,
    elapsed: Duration,
    pending: Duration,
}

impl Default for Rotate {
    fn default() -> Self {
        Self::new(
            vec![Point::new(50.0, 50.0), Point::new(150.0, 150.0)],
            Point::new(100.0, 100.0),
            2.0,
            Duration::from_millis(20),
            Duration::from_millis(2000),
        )
    }
}

impl Rotate {
    pub fn new(
        touches: Vec<Point>,
        center: Point,
        step_degrees: f64,
        interval: Duration,
        duration: Duration,
    ) -> Self {
        Self {
            touches,
            center,
            step_degrees,
            interval: interval.max(Duration::from_millis(1)),
            duration,
            origin: Vec::new(),
            rotation: 0.0,
            elapsed: Duration::ZERO,
            pending: Duration::ZERO,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    fn schedule(&mut self) -> Step {
        self.pending = self.interval.min(self.duration.saturating_sub(self.elapsed));
        Step::Wait(self.pending)
    }
}

pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

impl GestureProgram for Rotate {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        self.rotation = 0.0;
        self.elapsed = Duration::ZERO;
        self.origin = surface.set_touches(self.touches.clone()).to_vec();
        surface.trigger_start()?;
        Ok(self.schedule())
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        self.elapsed += self.pending;
        // The deadline wins over a move scheduled for the same instant.
        if self.elapsed >= self.duration {
            surface.trigger_end()?;
            return Ok(Step::Done);
        }

        let positions = self
            .origin
            .iter()
            .map(|point| rotate_point(*point, self.center, self.rotation))
            .collect();
        surface.trigger_move_to(positions)?;
        self.rotation += self.step_degrees;
        Ok(self.schedule())
    }
}

#[cfg(test)]
#[path = "tests/builtin_tests.rs"]
mod tests;
