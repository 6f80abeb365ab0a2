use shared::{domain::Point, error::FakeTouchError};

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Uniform { dx: f64, dy: f64 },
    PerContact(Vec<(f64, f64)>),
}

impl Delta {
    pub fn uniform(dx: f64, dy: f64) -> Self {
        Self::Uniform { dx, dy }
    }

    pub fn per_contact(deltas: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::PerContact(deltas.into_iter().collect())
    }
}

/// The index of a point is its identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    points: Vec<Point>,
}

impl ContactSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn set_touches(&mut self, points: Vec<Point>) -> &[Point] {
        self.points = points;
        &self.points
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A per-contact delta of the wrong length is rejected before anything moves.
    pub fn translate(&mut self, delta: &Delta) -> Result<&[Point], FakeTouchError> {
        match delta {
            Delta::Uniform { dx, dy } => {
                for point in &mut self.points {
                    point.x += dx;
                    point.y += dy;
                }
            }
            Delta::PerContact(deltas) => {
                if deltas.len() != self.points.len() {
                    return Err(FakeTouchError::MalformedDelta {
                        expected: self.points.len(),
                        actual: deltas.len(),
                    });
                }
                for (point, (dx, dy)) in self.points.iter_mut().zip(deltas) {
                    point.x += dx;
                    point.y += dy;
                }
            }
        }
        Ok(&self.points)
    }
}
