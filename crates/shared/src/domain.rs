use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FakeTouchError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Integral pixel coordinates, truncated toward zero.
    pub fn truncated(self) -> (i64, i64) {
        (self.x.trunc() as i64, self.y.trunc() as i64)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Move,
    End,
    Cancel,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Move => "move",
            Phase::End => "end",
            Phase::Cancel => "cancel",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

impl PointerType {
    pub fn as_str(self) -> &'static str {
        match self {
            PointerType::Mouse => "mouse",
            PointerType::Touch => "touch",
            PointerType::Pen => "pen",
        }
    }
}

impl FromStr for PointerType {
    type Err = FakeTouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mouse" => Ok(PointerType::Mouse),
            "touch" => Ok(PointerType::Touch),
            "pen" => Ok(PointerType::Pen),
            _ => Err(FakeTouchError::UnknownPointerType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vocabulary {
    PointerTouch,
    PointerMouse,
    PointerPen,
    #[default]
    Touch,
    Mouse,
    TouchAndMouse,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 6] = [
        Vocabulary::PointerTouch,
        Vocabulary::PointerMouse,
        Vocabulary::PointerPen,
        Vocabulary::Touch,
        Vocabulary::Mouse,
        Vocabulary::TouchAndMouse,
    ];

    /// Mouse-like vocabularies can only surface a single contact.
    pub fn is_multitouch(self) -> bool {
        !matches!(
            self,
            Vocabulary::PointerMouse | Vocabulary::PointerPen | Vocabulary::Mouse
        )
    }

    pub fn pointer_type(self) -> Option<PointerType> {
        match self {
            Vocabulary::PointerTouch => Some(PointerType::Touch),
            Vocabulary::PointerMouse => Some(PointerType::Mouse),
            Vocabulary::PointerPen => Some(PointerType::Pen),
            Vocabulary::Touch | Vocabulary::Mouse | Vocabulary::TouchAndMouse => None,
        }
    }

    /// Legacy numeric vocabulary code.
    pub fn code(self) -> u16 {
        match self {
            Vocabulary::PointerTouch => 100,
            Vocabulary::PointerMouse => 200,
            Vocabulary::PointerPen => 250,
            Vocabulary::Touch => 300,
            Vocabulary::Mouse => 400,
            Vocabulary::TouchAndMouse => 500,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|vocabulary| vocabulary.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vocabulary::PointerTouch => "pointer-touch",
            Vocabulary::PointerMouse => "pointer-mouse",
            Vocabulary::PointerPen => "pointer-pen",
            Vocabulary::Touch => "touch",
            Vocabulary::Mouse => "mouse",
            Vocabulary::TouchAndMouse => "touch-and-mouse",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vocabulary {
    type Err = FakeTouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if let Ok(code) = normalized.parse::<u16>() {
            return Self::from_code(code).ok_or_else(|| FakeTouchError::UnknownVocabulary(s.into()));
        }
        Self::ALL
            .into_iter()
            .find(|vocabulary| vocabulary.as_str() == normalized)
            .ok_or_else(|| FakeTouchError::UnknownVocabulary(s.into()))
    }
}
