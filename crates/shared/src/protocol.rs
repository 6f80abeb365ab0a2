use serde::{Deserialize, Serialize};

use crate::domain::{PointerType, TargetId};

/// Integral page/client position. Page and client are always equal: scroll
/// offsets are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub page_x: i64,
    pub page_y: i64,
    pub client_x: i64,
    pub client_y: i64,
}

impl Coordinates {
    pub fn at(x: i64, y: i64) -> Self {
        Self {
            page_x: x,
            page_y: y,
            client_x: x,
            client_y: y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub identifier: usize,
    #[serde(flatten)]
    pub position: Coordinates,
    pub target: TargetId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPayload {
    pub touches: Vec<TouchPoint>,
    pub changed_touches: Vec<TouchPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MousePayload {
    #[serde(flatten)]
    pub position: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<u8>,
}

/// Pointer-type constants the legacy pointer API exposed on every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPointerTypes {
    #[serde(rename = "MSPOINTER_TYPE_MOUSE")]
    pub mouse: PointerType,
    #[serde(rename = "MSPOINTER_TYPE_TOUCH")]
    pub touch: PointerType,
    #[serde(rename = "MSPOINTER_TYPE_PEN")]
    pub pen: PointerType,
}

impl Default for LegacyPointerTypes {
    fn default() -> Self {
        Self {
            mouse: PointerType::Mouse,
            touch: PointerType::Touch,
            pen: PointerType::Pen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerPayload {
    pub pointer_id: usize,
    pub pointer_type: PointerType,
    #[serde(flatten)]
    pub position: Coordinates,
    pub buttons: u8,
    #[serde(flatten)]
    pub legacy_types: LegacyPointerTypes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Touch(TouchPayload),
    Pointer(PointerPayload),
    Mouse(MousePayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    #[serde(rename = "type")]
    pub event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl EventDescriptor {
    pub fn new(event_type: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: true,
            cancelable: true,
            payload,
        }
    }

    pub fn touch(&self) -> Option<&TouchPayload> {
        match &self.payload {
            EventPayload::Touch(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn mouse(&self) -> Option<&MousePayload> {
        match &self.payload {
            EventPayload::Mouse(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<&PointerPayload> {
        match &self.payload {
            EventPayload::Pointer(payload) => Some(payload),
            _ => None,
        }
    }
}
