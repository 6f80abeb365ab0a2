use shared::{
    domain::{Phase, Point, PointerType, TargetId},
    protocol::{
        EventDescriptor, EventPayload, LegacyPointerTypes, MousePayload, PointerPayload,
        TouchPayload, TouchPoint,
    },
};

use crate::host::{HostCapabilities, StructuralTouchList, TouchListFactory};

pub fn touch_event_name(phase: Phase) -> String {
    format!("touch{}", phase.as_str())
}

pub fn mouse_event_name(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Start => Some("mousedown"),
        Phase::Move => Some("mousemove"),
        Phase::End => Some("mouseup"),
        Phase::Cancel => None,
    }
}

pub fn pointer_event_name(phase: Phase, prefixed: bool) -> Option<&'static str> {
    let name = match (phase, prefixed) {
        (Phase::Start, true) => "MSPointerDown",
        (Phase::Move, true) => "MSPointerMove",
        (Phase::End, true) => "MSPointerUp",
        (Phase::Start, false) => "pointerdown",
        (Phase::Move, false) => "pointermove",
        (Phase::End, false) => "pointerup",
        (Phase::Cancel, _) => return None,
    };
    Some(name)
}

pub struct EventComposer<'a> {
    target: &'a TargetId,
    host: HostCapabilities,
    native: Option<&'a dyn TouchListFactory>,
}

impl<'a> EventComposer<'a> {
    pub fn new(target: &'a TargetId, host: HostCapabilities) -> Self {
        Self {
            target,
            host,
            native: None,
        }
    }

    pub fn with_native_touch_list(mut self, factory: Option<&'a dyn TouchListFactory>) -> Self {
        self.native = factory;
        self
    }

    pub fn contact_list(&self, contacts: &[Point]) -> Vec<TouchPoint> {
        let factory: &dyn TouchListFactory = match self.native {
            Some(native) if self.host.prefers_native_touch_list() => native,
            _ => &StructuralTouchList,
        };
        contacts
            .iter()
            .enumerate()
            .map(|(identifier, point)| {
                let (x, y) = point.truncated();
                factory.create_touch(self.target, identifier, x, y)
            })
            .collect()
    }

    /// Every current contact counts as changed.
    pub fn touch_event(&self, phase: Phase, contacts: &[Point]) -> EventDescriptor {
        let touches = self.contact_list(contacts);
        EventDescriptor::new(
            touch_event_name(phase),
            EventPayload::Touch(TouchPayload {
                changed_touches: touches.clone(),
                touches,
            }),
        )
    }

    /// Only the first contact is surfaced.
    pub fn mouse_event(&self, phase: Phase, contacts: &[Point]) -> Option<EventDescriptor> {
        let name = mouse_event_name(phase)?;
        let first = self.contact_list(contacts).into_iter().next();
        let payload = MousePayload {
            position: first.as_ref().map(|touch| touch.position),
            button: first.map(|_| 0),
        };
        Some(EventDescriptor::new(name, EventPayload::Mouse(payload)))
    }

    pub fn pointer_events(
        &self,
        phase: Phase,
        pointer_type: PointerType,
        contacts: &[Point],
        prefixed: bool,
    ) -> Vec<EventDescriptor> {
        let Some(name) = pointer_event_name(phase, prefixed) else {
            return Vec::new();
        };
        let buttons = if phase == Phase::End { 0 } else { 1 };

        self.contact_list(contacts)
            .into_iter()
            .map(|touch| {
                EventDescriptor::new(
                    name,
                    EventPayload::Pointer(PointerPayload {
                        pointer_id: touch.identifier,
                        pointer_type,
                        position: touch.position,
                        buttons,
                        legacy_types: LegacyPointerTypes::default(),
                    }),
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod tests;
