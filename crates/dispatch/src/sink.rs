use std::collections::HashSet;

use shared::{domain::TargetId, protocol::EventDescriptor};

/// `false` means the event was cancelled or not delivered.
pub trait EventSink {
    fn emit(&mut self, target: &TargetId, event: &EventDescriptor) -> bool;
}

impl<F> EventSink for F
where
    F: FnMut(&TargetId, &EventDescriptor) -> bool,
{
    fn emit(&mut self, target: &TargetId, event: &EventDescriptor) -> bool {
        self(target, event)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<(TargetId, EventDescriptor)>,
    prevented: HashSet<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self, event_type: impl Into<String>) {
        self.prevented.insert(event_type.into());
    }

    pub fn events(&self) -> impl Iterator<Item = &EventDescriptor> {
        self.events.iter().map(|(_, event)| event)
    }

    pub fn event_types(&self) -> Vec<&str> {
        self.events().map(|event| event.event_type.as_str()).collect()
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetId> {
        self.events.iter().map(|(target, _)| target)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&EventDescriptor> {
        self.events.last().map(|(_, event)| event)
    }

    pub fn take(&mut self) -> Vec<EventDescriptor> {
        self.events.drain(..).map(|(_, event)| event).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, target: &TargetId, event: &EventDescriptor) -> bool {
        self.events.push((target.clone(), event.clone()));
        !self.prevented.contains(&event.event_type)
    }
}
