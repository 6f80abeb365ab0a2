use std::iter;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Phase, Point, PointerType, TargetId, Vocabulary},
    error::FakeTouchError,
    protocol::EventDescriptor,
};
use tracing::{debug, warn};

use crate::{
    composer::EventComposer,
    contact_set::{ContactSet, Delta},
    host::{HostCapabilities, TouchListFactory},
    sink::EventSink,
    Surface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub vocabulary: Vocabulary,
    pub prefixed_pointer_names: bool,
    pub strict_phases: bool,
    pub host: HostCapabilities,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::Touch,
            prefixed_pointer_names: true,
            strict_phases: false,
            host: HostCapabilities::detected(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub delivered: Vec<bool>,
}

impl DispatchOutcome {
    pub fn emitted(&self) -> usize {
        self.delivered.len()
    }
}

pub struct DispatchController<S> {
    target: TargetId,
    sink: S,
    config: DispatchConfig,
    contacts: ContactSet,
    active: bool,
    native_touch_list: Option<Box<dyn TouchListFactory>>,
}

impl<S: EventSink> DispatchController<S> {
    pub fn new(target: TargetId, sink: S) -> Self {
        Self::with_config(target, sink, DispatchConfig::default())
    }

    pub fn with_config(target: TargetId, sink: S, config: DispatchConfig) -> Self {
        Self {
            target,
            sink,
            config,
            contacts: ContactSet::default(),
            active: false,
            native_touch_list: None,
        }
    }

    /// Only used when the host capabilities allow it.
    pub fn with_touch_list_factory(mut self, factory: impl TouchListFactory + 'static) -> Self {
        self.native_touch_list = Some(Box::new(factory));
        self
    }

    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.config.vocabulary
    }

    pub fn has_multitouch(&self) -> bool {
        self.config.vocabulary.is_multitouch()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) -> Result<(), FakeTouchError> {
        if self.active && vocabulary != self.config.vocabulary {
            if self.config.strict_phases {
                return Err(FakeTouchError::VocabularyLocked {
                    requested: vocabulary,
                });
            }
            warn!(
                target_id = %self.target,
                from = %self.config.vocabulary,
                to = %vocabulary,
                "vocabulary changed during an active interaction"
            );
        }
        self.config.vocabulary = vocabulary;
        Ok(())
    }

    pub fn set_prefixed_pointer_names(&mut self, prefixed: bool) {
        self.config.prefixed_pointer_names = prefixed;
    }

    pub fn descriptors(&self, phase: Phase) -> Vec<EventDescriptor> {
        let composer = EventComposer::new(&self.target, self.config.host)
            .with_native_touch_list(self.native_touch_list.as_deref());
        let contacts = self.contacts.points();
        let prefixed = self.config.prefixed_pointer_names;

        match self.config.vocabulary {
            Vocabulary::Touch => vec![composer.touch_event(phase, contacts)],
            Vocabulary::Mouse => composer.mouse_event(phase, contacts).into_iter().collect(),
            Vocabulary::TouchAndMouse => iter::once(composer.touch_event(phase, contacts))
                .chain(composer.mouse_event(phase, contacts))
                .collect(),
            Vocabulary::PointerTouch => {
                composer.pointer_events(phase, PointerType::Touch, contacts, prefixed)
            }
            Vocabulary::PointerPen => {
                composer.pointer_events(phase, PointerType::Pen, contacts, prefixed)
            }
            Vocabulary::PointerMouse => {
                composer.pointer_events(phase, PointerType::Mouse, contacts, prefixed)
            }
        }
    }

    fn check_phase(&self, phase: Phase) -> Result<(), FakeTouchError> {
        let in_order = match phase {
            Phase::Start => !self.active,
            Phase::Move | Phase::End | Phase::Cancel => self.active,
        };
        if in_order {
            return Ok(());
        }

        let state = if self.active { "active" } else { "idle" };
        if self.config.strict_phases {
            return Err(FakeTouchError::PhaseViolation {
                operation: phase,
                state,
            });
        }
        warn!(target_id = %self.target, %phase, state, "out-of-order dispatch");
        Ok(())
    }

    fn dispatch(&mut self, phase: Phase) -> DispatchOutcome {
        let events = self.descriptors(phase);
        debug!(
            target_id = %self.target,
            vocabulary = %self.config.vocabulary,
            %phase,
            contacts = self.contacts.len(),
            events = events.len(),
            "dispatching"
        );

        let delivered = events
            .iter()
            .map(|event| self.sink.emit(&self.target, event))
            .collect();

        match phase {
            Phase::Start => self.active = true,
            Phase::End | Phase::Cancel => self.active = false,
            Phase::Move => {}
        }

        DispatchOutcome { delivered }
    }
}

impl<S: EventSink> Surface for DispatchController<S> {
    fn set_touches(&mut self, touches: Vec<Point>) -> &[Point] {
        self.contacts.set_touches(touches)
    }

    fn contacts(&self) -> &[Point] {
        self.contacts.points()
    }

    fn trigger(
        &mut self,
        phase: Phase,
        touches: Option<Vec<Point>>,
    ) -> Result<DispatchOutcome, FakeTouchError> {
        self.check_phase(phase)?;
        if let Some(touches) = touches {
            self.contacts.set_touches(touches);
        }
        Ok(self.dispatch(phase))
    }

    fn move_by(&mut self, delta: Delta) -> Result<&[Point], FakeTouchError> {
        self.check_phase(Phase::Move)?;
        self.contacts.translate(&delta)?;
        self.dispatch(Phase::Move);
        Ok(self.contacts.points())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
