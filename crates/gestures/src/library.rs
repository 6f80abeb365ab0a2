use std::{borrow::Borrow, collections::BTreeMap, fmt, sync::Arc};

use dispatch::Surface;
use shared::error::FakeTouchError;
use tracing::info;

use crate::{
    builtin::BuiltinGesture,
    program::GestureProgram,
    run::{Completion, GestureRun},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureName(String);

impl GestureName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GestureName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GestureName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GestureName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<BuiltinGesture> for GestureName {
    fn from(value: BuiltinGesture) -> Self {
        Self(value.as_str().to_string())
    }
}

impl fmt::Display for GestureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type GestureFactory = Arc<dyn Fn() -> Box<dyn GestureProgram> + Send + Sync>;

#[derive(Clone, Default)]
pub struct GestureLibrary {
    programs: BTreeMap<GestureName, GestureFactory>,
}

impl GestureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut library = Self::new();
        for gesture in BuiltinGesture::ALL {
            library.register(gesture, move || gesture.program());
        }
        library
    }

    pub fn register<F>(&mut self, name: impl Into<GestureName>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn GestureProgram> + Send + Sync + 'static,
    {
        self.programs.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &GestureName> {
        self.programs.keys()
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn GestureProgram>, FakeTouchError> {
        let factory = self
            .programs
            .get(name)
            .ok_or_else(|| FakeTouchError::invalid_gesture(name))?;
        Ok(factory())
    }

    /// Unknown names fail before anything is dispatched.
    pub fn trigger(
        &self,
        name: &str,
        surface: &mut dyn Surface,
        on_complete: Option<Completion>,
    ) -> Result<GestureRun, FakeTouchError> {
        let program = self.create(name)?;
        info!(gesture = name, "gesture triggered");
        GestureRun::start(GestureName::new(name), program, surface, on_complete)
    }
}

impl fmt::Debug for GestureLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureLibrary")
            .field("programs", &self.programs.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub trait TriggerGesture: Surface + Sized {
    fn trigger_gesture(
        &mut self,
        library: &GestureLibrary,
        name: &str,
        on_complete: Option<Completion>,
    ) -> Result<GestureRun, FakeTouchError> {
        library.trigger(name, self, on_complete)
    }
}

impl<S: Surface> TriggerGesture for S {}
