//! Named, time-scheduled gestures driven through a [`dispatch::Surface`].

pub mod builtin;
pub mod library;
pub mod program;
pub mod run;
pub mod runtime;

pub use builtin::{rotate_point, BuiltinGesture};
pub use library::{GestureFactory, GestureLibrary, GestureName, TriggerGesture};
pub use program::{GestureProgram, Step};
pub use run::{Completion, GestureRun, RunState};
pub use runtime::{spawn_gesture, GestureHandle};
