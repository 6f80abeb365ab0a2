use std::sync::Arc;

use dispatch::Surface;
use shared::error::FakeTouchError;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};

use crate::{
    library::{GestureLibrary, GestureName},
    program::Step,
    run::Completion,
};

pub struct GestureHandle {
    name: GestureName,
    task: JoinHandle<Result<(), FakeTouchError>>,
}

impl GestureHandle {
    pub fn name(&self) -> &GestureName {
        &self.name
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// `Ok(false)` if the gesture was cancelled first.
    pub async fn finished(self) -> Result<bool, FakeTouchError> {
        match self.task.await {
            Ok(result) => result.map(|()| true),
            Err(err) if err.is_cancelled() => Ok(false),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

/// Ticks are scheduled relative to the previous scheduled tick, not to when
/// the previous one finished. Must be called from within a tokio runtime.
pub fn spawn_gesture<S>(
    surface: Arc<Mutex<S>>,
    library: &GestureLibrary,
    name: &str,
    on_complete: Option<Completion>,
) -> Result<GestureHandle, FakeTouchError>
where
    S: Surface + Send + 'static,
{
    let mut program = library.create(name)?;
    let gesture = GestureName::new(name);
    let task_name = gesture.clone();

    let task = tokio::spawn(async move {
        info!(gesture = %task_name, "gesture started");
        let mut due = Instant::now();
        let mut step = {
            let mut guard = surface.lock().await;
            program.begin(&mut *guard)?
        };

        while let Step::Wait(delay) = step {
            due = match due.checked_add(delay) {
                Some(next) => next,
                None => {
                    warn!(gesture = %task_name, ?delay, "wait exceeds the timer range, parked until cancelled");
                    std::future::pending::<Instant>().await
                }
            };
            sleep_until(due).await;
            debug!(gesture = %task_name, "gesture tick");
            let mut guard = surface.lock().await;
            step = program.tick(&mut *guard)?;
        }

        info!(gesture = %task_name, "gesture completed");
        if let Some(on_complete) = on_complete {
            on_complete();
        }
        Ok::<(), FakeTouchError>(())
    });

    Ok(GestureHandle {
        name: gesture,
        task,
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
