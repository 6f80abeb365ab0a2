use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use super::*;
use crate::program::GestureProgram;
use dispatch::{DispatchConfig, DispatchController, HostCapabilities, RecordingSink};
use shared::domain::{Point, TargetId, Vocabulary};

type SharedSurface = Arc<Mutex<DispatchController<RecordingSink>>>;

fn shared_surface(vocabulary: Vocabulary) -> SharedSurface {
    Arc::new(Mutex::new(DispatchController::with_config(
        TargetId::new("surface"),
        RecordingSink::new(),
        DispatchConfig {
            vocabulary,
            host: HostCapabilities::default(),
            ..DispatchConfig::default()
        },
    )))
}

fn flag() -> (Arc<AtomicBool>, Option<Completion>) {
    let called = Arc::new(AtomicBool::new(false));
    let hook = called.clone();
    let completion: Completion = Box::new(move || hook.store(true, Ordering::SeqCst));
    (called, Some(completion))
}

#[tokio::test(start_paused = true)]
async fn drag_left_runs_to_completion_on_the_timer() {
    let library = GestureLibrary::with_builtins();
    let surface = shared_surface(Vocabulary::Touch);
    let (called, completion) = flag();
    let started = Instant::now();

    let handle = spawn_gesture(surface.clone(), &library, "DragLeft", completion).expect("spawn");
    assert_eq!(handle.name().as_str(), "DragLeft");
    assert!(handle.finished().await.expect("gesture"));

    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(630) && elapsed < Duration::from_millis(632),
        "ended after {elapsed:?}"
    );
    assert!(called.load(Ordering::SeqCst));
    let guard = surface.lock().await;
    assert_eq!(guard.sink().len(), 22);
    assert_eq!(guard.contacts(), &[Point::new(100.0, 120.0)]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_gesture_never_ends_or_completes() {
    let library = GestureLibrary::with_builtins();
    let surface = shared_surface(Vocabulary::PointerTouch);
    let (called, completion) = flag();

    let handle = spawn_gesture(surface.clone(), &library, "Hold", completion).expect("spawn");
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    assert!(!handle.finished().await.expect("cancelled"));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(!called.load(Ordering::SeqCst));
    assert_eq!(surface.lock().await.sink().event_types(), vec!["MSPointerDown"]);
}

#[tokio::test(start_paused = true)]
async fn unknown_gesture_fails_before_spawning() {
    let library = GestureLibrary::with_builtins();
    let surface = shared_surface(Vocabulary::Touch);
    let (called, completion) = flag();

    let err = spawn_gesture(surface.clone(), &library, "NoSuchGesture", completion)
        .err()
        .expect("should fail");
    assert_eq!(err, FakeTouchError::invalid_gesture("NoSuchGesture"));
    assert!(!called.load(Ordering::SeqCst));
    assert!(surface.lock().await.sink().is_empty());
}

#[tokio::test(start_paused = true)]
async fn two_surfaces_run_concurrently_without_sharing_contacts() {
    let library = GestureLibrary::with_builtins();
    let pinch = shared_surface(Vocabulary::Touch);
    let drag = shared_surface(Vocabulary::Mouse);

    let first = spawn_gesture(pinch.clone(), &library, "PinchOut", None).expect("spawn");
    let second = spawn_gesture(drag.clone(), &library, "DragRight", None).expect("spawn");
    assert!(first.finished().await.expect("pinch"));
    assert!(second.finished().await.expect("drag"));

    assert_eq!(
        pinch.lock().await.contacts(),
        &[Point::new(170.0, 30.0), Point::new(30.0, 170.0)]
    );
    assert_eq!(drag.lock().await.contacts(), &[Point::new(160.0, 140.0)]);
}

struct Parked;

impl GestureProgram for Parked {
    fn begin(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.set_touches(vec![Point::new(1.0, 1.0)]);
        surface.trigger_start()?;
        Ok(Step::Wait(Duration::MAX))
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<Step, FakeTouchError> {
        surface.trigger_end()?;
        Ok(Step::Done)
    }
}

#[tokio::test(start_paused = true)]
async fn wait_beyond_the_timer_range_parks_until_cancelled() {
    let mut library = GestureLibrary::new();
    library.register("Parked", || Box::new(Parked));
    let surface = shared_surface(Vocabulary::Touch);
    let (called, completion) = flag();

    let handle = spawn_gesture(surface.clone(), &library, "Parked", completion).expect("spawn");
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!handle.is_finished());

    handle.cancel();
    assert!(!handle.finished().await.expect("cancelled"));
    assert!(!called.load(Ordering::SeqCst));
    assert_eq!(surface.lock().await.sink().event_types(), vec!["touchstart"]);
}
