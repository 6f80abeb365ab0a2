use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dispatch::{DispatchController, EventSink, Surface};
use gestures::{spawn_gesture, GestureLibrary, TriggerGesture};
use serde::Serialize;
use shared::{
    domain::{Phase, Point, TargetId, Vocabulary},
    protocol::EventDescriptor,
};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "faketouch", about = "Emit simulated touch, mouse and pointer events")]
struct Cli {
    /// Settings file; defaults to ./faketouch.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    target: Option<String>,
    /// touch, mouse, touch-and-mouse, pointer-touch, pointer-mouse,
    /// pointer-pen, or a legacy numeric code.
    #[arg(long)]
    vocabulary: Option<Vocabulary>,
    /// Use pointerdown/pointermove/pointerup instead of MSPointer names.
    #[arg(long)]
    standard_pointer_names: bool,
    #[arg(long)]
    strict: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered gestures.
    List,
    /// Run a named gesture.
    Gesture {
        name: String,
        /// Wait for the scheduled ticks on the wall clock.
        #[arg(long)]
        realtime: bool,
        /// Stop after this many milliseconds without completing.
        #[arg(long)]
        cancel_after_ms: Option<u64>,
    },
    /// Dispatch a single phase, e.g. `phase start --touches 10,20;30,40`.
    Phase {
        phase: PhaseArg,
        #[arg(long)]
        touches: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PhaseArg {
    Start,
    Move,
    End,
    Cancel,
}

impl From<PhaseArg> for Phase {
    fn from(value: PhaseArg) -> Self {
        match value {
            PhaseArg::Start => Phase::Start,
            PhaseArg::Move => Phase::Move,
            PhaseArg::End => Phase::End,
            PhaseArg::Cancel => Phase::Cancel,
        }
    }
}

#[derive(Serialize)]
struct EmittedLine<'a> {
    target: &'a TargetId,
    #[serde(flatten)]
    event: &'a EventDescriptor,
}

/// Writes every event as one JSON line.
struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, target: &TargetId, event: &EventDescriptor) -> bool {
        let line = EmittedLine { target, event };
        let written = serde_json::to_string(&line)
            .map_err(io::Error::from)
            .and_then(|json| writeln!(self.out, "{json}"));
        if let Err(error) = &written {
            warn!(%error, event_type = %event.event_type, "failed to write event");
        }
        written.is_ok()
    }
}

fn parse_touches(raw: &str) -> Result<Vec<Point>> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| anyhow!("expected 'x,y', got '{pair}'"))?;
            let x = x.trim().parse::<f64>().with_context(|| format!("invalid x in '{pair}'"))?;
            let y = y.trim().parse::<f64>().with_context(|| format!("invalid y in '{pair}'"))?;
            Ok(Point::new(x, y))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(target) = cli.target {
        settings.target = target;
    }
    if let Some(vocabulary) = cli.vocabulary {
        settings.vocabulary = vocabulary;
    }
    if cli.standard_pointer_names {
        settings.prefixed_pointer_names = false;
    }
    if cli.strict {
        settings.strict_phases = true;
    }

    let library = GestureLibrary::with_builtins();
    let mut surface = DispatchController::with_config(
        TargetId::new(settings.target.clone()),
        JsonLinesSink { out: io::stdout() },
        settings.dispatch_config(),
    );
    info!(target_id = %settings.target, vocabulary = %settings.vocabulary, "surface ready");

    match cli.command {
        Command::List => {
            for name in library.names() {
                println!("{name}");
            }
        }
        Command::Gesture {
            name,
            realtime: false,
            cancel_after_ms,
        } => {
            let mut run = surface.trigger_gesture(&library, &name, None)?;
            match cancel_after_ms {
                Some(ms) => {
                    run.advance(&mut surface, Duration::from_millis(ms))?;
                    run.cancel();
                }
                None => {
                    run.run_to_completion(&mut surface)?;
                }
            }
            info!(gesture = %name, elapsed_ms = run.elapsed().as_millis() as u64, state = ?run.state(), "done");
        }
        Command::Gesture {
            name,
            realtime: true,
            cancel_after_ms,
        } => {
            let shared = Arc::new(Mutex::new(surface));
            let handle = spawn_gesture(shared, &library, &name, None)?;
            if let Some(ms) = cancel_after_ms {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                handle.cancel();
            }
            let completed = handle.finished().await?;
            info!(gesture = %name, completed, "done");
        }
        Command::Phase { phase, touches } => {
            let touches = touches.as_deref().map(parse_touches).transpose()?;
            let outcome = surface.trigger(phase.into(), touches)?;
            info!(emitted = outcome.emitted(), "dispatched");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_separated_touches() {
        let touches = parse_touches("10,20; 30.5 , 40").expect("parse");
        assert_eq!(touches, vec![Point::new(10.0, 20.0), Point::new(30.5, 40.0)]);
    }

    #[test]
    fn rejects_malformed_touch_pairs() {
        assert!(parse_touches("10;20").is_err());
        assert!(parse_touches("ten,20").is_err());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_lines_sink_reports_write_failures() {
        let target = TargetId::new("surface");
        let mut surface = DispatchController::new(target.clone(), JsonLinesSink { out: Vec::new() });
        surface.set_touches(vec![Point::new(1.5, 2.5)]);
        let outcome = surface.trigger_start().expect("start");
        assert_eq!(outcome.delivered, vec![true]);

        let written = String::from_utf8(surface.sink().out.clone()).expect("utf8");
        let line: serde_json::Value = serde_json::from_str(written.trim_end()).expect("json");
        assert_eq!(line["target"], "surface");

        let mut broken = JsonLinesSink { out: BrokenPipe };
        let event = surface.descriptors(Phase::Start).remove(0);
        assert!(!broken.emit(&target, &event));
    }

    #[test]
    fn cli_accepts_legacy_vocabulary_codes() {
        let cli = Cli::try_parse_from(["faketouch", "--vocabulary", "100", "gesture", "Rotate"])
            .expect("parse");
        assert_eq!(cli.vocabulary, Some(Vocabulary::PointerTouch));
        assert!(matches!(cli.command, Command::Gesture { realtime: false, .. }));
    }
}
