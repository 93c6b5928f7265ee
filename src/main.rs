use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use repcoach::{
    engine::{Engine, Input, ThreadTimer},
    profile::ExerciseKind,
    replay,
    session::Session,
    sink::{JsonResultSink, LogFeedback},
    SessionConfig,
};
use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::channel,
        Arc,
    },
    thread,
    time::Duration,
};
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON-lines frame log to replay.
    #[structopt(parse(from_os_str))]
    frames: PathBuf,

    /// TOML session configuration; overrides the session flags below.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(short, long, default_value = "squat")]
    exercise: ExerciseKind,

    #[structopt(short, long, default_value = "10")]
    reps_per_set: u32,

    #[structopt(short = "s", long, default_value = "3")]
    total_sets: u32,

    /// Frames with a lower overall pose score are skipped.
    #[structopt(long, default_value = "0.2")]
    min_pose_confidence: f32,

    /// Landmarks with a lower score are treated as missing.
    #[structopt(long, default_value = "0.6")]
    min_part_confidence: f32,

    #[structopt(long, default_value = "90")]
    rest_seconds: u32,

    #[structopt(long, default_value = "0.0")]
    side_hysteresis: f32,

    #[structopt(long, default_value = "1000")]
    tick_ms: u64,

    #[structopt(long, default_value = "0")]
    frame_interval_ms: u64,

    /// Append session results here instead of stdout.
    #[structopt(short = "o", long, parse(from_os_str))]
    result_out: Option<PathBuf>,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(long)]
    show_progress: bool,
}

impl Opt {
    fn session_config(&self) -> Result<SessionConfig> {
        if let Some(path) = self.config.as_ref() {
            return SessionConfig::load(path)
                .with_context(|| format!("failed loading config from {}", path.display()));
        }
        let config = SessionConfig {
            exercise: self.exercise,
            reps_per_set: self.reps_per_set,
            total_sets: self.total_sets,
            min_pose_confidence: self.min_pose_confidence,
            min_part_confidence: self.min_part_confidence,
            rest_seconds: self.rest_seconds,
            side_hysteresis: self.side_hysteresis,
        };
        config.validate().context("invalid session flags")?;
        Ok(config)
    }
}

fn progress_message(session: &Session) -> String {
    let snapshot = session.snapshot();
    let mut message = format!(
        "{} set {}/{} stage {:?} correct {} incorrect {}",
        snapshot.exercise,
        snapshot.current_set,
        snapshot.total_sets,
        snapshot.stage,
        snapshot.correct_count,
        snapshot.incorrect_count,
    );
    if let Some(remaining) = snapshot.rest_remaining {
        message.push_str(&format!(" resting {}s", remaining));
    }
    if !snapshot.feedback.is_empty() {
        message.push_str(&format!(" [{}]", snapshot.feedback.join(", ")));
    }
    message
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let config = opt.session_config()?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    let frames = File::open(&opt.frames)
        .with_context(|| format!("failed opening frame log {}", opt.frames.display()))?;

    let results: Box<dyn Write + Send> = match opt.result_out.as_ref() {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed opening result file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let (inputs_tx, inputs_rx) = channel();

    let session = Session::new(config).context("failed constructing session")?;
    let mut engine = Engine::new(
        session,
        ThreadTimer::new(inputs_tx.clone(), Duration::from_millis(opt.tick_ms)),
        LogFeedback,
        JsonResultSink::new(results),
    );

    let pb = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let frame_interval = Duration::from_millis(opt.frame_interval_ms);
    let running_read = running.clone();

    crossbeam::thread::scope(|scope| {
        let reader = scope.spawn(move |_| {
            for input in replay::inputs(BufReader::new(frames)) {
                if !running_read.load(Ordering::SeqCst) {
                    break;
                }
                let input = match input {
                    Ok(input) => input,
                    Err(e) => {
                        inputs_tx.send(Input::Stop)?;
                        return Err(e).context("failed replaying frame log");
                    }
                };
                inputs_tx.send(input)?;
                if !frame_interval.is_zero() {
                    thread::sleep(frame_interval);
                }
            }
            inputs_tx.send(Input::EndOfInput)?;
            Ok::<_, anyhow::Error>(())
        });

        engine.run(&inputs_rx, &running, |session| {
            if let Some(pb) = pb.as_ref() {
                pb.set_message(progress_message(session));
                pb.tick();
            }
        });
        // unblock the reader if the engine stopped first
        running.store(false, Ordering::SeqCst);
        drop(inputs_rx);

        reader
            .join()
            .map_err(|_| anyhow!("frame reader panicked"))?
            .or_else(|e| {
                if e.is::<std::sync::mpsc::SendError<Input>>() {
                    Ok(())
                } else {
                    Err(e)
                }
            })
    })
    .map_err(|_| anyhow!("frame reader scope panicked"))??;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let session = engine.session();
    let result = session.result();
    if session.is_finished() {
        info!(
            message = "workout complete",
            exercise = %result.exercise_type,
            count = result.count,
            accuracy = result.accuracy
        );
    } else {
        warn!(
            message = "stopped before the last set finished",
            exercise = %result.exercise_type,
            set = session.schedule().current_set(),
            count = result.count,
            accuracy = result.accuracy
        );
    }

    Ok(())
}
