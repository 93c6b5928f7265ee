use crate::{
    event::Event,
    pose::Pose,
    profile::ExerciseKind,
    session::{Session, TimerTag},
    sink::{FeedbackSink, ResultSink},
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread,
    time::Duration,
};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum Input {
    Frame(Box<Pose>),
    Tick(TimerTag),
    Switch(ExerciseKind),
    EndOfInput,
    Stop,
}

pub trait RestTimer {
    fn start(&mut self, tag: TimerTag, ticks: u32);

    fn cancel(&mut self);
}

pub struct ThreadTimer {
    tx: Sender<Input>,
    interval: Duration,
    cancelled: Option<Arc<AtomicBool>>,
}

impl ThreadTimer {
    pub fn new(tx: Sender<Input>, interval: Duration) -> Self {
        Self {
            tx,
            interval,
            cancelled: None,
        }
    }
}

impl RestTimer for ThreadTimer {
    fn start(&mut self, tag: TimerTag, ticks: u32) {
        self.cancel();

        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancelled = Some(cancelled.clone());
        let tx = self.tx.clone();
        let interval = self.interval;

        thread::spawn(move || {
            for _ in 0..ticks {
                thread::sleep(interval);
                if cancelled.load(Ordering::SeqCst) || tx.send(Input::Tick(tag)).is_err() {
                    break;
                }
            }
        });
    }

    fn cancel(&mut self) {
        if let Some(cancelled) = self.cancelled.take() {
            cancelled.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct Engine<T, F, R> {
    session: Session,
    timer: T,
    feedback: F,
    results: R,
    draining: bool,
}

impl<T, F, R> Engine<T, F, R>
where
    T: RestTimer,
    F: FeedbackSink,
    R: ResultSink,
{
    pub fn new(session: Session, timer: T, feedback: F, results: R) -> Self {
        Self {
            session,
            timer,
            feedback,
            results,
            draining: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    /// Apply one input. Returns `false` once the engine should stop.
    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Frame(pose) => {
                let events = self.session.process_frame(&pose);
                self.dispatch(events);
            }
            Input::Tick(tag) => {
                if self.session.timer_tag() != Some(tag) {
                    debug!(message = "ignoring stale rest tick", ?tag);
                } else {
                    let events = self.session.tick();
                    self.dispatch(events);
                }
            }
            Input::Switch(exercise) => {
                self.timer.cancel();
                let events = self.session.switch_exercise(exercise);
                self.dispatch(events);
            }
            Input::EndOfInput => self.draining = true,
            Input::Stop => {
                self.timer.cancel();
                return false;
            }
        }

        if self.draining && !self.session.is_resting() {
            self.timer.cancel();
            return false;
        }
        true
    }

    pub fn run<U>(&mut self, inputs: &Receiver<Input>, running: &AtomicBool, mut on_update: U)
    where
        U: FnMut(&Session),
    {
        while running.load(Ordering::SeqCst) {
            let input = match inputs.recv_timeout(POLL_INTERVAL) {
                Ok(input) => input,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };
            let keep_running = self.handle(input);
            on_update(&self.session);
            if !keep_running {
                break;
            }
        }
        self.timer.cancel();
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::FeedbackRaised {
                    exercise, message, ..
                } => self.feedback.feedback_raised(exercise, message),
                Event::RestStarted { seconds, .. } => {
                    if let Some(tag) = self.session.timer_tag() {
                        self.timer.start(tag, seconds);
                    }
                }
                Event::SessionFinished(result) => {
                    if let Err(error) = self.results.submit(&result) {
                        warn!(message = "failed to submit session result", %error);
                    }
                }
                other => debug!(event = ?other),
            }
        }
    }
}
