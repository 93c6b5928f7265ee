use crate::{
    analysis::{AnalysisState, Analyzer},
    config::SessionConfig,
    error::Error,
    event::Event,
    pose::Pose,
    profile::{ExerciseKind, Stage},
    schedule::{Phase, SetSchedule, Tick},
};
use serde::Serialize;
use tracing::{info, trace};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimerTag {
    pub session: SessionId,
    pub set: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub exercise_type: ExerciseKind,
    pub count: u32,
    pub accuracy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub exercise: ExerciseKind,
    pub stage: Stage,
    pub history: Vec<Stage>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub ready_form: bool,
    pub feedback: Vec<&'static str>,
    pub current_set: u32,
    pub total_sets: u32,
    pub resting: bool,
    pub rest_remaining: Option<u32>,
    pub finished: bool,
}

pub struct Session {
    id: SessionId,
    config: SessionConfig,
    analyzer: Analyzer,
    schedule: SetSchedule,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        config.validate()?;
        info!(
            message = "starting session",
            exercise = %config.exercise,
            reps_per_set = config.reps_per_set,
            total_sets = config.total_sets
        );
        Ok(Self {
            id: SessionId(0),
            analyzer: Analyzer::new(config.exercise, config.side_hysteresis),
            schedule: SetSchedule::new(config.reps_per_set, config.total_sets, config.rest_seconds),
            config,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.config.exercise
    }

    pub fn state(&self) -> &AnalysisState {
        self.analyzer.state()
    }

    pub fn schedule(&self) -> &SetSchedule {
        &self.schedule
    }

    pub fn is_resting(&self) -> bool {
        self.schedule.rest_remaining().is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.schedule.phase() == Phase::Finished
    }

    /// The tag live rest ticks must carry, if a rest is in progress.
    pub fn timer_tag(&self) -> Option<TimerTag> {
        match self.schedule.phase() {
            Phase::Resting { set, .. } => Some(TimerTag {
                session: self.id,
                set,
            }),
            _ => None,
        }
    }

    pub fn process_frame(&mut self, pose: &Pose) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.schedule.is_active() {
            trace!(message = "classification suspended", phase = ?self.schedule.phase());
            return events;
        }
        if pose.score < self.config.min_pose_confidence {
            trace!(message = "skipping low confidence pose", score = pose.score);
            return events;
        }

        self.analyzer
            .analyze(pose, self.config.min_part_confidence, &mut events);

        if let Some(set) = self.schedule.on_reps(self.analyzer.state().total()) {
            let seconds = self.schedule.rest_seconds();
            info!(message = "set complete, resting", set, seconds);
            events.push(Event::RestStarted { set, seconds });
        }

        events
    }

    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        match self.schedule.tick() {
            Tick::Ignored => {}
            Tick::Counting { remaining } => events.push(Event::RestTick { remaining }),
            Tick::NextSet { set } => {
                self.analyzer.start_set(&mut events);
                info!(message = "starting set", set, total_sets = self.config.total_sets);
                events.push(Event::SetStarted { set });
            }
            Tick::Finished => {
                let result = self.result();
                info!(
                    message = "session finished",
                    exercise = %result.exercise_type,
                    count = result.count,
                    accuracy = result.accuracy
                );
                events.push(Event::SessionFinished(result));
            }
        }

        events
    }

    /// Re-initialize for a new exercise: counters, sets and rest all reset and
    /// the session id changes so stale timers are recognizable.
    pub fn switch_exercise(&mut self, exercise: ExerciseKind) -> Vec<Event> {
        let mut events = Vec::new();
        let pending = &self.analyzer.state().feedback;
        if !pending.is_empty() {
            events.push(Event::FeedbackCleared {
                errors: pending.iter().copied().collect(),
            });
        }

        self.id = SessionId(self.id.0 + 1);
        self.config.exercise = exercise;
        self.analyzer = Analyzer::new(exercise, self.config.side_hysteresis);
        self.schedule = SetSchedule::new(
            self.config.reps_per_set,
            self.config.total_sets,
            self.config.rest_seconds,
        );
        info!(message = "switched exercise", %exercise, session = self.id.0);

        events
    }

    pub fn result(&self) -> SessionResult {
        let state = self.analyzer.state();
        let count = state.total();
        let accuracy = if count == 0 {
            0.0
        } else {
            state.correct_count as f32 / count as f32
        };
        SessionResult {
            exercise_type: self.config.exercise,
            count,
            accuracy,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.analyzer.state();
        Snapshot {
            exercise: self.config.exercise,
            stage: state.stage,
            history: state.history.iter().copied().collect(),
            correct_count: state.correct_count,
            incorrect_count: state.incorrect_count,
            ready_form: state.ready_form,
            feedback: state.feedback_messages(),
            current_set: self.schedule.current_set(),
            total_sets: self.schedule.total_sets(),
            resting: self.is_resting(),
            rest_remaining: self.schedule.rest_remaining(),
            finished: self.is_finished(),
        }
    }
}
