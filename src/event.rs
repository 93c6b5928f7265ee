use crate::{
    profile::{ExerciseKind, FormError, Stage},
    session::SessionResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StageChanged {
        from: Stage,
        to: Stage,
    },
    ReadyForm,
    FeedbackRaised {
        exercise: ExerciseKind,
        error: FormError,
        message: &'static str,
    },
    FeedbackCleared {
        errors: Vec<FormError>,
    },
    RepCounted {
        correct: bool,
        correct_count: u32,
        incorrect_count: u32,
    },
    RestStarted {
        set: u32,
        seconds: u32,
    },
    RestTick {
        remaining: u32,
    },
    SetStarted {
        set: u32,
    },
    SessionFinished(SessionResult),
}
