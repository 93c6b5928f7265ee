use crate::{
    event::Event,
    profile::{FormError, Stage},
};
use std::collections::{BTreeSet, VecDeque};

/// Maximum number of stage transitions remembered between two `S1` entries.
pub const HISTORY_LEN: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    pub stage: Stage,
    pub history: VecDeque<Stage>,
    pub error_flagged: bool,
    pub feedback: BTreeSet<FormError>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub ready_form: bool,
}

impl AnalysisState {
    pub fn total(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    pub fn feedback_messages(&self) -> Vec<&'static str> {
        self.feedback.iter().map(|error| error.message()).collect()
    }

    pub(crate) fn clear_feedback(&mut self, events: &mut Vec<Event>) {
        self.error_flagged = false;
        if !self.feedback.is_empty() {
            let errors = std::mem::take(&mut self.feedback).into_iter().collect();
            events.push(Event::FeedbackCleared { errors });
        }
    }

    pub(crate) fn reset_for_set(&mut self, events: &mut Vec<Event>) {
        self.stage = Stage::Unknown;
        self.history.clear();
        self.ready_form = false;
        self.clear_feedback(events);
    }
}
