mod detector;
mod stage;
pub mod state;
pub mod validator;

pub use state::{AnalysisState, HISTORY_LEN};

use crate::{
    event::Event,
    pose::Pose,
    profile::{ExerciseKind, ExerciseProfile},
    select::LandmarkSelector,
};
use tracing::{info, trace};

pub struct Analyzer {
    profile: &'static ExerciseProfile,
    selector: LandmarkSelector,
    state: AnalysisState,
}

impl Analyzer {
    pub fn new(kind: ExerciseKind, side_hysteresis: f32) -> Self {
        Self {
            profile: kind.profile(),
            selector: LandmarkSelector::new(side_hysteresis),
            state: AnalysisState::default(),
        }
    }

    pub fn profile(&self) -> &'static ExerciseProfile {
        self.profile
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn tracking(&self) -> bool {
        self.state.ready_form || !self.profile.has_readiness_gate()
    }

    pub fn analyze(&mut self, pose: &Pose, min_part_confidence: f32, events: &mut Vec<Event>) {
        let profile = self.profile;
        let selection = self.selector.select(pose);

        if selection.confident(profile.roles, min_part_confidence) {
            if !self.tracking() && profile.is_ready(&selection) {
                self.state.ready_form = true;
                info!(message = "ready form reached", exercise = %profile.kind);
                events.push(Event::ReadyForm);
            }

            if self.tracking() {
                let angle = profile.stage_angle.measure(&selection);
                trace!(message = "stage angle", angle, side = ?selection.side);
                if let Some(next) = profile.classify(angle) {
                    stage::track(&mut self.state, next, events);
                }
            }
        } else {
            trace!(message = "stage landmarks below part confidence");
        }

        detector::run_checks(
            profile,
            &selection,
            &mut self.state,
            min_part_confidence,
            events,
        );
    }

    pub fn start_set(&mut self, events: &mut Vec<Event>) {
        self.selector.reset();
        self.state.reset_for_set(events);
    }
}
