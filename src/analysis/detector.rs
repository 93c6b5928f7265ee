use super::state::AnalysisState;
use crate::{event::Event, profile::ExerciseProfile, select::Selection};
use tracing::info;

pub(crate) fn run_checks(
    profile: &ExerciseProfile,
    selection: &Selection<'_>,
    state: &mut AnalysisState,
    min_part_confidence: f32,
    events: &mut Vec<Event>,
) {
    for check in profile.checks {
        if check.after_ready && !state.ready_form {
            continue;
        }
        if !selection.confident(check.roles, min_part_confidence) {
            continue;
        }
        if !check.condition.holds(selection) {
            continue;
        }

        state.error_flagged = true;
        if state.feedback.insert(check.error) {
            info!(
                message = "form error",
                exercise = %profile.kind,
                error = %check.error
            );
            events.push(Event::FeedbackRaised {
                exercise: profile.kind,
                error: check.error,
                message: check.error.message(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run_checks;
    use crate::{
        analysis::state::AnalysisState,
        event::Event,
        pose::{
            testing::{inclined_from, PoseBuilder},
            LandmarkKind::*,
            Pose,
        },
        profile::{ExerciseKind, FormError},
        select::LandmarkSelector,
    };

    fn squat(knee: f32, shin: f32, ankle_score: f32) -> Pose {
        let hip = (0.5, 0.4);
        let knee_xy = inclined_from(hip, knee);
        PoseBuilder::new()
            .at(RightEar, (0.5, 0.1), 0.9)
            .at(RightHip, hip, 0.9)
            .at(RightKnee, knee_xy, 0.9)
            .at(RightAnkle, inclined_from(knee_xy, shin), ankle_score)
            .build()
    }

    fn check(pose: &Pose, state: &mut AnalysisState) -> Vec<Event> {
        let mut events = vec![];
        let selection = LandmarkSelector::new(0.0).select(pose);
        run_checks(
            ExerciseKind::Squat.profile(),
            &selection,
            state,
            0.6,
            &mut events,
        );
        events
    }

    #[test]
    fn depth_error_raised_once() {
        let mut state = AnalysisState::default();
        let events = check(&squat(110.0, 0.0, 0.9), &mut state);
        assert!(state.error_flagged);
        assert_eq!(
            events,
            vec![Event::FeedbackRaised {
                exercise: ExerciseKind::Squat,
                error: FormError::SquatTooDeep,
                message: "squatting too deep",
            }]
        );
        assert!(check(&squat(112.0, 0.0, 0.9), &mut state).is_empty());
        assert_eq!(state.feedback.len(), 1);
    }

    #[test]
    fn subsiding_condition_does_not_clear() {
        let mut state = AnalysisState::default();
        check(&squat(110.0, 0.0, 0.9), &mut state);
        assert!(check(&squat(20.0, 0.0, 0.9), &mut state).is_empty());
        assert!(state.error_flagged);
        assert_eq!(state.feedback_messages(), vec!["squatting too deep"]);
    }

    #[test]
    fn knee_over_toe_needs_ankle() {
        let mut state = AnalysisState::default();
        assert!(check(&squat(50.0, 40.0, 0.1), &mut state).is_empty());
        assert!(!state.error_flagged);

        let events = check(&squat(50.0, 40.0, 0.9), &mut state);
        assert_eq!(events.len(), 1);
        assert!(state.feedback.contains(&FormError::KneeOverToe));
    }

    #[test]
    fn good_form_raises_nothing() {
        let mut state = AnalysisState::default();
        assert!(check(&squat(80.0, 10.0, 0.9), &mut state).is_empty());
        assert!(!state.error_flagged);
    }
}
