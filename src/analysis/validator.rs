use super::state::AnalysisState;
use crate::{event::Event, profile::Stage};
use tracing::{debug, info};

pub const CYCLE: [Stage; 3] = [Stage::S2, Stage::S3, Stage::S2];

/// Close the current cycle on entry into `S1`.
pub(crate) fn close_cycle(state: &mut AnalysisState, events: &mut Vec<Event>) -> Option<bool> {
    let complete = state.history.iter().eq(CYCLE.iter());

    let counted = if complete {
        let correct = !state.error_flagged;
        if correct {
            state.correct_count += 1;
        } else {
            state.incorrect_count += 1;
        }
        info!(
            message = "repetition counted",
            correct,
            correct_count = state.correct_count,
            incorrect_count = state.incorrect_count
        );
        events.push(Event::RepCounted {
            correct,
            correct_count: state.correct_count,
            incorrect_count: state.incorrect_count,
        });
        state.clear_feedback(events);
        Some(correct)
    } else {
        if !state.history.is_empty() {
            debug!(message = "discarding incomplete cycle", history = ?state.history);
        }
        None
    };

    state.history.clear();
    counted
}

#[cfg(test)]
mod tests {
    use super::close_cycle;
    use crate::{
        analysis::state::AnalysisState,
        event::Event,
        profile::{FormError, Stage},
    };

    fn with_history(stages: &[Stage]) -> AnalysisState {
        let mut state = AnalysisState::default();
        state.history.extend(stages.iter().copied());
        state
    }

    #[test]
    fn canonical_cycle_counts_correct() {
        let mut state = with_history(&[Stage::S2, Stage::S3, Stage::S2]);
        let mut events = vec![];
        assert_eq!(close_cycle(&mut state, &mut events), Some(true));
        assert_eq!(state.correct_count, 1);
        assert_eq!(state.incorrect_count, 0);
        assert!(state.history.is_empty());
        assert_eq!(
            events,
            vec![Event::RepCounted {
                correct: true,
                correct_count: 1,
                incorrect_count: 0
            }]
        );
    }

    #[test]
    fn flagged_cycle_counts_incorrect_and_clears() {
        let mut state = with_history(&[Stage::S2, Stage::S3, Stage::S2]);
        state.error_flagged = true;
        state.feedback.insert(FormError::KneeOverToe);

        let mut events = vec![];
        assert_eq!(close_cycle(&mut state, &mut events), Some(false));
        assert_eq!(state.incorrect_count, 1);
        assert!(!state.error_flagged);
        assert!(state.feedback.is_empty());
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            Event::FeedbackCleared {
                errors: vec![FormError::KneeOverToe]
            }
        );
    }

    #[test]
    fn malformed_cycles_are_dropped() {
        for history in &[
            vec![Stage::S2],
            vec![Stage::S2, Stage::S3],
            vec![Stage::S3, Stage::S2, Stage::S3],
            vec![Stage::S3, Stage::S3, Stage::S2],
        ] {
            let mut state = with_history(history);
            state.error_flagged = true;
            let mut events = vec![];
            assert_eq!(close_cycle(&mut state, &mut events), None);
            assert_eq!(state.total(), 0);
            assert!(state.history.is_empty());
            // the error flag carries over to the next cycle
            assert!(state.error_flagged);
            assert!(events.is_empty());
        }
    }
}
