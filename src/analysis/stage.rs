use super::{
    state::{AnalysisState, HISTORY_LEN},
    validator,
};
use crate::{event::Event, profile::Stage};
use tracing::debug;

pub(crate) fn track(state: &mut AnalysisState, next: Stage, events: &mut Vec<Event>) -> bool {
    if next == state.stage {
        return false;
    }

    let from = std::mem::replace(&mut state.stage, next);
    debug!(message = "stage transition", ?from, to = ?next);
    events.push(Event::StageChanged { from, to: next });

    match next {
        Stage::S1 => {
            validator::close_cycle(state, events);
        }
        Stage::S2 | Stage::S3 => {
            state.history.push_back(next);
            if state.history.len() > HISTORY_LEN {
                state.history.pop_front();
            }
        }
        Stage::Unknown => {}
    }
    true
}
