use crate::domain::outcome::PaymentOutcome;
use crate::flow::state::{FlowEvent, FlowState};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot apply {event:?} in state {from:?}")]
pub struct InvalidTransition {
    pub from: FlowState,
    pub event: FlowEvent,
}

/// Initiation ends redirected or failed, a status check ends successful or
/// failed. Terminal states accept nothing; a redirected payment resumes as a
/// new status check.
pub fn apply_transition(from: FlowState, event: FlowEvent) -> Result<FlowState, InvalidTransition> {
    if from.is_terminal() {
        return Err(InvalidTransition { from, event });
    }
    match (from, event) {
        (FlowState::Initiating, FlowEvent::Redirected) => Ok(FlowState::RedirectedToPartner),
        (FlowState::Initiating, FlowEvent::Failed) => Ok(FlowState::Failed),
        (FlowState::CheckingStatus, FlowEvent::Succeeded) => Ok(FlowState::Success),
        (FlowState::CheckingStatus, FlowEvent::Failed) => Ok(FlowState::Failed),
        _ => Err(InvalidTransition { from, event }),
    }
}

pub fn event_for(outcome: &PaymentOutcome) -> FlowEvent {
    match outcome {
        PaymentOutcome::RedirectTo { .. } => FlowEvent::Redirected,
        PaymentOutcome::Success { .. } => FlowEvent::Succeeded,
        PaymentOutcome::Failure { .. } => FlowEvent::Failed,
    }
}
