use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FlowState {
    Initiating,
    RedirectedToPartner,
    CheckingStatus,
    Success,
    Failed,
}

impl FlowState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlowState::RedirectedToPartner | FlowState::Success | FlowState::Failed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Redirected,
    Succeeded,
    Failed,
}
