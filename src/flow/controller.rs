use crate::config::PartnerConfig;
use crate::domain::context::ResumeContext;
use crate::domain::outcome::{FailureCause, PaymentOutcome};
use crate::domain::payment::PaymentIntent;
use crate::error::{ConnectorError, Result};
use crate::flow::ports::{OutcomeMapper, RequestBuilder};
use crate::flow::state::FlowState;
use crate::flow::transitions::{apply_transition, event_for};
use crate::transport::{RawHttpResponse, Transport, WireRequest};
use crate::tsi::mapper::TsiOutcomeMapper;
use crate::tsi::request::TsiRequestBuilder;
use std::sync::Arc;

pub const SESSION_EXPIRED_MESSAGE: &str = "payment session expired";

/// Drives one payment through initiation and, after the shopper returns,
/// the status check. Every error is turned into a `Failure` outcome here.
#[derive(Clone)]
pub struct PaymentFlowController {
    transport: Arc<dyn Transport>,
    requests: Arc<dyn RequestBuilder>,
    outcomes: Arc<dyn OutcomeMapper>,
}

impl PaymentFlowController {
    pub fn new(
        transport: Arc<dyn Transport>,
        requests: Arc<dyn RequestBuilder>,
        outcomes: Arc<dyn OutcomeMapper>,
    ) -> Self {
        Self {
            transport,
            requests,
            outcomes,
        }
    }

    pub fn tsi(transport: Arc<dyn Transport>, config: PartnerConfig) -> Self {
        Self::new(
            transport,
            Arc::new(TsiRequestBuilder::new(config)),
            Arc::new(TsiOutcomeMapper),
        )
    }

    pub async fn initiate(&self, intent: &PaymentIntent) -> PaymentOutcome {
        let tid = intent.transaction_id.as_str();
        tracing::info!(tid = %tid, env = %intent.environment(), "initiating payment");

        let outcome = match self.try_initiate(intent).await {
            Ok(outcome) => outcome,
            Err(err) => failure_from(&err, tid),
        };
        settle(FlowState::Initiating, outcome, tid)
    }

    pub async fn finalize(&self, context: &ResumeContext) -> PaymentOutcome {
        let tid = context.transaction_id.as_str();
        if context.session_expired {
            return self.handle_session_expired(tid);
        }
        tracing::info!(tid = %tid, env = %context.environment(), "checking payment status");

        let outcome = match self.try_finalize(context).await {
            Ok(outcome) => outcome,
            Err(err) => failure_from(&err, tid),
        };
        settle(FlowState::CheckingStatus, outcome, tid)
    }

    /// The shopper never came back from the partner. No partner call is made.
    pub fn handle_session_expired(&self, transaction_id: &str) -> PaymentOutcome {
        tracing::info!(tid = %transaction_id, "payment session expired");
        let outcome =
            PaymentOutcome::failure(FailureCause::SessionExpired, SESSION_EXPIRED_MESSAGE, transaction_id);
        settle(FlowState::CheckingStatus, outcome, transaction_id)
    }

    async fn try_initiate(&self, intent: &PaymentIntent) -> Result<PaymentOutcome> {
        let request = self.requests.build_authorization_request(intent)?;
        let raw = self.exchange(&request).await?;
        self.outcomes.map_initiation(&raw, &intent.transaction_id)
    }

    async fn try_finalize(&self, context: &ResumeContext) -> Result<PaymentOutcome> {
        let request = self.requests.build_status_check_request(context)?;
        let raw = self.exchange(&request).await?;
        self.outcomes.map_status_check(&raw, &context.transaction_id)
    }

    /// Error statuses are reported as-is; their bodies are never parsed.
    async fn exchange(&self, request: &WireRequest) -> Result<RawHttpResponse> {
        let raw = self.transport.send(request).await?;
        if !raw.is_success() {
            return Err(ConnectorError::PartnerHttpError {
                status: raw.status,
                message: raw.status_message,
            });
        }
        Ok(raw)
    }
}

fn failure_from(err: &ConnectorError, transaction_id: &str) -> PaymentOutcome {
    let cause = err.failure_cause();
    tracing::warn!(tid = %transaction_id, ?cause, error = %err, "payment flow failed");
    PaymentOutcome::failure(cause, err.to_string(), transaction_id)
}

fn settle(from: FlowState, outcome: PaymentOutcome, transaction_id: &str) -> PaymentOutcome {
    match apply_transition(from, event_for(&outcome)) {
        Ok(state) => {
            tracing::info!(tid = %transaction_id, ?state, "payment flow settled");
            outcome
        }
        Err(err) => {
            tracing::error!(tid = %transaction_id, error = %err, "unexpected outcome for flow state");
            PaymentOutcome::failure(FailureCause::InternalError, err.to_string(), transaction_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::TransactionDetails;

    #[test]
    fn success_cannot_settle_an_initiation() {
        let outcome = PaymentOutcome::Success {
            transaction_id: "T1".to_string(),
            details: TransactionDetails::default(),
        };
        let settled = settle(FlowState::Initiating, outcome, "T1");
        assert_eq!(settled.failure_cause(), Some(FailureCause::InternalError));
    }

    #[test]
    fn redirect_settles_an_initiation() {
        let outcome = PaymentOutcome::RedirectTo {
            url: "https://pay.tsi.example/p/1".to_string(),
            transaction_id: "T1".to_string(),
        };
        assert_eq!(settle(FlowState::Initiating, outcome.clone(), "T1"), outcome);
    }

    #[test]
    fn errors_keep_their_cause() {
        let err = ConnectorError::PartnerHttpError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let outcome = failure_from(&err, "T1");
        assert_eq!(outcome.failure_cause(), Some(FailureCause::CommunicationError));
        assert_eq!(outcome.transaction_id(), "T1");
    }
}
