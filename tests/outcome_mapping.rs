use rust_decimal::Decimal;
use std::time::Duration;
use tsi_connector::domain::outcome::{FailureCause, PaymentOutcome};
use tsi_connector::error::ConnectorError;
use tsi_connector::flow::ports::OutcomeMapper;
use tsi_connector::transport::keep_alive::DEFAULT_KEEP_ALIVE;
use tsi_connector::transport::RawHttpResponse;
use tsi_connector::tsi::mapper::TsiOutcomeMapper;

#[test]
fn ok_status_check_is_a_success() {
    let outcome = check(r#"{"status":"OK","code":0,"message":"transaction found","tid":"T1",
        "transaction_id":"998877","value":"10,50","fixed":"f","date":"2018-08-02 10:37:22","country":"ES"}"#);

    match outcome {
        PaymentOutcome::Success { transaction_id, details } => {
            assert_eq!(transaction_id, "T1");
            assert_eq!(details.amount, Some(Decimal::new(1050, 2)));
            assert_eq!(details.fixed_amount, Some(false));
            assert_eq!(details.country.as_deref(), Some("ES"));
            assert!(details.date.is_some());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn not_found_is_a_partner_error() {
    let outcome = check(r#"{"status":"NOK","code":1,"message":"transaction not found"}"#);
    assert_eq!(outcome.failure_cause(), Some(FailureCause::PaymentPartnerError));
    match outcome {
        PaymentOutcome::Failure { message, .. } => assert_eq!(message, "transaction not found"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn partner_error_code_is_a_partner_error() {
    let outcome = check(r#"{"status":"ER","code":106,"message":"internal partner error"}"#);
    assert_eq!(outcome.failure_cause(), Some(FailureCause::PaymentPartnerError));
}

#[test]
fn codes_may_arrive_as_strings() {
    let outcome = check(r#"{"status":"ER","code":"103","message":"bad mac"}"#);
    assert_eq!(outcome.failure_cause(), Some(FailureCause::InvalidData));

    let outcome = check(r#"{"status":"OK","code":"0"}"#);
    assert!(matches!(outcome, PaymentOutcome::Success { .. }));
}

#[test]
fn unknown_codes_use_the_default_cause() {
    let outcome = check(r#"{"status":"ER","code":999}"#);
    assert_eq!(outcome.failure_cause(), Some(FailureCause::PaymentPartnerError));
}

#[test]
fn ok_with_error_code_is_not_a_success() {
    let outcome = check(r#"{"status":"OK","code":104}"#);
    assert_eq!(outcome.failure_cause(), Some(FailureCause::InvalidData));
}

#[test]
fn classification_is_deterministic() {
    let body = r#"{"status":"ER","code":105,"message":"amount mismatch"}"#;
    let first = check(body);
    for _ in 0..5 {
        assert_eq!(check(body), first);
    }
}

#[test]
fn failures_keep_our_transaction_id() {
    let outcome = check(r#"{"status":"ER","code":101,"tid":"OTHER"}"#);
    assert_eq!(outcome.transaction_id(), "T1");
}

#[test]
fn go_ok_redirects() {
    let outcome = TsiOutcomeMapper
        .map_initiation(
            &raw(Some(r#"{"status":1,"url":"https://pay.tsi.example/p/42"}"#)),
            "T1",
        )
        .unwrap();
    assert_eq!(
        outcome,
        PaymentOutcome::RedirectTo {
            url: "https://pay.tsi.example/p/42".to_string(),
            transaction_id: "T1".to_string(),
        }
    );
}

#[test]
fn go_decline_maps_through_its_own_table() {
    let outcome = TsiOutcomeMapper
        .map_initiation(&raw(Some(r#"{"status":4,"message":"invalid amount"}"#)), "T1")
        .unwrap();
    assert_eq!(outcome.failure_cause(), Some(FailureCause::InvalidData));
}

#[test]
fn missing_body_is_internal_and_bad_json_is_malformed() {
    let outcome = TsiOutcomeMapper.map_status_check(&raw(None), "T1").unwrap();
    assert_eq!(outcome.failure_cause(), Some(FailureCause::InternalError));

    let err = TsiOutcomeMapper
        .map_status_check(&raw(Some("status=OK")), "T1")
        .unwrap_err();
    assert!(matches!(err, ConnectorError::MalformedResponse(_)));
    assert_eq!(err.failure_cause(), FailureCause::InternalError);
}

fn check(body: &str) -> PaymentOutcome {
    TsiOutcomeMapper.map_status_check(&raw(Some(body)), "T1").unwrap()
}

fn raw(body: Option<&str>) -> RawHttpResponse {
    RawHttpResponse {
        status: 200,
        status_message: "OK".to_string(),
        body: body.map(str::to_string),
        elapsed: Duration::from_millis(12),
        keep_alive: DEFAULT_KEEP_ALIVE,
    }
}
