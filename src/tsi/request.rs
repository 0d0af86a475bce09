use crate::config::{PartnerConfig, GO_PATH, HOST, SCHEME, STATUS_PATH};
use crate::domain::context::ResumeContext;
use crate::domain::payment::{Environment, MerchantCredentials, PaymentIntent};
use crate::error::{ConnectorError, Result};
use crate::flow::ports::RequestBuilder;
use crate::transport::{WireRequest, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
use crate::tsi::mac;
use rust_decimal::Decimal;
use serde::Serialize;

/// Initiation ("Go") call. Field order is the MAC order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoRequest {
    pub mid: String,
    pub keyid: String,
    pub tid: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub sd: String,
    pub url_ok: String,
    pub url_ko: String,
    pub url_notify: String,
    pub mac: String,
}

impl GoRequest {
    pub fn from_intent(intent: &PaymentIntent) -> Result<Self> {
        let (mid, keyid, key) = credentials(&intent.credentials)?;
        let tid = required(&intent.transaction_id, "transaction id")?;
        let amount = format_amount(intent.amount_minor)?;
        let currency = currency_code(&intent.currency)?;
        let url_ok = required(&intent.return_urls.success_url, "success url")?;
        let url_ko = required(&intent.return_urls.cancel_url, "cancel url")?;
        let url_notify = intent.return_urls.notification_url.clone().unwrap_or_default();
        let description = intent.product_description.clone().unwrap_or_default();
        let sd = intent.soft_descriptor.clone().unwrap_or_default();

        let mac = mac::sign(
            key,
            &[
                mid,
                keyid,
                tid,
                amount.as_str(),
                currency.as_str(),
                description.as_str(),
                sd.as_str(),
                url_ok,
                url_ko,
                url_notify.as_str(),
            ],
        )?;

        Ok(Self {
            mid: mid.to_string(),
            keyid: keyid.to_string(),
            tid: tid.to_string(),
            amount,
            currency,
            description,
            sd,
            url_ok: url_ok.to_string(),
            url_ko: url_ko.to_string(),
            url_notify,
            mac,
        })
    }

    pub fn build_body(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ConnectorError::InvalidRequest(format!("cannot encode go request: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCheckRequest {
    pub mid: String,
    pub keyid: String,
    pub tid: String,
    pub mac: String,
}

impl StatusCheckRequest {
    pub fn from_context(context: &ResumeContext) -> Result<Self> {
        let (mid, keyid, key) = credentials(&context.credentials)?;
        let tid = required(&context.transaction_id, "transaction id")?;
        let mac = mac::sign(key, &[mid, keyid, tid])?;
        Ok(Self {
            mid: mid.to_string(),
            keyid: keyid.to_string(),
            tid: tid.to_string(),
            mac,
        })
    }

    pub fn build_body(&self) -> Result<String> {
        serde_urlencoded::to_string(self).map_err(|e| {
            ConnectorError::InvalidRequest(format!("cannot encode status check request: {e}"))
        })
    }
}

pub struct TsiRequestBuilder {
    config: PartnerConfig,
}

impl TsiRequestBuilder {
    pub fn new(config: PartnerConfig) -> Self {
        Self { config }
    }

    fn wire_request(
        &self,
        env: Environment,
        path_key: &str,
        body: String,
        content_type: &str,
    ) -> Result<WireRequest> {
        Ok(WireRequest {
            scheme: self.config.get(SCHEME, env)?.to_string(),
            host: self.config.get(HOST, env)?.to_string(),
            path: self.config.get(path_key, env)?.to_string(),
            body,
            content_type: content_type.to_string(),
        })
    }
}

impl RequestBuilder for TsiRequestBuilder {
    fn build_authorization_request(&self, intent: &PaymentIntent) -> Result<WireRequest> {
        let go = GoRequest::from_intent(intent)?;
        self.wire_request(intent.environment(), GO_PATH, go.build_body()?, CONTENT_TYPE_JSON)
    }

    fn build_status_check_request(&self, context: &ResumeContext) -> Result<WireRequest> {
        let check = StatusCheckRequest::from_context(context)?;
        self.wire_request(
            context.environment(),
            STATUS_PATH,
            check.build_body()?,
            CONTENT_TYPE_FORM,
        )
    }
}

fn credentials(creds: &MerchantCredentials) -> Result<(&str, &str, &str)> {
    Ok((
        required(&creds.merchant_id, "merchant id")?,
        required(&creds.key_id, "key id")?,
        required(&creds.key_value, "key value")?,
    ))
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConnectorError::InvalidRequest(format!("missing {field}")))
    } else {
        Ok(value)
    }
}

/// Minor units to the partner's major-unit notation, e.g. 150 -> "1.50".
fn format_amount(amount_minor: i64) -> Result<String> {
    if amount_minor <= 0 {
        return Err(ConnectorError::InvalidRequest(format!(
            "amount must be positive, got {amount_minor}"
        )));
    }
    Ok(Decimal::new(amount_minor, 2).to_string())
}

fn currency_code(currency: &str) -> Result<String> {
    let code = currency.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ConnectorError::InvalidRequest(format!(
            "invalid currency code '{currency}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::resume_context;
    use crate::domain::payment::ReturnUrls;

    fn intent() -> PaymentIntent {
        PaymentIntent {
            transaction_id: "TSI20180802103722".to_string(),
            amount_minor: 150,
            currency: "eur".to_string(),
            credentials: MerchantCredentials {
                merchant_id: "1234".to_string(),
                key_id: "1".to_string(),
                key_value: "secret".to_string(),
            },
            sandbox: true,
            soft_descriptor: Some("softDescriptor".to_string()),
            product_description: Some("ticket premium".to_string()),
            return_urls: ReturnUrls {
                success_url: "https://merchant.example/ok".to_string(),
                cancel_url: "https://merchant.example/ko".to_string(),
                notification_url: None,
            },
        }
    }

    fn config() -> PartnerConfig {
        PartnerConfig::new()
            .with(SCHEME, Environment::Test, "https")
            .with(HOST, Environment::Test, "sandbox.tsi.example")
            .with(GO_PATH, Environment::Test, "/go")
            .with(STATUS_PATH, Environment::Test, "/status")
    }

    #[test]
    fn go_request_formats_amount_and_currency() {
        let go = GoRequest::from_intent(&intent()).unwrap();
        assert_eq!(go.amount, "1.50");
        assert_eq!(go.currency, "EUR");
        assert_eq!(go.tid, "TSI20180802103722");
        assert_eq!(go.url_notify, "");
        assert_eq!(go.mac.len(), 64);
    }

    #[test]
    fn go_mac_covers_the_amount() {
        let a = GoRequest::from_intent(&intent()).unwrap();
        let mut other = intent();
        other.amount_minor = 151;
        let b = GoRequest::from_intent(&other).unwrap();
        assert_ne!(a.mac, b.mac);
    }

    #[test]
    fn missing_merchant_id_is_rejected() {
        let mut bad = intent();
        bad.credentials.merchant_id = " ".to_string();
        let err = GoRequest::from_intent(&bad).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidRequest(ref m) if m.contains("merchant id")));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut bad = intent();
        bad.amount_minor = 0;
        assert!(matches!(
            GoRequest::from_intent(&bad),
            Err(ConnectorError::InvalidRequest(_))
        ));
    }

    #[test]
    fn malformed_currency_is_rejected() {
        let mut bad = intent();
        bad.currency = "EURO".to_string();
        assert!(GoRequest::from_intent(&bad).is_err());
        bad.currency = "E1R".to_string();
        assert!(GoRequest::from_intent(&bad).is_err());
    }

    #[test]
    fn authorization_request_is_json_on_the_go_path() {
        let builder = TsiRequestBuilder::new(config());
        let wire = builder.build_authorization_request(&intent()).unwrap();
        assert_eq!(wire.host, "sandbox.tsi.example");
        assert_eq!(wire.path, "/go");
        assert_eq!(wire.content_type, CONTENT_TYPE_JSON);

        let body: serde_json::Value = serde_json::from_str(&wire.body).unwrap();
        assert_eq!(body["mid"], "1234");
        assert_eq!(body["amount"], "1.50");
    }

    #[test]
    fn status_check_request_is_form_encoded() {
        let builder = TsiRequestBuilder::new(config());
        let wire = builder
            .build_status_check_request(&resume_context(&intent()))
            .unwrap();
        assert_eq!(wire.path, "/status");
        assert_eq!(wire.content_type, CONTENT_TYPE_FORM);
        assert!(wire.body.starts_with("mid=1234&keyid=1&tid=TSI20180802103722&mac="));
    }

    #[test]
    fn validation_runs_before_configuration_lookup() {
        let builder = TsiRequestBuilder::new(PartnerConfig::new());
        let mut bad = intent();
        bad.credentials.key_value = String::new();
        assert!(matches!(
            builder.build_authorization_request(&bad),
            Err(ConnectorError::InvalidRequest(_))
        ));
        assert!(matches!(
            builder.build_authorization_request(&intent()),
            Err(ConnectorError::Configuration(_))
        ));
    }

    #[test]
    fn production_needs_its_own_configuration() {
        let builder = TsiRequestBuilder::new(config());
        let mut prod = intent();
        prod.sandbox = false;
        assert!(matches!(
            builder.build_authorization_request(&prod),
            Err(ConnectorError::Configuration(_))
        ));
    }
}
