use crate::domain::outcome::TransactionDetails;
use crate::error::{ConnectorError, Result};
use crate::transport::RawHttpResponse;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub const GO_STATUS_OK: i32 = 1;
pub const STATUS_CHECK_CODE_OK: i32 = 0;
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A 2xx answer either carries a body or it does not.
#[derive(Debug, Clone, PartialEq)]
pub enum PartnerResult<T> {
    NoContent,
    Content(T),
}

pub fn parse<T: DeserializeOwned>(raw: &RawHttpResponse) -> Result<PartnerResult<T>> {
    match raw.body.as_deref().map(str::trim) {
        None | Some("") => Ok(PartnerResult::NoContent),
        Some(body) => serde_json::from_str(body)
            .map(PartnerResult::Content)
            .map_err(|e| ConnectorError::MalformedResponse(e.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoResponse {
    #[serde(default, deserialize_with = "lenient_code")]
    pub status: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Nok,
    Er,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusCheckResponse {
    pub status: CheckStatus,
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub fixed: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl StatusCheckResponse {
    /// Accepts either "," or "." as the decimal separator.
    pub fn amount(&self) -> Option<Decimal> {
        let value = self.value.as_deref()?.trim().replace(',', ".");
        Decimal::from_str(&value).ok()
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.date.as_deref()?.trim(), DATE_FORMAT).ok()
    }

    pub fn fixed_amount(&self) -> Option<bool> {
        match self.fixed.as_deref()?.trim() {
            "t" | "T" => Some(true),
            "f" | "F" => Some(false),
            _ => None,
        }
    }

    pub fn details(&self) -> TransactionDetails {
        TransactionDetails {
            partner_transaction_id: self.transaction_id.clone(),
            amount: self.amount(),
            fixed_amount: self.fixed_amount(),
            date: self.date(),
            country: self.country.clone(),
            message: self.message.clone().unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Codes arrive as numbers or as numeric strings. Anything else reads as absent.
fn lenient_code<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrString::Number(n)) => i32::try_from(n).ok(),
        Some(NumberOrString::Text(s)) => s.trim().parse::<i32>().ok(),
        None => None,
    })
}
