use crate::error::{ConnectorError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of the concatenated `fields`, keyed with the
/// merchant key value.
pub fn sign(key_value: &str, fields: &[&str]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key_value.as_bytes())
        .map_err(|e| ConnectorError::InvalidRequest(format!("unusable merchant key: {e}")))?;
    for field in fields {
        mac.update(field.as_bytes());
    }
    Ok(hex::encode(mac.finalize().into_bytes()))
}
