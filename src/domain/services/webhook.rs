use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha512;

use crate::domain::models::payment::Payment;

pub const SIGNATURE_HEADER: &str = "x-paystack-signature";
pub const CHARGE_SUCCESS: &str = "charge.success";

type HmacSha512 = Hmac<Sha512>;

/// Checks the gateway's hex HMAC-SHA512 of the raw body. Comparison is constant time.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

pub fn sign(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Envelope shared by every gateway event. `data` is only given a shape
/// once the event name is known.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookEvent {
    pub fn is_charge(&self) -> bool {
        self.event == CHARGE_SUCCESS
    }

    pub fn into_charge(self) -> Result<ChargeData, serde_json::Error> {
        serde_json::from_value(self.data)
    }
}

#[derive(Debug, Deserialize)]
pub struct ChargeData {
    pub reference: String,
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<ChargeMetadata>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChargeMetadata {
    pub user_id: Option<String>,
    pub property_id: Option<String>,
}

fn default_currency() -> String {
    "NGN".to_string()
}

impl ChargeData {
    pub fn into_payment(self) -> Payment {
        let mut payment = Payment::new(
            self.reference,
            self.amount,
            self.currency,
            self.status.unwrap_or_else(|| "success".to_string()),
        );
        payment.channel = self.channel;
        payment.paid_at = self.paid_at;
        if let Some(meta) = self.metadata {
            payment.user_id = meta.user_id;
            payment.property_id = meta.property_id;
        }
        payment
    }
}
