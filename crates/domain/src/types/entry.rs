//! Commission entry types
//!
//! `EntryPayload` is the loosely typed request body; `validate()` turns it
//! into a `NewEntry` whose fields are guaranteed present and well formed.
//! `Entry` is a persisted row with its store-assigned id and timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DATE_FORMAT;
use crate::errors::{PaytrackError, Result};

/// Payment status of a commission entry
///
/// Serialized with the Portuguese codes the browser page and the existing
/// database rows use; English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    #[serde(rename = "pendente", alias = "pending")]
    Pending,
    #[serde(rename = "concluido", alias = "completed")]
    Completed,
    #[serde(rename = "cancelado", alias = "cancelled")]
    Cancelled,
}

impl EntryStatus {
    /// Wire/storage code for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Completed => "concluido",
            Self::Cancelled => "cancelado",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = PaytrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pendente" | "pending" => Ok(Self::Pending),
            "concluido" | "concluído" | "completed" => Ok(Self::Completed),
            "cancelado" | "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(PaytrackError::InvalidInput(format!(
                "status must be one of pendente, concluido, cancelado (got '{other}')"
            ))),
        }
    }
}

/// A persisted commission entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub client: String,
    /// Transaction date
    pub date: NaiveDate,
    pub product: String,
    pub commission: f64,
    /// Expected payment date
    pub forecast: NaiveDate,
    pub status: EntryStatus,
    pub created_at: NaiveDateTime,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending
    }
}

/// The six business fields of an entry, validated and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub client: String,
    pub date: NaiveDate,
    pub product: String,
    pub commission: f64,
    pub forecast: NaiveDate,
    pub status: EntryStatus,
}

impl NewEntry {
    /// Attach store-assigned identity to build a full [`Entry`].
    pub fn into_entry(self, id: i64, created_at: NaiveDateTime) -> Entry {
        Entry {
            id,
            client: self.client,
            date: self.date,
            product: self.product,
            commission: self.commission,
            forecast: self.forecast,
            status: self.status,
            created_at,
        }
    }
}

/// Request body for create/update
///
/// Every field is optional here so a missing field becomes a validation
/// error naming the field instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_commission",
        skip_serializing_if = "Option::is_none"
    )]
    pub commission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EntryPayload {
    /// Check that all six fields are present and well formed.
    ///
    /// Missing or blank fields are reported together; malformed values
    /// (bad date, negative commission, unknown status) are reported one at
    /// a time.
    pub fn validate(&self) -> Result<NewEntry> {
        let client = non_blank(self.client.as_deref());
        let date = non_blank(self.date.as_deref());
        let product = non_blank(self.product.as_deref());
        let forecast = non_blank(self.forecast.as_deref());
        let status = non_blank(self.status.as_deref());

        match (client, date, product, self.commission, forecast, status) {
            (
                Some(client),
                Some(date),
                Some(product),
                Some(commission),
                Some(forecast),
                Some(status),
            ) => Ok(NewEntry {
                client: client.to_string(),
                date: parse_date("date", date)?,
                product: product.to_string(),
                commission: check_commission(commission)?,
                forecast: parse_date("forecast", forecast)?,
                status: status.parse()?,
            }),
            (client, date, product, commission, forecast, status) => {
                let missing: Vec<&str> = [
                    ("client", client.is_none()),
                    ("date", date.is_none()),
                    ("product", product.is_none()),
                    ("commission", commission.is_none()),
                    ("forecast", forecast.is_none()),
                    ("status", status.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                Err(PaytrackError::InvalidInput(format!(
                    "missing required field(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        PaytrackError::InvalidInput(format!("{field} must be an ISO date (YYYY-MM-DD), got '{value}'"))
    })
}

fn check_commission(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(PaytrackError::InvalidInput("commission must be a finite number".into()));
    }
    if value < 0.0 {
        return Err(PaytrackError::InvalidInput("commission must not be negative".into()));
    }
    Ok(value)
}

/// Accept the commission as a JSON number or a numeric string.
fn deserialize_commission<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("commission is not a number: '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_payload() -> EntryPayload {
        EntryPayload {
            client: Some("Ana".into()),
            date: Some("2024-03-01".into()),
            product: Some("Plan A".into()),
            commission: Some(150.0),
            forecast: Some("2024-03-10".into()),
            status: Some("pendente".into()),
        }
    }

    #[test]
    fn valid_payload_produces_typed_entry() {
        let entry = full_payload().validate().unwrap();
        assert_eq!(entry.client, "Ana");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(entry.product, "Plan A");
        assert_eq!(entry.commission, 150.0);
        assert_eq!(entry.forecast, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(entry.status, EntryStatus::Pending);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let payload = EntryPayload { client: Some("  Ana  ".into()), ..full_payload() };
        assert_eq!(payload.validate().unwrap().client, "Ana");
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let payload = EntryPayload {
            client: None,
            product: Some("   ".into()),
            commission: None,
            ..full_payload()
        };

        let err = payload.validate().unwrap_err();
        assert_eq!(
            err,
            PaytrackError::InvalidInput(
                "missing required field(s): client, product, commission".into()
            )
        );
    }

    #[test]
    fn empty_payload_lists_every_field() {
        let err = EntryPayload::default().validate().unwrap_err();
        assert_eq!(
            err.message(),
            "missing required field(s): client, date, product, commission, forecast, status"
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let payload = EntryPayload { forecast: Some("10/03/2024".into()), ..full_payload() };
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, PaytrackError::InvalidInput(msg) if msg.starts_with("forecast")));
    }

    #[test]
    fn negative_commission_is_rejected_but_zero_is_allowed() {
        let negative = EntryPayload { commission: Some(-1.0), ..full_payload() };
        assert!(negative.validate().is_err());

        let zero = EntryPayload { commission: Some(0.0), ..full_payload() };
        assert_eq!(zero.validate().unwrap().commission, 0.0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let payload = EntryPayload { status: Some("paid".into()), ..full_payload() };
        assert!(matches!(payload.validate(), Err(PaytrackError::InvalidInput(_))));
    }

    #[test]
    fn status_accepts_codes_and_english_names() {
        assert_eq!("pendente".parse::<EntryStatus>().unwrap(), EntryStatus::Pending);
        assert_eq!("Completed".parse::<EntryStatus>().unwrap(), EntryStatus::Completed);
        assert_eq!("cancelled".parse::<EntryStatus>().unwrap(), EntryStatus::Cancelled);

        let status: EntryStatus = serde_json::from_value(json!("pending")).unwrap();
        assert_eq!(status, EntryStatus::Pending);
        assert_eq!(serde_json::to_value(EntryStatus::Completed).unwrap(), json!("concluido"));
    }

    #[test]
    fn commission_accepts_numeric_strings() {
        let payload: EntryPayload =
            serde_json::from_value(json!({ "commission": " 99.90 " })).unwrap();
        assert_eq!(payload.commission, Some(99.9));

        let payload: EntryPayload = serde_json::from_value(json!({ "commission": 12 })).unwrap();
        assert_eq!(payload.commission, Some(12.0));

        let payload: EntryPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.commission, None);

        assert!(serde_json::from_value::<EntryPayload>(json!({ "commission": "abc" })).is_err());
    }

    #[test]
    fn entry_serializes_with_iso_dates() {
        let created_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let entry = full_payload().validate().unwrap().into_entry(7, created_at);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["forecast"], "2024-03-10");
        assert_eq!(json["status"], "pendente");
        assert!(entry.is_pending());
    }
}
