use chrono::{DateTime, Utc};
use sea_orm::{ActiveEnum, ActiveValue::NotSet, Set};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::entities::fundraising_events::{
    ActiveModel, FundraisingEventStatus, FundraisingEventType,
};

pub const MERCHANT_ID_MAX_LEN: usize = 50;
pub const EVENT_NAME_MAX_LEN: usize = 100;

/// Incoming fundraising event as supplied by a caller, before any checks.
///
/// `type` and `status` stay raw integers here so that unknown codes can be
/// reported as field errors instead of failing deserialization. Defaulted
/// columns are `Option<Option<_>>`: `None` when the key is absent (default
/// applies), `Some(None)` for an explicit `null` (rejected).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFundraisingEvent {
    /// Campaign category code (defaults to UP)
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub event_type: Option<Option<i32>>,
    /// Owning merchant, at most 50 characters
    pub merchant_id: String,
    /// Display name, at most 100 characters
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_month: DateTime<Utc>,
    pub end_month: DateTime<Utc>,
    /// Lifecycle code (defaults to ACTIVE)
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<i32>>,
    /// Fundraising target
    pub total_amount: i32,
    /// Spent so far (defaults to 0)
    #[serde(default, deserialize_with = "present")]
    pub cost: Option<Option<i32>>,
}

// Only runs when the key is present, so `null` becomes `Some(None)`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

/// A fundraising event whose fields all satisfy the table constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFundraisingEvent {
    pub event_type: FundraisingEventType,
    pub merchant_id: String,
    pub event_name: String,
    pub description: Option<String>,
    pub start_month: DateTime<Utc>,
    pub end_month: DateTime<Utc>,
    pub status: FundraisingEventStatus,
    pub total_amount: i32,
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Column name of the offending field
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field-level problem found in one record. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

fn null_error(field: &'static str) -> FieldError {
    FieldError::new(field, format!("{} cannot be null", field))
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
}

impl NewFundraisingEvent {
    /// Checks every constraint and collects all failures rather than stopping
    /// at the first. Missing `type`, `status` and `cost` take their defaults;
    /// an explicit null for any of them is an error.
    ///
    /// `startMonth <= endMonth` is not checked.
    pub fn validate(self) -> Result<ValidFundraisingEvent, ValidationErrors> {
        let mut errors = Vec::new();

        let event_type = match self.event_type {
            None => Some(FundraisingEventType::default()),
            Some(None) => {
                errors.push(null_error("type"));
                None
            }
            Some(Some(code)) => match FundraisingEventType::try_from_value(&code) {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.push(FieldError::new(
                        "type",
                        "type must be a valid fundraising event type",
                    ));
                    None
                }
            },
        };

        let status = match self.status {
            None => Some(FundraisingEventStatus::default()),
            Some(None) => {
                errors.push(null_error("status"));
                None
            }
            Some(Some(code)) => match FundraisingEventStatus::try_from_value(&code) {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.push(FieldError::new(
                        "status",
                        "status must be a valid fundraising event status",
                    ));
                    None
                }
            },
        };

        let cost = match self.cost {
            None => Some(0),
            Some(None) => {
                errors.push(null_error("cost"));
                None
            }
            Some(Some(cost)) => Some(cost),
        };

        check_length(&mut errors, "merchantId", &self.merchant_id, MERCHANT_ID_MAX_LEN);
        check_length(&mut errors, "eventName", &self.event_name, EVENT_NAME_MAX_LEN);

        match (event_type, status, cost) {
            (Some(event_type), Some(status), Some(cost)) if errors.is_empty() => Ok(ValidFundraisingEvent {
                event_type,
                merchant_id: self.merchant_id,
                event_name: self.event_name,
                description: self.description,
                start_month: self.start_month,
                end_month: self.end_month,
                status,
                total_amount: self.total_amount,
                cost,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

impl ValidFundraisingEvent {
    /// Builds an insertable row; the id is left to the database sequence.
    pub fn into_active_model(self, created_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            event_type: Set(self.event_type),
            merchant_id: Set(self.merchant_id),
            event_name: Set(self.event_name),
            description: Set(self.description),
            start_month: Set(self.start_month),
            end_month: Set(self.end_month),
            status: Set(self.status),
            total_amount: Set(self.total_amount),
            cost: Set(self.cost),
            created_at: Set(created_at),
        }
    }
}
