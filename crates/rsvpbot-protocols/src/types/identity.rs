//! Operator identity and registration requests.

use serde::{Deserialize, Serialize};

use super::EventRecord;
use crate::error::ValidationError;

/// The attendee submitted on every registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    email: String,
    first_name: String,
    last_name: String,
}

impl Identity {
    /// Build a validated identity. All three fields must be non-empty
    /// after trimming.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = required(email.into(), "email")?;
        let first_name = required(first_name.into(), "firstname")?;
        let last_name = required(last_name.into(), "lastname")?;
        Ok(Self {
            email,
            first_name,
            last_name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Value for one attendee form field.
    pub fn field(&self, field: AttendeeField) -> &str {
        match field {
            AttendeeField::FirstName => &self.first_name,
            AttendeeField::LastName => &self.last_name,
            AttendeeField::Email => &self.email,
        }
    }
}

fn required(value: String, name: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(name));
    }
    Ok(trimmed.to_string())
}

/// Attendee value a form field is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeField {
    FirstName,
    LastName,
    Email,
}

/// An event with the attendee attached, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub event: EventRecord,
    pub attendee: Identity,
}

impl RegistrationRequest {
    pub fn new(event: EventRecord, attendee: Identity) -> Self {
        Self { event, attendee }
    }
}
