use serde::{Deserialize, Serialize};

use superstore_core::{DomainError, RecordId};

/// A user record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn is_unsaved(&self) -> bool {
        self.id.is_unsaved()
    }
}

/// Create payload: id omitted, the backend assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Form-edit buffer for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn from_record(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// Validate the draft into a submittable record.
    ///
    /// Email validation mirrors a required form field, not RFC 5322: it must
    /// be non-blank and contain a local part and a domain.
    pub fn validate(&self) -> Result<User, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(DomainError::validation("email must be of the form user@host")),
        }
        Ok(User {
            id: self.id,
            name: self.name.trim().to_string(),
            email: email.to_string(),
        })
    }
}

impl From<&User> for NewUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
