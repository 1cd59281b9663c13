use chrono::{DateTime, Utc};
use thiserror::Error;

use super::TrainingStage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraineeError {
    #[error("full name is required")]
    MissingName,
    #[error("email address is required")]
    MissingEmail,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Raw start-screen input before validation.
#[derive(Clone, Debug, Default)]
pub struct TraineeDraft {
    pub full_name: String,
    pub email: String,
}

impl TraineeDraft {
    #[must_use]
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Validate the draft into a trainee starting at stage 1.
    ///
    /// # Errors
    ///
    /// Returns `TraineeError` when the name is blank or the email is blank or malformed.
    pub fn validate(self, now: DateTime<Utc>) -> Result<Trainee, TraineeError> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(TraineeError::MissingName);
        }
        let email = normalize_email(&self.email)?;

        Ok(Trainee {
            full_name,
            email,
            current_stage: TrainingStage::FIRST,
            updated_at: now,
        })
    }
}

/// A registered trainee, keyed by email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trainee {
    full_name: String,
    email: String,
    current_stage: TrainingStage,
    updated_at: DateTime<Utc>,
}

impl Trainee {
    /// Rehydrate a trainee from storage.
    ///
    /// # Errors
    ///
    /// Returns `TraineeError` if the stored name or email no longer validates.
    pub fn from_persisted(
        full_name: String,
        email: String,
        current_stage: TrainingStage,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, TraineeError> {
        let mut trainee = TraineeDraft { full_name, email }.validate(updated_at)?;
        trainee.current_stage = current_stage;
        Ok(trainee)
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn current_stage(&self) -> TrainingStage {
        self.current_stage
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_stage(&mut self, stage: TrainingStage, now: DateTime<Utc>) {
        self.current_stage = stage;
        self.updated_at = now;
    }
}

fn normalize_email(raw: &str) -> Result<String, TraineeError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(TraineeError::MissingEmail);
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(TraineeError::InvalidEmail(email));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_trims_and_lowercases() {
        let trainee = TraineeDraft::new("  Ada Lovelace ", " Ada@Example.COM ")
            .validate(fixed_now())
            .unwrap();
        assert_eq!(trainee.full_name(), "Ada Lovelace");
        assert_eq!(trainee.email(), "ada@example.com");
        assert_eq!(trainee.current_stage(), TrainingStage::FIRST);
        assert_eq!(trainee.updated_at(), fixed_now());
    }

    #[test]
    fn draft_requires_name_and_email() {
        assert_eq!(
            TraineeDraft::new("  ", "a@b.c").validate(fixed_now()),
            Err(TraineeError::MissingName)
        );
        assert_eq!(
            TraineeDraft::new("Ada", "   ").validate(fixed_now()),
            Err(TraineeError::MissingEmail)
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["ada", "@example.com", "ada@", "a@b@c", "ada lovelace@example.com"] {
            assert!(
                matches!(
                    TraineeDraft::new("Ada", bad).validate(fixed_now()),
                    Err(TraineeError::InvalidEmail(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn persisted_stage_is_kept() {
        let stage = TrainingStage::from_persisted(3).unwrap();
        let trainee =
            Trainee::from_persisted("Ada".into(), "ada@example.com".into(), stage, fixed_now())
                .unwrap();
        assert_eq!(trainee.current_stage(), stage);
    }
}
