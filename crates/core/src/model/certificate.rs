use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Proof of graduation shown once every module is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    certificate_id: String,
    issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Issue a certificate numbered `SH-<year>-<8 hex digits>`.
    #[must_use]
    pub fn issue(year: i32, issued_at: DateTime<Utc>) -> Self {
        let serial = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        Self {
            certificate_id: format!("SH-{year}-{serial}"),
            issued_at,
        }
    }

    #[must_use]
    pub fn certificate_id(&self) -> &str {
        &self.certificate_id
    }

    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn id_has_year_and_serial() {
        let cert = Certificate::issue(2025, fixed_now());
        let id = cert.certificate_id();
        assert!(id.starts_with("SH-2025-"));
        let serial = &id["SH-2025-".len()..];
        assert_eq!(serial.len(), 8);
        assert!(serial.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_eq!(cert.issued_at(), fixed_now());
    }
}
