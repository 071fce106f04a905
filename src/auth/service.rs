//! # Auth Service
//!
//! Every call appends exactly one entry to the login attempts log,
//! whether it succeeds or not.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::attempts::{AttemptRecord, LoginAttempt, OtpAttempt, OtpStatus};
use super::code::generate_verification_code;
use super::errors::{AuthError, AuthResult};
use crate::observability::Event;
use crate::store::{Collection, Records};

/// Required length of a submitted OTP, in characters
pub const OTP_LENGTH: usize = 6;

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Read `email` and `password` independently from a request body.
    ///
    /// A field that is missing or not a string is absent; the other field
    /// is kept either way.
    pub fn from_body(body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            email: text("email"),
            password: text("password"),
        }
    }
}

/// OTP verification request body
///
/// `code` stays an untyped value: a number or any other non-string is a
/// format failure, and is recorded as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub code: Option<Value>,
}

/// Login and OTP verification over the login attempts log
#[derive(Debug, Clone)]
pub struct AuthService {
    records: Records,
}

impl AuthService {
    pub fn new(records: Records) -> Self {
        Self { records }
    }

    /// Accept any non-empty email and password pair and issue a code.
    ///
    /// The issued code is returned to the caller and stored next to the
    /// plaintext password.
    pub fn login(&self, request: LoginRequest) -> AuthResult<String> {
        let email = request.email.as_deref().filter(|s| !s.is_empty());
        let password = request.password.as_deref().filter(|s| !s.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => {
                let code = generate_verification_code();
                self.record(LoginAttempt::accepted(email, password, &code));

                info!(event = Event::LoginAccepted.as_str(), email, "verification code issued");
                Ok(code)
            }
            _ => {
                self.record(LoginAttempt::rejected(request.email.as_deref()));

                warn!(
                    event = Event::LoginRejected.as_str(),
                    email = request.email.as_deref().unwrap_or(""),
                    "login without credentials"
                );
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Check that `code` is a 6 character string.
    ///
    /// Nothing is compared against the code issued at login.
    pub fn verify(&self, request: VerifyRequest) -> AuthResult<()> {
        debug!(event = Event::OtpReceived.as_str(), code = ?request.code, "received OTP");

        let well_formed = matches!(
            &request.code,
            Some(Value::String(code)) if code.chars().count() == OTP_LENGTH
        );

        if well_formed {
            self.record(OtpAttempt::new(request.code, OtpStatus::Success));
            info!(event = Event::OtpAccepted.as_str(), "OTP accepted");
            Ok(())
        } else {
            self.record(OtpAttempt::new(request.code, OtpStatus::Failure));
            warn!(event = Event::OtpRejected.as_str(), "OTP rejected");
            Err(AuthError::InvalidOtpFormat)
        }
    }

    /// Full login attempts log, unfiltered
    pub fn attempts(&self) -> Vec<Value> {
        self.records.load(Collection::LoginAttempts)
    }

    fn record(&self, attempt: impl Into<AttemptRecord>) {
        let record: AttemptRecord = attempt.into();
        self.records
            .append(Collection::LoginAttempts, record.to_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> AuthService {
        AuthService::new(Records::new(Arc::new(InMemoryStore::new())))
    }

    fn login(email: Option<&str>, password: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_mistyped_password_keeps_email() {
        let service = service();
        let request = LoginRequest::from_body(&json!({"email": "a@b.com", "password": 5}));
        assert_eq!(request.email.as_deref(), Some("a@b.com"));
        assert!(request.password.is_none());

        assert_eq!(service.login(request), Err(AuthError::InvalidCredentials));
        let log = service.attempts();
        assert_eq!(log[0]["email"], "a@b.com");
        assert_eq!(log[0]["password"], "failure");
    }

    #[test]
    fn test_login_issues_code_and_records_it() {
        let service = service();
        let code = service.login(login(Some("a@b.com"), Some("pw"))).unwrap();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let log = service.attempts();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["email"], "a@b.com");
        assert_eq!(log[0]["password"], "pw");
        assert_eq!(log[0]["verificationCode"], code.as_str());
    }

    #[test]
    fn test_empty_email_rejected_and_recorded() {
        let service = service();
        let result = service.login(login(Some(""), Some("x")));

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        let log = service.attempts();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["email"], "");
        assert_eq!(log[0]["password"], "failure");
        assert!(log[0]["verificationCode"].is_null());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let service = service();

        assert!(service.login(login(None, None)).is_err());
        assert!(service.login(login(Some("a@b.com"), None)).is_err());
        assert!(service.login(login(None, Some("pw"))).is_err());

        let log = service.attempts();
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|entry| entry["password"] == "failure"));
        assert!(log[0].get("email").is_none());
        assert_eq!(log[1]["email"], "a@b.com");
    }

    #[test]
    fn test_six_character_code_accepted() {
        let service = service();
        let request = VerifyRequest {
            code: Some(json!("123456")),
        };

        assert!(service.verify(request).is_ok());
        let log = service.attempts();
        assert_eq!(log[0]["otpCode"], "123456");
        assert_eq!(log[0]["status"], "success");
    }

    #[test]
    fn test_any_six_characters_pass() {
        let service = service();
        let request = VerifyRequest {
            code: Some(json!("abcdéf")),
        };
        assert!(service.verify(request).is_ok());
    }

    #[test]
    fn test_malformed_codes_rejected() {
        let service = service();
        let cases = [
            Some(json!("12345")),
            Some(json!("1234567")),
            Some(json!(123456)),
            None,
        ];

        for code in cases {
            let result = service.verify(VerifyRequest { code });
            assert_eq!(result, Err(AuthError::InvalidOtpFormat));
        }

        let log = service.attempts();
        assert_eq!(log.len(), 4);
        assert!(log.iter().all(|entry| entry["status"] == "failure"));
        assert_eq!(log[2]["otpCode"], 123456);
        assert!(log[3].get("otpCode").is_none());
    }

    #[test]
    fn test_log_is_append_only_and_ordered() {
        let service = service();
        service.login(login(Some("a@b.com"), Some("pw"))).unwrap();
        let _ = service.verify(VerifyRequest {
            code: Some(json!("000000")),
        });
        let _ = service.login(login(None, None));

        let log = service.attempts();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0]["email"], "a@b.com");
        assert_eq!(log[1]["otpCode"], "000000");
        assert_eq!(log[2]["password"], "failure");
    }
}
