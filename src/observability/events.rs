//! Observable events for otpdesk
//!
//! Every log line carries one of these as its `event` field so log
//! consumers can match on a stable name instead of the message text.

use std::fmt;

/// Observable events in otpdesk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Listener bound, serving requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server loop exited
    ShutdownComplete,

    // Login
    /// Credentials accepted, code issued
    LoginAccepted,
    /// Credentials missing or empty
    LoginRejected,

    // OTP
    /// OTP submitted for verification
    OtpReceived,
    /// OTP passed the format check
    OtpAccepted,
    /// OTP failed the format check
    OtpRejected,

    // Users
    /// User inserted or replaced
    UserSaved,
    /// User field updated
    UserUpdated,
    /// Update targeted an unknown user id
    UserNotFound,
    /// Save or update body rejected
    UserRejected,

    // Store
    /// Empty collection file created
    CollectionCreated,
    /// Collection could not be read, empty default used
    StoreReadFailed,
    /// Collection could not be written
    StoreWriteFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "OTPDESK_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::LoginAccepted => "LOGIN_ACCEPTED",
            Event::LoginRejected => "LOGIN_REJECTED",

            Event::OtpReceived => "OTP_RECEIVED",
            Event::OtpAccepted => "OTP_ACCEPTED",
            Event::OtpRejected => "OTP_REJECTED",

            Event::UserSaved => "USER_SAVED",
            Event::UserUpdated => "USER_UPDATED",
            Event::UserNotFound => "USER_NOT_FOUND",
            Event::UserRejected => "USER_REJECTED",

            Event::CollectionCreated => "COLLECTION_CREATED",
            Event::StoreReadFailed => "STORE_READ_FAILED",
            Event::StoreWriteFailed => "STORE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
