//! Domain error taxonomy for the mock backend.
//!
//! Display strings are the short localized messages shown to readers; the
//! programmatic discriminant lives in [`BackendError::code`] so callers can
//! branch without matching on localized text.

use thiserror::Error;

/// Errors raised by domain operations and the request router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// The operation requires an active session
    #[error("يلزم تسجيل الدخول لتنفيذ هذا الإجراء")]
    Unauthenticated,

    /// Email already registered (case-insensitive)
    #[error("البريد الإلكتروني مستخدم بالفعل")]
    DuplicateEmail,

    /// Unknown email or password mismatch on login
    #[error("بيانات الدخول غير صحيحة")]
    InvalidCredentials,

    /// Poll, post, or route not found
    #[error("{0}")]
    NotFound(String),

    /// Vote for an option the poll does not carry
    #[error("الخيار المطلوب غير متاح")]
    InvalidOption,

    /// Second vote attempt for the same poll from this context
    #[error("لقد شاركت في الاستطلاع مسبقاً")]
    AlreadyVoted,

    /// Recognized path, unsupported method
    #[error("طريقة الإرسال غير مدعومة")]
    MethodNotAllowed,
}

impl BackendError {
    /// Stable discriminant, independent of the localized display text.
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::Validation(_) => "VALIDATION_ERROR",
            BackendError::Unauthenticated => "UNAUTHENTICATED",
            BackendError::DuplicateEmail => "DUPLICATE_EMAIL",
            BackendError::InvalidCredentials => "INVALID_CREDENTIALS",
            BackendError::NotFound(_) => "NOT_FOUND",
            BackendError::InvalidOption => "INVALID_OPTION",
            BackendError::AlreadyVoted => "ALREADY_VOTED",
            BackendError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
