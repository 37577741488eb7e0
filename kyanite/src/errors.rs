use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic};

/// Error kinds for Kyanite operations
///
/// This enum represents all possible error types that can occur while matching,
/// filtering, sorting, or updating documents. Each error kind describes a specific
/// category of failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::errors::{KyaniteError, ErrorKind, KyaniteResult};
///
/// fn example() -> KyaniteResult<()> {
///     Err(KyaniteError::new("Document does not support empty key", ErrorKind::InvalidOperation))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Filter Errors - actively used in filter construction and evaluation
    /// Error during filter evaluation or construction
    FilterError,

    // Operation Errors - actively used for invalid/unsupported operations
    /// The operation is not valid in the current context
    InvalidOperation,

    // Data Encoding Errors - actively used in serialization
    /// Error mapping a value to/from a document representation
    ObjectMappingError,

    // Validation Errors - actively used in field/data validation
    /// Generic validation error
    ValidationError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Kyanite error type.
///
/// `KyaniteError` encapsulates error information including the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::errors::{KyaniteError, ErrorKind};
///
/// // Create a simple error
/// let err = KyaniteError::new("Document does not support empty key", ErrorKind::InvalidOperation);
///
/// // Create an error with a cause
/// let cause = KyaniteError::new("Update spec entry is not a mapping", ErrorKind::InvalidOperation);
/// let err = KyaniteError::new_with_cause("Update failed", ErrorKind::InvalidOperation, cause);
/// ```
///
/// # Type alias
///
/// The `KyaniteResult<T>` type alias is equivalent to `Result<T, KyaniteError>` and is used
/// throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct KyaniteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<KyaniteError>>,
    backtrace: Atomic<Backtrace>,
}

impl KyaniteError {
    /// Creates a new `KyaniteError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `KyaniteError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        KyaniteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `KyaniteError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_type` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `KyaniteError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: KyaniteError) -> Self {
        KyaniteError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<KyaniteError>> {
        self.cause.as_ref()
    }
}

impl Display for KyaniteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for KyaniteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for KyaniteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Kyanite operations.
///
/// `KyaniteResult<T>` is shorthand for `Result<T, KyaniteError>`.
/// All fallible Kyanite operations return this type.
///
/// # Examples
///
/// ```rust,ignore
/// use kyanite::errors::KyaniteResult;
///
/// fn field_name(name: &str) -> KyaniteResult<String> {
///     // Return success
///     Ok(name.to_string())
///     // Or return error
///     // Err(KyaniteError::new("Document does not support empty key", ErrorKind::InvalidOperation))
/// }
/// ```
pub type KyaniteResult<T> = Result<T, KyaniteError>;

impl de::Error for KyaniteError {
    fn custom<T: Display>(msg: T) -> Self {
        KyaniteError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

impl ser::Error for KyaniteError {
    fn custom<T: Display>(msg: T) -> Self {
        KyaniteError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

// From trait implementations for automatic error conversion
impl From<String> for KyaniteError {
    fn from(msg: String) -> Self {
        KyaniteError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for KyaniteError {
    fn from(msg: &str) -> Self {
        KyaniteError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kyanite_error_new_creates_error() {
        let error = KyaniteError::new("An error occurred", ErrorKind::FilterError);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::FilterError);
        assert!(error.cause.is_none());
    }

    #[test]
    fn kyanite_error_new_with_cause_creates_error() {
        let cause = KyaniteError::new("Empty embedded key", ErrorKind::ValidationError);
        let error = KyaniteError::new_with_cause("An error occurred", ErrorKind::FilterError, cause);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::FilterError);
        assert!(error.cause.is_some());
    }

    #[test]
    fn kyanite_error_message_returns_message() {
        let error = KyaniteError::new("An error occurred", ErrorKind::InvalidOperation);
        assert_eq!(error.message(), "An error occurred");
    }

    #[test]
    fn kyanite_error_kind_returns_kind() {
        let error = KyaniteError::new("An error occurred", ErrorKind::InvalidOperation);
        assert_eq!(error.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn kyanite_error_cause_returns_cause() {
        let cause = KyaniteError::new("Root cause", ErrorKind::ValidationError);
        let error = KyaniteError::new_with_cause("An error occurred", ErrorKind::FilterError, cause);
        assert!(error.cause().is_some());
    }

    #[test]
    fn kyanite_error_cause_returns_none_when_no_cause() {
        let error = KyaniteError::new("An error occurred", ErrorKind::FilterError);
        assert!(error.cause().is_none());
    }

    #[test]
    fn kyanite_error_display_formats_correctly() {
        let error = KyaniteError::new("An error occurred", ErrorKind::FilterError);
        let formatted = format!("{}", error);
        assert_eq!(formatted, "An error occurred");
    }

    #[test]
    fn kyanite_error_debug_formats_correctly() {
        let error = KyaniteError::new("An error occurred", ErrorKind::FilterError);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("An error occurred"));
    }

    #[test]
    fn kyanite_error_debug_formats_with_cause() {
        let cause = KyaniteError::new("Root cause", ErrorKind::ValidationError);
        let error = KyaniteError::new_with_cause("An error occurred", ErrorKind::FilterError, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("An error occurred"));
        assert!(formatted.contains("Caused by:"));
    }

    #[test]
    fn kyanite_error_source_returns_cause() {
        let cause = KyaniteError::new("Root cause", ErrorKind::ValidationError);
        let error = KyaniteError::new_with_cause("An error occurred", ErrorKind::FilterError, cause);
        assert!(error.source().is_some());
    }

    #[test]
    fn kyanite_error_source_returns_none_when_no_cause() {
        let error = KyaniteError::new("An error occurred", ErrorKind::FilterError);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_ser_de_custom_creates_object_mapping_error() {
        let ser_err = <KyaniteError as ser::Error>::custom("serialization failed");
        assert_eq!(ser_err.kind(), &ErrorKind::ObjectMappingError);
        assert_eq!(ser_err.message(), "serialization failed");

        let de_err = <KyaniteError as de::Error>::custom("deserialization failed");
        assert_eq!(de_err.kind(), &ErrorKind::ObjectMappingError);
        assert_eq!(de_err.message(), "deserialization failed");
    }

    // Test Filter Errors
    #[test]
    fn test_filter_errors() {
        let filter_error = KyaniteError::new("Invalid filter syntax", ErrorKind::FilterError);
        assert_eq!(filter_error.kind(), &ErrorKind::FilterError);
    }

    // Test Validation Errors
    #[test]
    fn test_validation_errors() {
        let validation = KyaniteError::new("Validation failed", ErrorKind::ValidationError);
        assert_eq!(validation.kind(), &ErrorKind::ValidationError);

        let invalid_op = KyaniteError::new("Document does not support empty key", ErrorKind::InvalidOperation);
        assert_eq!(invalid_op.kind(), &ErrorKind::InvalidOperation);
    }

    // Test Internal and Unknown Errors
    #[test]
    fn test_internal_errors() {
        let internal = KyaniteError::new("Internal error", ErrorKind::InternalError);
        assert_eq!(internal.kind(), &ErrorKind::InternalError);
    }

    // Test error hierarchy and chaining
    #[test]
    fn test_error_chain_with_different_kinds() {
        let root_cause = KyaniteError::new("Document does not support empty key", ErrorKind::ValidationError);
        let mid_level = KyaniteError::new_with_cause(
            "Failed to compile query",
            ErrorKind::FilterError,
            root_cause,
        );
        let top_level = KyaniteError::new_with_cause(
            "Cannot evaluate find options",
            ErrorKind::InvalidOperation,
            mid_level,
        );

        assert_eq!(top_level.kind(), &ErrorKind::InvalidOperation);
        assert!(top_level.cause().is_some());

        if let Some(cause_box) = top_level.cause() {
            assert_eq!(cause_box.kind(), &ErrorKind::FilterError);
        }
    }

    // Test error comparison for all error kinds
    #[test]
    fn test_error_kind_equality() {
        let error1 = KyaniteError::new("Error 1", ErrorKind::FilterError);
        let error2 = KyaniteError::new("Error 2", ErrorKind::FilterError);
        let error3 = KyaniteError::new("Error 3", ErrorKind::ValidationError);

        assert_eq!(error1.kind(), error2.kind());
        assert_ne!(error1.kind(), error3.kind());
    }

    // Test error message preservation across different error kinds
    #[test]
    fn test_error_message_preservation() {
        let messages = vec![
            ("Filter error message", ErrorKind::FilterError),
            ("Invalid operation message", ErrorKind::InvalidOperation),
            ("Object mapping error message", ErrorKind::ObjectMappingError),
            ("Validation error message", ErrorKind::ValidationError),
            ("Internal error message", ErrorKind::InternalError),
        ];

        for (msg, kind) in &messages {
            let error = KyaniteError::new(msg, kind.clone());
            assert_eq!(error.message(), *msg);
            assert_eq!(error.kind(), kind);
        }
    }

    // Test From<String>
    #[test]
    fn test_from_string() {
        let msg = String::from("test error message");
        let kyanite_err: KyaniteError = msg.into();

        assert_eq!(kyanite_err.kind(), &ErrorKind::InternalError);
        assert_eq!(kyanite_err.message(), "test error message");
    }

    // Test From<&str>
    #[test]
    fn test_from_str() {
        let msg = "test error message";
        let kyanite_err: KyaniteError = msg.into();

        assert_eq!(kyanite_err.kind(), &ErrorKind::InternalError);
        assert_eq!(kyanite_err.message(), "test error message");
    }
}
