//! Error types for the conversion layer
//!
//! Every conversion returns [`Result<T>`]. A failure carries:
//! - an [`ErrorKind`] that maps onto a wire status code
//! - a human readable message
//! - the source location of the failure site (captured with `#[track_caller]`)
//! - the driver's in-doubt flag (never computed here, only propagated)
//!
//! [`Outcome`] is the reusable status record handed across the host boundary.
//! It is reset at the start of every entry point and appended to on failure.

use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Status code reported when a conversion succeeds
pub const STATUS_OK: i32 = 0;

/// Error taxonomy of the conversion layer
///
/// | Kind | Code | Raised for |
/// |------|------|------------|
/// | `InvalidParam` | -2 | bad key shape, digest size, integer overflow, bad metadata |
/// | `ClientError` | -1 | allocation/pool failures, unknown value tags, undecodable text |
/// | `BinNameTooLong` | 21 | strict-mode bin name violations |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range caller input
    InvalidParam,
    /// Internal conversion or allocation failure
    ClientError,
    /// Bin name rejected under strict mode
    BinNameTooLong,
}

impl ErrorKind {
    /// Wire status code for this kind
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::InvalidParam => -2,
            ErrorKind::ClientError => -1,
            ErrorKind::BinNameTooLong => 21,
        }
    }

    /// Map a wire status code back onto a kind
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -2 => Some(ErrorKind::InvalidParam),
            -1 => Some(ErrorKind::ClientError),
            21 => Some(ErrorKind::BinNameTooLong),
            _ => None,
        }
    }

    /// Stable name used in logs and messages
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParam => "InvalidParam",
            ErrorKind::ClientError => "ClientError",
            ErrorKind::BinNameTooLong => "BinNameTooLong",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File and line of the code that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file path
    pub file: &'static str,
    /// 1-based line number
    pub line: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(loc: &'static Location<'static>) -> Self {
        SourceLocation {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A failed conversion
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ConversionError {
    kind: ErrorKind,
    message: String,
    location: Option<SourceLocation>,
    in_doubt: bool,
}

impl ConversionError {
    /// Create an error of the given kind, recording the caller's location
    #[track_caller]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ConversionError {
            kind,
            message: message.into(),
            location: Some(Location::caller().into()),
            in_doubt: false,
        }
    }

    /// Malformed or out-of-range caller input
    #[track_caller]
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParam, message)
    }

    /// Internal conversion or allocation failure
    #[track_caller]
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClientError, message)
    }

    /// Strict-mode bin name violation
    #[track_caller]
    pub fn bin_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BinNameTooLong, message)
    }

    /// Error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Wire status code
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Error message without the kind prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the error was raised
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    /// Whether the driver flagged the related write as in doubt
    pub fn in_doubt(&self) -> bool {
        self.in_doubt
    }

    /// Carry the driver's in-doubt flag
    pub fn with_in_doubt(mut self, in_doubt: bool) -> Self {
        self.in_doubt = in_doubt;
        self
    }

    /// Prefix the message with context, keeping kind and location
    ///
    /// Produces: `"context: original message"`.
    pub fn context(self, ctx: impl fmt::Display) -> Self {
        ConversionError {
            message: format!("{}: {}", ctx, self.message),
            ..self
        }
    }
}

impl From<std::io::Error> for ConversionError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        ConversionError::client(err.to_string())
    }
}

/// Reusable status record threaded through host-facing entry points
///
/// `code == STATUS_OK` means the last conversion succeeded. A second failure
/// recorded without an intervening [`Outcome::reset`] appends its message and
/// keeps the first code and location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    code: i32,
    message: String,
    location: Option<SourceLocation>,
    in_doubt: bool,
}

impl Outcome {
    /// A fresh, successful outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any state left by a previous call
    pub fn reset(&mut self) {
        self.code = STATUS_OK;
        self.message.clear();
        self.location = None;
        self.in_doubt = false;
    }

    /// Record a failure
    pub fn update(&mut self, err: &ConversionError) {
        if self.is_ok() {
            self.code = err.code();
            self.message = err.message().to_string();
            self.location = err.location();
        } else {
            self.message.push_str("; ");
            self.message.push_str(err.message());
        }
        self.in_doubt |= err.in_doubt();
    }

    /// Record a status reported by the driver
    pub fn update_from_driver(&mut self, code: i32, message: impl Into<String>, in_doubt: bool) {
        if code == STATUS_OK {
            return;
        }
        let message = message.into();
        if self.is_ok() {
            self.code = code;
            self.message = message;
        } else {
            self.message.push_str("; ");
            self.message.push_str(&message);
        }
        self.in_doubt |= in_doubt;
    }

    /// Set the in-doubt flag (driver propagation only)
    pub fn set_in_doubt(&mut self, in_doubt: bool) {
        self.in_doubt = in_doubt;
    }

    /// Run one conversion: reset, execute, record any failure
    ///
    /// Returns the conversion's value on success. The status code is then
    /// available through [`Outcome::status`].
    pub fn run<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Option<T> {
        self.reset();
        match f() {
            Ok(value) => Some(value),
            Err(err) => {
                self.update(&err);
                None
            }
        }
    }

    /// Status code of the last recorded call
    pub fn status(&self) -> i32 {
        self.code
    }

    /// Error kind, if the status is one this layer produces
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }

    /// True when no failure has been recorded since the last reset
    pub fn is_ok(&self) -> bool {
        self.code == STATUS_OK
    }

    /// Accumulated message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the first recorded failure
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    /// Driver in-doubt flag
    pub fn in_doubt(&self) -> bool {
        self.in_doubt
    }
}

impl From<&ConversionError> for Outcome {
    fn from(err: &ConversionError) -> Self {
        let mut outcome = Outcome::new();
        outcome.update(err);
        outcome
    }
}
