//! Flat error channel for filtering and validation.
//!
//! Every failure is a single variant with a descriptive message. Field-level
//! failures carry the offending field name; the first error raised anywhere in
//! the recursion aborts the whole call.
use thiserror::Error;

pub type Result<T, E = FilterError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    // ---- descriptor parsing ----
    #[error("filter obj is null")]
    NullFilter,
    #[error("filter obj is not map")]
    FilterNotMap,
    #[error("filter name is empty")]
    EmptyName,
    #[error("filter type is empty")]
    EmptyType,

    // ---- shape ----
    #[error("field \"{0}\" is not map")]
    NotMap(String),
    #[error("field \"{0}\" is not array")]
    NotArray(String),

    // ---- validation ----
    #[error("field \"{0}\" is required")]
    Required(String),
    #[error("field \"{0}\" is not string")]
    NotString(String),
    #[error("field \"{0}\" is not boolean")]
    NotBoolean(String),
    #[error("field \"{0}\" is not number")]
    NotNumber(String),
    #[error("field \"{0}\" more than maximum length")]
    AboveMaxLength(String),
    #[error("field \"{0}\" less than minimum length")]
    BelowMinLength(String),
    #[error("field \"{0}\" more than maximum value")]
    AboveMaxValue(String),
    #[error("field \"{0}\" less than minimum value")]
    BelowMinValue(String),
    #[error("field \"{0}\" more than maximum size")]
    AboveMaxSize(String),
    #[error("field \"{0}\" less than minimum size")]
    BelowMinSize(String),
    #[error("value pattern not match for field \"{0}\"")]
    PatternMismatch(String),
    #[error("regular expression invalid for field \"{field}\": {reason}")]
    InvalidPattern { field: String, reason: String },

    // ---- entry point ----
    #[error("dataBus type is invalid")]
    InvalidDataBus,
}

impl FilterError {
    /// Name of the field the error is about, if it is field-specific.
    pub fn field(&self) -> Option<&str> {
        use FilterError::*;
        match self {
            NullFilter | FilterNotMap | EmptyName | EmptyType | InvalidDataBus => None,
            NotMap(f) | NotArray(f) | Required(f) | NotString(f) | NotBoolean(f)
            | NotNumber(f) | AboveMaxLength(f) | BelowMinLength(f) | AboveMaxValue(f)
            | BelowMinValue(f) | AboveMaxSize(f) | BelowMinSize(f) | PatternMismatch(f) => {
                Some(f.as_str())
            }
            InvalidPattern { field, .. } => Some(field.as_str()),
        }
    }
}
