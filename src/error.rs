//! Error types for the pagination engine.
//!
//! - [`PaginationArgumentError`] - caller contract violations on `first`/`last`
//! - [`CursorDecodeError`] - malformed `after`/`before` tokens
//! - [`StoreError`] - failures reported by a [`crate::store::Store`] adapter
//! - [`PaginationError`] - top-level error returned by the engine
//!
//! None of these are shown to API callers directly. [`PaginationError::kind`]
//! reduces them to an [`ErrorKind`], which a [`crate::i18n::Localizer`] turns
//! into user-facing text.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Argument Errors
// =============================================================================

/// Which page-size argument an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundArgument {
    First,
    Last,
}

impl fmt::Display for BoundArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundArgument::First => f.write_str("first"),
            BoundArgument::Last => f.write_str("last"),
        }
    }
}

/// Invalid combination or value of `first`/`last`.
///
/// Always reported, never clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationArgumentError {
    #[error("neither `first` nor `last` was provided")]
    MissingBound,

    #[error("both `first` and `last` were provided")]
    BothBoundsSet,

    #[error("`{argument}` cannot be negative (got {value})")]
    NegativeBound { argument: BoundArgument, value: i64 },

    #[error("`{argument}` of {value} exceeds the maximum of {max}")]
    BoundExceedsMax {
        argument: BoundArgument,
        value: u64,
        max: u32,
    },

    #[error("`{argument}` must be an integer (got {value})")]
    NonIntegerBound { argument: BoundArgument, value: String },
}

// =============================================================================
// Cursor Errors
// =============================================================================

/// Which cursor argument an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorArgument {
    After,
    Before,
}

impl fmt::Display for CursorArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorArgument::After => f.write_str("after"),
            CursorArgument::Before => f.write_str("before"),
        }
    }
}

/// Malformed cursor token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorDecodeError {
    #[error("cursor is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("cursor payload is not UTF-8")]
    InvalidUtf8,

    #[error("cursor payload has no `kind:key` separator")]
    MissingSeparator,

    #[error("cursor payload has an empty kind")]
    EmptyKind,

    #[error("cursor key is not numeric: {0}")]
    InvalidKey(String),

    #[error("cursor refers to a `{found}` but a `{expected}` was expected")]
    KindMismatch { expected: String, found: String },
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failure reported by a store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The query could not be built or executed.
    #[error("query failed: {0}")]
    Query(String),

    /// The query ran but reading its result stream failed.
    #[error("reading query results failed: {0}")]
    Read(String),
}

/// Store round-trip an engine failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    Window,
    NextPageProbe,
    PreviousPageProbe,
    TotalCount,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStage::Window => f.write_str("window"),
            QueryStage::NextPageProbe => f.write_str("next_page_probe"),
            QueryStage::PreviousPageProbe => f.write_str("previous_page_probe"),
            QueryStage::TotalCount => f.write_str("total_count"),
        }
    }
}

// =============================================================================
// Engine Errors
// =============================================================================

/// Top-level error of [`crate::engine::Paginator::paginate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid pagination arguments: {0}")]
    Argument(#[from] PaginationArgumentError),

    #[error("invalid `{argument}` cursor: {source}")]
    CursorDecode {
        argument: CursorArgument,
        #[source]
        source: CursorDecodeError,
    },

    #[error("store query failed during {stage}: {source}")]
    StoreQuery {
        stage: QueryStage,
        #[source]
        source: StoreError,
    },

    #[error("reading store results failed during {stage}: {source}")]
    StoreCursorRead {
        stage: QueryStage,
        #[source]
        source: StoreError,
    },
}

impl PaginationError {
    /// Attach the failing stage to a store error.
    pub fn store(stage: QueryStage, source: StoreError) -> Self {
        match source {
            StoreError::Query(_) => PaginationError::StoreQuery { stage, source },
            StoreError::Read(_) => PaginationError::StoreCursorRead { stage, source },
        }
    }

    /// Caller-safe classification for the connection named `connection`.
    pub fn kind(&self, connection: &'static str) -> ErrorKind {
        match self {
            PaginationError::Argument(err) => match err {
                PaginationArgumentError::MissingBound => ErrorKind::MissingBound { connection },
                PaginationArgumentError::BothBoundsSet => ErrorKind::BothBoundsSet { connection },
                PaginationArgumentError::NegativeBound { argument, .. } => ErrorKind::NegativeBound {
                    argument: *argument,
                    connection,
                },
                PaginationArgumentError::BoundExceedsMax {
                    argument,
                    value,
                    max,
                } => ErrorKind::BoundExceedsMax {
                    argument: *argument,
                    connection,
                    requested: *value,
                    max: *max,
                },
                PaginationArgumentError::NonIntegerBound { argument, value } => {
                    ErrorKind::NonIntegerBound {
                        argument: *argument,
                        found: value.clone(),
                    }
                }
            },
            PaginationError::CursorDecode { .. } => ErrorKind::UnableToPaginate { connection },
            PaginationError::StoreQuery { .. } | PaginationError::StoreCursorRead { .. } => {
                ErrorKind::UnableToLoad { connection }
            }
        }
    }
}

/// What went wrong, without any internal detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MissingBound {
        connection: &'static str,
    },
    BothBoundsSet {
        connection: &'static str,
    },
    NegativeBound {
        argument: BoundArgument,
        connection: &'static str,
    },
    BoundExceedsMax {
        argument: BoundArgument,
        connection: &'static str,
        requested: u64,
        max: u32,
    },
    NonIntegerBound {
        argument: BoundArgument,
        found: String,
    },
    UnableToPaginate {
        connection: &'static str,
    },
    UnableToLoad {
        connection: &'static str,
    },
}

impl ErrorKind {
    /// Stable machine-readable code, exposed as a GraphQL error extension.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingBound { .. } => "MISSING_BOUND",
            ErrorKind::BothBoundsSet { .. } => "BOTH_BOUNDS_SET",
            ErrorKind::NegativeBound { .. } => "NEGATIVE_BOUND",
            ErrorKind::BoundExceedsMax { .. } => "BOUND_EXCEEDS_MAX",
            ErrorKind::NonIntegerBound { .. } => "NON_INTEGER_BOUND",
            ErrorKind::UnableToPaginate { .. } => "UNABLE_TO_PAGINATE",
            ErrorKind::UnableToLoad { .. } => "UNABLE_TO_LOAD",
        }
    }
}

/// Result type for engine operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for store adapter operations.
pub type StoreResult<T> = Result<T, StoreError>;
