//! Error types for the coreper core library.
//!
//! Graph construction failures are fatal input errors for the caller. Name
//! parsing failures cover the configuration tokens that select an extraction
//! method or a dynamics rule.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while building a [`crate::Graph`] from an edge list.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// The edge-list file could not be opened.
    #[error("failed to open edge list `{path}`: {source}")]
    Io {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading from an already opened edge-list source failed.
    #[error("failed to read edge list `{name}` at line {line}: {source}")]
    Read {
        /// Data-source name of the edge list.
        name: String,
        /// 1-based line number at which the read failed.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A data line did not contain both a source and a target token.
    #[error("edge list `{name}` line {line} needs two tokens but found `{content}`")]
    MalformedLine {
        /// Data-source name of the edge list.
        name: String,
        /// 1-based line number of the offending line.
        line: usize,
        /// Raw content of the offending line.
        content: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The edge-list file could not be opened.
        Io => Io { .. } => "GRAPH_IO",
        /// Reading from an opened edge-list source failed.
        Read => Read { .. } => "GRAPH_READ",
        /// A data line did not contain both endpoints.
        MalformedLine => MalformedLine { .. } => "GRAPH_MALFORMED_LINE",
    }
}

/// Error returned when a configuration token names no known variant.
///
/// # Examples
/// ```
/// use coreper_core::CoreMethod;
///
/// let err = "Spectral".parse::<CoreMethod>().expect_err("unknown method");
/// assert_eq!(err.provided(), "Spectral");
/// ```
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown {kind} `{provided}`; expected one of: {expected}")]
pub struct ParseNameError {
    kind: &'static str,
    provided: String,
    expected: &'static str,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, provided: &str, expected: &'static str) -> Self {
        Self {
            kind,
            provided: provided.to_owned(),
            expected,
        }
    }

    /// Returns what kind of name was being parsed, e.g. `core extraction method`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the token supplied by the caller.
    #[must_use]
    pub fn provided(&self) -> &str {
        &self.provided
    }
}

/// Convenient alias for results returned by graph construction.
pub type Result<T> = core::result::Result<T, GraphError>;
