use std::error;
use std::fmt;

/// Error raised eagerly when a configuration value is out of range.
///
/// All parameter validation happens at construction time so that a bad
/// `cutoff`, `crucial_prot`, or `cv` can never surface mid-run.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    /// A parameter is outside its documented range.
    OutOfRange { name: &'static str, value: f64 },
    /// A parameter is NaN or infinite.
    NonFinite { name: &'static str, value: f64 },
    /// The trial count must be at least 1.
    ZeroTrials,
    /// The reference proteome has no protein entries.
    EmptyReference,
    /// The same protein id appears twice in the reference proteome.
    DuplicateProtein(String),
    /// A reference expected count is negative (zero is allowed).
    NegativeMean { protein: String, value: f64 },
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { name, value } => {
                write!(f, "Parameter {name} out of range: {value}")
            }
            Self::NonFinite { name, value } => {
                write!(f, "Parameter {name} must be finite, got {value}")
            }
            Self::ZeroTrials => write!(f, "Trial count must be at least 1"),
            Self::EmptyReference => write!(f, "Reference proteome has no proteins"),
            Self::DuplicateProtein(name) => {
                write!(f, "Duplicate protein id in reference proteome: '{name}'")
            }
            Self::NegativeMean { protein, value } => {
                write!(f, "Negative expected count for protein '{protein}': {value}")
            }
        }
    }
}

impl error::Error for InvalidConfiguration {}

/// Error for a proteome snapshot that violates a structural invariant.
///
/// Copy counts are unsigned, so the negative-count state cannot be
/// represented at all; what remains is shape mismatches between a cell and
/// the reference it claims to follow.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidProteomeState {
    /// The count vector length does not match the reference proteome.
    LengthMismatch { expected: usize, actual: usize },
    /// A gamete with zero protein types entered classification.
    EmptyProteome,
    /// A cell was built against a different reference proteome.
    ReferenceMismatch,
}

impl fmt::Display for InvalidProteomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Count vector length {actual} does not match reference size {expected}"
                )
            }
            Self::EmptyProteome => write!(f, "Cannot classify a gamete with zero protein types"),
            Self::ReferenceMismatch => {
                write!(f, "Cell does not share the classifier's reference proteome")
            }
        }
    }
}

impl error::Error for InvalidProteomeState {}

/// Errors that can occur during simulation building.
#[derive(Debug)]
pub enum BuilderError {
    /// A required parameter is missing
    MissingRequired(&'static str),
    /// An invalid parameter value was provided
    InvalidParameter(String),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(param) => {
                write!(f, "Missing required parameter: {param}")
            }
            Self::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {msg}")
            }
        }
    }
}

impl error::Error for BuilderError {}

/// Database error types.
#[derive(Debug, Clone)]
pub enum DatabaseError {
    Connection(String),
    Initialization(String),
    Query(String),
    Insert(String),
    Close(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "Database connection error: {e}"),
            Self::Initialization(e) => write!(f, "Database initialization error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Insert(e) => write!(f, "Insert error: {e}"),
            Self::Close(e) => write!(f, "Close error: {e}"),
        }
    }
}

impl error::Error for DatabaseError {}
