use thiserror::Error;

/// errors of formula parsing, weight lookup and equation balancing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChemError {
    /// a token of the formula matches no production of the formula grammar.
    /// `position` is a byte offset into `formula`
    #[error("cannot parse formula \"{formula}\" at position {position}: {reason}")]
    Parse {
        formula: String,
        position: usize,
        reason: String,
    },
    #[error("malformed equation: {0}")]
    MalformedEquation(String),
    /// raised only when a molecular weight is requested
    #[error("element {0} is not in the atomic weight table")]
    UnknownElement(String),
    #[error("equation cannot be balanced as written")]
    NoSolution,
    #[error("equation has {0} independent solutions")]
    Underdetermined(usize),
    #[error("balancing coefficient {0} does not fit into 64 bits")]
    CoefficientOverflow(String),
}

/// errors of loading configuration and custom atomic weight tables from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid element entry {symbol}: {reason}")]
    InvalidElement { symbol: String, reason: String },
}
