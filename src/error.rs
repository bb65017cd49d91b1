//! Error type shared by all modules of this crate.
use thiserror::Error;

/// Everything that can go wrong while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A proposal distribution was constructed with parameters it cannot sample from.
    #[error("invalid {name} distribution: {reason}")]
    InvalidDistribution {
        /// Name of the distribution family.
        name: &'static str,
        /// What is wrong with the parameters.
        reason: String,
    },

    /// The method to sum over quark flavours is not known.
    #[error("method to sum quark flavours `{0}` not implemented, use `explicit` or `random`")]
    UnknownFlavourSum(String),

    /// The reference scale used for jet clustering is not known.
    #[error("clustering reference `{0}` not implemented, use `incoming` or `outgoing`")]
    UnknownClusterReference(String),

    /// The cross section was requested before any point was sampled.
    #[error("no samples for the differential cross section have been generated")]
    NoSamples,

    /// Flavours are only drawn when summing over them randomly.
    #[error("no flavours are sampled with the `explicit` quark sum method")]
    NoFlavourSamples,

    /// An analysis was finalized without a single analyzed event.
    #[error("cannot normalize histograms without any analyzed event")]
    NoEvents,

    /// Events were added to an analysis whose histograms are already normalized.
    #[error("cannot analyze events after the histograms have been normalized")]
    Finalized,

    /// An event does not contain the two incoming particles.
    #[error("an event needs two incoming particles, found {0} particles in total")]
    MalformedEvent(usize),

    /// The physics parameters are inconsistent.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What is wrong with its value.
        reason: String,
    },

    /// A YODA file could not be parsed.
    #[error("malformed YODA input in line {line}: {reason}")]
    Yoda {
        /// One-based line number.
        line: usize,
        /// What could not be parsed.
        reason: String,
    },

    /// Two histograms with different numbers of bins were compared.
    #[error("histograms have incompatible binnings: expected {expected} bins, found {found}")]
    BinningMismatch {
        /// Number of bins of the reference.
        expected: usize,
        /// Number of bins of the compared histogram.
        found: usize,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// (De)serializing JSON failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
