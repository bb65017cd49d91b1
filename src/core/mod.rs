//! Core functionality. You don't need to import this modules since all it's public members are
//! part of the crate namespace.
pub mod estimators;

use serde::{Deserialize, Serialize};

/// A checkpoint saves the state of the random number generator before and after a refinement
/// step of the integration, together with the estimators after that step.
///
/// Since the sample buffer is extended point by point, resuming from `rng_after` with the same
/// integrator setup reproduces every later checkpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Checkpoint<R, E> {
    rng_before: R,
    rng_after: R,
    estimators: E,
}

impl<R, E> Checkpoint<R, E> {
    /// Constructor
    pub(crate) fn new(rng_before: R, rng_after: R, estimators: E) -> Self {
        Self {
            rng_before,
            rng_after,
            estimators,
        }
    }

    /// Returns the random number generator before generation of this checkpoint.
    pub fn rng_before(&self) -> &R {
        &self.rng_before
    }

    /// Returns the random number generator after generation of this checkpoint
    pub fn rng_after(&self) -> &R {
        &self.rng_after
    }

    /// Returns the estimators of this checkpoint.
    pub fn estimators(&self) -> &E {
        &self.estimators
    }

    /// Destructure the checkpoint and return its components.
    pub fn destructure(self) -> (R, R, E) {
        (self.rng_before, self.rng_after, self.estimators)
    }
}
