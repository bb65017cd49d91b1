//! This module contains everything related to estimators.
use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Basic estimators, like the mean, variance, and the standard deviation.
pub trait BasicEstimators<T: Float> {
    /// Returns the mean value.
    fn mean(&self) -> T;

    /// Returns the variance, $V$, of the mean.
    fn var(&self) -> T;

    /// Returns the standard deviation, $\sigma = \sqrt{V}$.
    fn std(&self) -> T {
        self.var().sqrt()
    }
}

/// More estimators.
pub trait Estimators<T: Float>: BasicEstimators<T> {
    /// Returns the number of Monte Carlo points, $N$, that entered the estimate.
    fn calls(&self) -> usize;

    /// Returns the number of points, $N_\mathrm{nf}$, whose weight was non-finite. These points
    /// contribute zero to the estimate.
    fn non_finite_calls(&self) -> usize;

    /// Returns the number of points, $N_\mathrm{nz}$, whose weight was non-zero.
    fn non_zero_calls(&self) -> usize;

    /// Returns the fraction of points with non-zero weight.
    fn efficiency(&self) -> T {
        let calls = <T as NumCast>::from(self.calls()).unwrap_or_else(T::nan);
        let non_zero = <T as NumCast>::from(self.non_zero_calls()).unwrap_or_else(T::nan);
        non_zero / calls
    }
}

/// Estimators that are built up one weight at a time.
pub trait Updateable<T> {
    /// Update this estimator with `value`.
    fn update(&mut self, value: T);
}

/// A struct implementing the `BasicEstimator<T>` trait.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MeanVar<T> {
    mean: T,
    var: T,
}

impl<T: Add<Output = T>> Add for MeanVar<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            mean: self.mean + other.mean,
            var: self.var + other.var,
        }
    }
}

impl<T: Add<Output = T> + AddAssign> AddAssign for MeanVar<T> {
    fn add_assign(&mut self, other: Self) {
        self.mean += other.mean;
        self.var += other.var;
    }
}

impl<T> MeanVar<T> {
    /// Constructor.
    pub const fn new(mean: T, var: T) -> Self {
        Self { mean, var }
    }
}

impl<T: Float> BasicEstimators<T> for MeanVar<T> {
    fn mean(&self) -> T {
        self.mean
    }

    fn var(&self) -> T {
        self.var
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_var_add() {
        let mv_1 = MeanVar::<f64>::new(1.1, 0.5);
        let mv_2 = MeanVar::<f64>::new(5.3, 1.2);
        let sum = mv_1 + mv_2;

        assert_eq!(sum.mean(), 6.4);
        assert_eq!(sum.var(), 1.7);
        assert_eq!(sum.std(), 1.7_f64.sqrt());
    }

    #[test]
    fn test_mean_var_add_assign() {
        let mut mv = MeanVar::<f64>::new(1.1, 0.5);
        mv += MeanVar::<f64>::new(5.3, 1.2);

        assert_eq!(mv, MeanVar::new(6.4, 1.7));
    }
}
