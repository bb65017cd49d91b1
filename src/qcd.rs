//! QCD group constants and the running strong coupling.
use crate::parameters::Parameters;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of colours.
pub const NC: f64 = 3.0;
/// Normalization of the fundamental generators.
pub const TR: f64 = 0.5;
/// Casimir of the adjoint representation.
pub const CA: f64 = NC;
/// Casimir of the fundamental representation.
pub const CF: f64 = (NC * NC - 1.0) / (2.0 * NC);

/// Perturbative order of the running of $\alpha_s$.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Order {
    /// One-loop running.
    Leading,
    /// Two-loop running.
    NextToLeading,
}

/// The strong coupling $\alpha_s(t)$, evolved from its value at the Z mass with flavour
/// thresholds at the bottom and charm masses.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AlphaS {
    order: Order,
    mz2: f64,
    mb2: f64,
    mc2: f64,
    at_mz2: f64,
    at_mb2: f64,
    at_mc2: f64,
}

fn beta0(nf: f64) -> f64 {
    11.0 / 6.0 * CA - 2.0 / 3.0 * TR * nf
}

fn beta1(nf: f64) -> f64 {
    17.0 / 6.0 * CA * CA - (5.0 / 3.0 * CA + CF) * TR * nf
}

impl AlphaS {
    /// Constructs the coupling with next-to-leading order running from its value `alpha_s_mz2`
    /// at the squared Z mass `mz2` and the squared quark thresholds `mb2` and `mc2`.
    pub fn new(mz2: f64, alpha_s_mz2: f64, mb2: f64, mc2: f64) -> Self {
        Self::with_order(Order::NextToLeading, mz2, alpha_s_mz2, mb2, mc2)
    }

    /// Same as [`AlphaS::new`], but with running at the given perturbative `order`.
    pub fn with_order(order: Order, mz2: f64, alpha_s_mz2: f64, mb2: f64, mc2: f64) -> Self {
        let mut alphas = Self {
            order,
            mz2,
            mb2,
            mc2,
            at_mz2: alpha_s_mz2,
            at_mb2: 0.0,
            at_mc2: 0.0,
        };

        // the values at the thresholds are evolved one after another
        alphas.at_mb2 = alphas.at(mb2);
        alphas.at_mc2 = alphas.at(mc2);
        alphas
    }

    /// Constructs the coupling from the physics `parameters`.
    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self::new(
            parameters.z_mass2(),
            parameters.alpha_s_mz,
            parameters.b_mass * parameters.b_mass,
            parameters.c_mass * parameters.c_mass,
        )
    }

    /// Returns the perturbative order of the running.
    pub const fn order(&self) -> Order {
        self.order
    }

    /// The reference scale, the coupling there and the number of active flavours for scale `t`.
    fn reference(&self, t: f64) -> (f64, f64, f64) {
        if t >= self.mb2 {
            (self.mz2, self.at_mz2, 5.0)
        } else if t >= self.mc2 {
            (self.mb2, self.at_mb2, 4.0)
        } else {
            (self.mc2, self.at_mc2, 3.0)
        }
    }

    /// Evaluates $\alpha_s$ at the squared scale `t`.
    pub fn at(&self, t: f64) -> f64 {
        let (t_ref, alpha_ref, nf) = self.reference(t);
        let b0 = beta0(nf) / (2.0 * PI);

        match self.order {
            Order::Leading => 1.0 / (1.0 / alpha_ref + b0 * (t / t_ref).ln()),
            Order::NextToLeading => {
                let b1 = beta1(nf) / (2.0 * PI).powi(2);
                let w = 1.0 + b0 * alpha_ref * (t / t_ref).ln();
                alpha_ref / w * (1.0 - b1 / b0 * alpha_ref * w.ln() / w)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn group_constants() {
        assert_approx_eq!(CF, 4.0 / 3.0, 1e-15);
        assert_eq!(CA, 3.0);
    }

    #[test]
    fn reference_value_is_reproduced() {
        let parameters = Parameters::default();

        for &order in &[Order::Leading, Order::NextToLeading] {
            let alphas = AlphaS::with_order(order, parameters.z_mass2(), 0.118, 4.75 * 4.75, 1.69);
            assert_approx_eq!(alphas.at(parameters.z_mass2()), 0.118, 1e-15);
        }
    }

    #[test]
    fn coupling_is_asymptotically_free() {
        let alphas = AlphaS::from_parameters(&Parameters::default());
        let scales = [1.0, 1.69, 10.0, 22.5625, 100.0, 8317.44, 1e5];

        assert_eq!(alphas.order(), Order::NextToLeading);

        for pair in scales.windows(2) {
            assert!(alphas.at(pair[0]) > alphas.at(pair[1]));
        }

        // continuous across the flavour thresholds
        let mb2 = 4.75 * 4.75;
        assert_approx_eq!(alphas.at(mb2 * (1.0 - 1e-12)), alphas.at(mb2), 1e-9);
        assert_approx_eq!(alphas.at(1.69 * (1.0 - 1e-12)), alphas.at(1.69), 1e-9);
    }
}
