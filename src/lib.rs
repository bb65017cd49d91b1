#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `partonsim` simulates the production of hadronic jets in electron-positron
//! annihilation, $e^+ e^- \to q \bar{q}$, at leading order around the Z resonance. It consists of
//! three stages that can be used separately or chained together:
//!
//! 1. a [Monte Carlo integrator] with importance sampling, which estimates the cross section and
//! produces weighted events,
//! 2. a final-state [parton shower] based on the Sudakov veto algorithm, which dresses the quarks
//! of every event with further gluon and quark emissions,
//! 3. a [jet analysis] that clusters the showered events with the $k_T$ algorithm and fills
//! histograms of the jet rates, which are written in the text format of [YODA].
//!
//! # Features
//!
//! - **Pluggable proposal distributions**. The squared centre-of-mass energy and the angles are
//! sampled from [`distributions::Distribution`]s, which can be point masses, flat or shaped like
//! the Breit-Wigner peak of the Z boson.
//! - **Generic random number generator**. Every random number generator that implements the `Rng`
//! trait from the `rand` crate can be used. The generator is never stored, but passed to every
//! operation that needs random numbers.
//! - **Reproducibility**. All results only depend on the random number generator and its seed. The
//! sample buffer of the integrator grows point by point, so that extending it in several steps
//! gives exactly the same points as extending it in one step.
//! - **Non-finite number filtering**. Points whose weight is `inf` or `nan` are counted and
//! contribute zero to the cross section.
//! - **Checkpoints**. [`integrators::importance::refine`] records the state of the random number
//! generator before and after every refinement step, together with the estimators, so that runs
//! can be resumed or replayed.
//!
//! # What is ...?
//!
//! Given the differential cross section $\mathrm{d}\sigma$ we approximate the cross section with
//!
//! $$ \sigma \approx \frac{1}{N} \sum_{j=1}^N \frac{\mathrm{d}\sigma(s_j, \cos\theta_j,
//! \phi_j)}{\rho(s_j, \cos\theta_j, \phi_j)} $$
//!
//! where the points are distributed according to the proposal density $\rho$. We use the
//! following terms:
//!
//! - the number of *calls* or the *sample size* is $N$,
//! - the *weight* of a point is the summand above,
//! - *efficiency* is the fraction of points with a weight different from zero.
//!
//! [Monte Carlo integrator]: integrators::importance::MonteCarloIntegrator
//! [parton shower]: shower::Shower
//! [jet analysis]: analysis::Analysis
//! [YODA]: https://yoda.hepforge.org

pub mod analysis;
pub mod callbacks;
pub mod core;
pub mod distributions;
pub mod error;
pub mod event;
pub mod histograms;
pub mod integrators;
pub mod matrix_element;
pub mod parameters;
pub mod particle;
pub mod qcd;
pub mod reference;
pub mod shower;
pub mod vector;
pub mod yoda;

pub use crate::core::*;
pub use crate::error::{Error, Result};
