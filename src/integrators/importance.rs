//! Importance-sampled integration of the $e^+ e^- \to q \bar{q}$ cross section.
//!
//! The integrator draws the squared centre-of-mass energy $s$, the scattering angle
//! $\cos \theta$ and the azimuth $\phi$ from proposal distributions, stores the differential cross
//! section at every point and estimates
//!
//! $$ \sigma \approx \frac{1}{N} \sum_{i=1}^N \frac{\mathrm{d}\sigma_i}{\rho_s(s_i)
//! \rho_{\cos\theta}(\cos\theta_i) \rho_\phi(\phi_i)} $$
//!
//! together with the error of the mean.
use crate::callbacks::Callback;
use crate::core::estimators::*;
use crate::core::Checkpoint;
use crate::distributions::{Distribution, Proposal, Uniform};
use crate::error::{Error, Result};
use crate::event;
use crate::matrix_element::{MatrixElement, N_FLAVOURS};
use crate::parameters::Parameters;
use crate::particle::Particle;

use log::debug;
use num_traits::{Float, FromPrimitive};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Estimators for an integration performed by [`MonteCarloIntegrator::integrate`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ImportanceEstimators<T> {
    sum: T,
    sumsq: T,
    calls: usize,
    non_finite_calls: usize,
    non_zero_calls: usize,
}

impl<T: Float> Default for ImportanceEstimators<T> {
    fn default() -> Self {
        Self {
            sum: T::zero(),
            sumsq: T::zero(),
            calls: 0,
            non_finite_calls: 0,
            non_zero_calls: 0,
        }
    }
}

impl<T: Float> Add for ImportanceEstimators<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sumsq: self.sumsq + other.sumsq,
            calls: self.calls + other.calls,
            non_finite_calls: self.non_finite_calls + other.non_finite_calls,
            non_zero_calls: self.non_zero_calls + other.non_zero_calls,
        }
    }
}

impl<T> BasicEstimators<T> for ImportanceEstimators<T>
where
    T: Float + FromPrimitive,
{
    fn mean(&self) -> T {
        let calls = T::from_usize(self.calls).unwrap_or_else(T::nan);
        self.sum / calls
    }

    /// The squared error of the mean, $(\langle x^2 \rangle - \langle x \rangle^2) / N$.
    fn var(&self) -> T {
        let calls = T::from_usize(self.calls).unwrap_or_else(T::nan);
        let mean = self.sum / calls;
        // rounding may push the difference below zero for (nearly) constant weights
        ((self.sumsq / calls - mean * mean) / calls).max(T::zero())
    }
}

impl<T> Estimators<T> for ImportanceEstimators<T>
where
    T: Float + FromPrimitive,
{
    fn calls(&self) -> usize {
        self.calls
    }

    fn non_finite_calls(&self) -> usize {
        self.non_finite_calls
    }

    fn non_zero_calls(&self) -> usize {
        self.non_zero_calls
    }
}

impl<T> Updateable<T> for ImportanceEstimators<T>
where
    T: AddAssign + Float,
{
    fn update(&mut self, value: T) {
        self.calls += 1;

        if value != T::zero() {
            self.non_zero_calls += 1;

            if value.is_finite() {
                self.sum += value;
                self.sumsq += value * value;
            } else {
                self.non_finite_calls += 1;
            }
        }
    }
}

/// How the sum over the light quark flavours is performed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FlavourSum {
    /// Every point sums the matrix element over all flavours.
    Explicit,
    /// Every point draws a single flavour uniformly and multiplies by the number of flavours.
    Random,
}

impl FromStr for FlavourSum {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "explicit" => Ok(Self::Explicit),
            "random" => Ok(Self::Random),
            _ => Err(Error::UnknownFlavourSum(s.to_string())),
        }
    }
}

/// The proposal distributions of the integration variables and the beam spectrum.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposals {
    /// Distribution of the squared centre-of-mass energy.
    pub s: Distribution,
    /// Distribution of the cosine of the scattering angle.
    pub cos_theta: Distribution,
    /// Distribution of the azimuthal angle.
    pub phi: Distribution,
    /// The beam spectrum $f(s)$; only its density enters the integrand.
    pub beam: Distribution,
}

impl Proposals {
    /// A beam with fixed energy $s = m_Z^2$, sampled with flat angles.
    pub fn fixed_beam(parameters: &Parameters) -> Self {
        Self {
            s: Distribution::dirac(parameters.z_mass2()),
            cos_theta: Distribution::Uniform(Uniform::new_unchecked(-1.0, 1.0)),
            phi: Distribution::Uniform(Uniform::new_unchecked(0.0, 2.0 * PI)),
            beam: Distribution::dirac(parameters.z_mass2()),
        }
    }

    /// A flat beam spectrum three widths around the Z peak, with $s$ sampled from the same flat
    /// distribution.
    pub fn flat_beam(parameters: &Parameters) -> Result<Self> {
        let (s_min, s_max) = parameters.flat_beam_range();
        let beam = Distribution::uniform(s_min, s_max)?;

        Ok(Self {
            s: beam.clone(),
            beam,
            ..Self::fixed_beam(parameters)
        })
    }

    /// A flat beam spectrum three widths around the Z peak, with $s$ sampled from a Breit-Wigner
    /// distribution of the Z boson.
    pub fn breit_wigner(parameters: &Parameters) -> Result<Self> {
        let (s_min, s_max) = parameters.flat_beam_range();

        Ok(Self {
            s: Distribution::breit_wigner(
                s_min,
                s_max,
                parameters.z_mass,
                parameters.z_width,
            )?,
            ..Self::flat_beam(parameters)?
        })
    }

    fn density(&self, s: f64, cos_theta: f64, phi: f64) -> f64 {
        self.s.density(s) * self.cos_theta.density(cos_theta) * self.phi.density(phi)
    }
}

/// A single Monte Carlo point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    /// Squared centre-of-mass energy.
    pub s: f64,
    /// Cosine of the scattering angle.
    pub cos_theta: f64,
    /// Azimuthal angle.
    pub phi: f64,
    /// Index of the drawn quark flavour, if flavours are drawn.
    pub flavour: Option<usize>,
    /// Differential cross section, not yet divided by the proposal densities.
    pub d_sigma: f64,
}

/// All points sampled so far, stored as parallel sequences of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleBuffer {
    s: Vec<f64>,
    cos_theta: Vec<f64>,
    phi: Vec<f64>,
    flavours: Option<Vec<usize>>,
    d_sigma: Vec<f64>,
}

impl SampleBuffer {
    fn new(flavour_sum: FlavourSum) -> Self {
        Self {
            flavours: match flavour_sum {
                FlavourSum::Explicit => None,
                FlavourSum::Random => Some(Vec::new()),
            },
            ..Self::default()
        }
    }

    fn push(&mut self, point: SamplePoint) {
        self.s.push(point.s);
        self.cos_theta.push(point.cos_theta);
        self.phi.push(point.phi);
        if let (Some(flavours), Some(flavour)) = (self.flavours.as_mut(), point.flavour) {
            flavours.push(flavour);
        }
        self.d_sigma.push(point.d_sigma);
    }

    /// Returns the number of sampled points.
    pub fn len(&self) -> usize {
        self.d_sigma.len()
    }

    /// Returns `true` if no point has been sampled yet.
    pub fn is_empty(&self) -> bool {
        self.d_sigma.is_empty()
    }

    /// Returns the point with index `index`.
    pub fn get(&self, index: usize) -> Option<SamplePoint> {
        Some(SamplePoint {
            s: *self.s.get(index)?,
            cos_theta: self.cos_theta[index],
            phi: self.phi[index],
            flavour: self.flavours.as_ref().map(|flavours| flavours[index]),
            d_sigma: self.d_sigma[index],
        })
    }

    /// Returns the sampled values of $s$.
    pub fn s(&self) -> &[f64] {
        &self.s
    }

    /// Returns the sampled values of $\cos \theta$.
    pub fn cos_theta(&self) -> &[f64] {
        &self.cos_theta
    }

    /// Returns the sampled values of $\phi$.
    pub fn phi(&self) -> &[f64] {
        &self.phi
    }

    /// Returns the drawn flavour indices, or an error if flavours are summed explicitly.
    pub fn flavours(&self) -> Result<&[usize]> {
        self.flavours.as_deref().ok_or(Error::NoFlavourSamples)
    }

    /// Returns the differential cross sections.
    pub fn d_sigma(&self) -> &[f64] {
        &self.d_sigma
    }
}

/// Monte Carlo integrator for the leading-order cross section of $e^+ e^- \to q \bar{q}$.
#[derive(Clone, Debug)]
pub struct MonteCarloIntegrator {
    proposals: Proposals,
    flavour_sum: FlavourSum,
    matrix_element: MatrixElement,
    f_conv: f64,
    samples: SampleBuffer,
}

impl MonteCarloIntegrator {
    /// Creates an integrator with an empty sample buffer.
    pub fn new(parameters: &Parameters, proposals: Proposals, flavour_sum: FlavourSum) -> Self {
        Self {
            proposals,
            flavour_sum,
            matrix_element: MatrixElement::new(parameters),
            f_conv: parameters.f_conv,
            samples: SampleBuffer::new(flavour_sum),
        }
    }

    /// Returns the proposal distributions.
    pub fn proposals(&self) -> &Proposals {
        &self.proposals
    }

    /// Returns the flavour summation method.
    pub fn flavour_sum(&self) -> FlavourSum {
        self.flavour_sum
    }

    /// Returns all points sampled so far.
    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> SamplePoint {
        let s = self.proposals.s.sample_one(rng);
        let cos_theta = self.proposals.cos_theta.sample_one(rng);
        let phi = self.proposals.phi.sample_one(rng);

        let (flavour, me) = match self.flavour_sum {
            FlavourSum::Explicit => (None, self.matrix_element.eval_flavour_sum(s, cos_theta)),
            FlavourSum::Random => {
                let flavour = rng.gen_range(0, N_FLAVOURS);
                let me = N_FLAVOURS as f64 * self.matrix_element.eval(s, cos_theta, flavour);
                (Some(flavour), me)
            }
        };

        let d_sigma = me * self.f_conv * self.proposals.beam.density(s) / (64.0 * PI * PI * s);

        SamplePoint {
            s,
            cos_theta,
            phi,
            flavour,
            d_sigma,
        }
    }

    /// Makes sure the sample buffer holds at least `n` points, drawing only the missing ones.
    ///
    /// Points are drawn one after another, each consuming random numbers for $s$, $\cos\theta$,
    /// $\phi$ and, if flavours are drawn, the flavour. Extending in several steps therefore gives
    /// the same buffer as extending in one step with the same generator.
    pub fn extend<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) {
        let len = self.samples.len();

        if len >= n {
            return;
        }

        debug!("extending sample buffer from {} to {} points", len, n);

        for _ in len..n {
            let point = self.sample_point(rng);
            self.samples.push(point);
        }
    }

    /// Returns the weight of every point, i.e. its differential cross section divided by the
    /// proposal densities.
    pub fn weights(&self) -> Vec<f64> {
        let samples = &self.samples;

        (0..samples.len())
            .map(|i| {
                samples.d_sigma[i]
                    / self
                        .proposals
                        .density(samples.s[i], samples.cos_theta[i], samples.phi[i])
            })
            .collect()
    }

    /// Estimates the cross section in pb from all points sampled so far.
    pub fn integrate(&self) -> Result<ImportanceEstimators<f64>> {
        if self.samples.is_empty() {
            return Err(Error::NoSamples);
        }

        Ok(self
            .weights()
            .into_iter()
            .fold(ImportanceEstimators::default(), |mut acc, weight| {
                acc.update(weight);
                acc
            }))
    }

    /// Builds the hard $e^- e^+ \to q \bar{q}$ event of every point together with its weight.
    /// Requires flavours to be drawn.
    pub fn events(&self) -> Result<Vec<(Vec<Particle>, f64)>> {
        let flavours = self.samples.flavours()?;

        Ok(flavours
            .iter()
            .zip(self.weights())
            .enumerate()
            .map(|(i, (&flavour, weight))| {
                let event = event::from_sample(
                    self.samples.s[i],
                    self.samples.cos_theta[i],
                    self.samples.phi[i],
                    flavour as i32 + 1,
                );
                (event, weight)
            })
            .collect())
    }
}

/// Refines the integration step by step: for every entry of `sizes` the sample buffer of
/// `integrator` is extended to that size using `rng`, the cross section is estimated and a
/// checkpoint is recorded. After each step `callback` is called with all checkpoints so far.
pub fn refine<R>(
    integrator: &mut MonteCarloIntegrator,
    rng: &mut R,
    callback: &impl Callback<R, ImportanceEstimators<f64>>,
    sizes: &[usize],
) -> Result<Vec<Checkpoint<R, ImportanceEstimators<f64>>>>
where
    R: Clone + Rng,
{
    let mut chkpts = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let rng_before = rng.clone();
        integrator.extend(rng, size);
        let estimators = integrator.integrate()?;

        chkpts.push(Checkpoint::new(rng_before, rng.clone(), estimators));
        callback.print(&chkpts);
    }

    Ok(chkpts)
}
