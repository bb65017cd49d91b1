//! One-dimensional proposal distributions for importance sampling.
//!
//! Every distribution knows how to draw values and how to evaluate its probability density. The
//! random number generator is never stored inside a distribution; it is passed to every call that
//! needs random numbers, so that several distributions can share the same generator.
use crate::error::{Error, Result};
use rand::Rng;

/// Trait every proposal distribution must implement.
pub trait Proposal {
    /// Draws a single value using the random number generator `rng`.
    fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Evaluates the probability density at `x`.
    fn density(&self, x: f64) -> f64;

    /// Draws `n` independent values.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample_one(rng)).collect()
    }
}

/// A point mass at `x0`. Sampling always returns `x0`, the density is one by convention.
#[derive(Clone, Debug, PartialEq)]
pub struct Dirac {
    x0: f64,
}

impl Dirac {
    /// Constructor.
    pub const fn new(x0: f64) -> Self {
        Self { x0 }
    }

    /// Returns the position of the point mass.
    pub const fn x0(&self) -> f64 {
        self.x0
    }
}

impl Proposal for Dirac {
    fn sample_one<R: Rng + ?Sized>(&self, _: &mut R) -> f64 {
        self.x0
    }

    fn density(&self, _: f64) -> f64 {
        1.0
    }
}

/// The uniform distribution on $[\mathrm{lower}, \mathrm{upper})$.
#[derive(Clone, Debug, PartialEq)]
pub struct Uniform {
    lower: f64,
    upper: f64,
}

impl Uniform {
    /// Constructor. Fails unless `lower < upper` and both are finite.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(Error::InvalidDistribution {
                name: "uniform",
                reason: format!("empty or unbounded interval [{}, {})", lower, upper),
            });
        }

        Ok(Self { lower, upper })
    }

    /// Constructor for boundaries that are known to be valid.
    pub(crate) const fn new_unchecked(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Returns the lower boundary.
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper boundary.
    pub const fn upper(&self) -> f64 {
        self.upper
    }
}

impl Proposal for Uniform {
    fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.lower + (self.upper - self.lower) * rng.gen::<f64>()
    }

    fn density(&self, _: f64) -> f64 {
        1.0 / (self.upper - self.lower)
    }
}

/// The Breit-Wigner distribution of a resonance with `mass` and `width` for $s$ between `s_min`
/// and `s_max`.
///
/// Values are generated by drawing the auxiliary angle
/// $\rho = \arctan((s - m^2) / (m \Gamma))$ uniformly and mapping it back to
/// $s = m \Gamma \tan \rho + m^2$.
#[derive(Clone, Debug, PartialEq)]
pub struct BreitWigner {
    s_min: f64,
    s_max: f64,
    mass: f64,
    width: f64,
    rho_min: f64,
    rho_max: f64,
}

impl BreitWigner {
    /// Constructor. Fails unless `s_min < s_max` and mass and width are positive.
    pub fn new(s_min: f64, s_max: f64, mass: f64, width: f64) -> Result<Self> {
        if !(s_min.is_finite() && s_max.is_finite() && s_min < s_max) {
            return Err(Error::InvalidDistribution {
                name: "Breit-Wigner",
                reason: format!("empty or unbounded range [{}, {})", s_min, s_max),
            });
        }

        if !(mass > 0.0 && width > 0.0) {
            return Err(Error::InvalidDistribution {
                name: "Breit-Wigner",
                reason: format!("mass ({}) and width ({}) must be positive", mass, width),
            });
        }

        let rho = |s: f64| ((s - mass * mass) / (mass * width)).atan();

        Ok(Self {
            s_min,
            s_max,
            mass,
            width,
            rho_min: rho(s_min),
            rho_max: rho(s_max),
        })
    }

    /// Returns the lower boundary of $s$.
    pub const fn s_min(&self) -> f64 {
        self.s_min
    }

    /// Returns the upper boundary of $s$.
    pub const fn s_max(&self) -> f64 {
        self.s_max
    }

    /// Returns the mass of the resonance.
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the decay width of the resonance.
    pub const fn width(&self) -> f64 {
        self.width
    }
}

impl Proposal for BreitWigner {
    fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let rho = self.rho_min + (self.rho_max - self.rho_min) * rng.gen::<f64>();
        self.mass * self.width * rho.tan() + self.mass * self.mass
    }

    fn density(&self, s: f64) -> f64 {
        let mw = self.mass * self.width;
        let propagator = 1.0 / ((s - self.mass * self.mass).powi(2) + mw * mw);
        propagator * mw / (self.rho_max - self.rho_min)
    }
}

/// Any of the proposal distributions above.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    /// See [`Dirac`].
    Dirac(Dirac),
    /// See [`Uniform`].
    Uniform(Uniform),
    /// See [`BreitWigner`].
    BreitWigner(BreitWigner),
}

impl Distribution {
    /// Shortcut for a [`Dirac`] distribution.
    pub const fn dirac(x0: f64) -> Self {
        Self::Dirac(Dirac::new(x0))
    }

    /// Shortcut for a [`Uniform`] distribution.
    pub fn uniform(lower: f64, upper: f64) -> Result<Self> {
        Uniform::new(lower, upper).map(Self::Uniform)
    }

    /// Shortcut for a [`BreitWigner`] distribution.
    pub fn breit_wigner(s_min: f64, s_max: f64, mass: f64, width: f64) -> Result<Self> {
        BreitWigner::new(s_min, s_max, mass, width).map(Self::BreitWigner)
    }
}

impl Proposal for Distribution {
    fn sample_one<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Dirac(d) => d.sample_one(rng),
            Self::Uniform(d) => d.sample_one(rng),
            Self::BreitWigner(d) => d.sample_one(rng),
        }
    }

    fn density(&self, x: f64) -> f64 {
        match self {
            Self::Dirac(d) => d.density(x),
            Self::Uniform(d) => d.density(x),
            Self::BreitWigner(d) => d.density(x),
        }
    }
}
