//! The leading-order squared matrix element of $e^+ e^- \to \gamma/Z \to q \bar{q}$.
use crate::parameters::Parameters;
use std::f64::consts::PI;

/// Number of light quark flavours, down, up, strange, charm and bottom.
pub const N_FLAVOURS: usize = 5;

/// Electric charge and couplings of a fermion to the Z boson.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fermion {
    /// Electric charge in units of the positron charge.
    pub charge: f64,
    /// Axial coupling, equal to the third component of the weak isospin.
    pub axial: f64,
    /// Vector coupling $V = A - 2 Q \sin^2 \theta_W$.
    pub vector: f64,
}

impl Fermion {
    fn new(charge: f64, axial: f64, sin2w: f64) -> Self {
        Self {
            charge,
            axial,
            vector: axial - 2.0 * charge * sin2w,
        }
    }

    /// Returns $A^2 + V^2$.
    pub fn squared_coupling(&self) -> f64 {
        self.axial * self.axial + self.vector * self.vector
    }
}

/// The squared matrix element, summed over spins and colours of the quarks.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixElement {
    electron: Fermion,
    quarks: [Fermion; N_FLAVOURS],
    kappa: f64,
    z_mass2: f64,
    z_width2: f64,
    prefactor: f64,
}

impl MatrixElement {
    /// Constructs the matrix element for the given `parameters`.
    pub fn new(parameters: &Parameters) -> Self {
        let sin2w = parameters.sin2w;
        let down = Fermion::new(-1.0 / 3.0, -0.5, sin2w);
        let up = Fermion::new(2.0 / 3.0, 0.5, sin2w);

        Self {
            electron: Fermion::new(-1.0, -0.5, sin2w),
            quarks: [down, up, down, up, down],
            kappa: parameters.kappa(),
            z_mass2: parameters.z_mass2(),
            z_width2: parameters.z_width2(),
            prefactor: (4.0 * PI * parameters.alpha_qed).powi(2) * parameters.n_colors,
        }
    }

    /// Returns the electron couplings.
    pub const fn electron(&self) -> &Fermion {
        &self.electron
    }

    /// Returns the couplings of the quark with flavour index `flavour`, starting at zero for the
    /// down quark.
    ///
    /// # Panics
    ///
    /// Panics if `flavour` is not smaller than [`N_FLAVOURS`].
    pub fn quark(&self, flavour: usize) -> &Fermion {
        &self.quarks[flavour]
    }

    /// Returns the couplings of all light quarks.
    pub const fn quarks(&self) -> &[Fermion; N_FLAVOURS] {
        &self.quarks
    }

    /// The interference ($\chi_1$) and pure Z ($\chi_2$) propagator factors at `s`.
    pub fn chi(&self, s: f64) -> (f64, f64) {
        let den = (s - self.z_mass2).powi(2) + self.z_width2 * self.z_mass2;
        let chi1 = self.kappa * s * (s - self.z_mass2) / den;
        let chi2 = self.kappa * self.kappa * s * s / den;
        (chi1, chi2)
    }

    /// Evaluates the squared matrix element at the squared centre-of-mass energy `s` and the
    /// scattering angle `cos_theta` for the quark with index `flavour`.
    ///
    /// # Panics
    ///
    /// Panics if `flavour` is not smaller than [`N_FLAVOURS`].
    pub fn eval(&self, s: f64, cos_theta: f64, flavour: usize) -> f64 {
        let (chi1, chi2) = self.chi(s);
        let e = &self.electron;
        let q = &self.quarks[flavour];

        let symmetric = (e.charge * q.charge).powi(2)
            + 2.0 * e.charge * e.vector * q.charge * q.vector * chi1
            + e.squared_coupling() * q.squared_coupling() * chi2;
        let antisymmetric = 4.0 * e.charge * q.charge * e.axial * q.axial * chi1
            + 8.0 * e.axial * e.vector * q.axial * q.vector * chi2;

        self.prefactor
            * ((1.0 + cos_theta * cos_theta) * symmetric + cos_theta * antisymmetric)
    }

    /// Sum of [`MatrixElement::eval`] over all light quark flavours.
    pub fn eval_flavour_sum(&self, s: f64, cos_theta: f64) -> f64 {
        (0..N_FLAVOURS)
            .map(|flavour| self.eval(s, cos_theta, flavour))
            .sum()
    }
}
