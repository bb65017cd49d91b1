//! Analytic cross sections to validate the Monte Carlo integration against.
//!
//! Integrating the squared matrix element over the solid angle leaves
//!
//! $$ \sigma = \frac{4 \pi}{3} N_c \alpha^2 f_\mathrm{conv} \sum_q \left[ (Q_e Q_q)^2 I_1
//! + 2 Q_e V_e Q_q V_q I_2 + (A_e^2 + V_e^2) (A_q^2 + V_q^2) I_3 \right] $$
//!
//! with $I_1$, $I_2$ and $I_3$ the integrals of $f(s)/s$, $\chi_1(s) f(s)/s$ and
//! $\chi_2(s) f(s)/s$ over the beam spectrum $f(s)$.
use crate::matrix_element::MatrixElement;
use crate::parameters::Parameters;
use std::f64::consts::PI;

fn cross_section(parameters: &Parameters, integral1: f64, integral2: f64, integral3: f64) -> f64 {
    let me = MatrixElement::new(parameters);
    let e = me.electron();

    let (photon, interference, z_boson) =
        me.quarks()
            .iter()
            .fold((0.0, 0.0, 0.0), |(photon, interference, z_boson), q| {
                (
                    photon + (e.charge * q.charge).powi(2),
                    interference + 2.0 * e.charge * q.charge * e.vector * q.vector,
                    z_boson + e.squared_coupling() * q.squared_coupling(),
                )
            });

    4.0 / 3.0
        * PI
        * parameters.n_colors
        * parameters.alpha_qed.powi(2)
        * parameters.f_conv
        * (photon * integral1 + interference * integral2 + z_boson * integral3)
}

/// Cross section in pb for a beam with fixed squared energy $s = m_Z^2$.
pub fn fixed_beam_cross_section(parameters: &Parameters) -> f64 {
    let integral1 = 1.0 / parameters.z_mass2();
    let integral3 = parameters.kappa().powi(2) / parameters.z_width2();

    cross_section(parameters, integral1, 0.0, integral3)
}

/// Cross section in pb for a flat beam spectrum between `s_min` and `s_max`.
pub fn flat_beam_cross_section(parameters: &Parameters, s_min: f64, s_max: f64) -> f64 {
    let kappa = parameters.kappa();
    let (m, w) = (parameters.z_mass, parameters.z_width);
    let (m2, w2) = (parameters.z_mass2(), parameters.z_width2());
    let fs = 1.0 / (s_max - s_min);

    let log_term = 0.5
        * ((m2 * m2 + m2 * (w2 - 2.0 * s_max) + s_max * s_max)
            / (m2 * m2 + m2 * (w2 - 2.0 * s_min) + s_min * s_min))
            .ln();
    let tan_term = -(m / w) * (((m2 - s_max) / (m * w)).atan() - ((m2 - s_min) / (m * w)).atan());

    let integral1 = fs * (s_max / s_min).ln();
    let integral2 = fs * kappa * log_term;
    let integral3 = fs * kappa * kappa * (log_term + tan_term);

    cross_section(parameters, integral1, integral2, integral3)
}
