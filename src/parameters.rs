//! Physical constants and couplings that enter the hard process and the shower.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The table of physics parameters.
///
/// Every field has a default, so a JSON document only needs to contain the values that differ
/// from the reference setup. Masses and widths are in GeV, the conversion factor `f_conv` turns
/// $\mathrm{GeV}^{-2}$ into picobarn.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Parameters {
    /// Electromagnetic coupling $\alpha$.
    pub alpha_qed: f64,
    /// Strong coupling at the Z mass, $\alpha_s(m_Z^2)$.
    pub alpha_s_mz: f64,
    /// Number of colours, $N_c$.
    pub n_colors: f64,
    /// Squared sine of the weak mixing angle.
    pub sin2w: f64,
    /// Unit conversion factor from $\mathrm{GeV}^{-2}$ to pb.
    pub f_conv: f64,
    /// Mass of the Z boson.
    pub z_mass: f64,
    /// Decay width of the Z boson.
    pub z_width: f64,
    /// Mass of the bottom quark, used as flavour threshold of the running coupling.
    pub b_mass: f64,
    /// Mass of the charm quark, used as flavour threshold of the running coupling.
    pub c_mass: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            alpha_qed: 1.0 / 129.0,
            alpha_s_mz: 0.118,
            n_colors: 3.0,
            sin2w: 0.223,
            f_conv: 389_379_656.0,
            z_mass: 91.2,
            z_width: 2.5,
            b_mass: 4.75,
            c_mass: 1.3,
        }
    }
}

impl Parameters {
    /// Parses the parameters from a JSON document and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let parameters: Self = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Reads the parameters from the JSON file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Checks that all values are physically sensible.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("alpha_qed", self.alpha_qed),
            ("alpha_s_mz", self.alpha_s_mz),
            ("n_colors", self.n_colors),
            ("f_conv", self.f_conv),
            ("z_mass", self.z_mass),
            ("z_width", self.z_width),
            ("b_mass", self.b_mass),
            ("c_mass", self.c_mass),
        ];

        for &(name, value) in &positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter {
                    name,
                    reason: format!("must be positive and finite, got {}", value),
                });
            }
        }

        if !(self.sin2w > 0.0 && self.sin2w < 1.0) {
            return Err(Error::InvalidParameter {
                name: "sin2w",
                reason: format!("must lie in (0, 1), got {}", self.sin2w),
            });
        }

        if self.c_mass >= self.b_mass || self.b_mass >= self.z_mass {
            return Err(Error::InvalidParameter {
                name: "c_mass",
                reason: "quark thresholds must be ordered as c_mass < b_mass < z_mass".to_string(),
            });
        }

        Ok(())
    }

    /// Squared mass of the Z boson.
    pub fn z_mass2(&self) -> f64 {
        self.z_mass * self.z_mass
    }

    /// Squared width of the Z boson.
    pub fn z_width2(&self) -> f64 {
        self.z_width * self.z_width
    }

    /// Prefactor $\kappa = 1 / (4 \sin^2 \theta_W (1 - \sin^2 \theta_W))$ of the Z propagator
    /// terms.
    pub fn kappa(&self) -> f64 {
        1.0 / (4.0 * self.sin2w * (1.0 - self.sin2w))
    }

    /// The range of $s$ three widths around the Z peak,
    /// $((m_Z - 3\Gamma_Z)^2, (m_Z + 3\Gamma_Z)^2)$.
    pub fn flat_beam_range(&self) -> (f64, f64) {
        let lower = self.z_mass - 3.0 * self.z_width;
        let upper = self.z_mass + 3.0 * self.z_width;
        (lower * lower, upper * upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let parameters = Parameters::from_json(r#"{ "z_width": 2.4952 }"#).unwrap();

        assert_eq!(parameters.z_width, 2.4952);
        assert_eq!(parameters.z_mass, 91.2);
        assert_eq!(parameters.alpha_s_mz, 0.118);
    }

    #[test]
    fn rejects_unphysical_values() {
        assert!(matches!(
            Parameters::from_json(r#"{ "sin2w": 1.5 }"#),
            Err(Error::InvalidParameter { name: "sin2w", .. })
        ));
        assert!(matches!(
            Parameters::from_json(r#"{ "z_width": -1.0 }"#),
            Err(Error::InvalidParameter { name: "z_width", .. })
        ));
        assert!(matches!(
            Parameters::from_json(r#"{ "z_width": "wide" }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn derived_quantities() {
        let parameters = Parameters::default();
        let (s_min, s_max) = parameters.flat_beam_range();

        assert_approx_eq!(s_min, 83.7 * 83.7, 1e-9);
        assert_approx_eq!(s_max, 98.7 * 98.7, 1e-9);
        assert_approx_eq!(parameters.kappa(), 1.0 / (4.0 * 0.223 * 0.777), 1e-15);
    }
}
