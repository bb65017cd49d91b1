//! Catani-Seymour splitting kernels for final-state emitters with final-state spectators.
use crate::particle::GLUON;
use crate::qcd::{CA, CF, TR};
use rand::Rng;

/// The three splitting functions of massless QCD.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kernel {
    /// $q \to q g$.
    Pqq,
    /// $g \to g g$.
    Pgg,
    /// $g \to q \bar{q}$.
    Pgq,
}

impl Kernel {
    /// Evaluates the kernel at momentum fraction `z` and recoil variable `y`.
    pub fn value(self, z: f64, y: f64) -> f64 {
        match self {
            Self::Pqq => CF * (2.0 / (1.0 - z * (1.0 - y)) - (1.0 + z)),
            Self::Pgg => CA / 2.0 * (2.0 / (1.0 - z * (1.0 - y)) - 2.0 + z * (1.0 - z)),
            Self::Pgq => TR / 2.0 * (1.0 - 2.0 * z * (1.0 - z)),
        }
    }

    /// An overestimate of [`Kernel::value`] that is simple to integrate.
    pub fn estimate(self, z: f64) -> f64 {
        match self {
            Self::Pqq => CF * 2.0 / (1.0 - z),
            Self::Pgg => CA / (1.0 - z),
            Self::Pgq => TR / 2.0,
        }
    }

    /// Integral of [`Kernel::estimate`] over $z \in [z_-, z_+]$.
    pub fn integral(self, zm: f64, zp: f64) -> f64 {
        match self {
            Self::Pqq => CF * 2.0 * ((1.0 - zm) / (1.0 - zp)).ln(),
            Self::Pgg => CA * ((1.0 - zm) / (1.0 - zp)).ln(),
            Self::Pgq => TR / 2.0 * (zp - zm),
        }
    }

    /// Draws $z \in [z_-, z_+]$ distributed according to [`Kernel::estimate`].
    pub fn generate_z<R: Rng + ?Sized>(self, rng: &mut R, zm: f64, zp: f64) -> f64 {
        let r = rng.gen::<f64>();

        match self {
            Self::Pqq | Self::Pgg => 1.0 + (zp - 1.0) * ((1.0 - zm) / (1.0 - zp)).powf(r),
            Self::Pgq => zm + (zp - zm) * r,
        }
    }
}

/// A kernel together with the PDG ids of the parent and the two daughters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Splitting {
    /// PDG ids of parent, first and second daughter.
    pub flavours: [i32; 3],
    /// The splitting function.
    pub kernel: Kernel,
}

impl Splitting {
    /// PDG id of the splitting particle.
    pub const fn parent(&self) -> i32 {
        self.flavours[0]
    }
}

/// All splittings of five massless quark flavours and the gluon: $q \to q g$ for quarks and
/// antiquarks, then $g \to q \bar{q}$, then $g \to g g$.
pub fn splittings() -> Vec<Splitting> {
    let quarks = [-5, -4, -3, -2, -1, 1, 2, 3, 4, 5];

    quarks
        .iter()
        .map(|&fl| Splitting {
            flavours: [fl, fl, GLUON],
            kernel: Kernel::Pqq,
        })
        .chain((1..=5).map(|fl| Splitting {
            flavours: [GLUON, fl, -fl],
            kernel: Kernel::Pgq,
        }))
        .chain(std::iter::once(Splitting {
            flavours: [GLUON, GLUON, GLUON],
            kernel: Kernel::Pgg,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand_pcg::Pcg64;

    #[test]
    fn estimates_bound_the_kernels() {
        for &kernel in &[Kernel::Pqq, Kernel::Pgg, Kernel::Pgq] {
            for i in 1..100 {
                let z = f64::from(i) / 100.0;
                for &y in &[0.0, 0.1, 0.5, 0.9] {
                    assert!(kernel.value(z, y) <= kernel.estimate(z) + 1e-12);
                }
            }
        }
    }

    #[test]
    fn integrals_match_the_estimates() {
        let (zm, zp) = (0.01, 0.99);
        let steps = 100_000;
        let h = (zp - zm) / f64::from(steps);

        for &kernel in &[Kernel::Pqq, Kernel::Pgg, Kernel::Pgq] {
            let integral: f64 = (0..steps)
                .map(|i| kernel.estimate(zm + (f64::from(i) + 0.5) * h) * h)
                .sum();
            assert_approx_eq!(integral, kernel.integral(zm, zp), 1e-6);
        }
    }

    #[test]
    fn generated_z_lies_within_bounds() {
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let (zm, zp) = (0.05, 0.95);

        for &kernel in &[Kernel::Pqq, Kernel::Pgg, Kernel::Pgq] {
            for _ in 0..1000 {
                let z = kernel.generate_z(&mut rng, zm, zp);
                assert!(z >= zm - 1e-12 && z <= zp + 1e-12);
            }
        }
    }

    #[test]
    fn splitting_table() {
        let table = splittings();

        assert_eq!(table.len(), 16);
        assert_eq!(table[0].flavours, [-5, -5, GLUON]);
        assert_eq!(table[10].flavours, [GLUON, 1, -1]);
        assert_eq!(table[15].kernel, Kernel::Pgg);
        assert!(table
            .iter()
            .all(|s| (s.kernel == Kernel::Pqq) == (s.parent() != GLUON)));
    }
}
