//! Minkowski four-vectors with metric $(+,-,-,-)$.
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A four-momentum $(E, p_x, p_y, p_z)$.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Vec4 {
    /// Energy component.
    pub e: f64,
    /// Momentum along the x-axis.
    pub px: f64,
    /// Momentum along the y-axis.
    pub py: f64,
    /// Momentum along the z-axis.
    pub pz: f64,
}

impl Vec4 {
    /// Constructor.
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Minkowski product with `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }

    /// Invariant mass squared, $p^2$.
    pub fn m2(&self) -> f64 {
        self.dot(self)
    }

    /// Invariant mass, $\sqrt{p^2}$.
    pub fn m(&self) -> f64 {
        self.m2().sqrt()
    }

    /// Squared length of the spatial part.
    pub fn p3_abs2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Length of the spatial part.
    pub fn p3_abs(&self) -> f64 {
        self.p3_abs2().sqrt()
    }

    /// Cross product of the spatial parts; the energy component of the result is zero.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            0.0,
            self.py * other.pz - self.pz * other.py,
            self.pz * other.px - self.px * other.pz,
            self.px * other.py - self.py * other.px,
        )
    }

    /// Boosts `v` into the rest frame of `self`.
    pub fn boost(&self, v: &Self) -> Self {
        let m = self.m();
        let e = self.dot(v) / m;
        let c = (v.e + e) / (m + self.e);

        Self::new(e, v.px - c * self.px, v.py - c * self.py, v.pz - c * self.pz)
    }

    /// Boosts `v` out of the rest frame of `self`; the inverse of [`Vec4::boost`].
    pub fn boost_back(&self, v: &Self) -> Self {
        let m = self.m();
        let e = (self.e * v.e + self.px * v.px + self.py * v.py + self.pz * v.pz) / m;
        let c = (v.e + e) / (m + self.e);

        Self::new(e, v.px + c * self.px, v.py + c * self.py, v.pz + c * self.pz)
    }
}

impl Add for Vec4 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.e + other.e,
            self.px + other.px,
            self.py + other.py,
            self.pz + other.pz,
        )
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, other: Self) {
        self.e += other.e;
        self.px += other.px;
        self.py += other.py;
        self.pz += other.pz;
    }
}

impl Sub for Vec4 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.e - other.e,
            self.px - other.px,
            self.py - other.py,
            self.pz - other.pz,
        )
    }
}

impl Neg for Vec4 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.e, -self.px, -self.py, -self.pz)
    }
}

impl Mul<f64> for Vec4 {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(
            self.e * factor,
            self.px * factor,
            self.py * factor,
            self.pz * factor,
        )
    }
}

impl Mul<Vec4> for f64 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        v * self
    }
}

impl Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.e, self.px, self.py, self.pz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn minkowski_products() {
        let p = Vec4::new(5.0, 1.0, 2.0, 3.0);
        let q = Vec4::new(2.0, 0.0, 1.0, -1.0);

        assert_eq!(p.dot(&q), 10.0 - 2.0 + 3.0);
        assert_eq!(p.m2(), 25.0 - 14.0);
        assert_eq!(p.p3_abs2(), 14.0);
        assert_eq!((p + q) - q, p);
        assert_eq!(2.0 * q, q * 2.0);
        assert_eq!(-q + q, Vec4::default());
    }

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Vec4::new(0.0, 1.0, 2.0, 3.0);
        let b = Vec4::new(0.0, -2.0, 0.5, 4.0);
        let c = a.cross(&b);

        assert_eq!(c.e, 0.0);
        assert_approx_eq!(c.px * a.px + c.py * a.py + c.pz * a.pz, 0.0, TOLERANCE);
        assert_approx_eq!(c.px * b.px + c.py * b.py + c.pz * b.pz, 0.0, TOLERANCE);
    }

    #[test]
    fn boost_into_rest_frame_and_back() {
        let frame = Vec4::new(10.0, 1.0, -2.0, 3.0);
        let v = Vec4::new(4.0, 0.5, 1.5, -2.0);

        let rest = frame.boost(&frame);
        assert_approx_eq!(rest.e, frame.m(), TOLERANCE);
        assert_approx_eq!(rest.p3_abs(), 0.0, TOLERANCE);

        let boosted = frame.boost(&v);
        assert_approx_eq!(boosted.m2(), v.m2(), 1e-10);

        let back = frame.boost_back(&boosted);
        assert_approx_eq!(back.e, v.e, TOLERANCE);
        assert_approx_eq!(back.px, v.px, TOLERANCE);
        assert_approx_eq!(back.py, v.py, TOLERANCE);
        assert_approx_eq!(back.pz, v.pz, TOLERANCE);
    }
}
