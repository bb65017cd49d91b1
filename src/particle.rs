//! Particles with leading-colour information.
use crate::vector::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// PDG id of the gluon.
pub const GLUON: i32 = 21;

/// PDG id of the electron.
pub const ELECTRON: i32 = 11;

/// A colour and an anti-colour index; zero means "no colour".
pub type Color = [u32; 2];

/// A particle given by its PDG id, momentum and colour flow.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Particle {
    /// PDG id.
    pub pid: i32,
    /// Four-momentum.
    pub mom: Vec4,
    /// Colour and anti-colour index.
    pub color: Color,
}

impl Particle {
    /// Constructor.
    pub const fn new(pid: i32, mom: Vec4, color: Color) -> Self {
        Self { pid, mom, color }
    }

    /// Constructor for particles that do not carry colour.
    pub const fn colorless(pid: i32, mom: Vec4) -> Self {
        Self::new(pid, mom, [0, 0])
    }

    /// Returns `true` if this particle is a gluon.
    pub fn is_gluon(&self) -> bool {
        self.pid == GLUON
    }

    /// Returns `true` if a colour of this particle finds its anti-colour in `other`, or the other
    /// way round.
    pub fn is_color_connected(&self, other: &Self) -> bool {
        (self.color[0] > 0 && self.color[0] == other.color[1])
            || (self.color[1] > 0 && self.color[1] == other.color[0])
    }
}

impl Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}, {}]",
            self.pid, self.mom, self.color[0], self.color[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_connection() {
        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let quark = Particle::new(1, p, [1, 0]);
        let antiquark = Particle::new(-1, -p, [0, 1]);
        let gluon = Particle::new(GLUON, p, [2, 1]);
        let electron = Particle::colorless(ELECTRON, p);

        assert!(quark.is_color_connected(&antiquark));
        assert!(antiquark.is_color_connected(&quark));
        assert!(gluon.is_color_connected(&quark));
        assert!(!gluon.is_color_connected(&antiquark));
        assert!(!electron.is_color_connected(&electron));
        assert!(gluon.is_gluon() && !quark.is_gluon());
    }
}
