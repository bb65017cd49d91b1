//! Events are lists of particles whose first two entries are the incoming particles.
use crate::error::{Error, Result};
use crate::particle::{Particle, ELECTRON};
use crate::vector::Vec4;
use std::collections::HashMap;

/// Number of incoming particles at the beginning of every event.
pub const INCOMING: usize = 2;

/// Builds the event $e^- e^+ \to q \bar{q}$ for the squared centre-of-mass energy `s`, the
/// scattering angle given by `cos_theta` and `phi`, and the PDG id `flavour` of the quark.
///
/// The electron moves along the positive z-axis, the quark is emitted opposite to the direction
/// given by the angles. The quark carries colour 1 and the antiquark anti-colour 1.
pub fn from_sample(s: f64, cos_theta: f64, phi: f64, flavour: i32) -> Vec<Particle> {
    let e = 0.5 * s.sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let p = Vec4::new(
        e,
        -e * phi.cos() * sin_theta,
        -e * phi.sin() * sin_theta,
        -e * cos_theta,
    );
    let p_bar = Vec4::new(e, -p.px, -p.py, -p.pz);

    vec![
        Particle::colorless(ELECTRON, Vec4::new(e, 0.0, 0.0, e)),
        Particle::colorless(-ELECTRON, Vec4::new(e, 0.0, 0.0, -e)),
        Particle::new(flavour, p, [1, 0]),
        Particle::new(-flavour, p_bar, [0, 1]),
    ]
}

/// Returns the outgoing particles of `event`, or an error if the incoming ones are missing.
pub fn outgoing(event: &[Particle]) -> Result<&[Particle]> {
    if event.len() < INCOMING {
        return Err(Error::MalformedEvent(event.len()));
    }

    Ok(&event[INCOMING..])
}

/// Sum of the momenta of the incoming particles minus the sum of the outgoing ones; vanishes for
/// an event that conserves four-momentum.
pub fn momentum_imbalance(event: &[Particle]) -> Vec4 {
    event
        .iter()
        .enumerate()
        .fold(Vec4::default(), |sum, (index, particle)| {
            if index < INCOMING {
                sum + particle.mom
            } else {
                sum - particle.mom
            }
        })
}

/// Returns `true` if every colour index of the outgoing particles is matched by exactly one
/// anti-colour index.
pub fn is_color_balanced(event: &[Particle]) -> bool {
    let mut open: HashMap<u32, (usize, usize)> = HashMap::new();

    for particle in event.iter().skip(INCOMING) {
        if particle.color[0] > 0 {
            open.entry(particle.color[0]).or_default().0 += 1;
        }
        if particle.color[1] > 0 {
            open.entry(particle.color[1]).or_default().1 += 1;
        }
    }

    open.values().all(|&(colors, anti_colors)| colors == 1 && anti_colors == 1)
}

/// Largest colour index in use in `event`.
pub fn max_color_index(event: &[Particle]) -> u32 {
    event
        .iter()
        .flat_map(|particle| particle.color.iter().copied())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn hard_event_is_balanced() {
        let s = 91.2 * 91.2;
        let event = from_sample(s, 0.3, 1.2, 2);

        assert_eq!(event.len(), 4);
        assert_eq!(event[2].pid, 2);
        assert_eq!(event[3].pid, -2);
        assert!(event[2].is_color_connected(&event[3]));
        assert!(is_color_balanced(&event));
        assert_eq!(max_color_index(&event), 1);

        let imbalance = momentum_imbalance(&event);
        assert_approx_eq!(imbalance.e, 0.0, 1e-12);
        assert_approx_eq!(imbalance.p3_abs(), 0.0, 1e-12);

        // massless outgoing quarks with the full centre-of-mass energy
        assert_approx_eq!(event[2].mom.m2(), 0.0, 1e-9);
        assert_approx_eq!((event[2].mom + event[3].mom).m2(), s, 1e-9);
        assert_approx_eq!(-event[2].mom.pz / event[2].mom.e, 0.3, 1e-12);
    }

    #[test]
    fn unbalanced_colors_are_detected() {
        let mut event = from_sample(100.0, 0.0, 0.0, 1);
        event[3].color = [0, 2];

        assert!(!is_color_balanced(&event));
    }

    #[test]
    fn outgoing_requires_incoming_particles() {
        let event = from_sample(100.0, 0.0, 0.0, 1);

        assert_eq!(outgoing(&event).unwrap().len(), 2);
        assert!(matches!(
            outgoing(&event[..1]),
            Err(Error::MalformedEvent(1))
        ));
    }
}
