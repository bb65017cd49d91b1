//! A final-state parton shower based on the Sudakov veto algorithm.
//!
//! Every outgoing coloured particle radiates off colour-connected spectators in the leading
//! colour approximation. The recoil of a branching is absorbed by the spectator, so that the total
//! four-momentum of the event is conserved after every emission.
pub mod kernels;

use crate::error::{Error, Result};
use crate::event::{self, INCOMING};
use crate::parameters::Parameters;
use crate::particle::{Color, Particle, GLUON};
use crate::qcd::AlphaS;
use crate::vector::Vec4;
use kernels::Splitting;
use log::debug;
use rand::Rng;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// The evolution variable and colour counter of a running shower.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowerState {
    t: f64,
    color_index: u32,
}

impl ShowerState {
    /// Starts showering `event` at the scale `t`. New colour indices continue after the largest
    /// index already in use.
    pub fn new(event: &[Particle], t: f64) -> Self {
        Self {
            t,
            color_index: event::max_color_index(event),
        }
    }

    /// Returns the current evolution scale.
    pub const fn t(&self) -> f64 {
        self.t
    }

    /// Returns the largest colour index handed out so far.
    pub const fn color_index(&self) -> u32 {
        self.color_index
    }
}

/// A possible branching: the radiator and spectator index in the event and the kernel.
#[derive(Clone, Debug)]
struct Candidate {
    radiator: usize,
    spectator: usize,
    splitting: Splitting,
    m2: f64,
    zp: f64,
    g: f64,
}

/// The shower with its cutoff, running coupling and table of splittings.
#[derive(Clone, Debug)]
pub struct Shower {
    t0: f64,
    alphas: AlphaS,
    alphas_max: f64,
    splittings: BTreeMap<i32, Vec<Splitting>>,
}

impl Shower {
    /// Creates a shower with the running coupling `alphas` that stops at the cutoff scale `t0`.
    pub fn new(alphas: AlphaS, t0: f64) -> Result<Self> {
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(Error::InvalidParameter {
                name: "t0",
                reason: format!("the cutoff scale must be positive and finite, got {}", t0),
            });
        }

        let mut splittings: BTreeMap<i32, Vec<Splitting>> = BTreeMap::new();

        for splitting in kernels::splittings() {
            splittings
                .entry(splitting.parent())
                .or_default()
                .push(splitting);
        }

        Ok(Self {
            t0,
            alphas_max: alphas.at(t0),
            alphas,
            splittings,
        })
    }

    /// Creates a shower with the coupling given by `parameters`.
    pub fn from_parameters(parameters: &Parameters, t0: f64) -> Result<Self> {
        Self::new(AlphaS::from_parameters(parameters), t0)
    }

    /// Returns the cutoff scale.
    pub const fn t0(&self) -> f64 {
        self.t0
    }

    /// Returns the running coupling.
    pub const fn alphas(&self) -> &AlphaS {
        &self.alphas
    }

    /// Returns the splittings of the particle with PDG id `pid`.
    pub fn splittings(&self, pid: i32) -> &[Splitting] {
        self.splittings.get(&pid).map_or(&[][..], Vec::as_slice)
    }

    fn candidates(&self, event: &[Particle]) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (radiator, split) in event.iter().enumerate().skip(INCOMING) {
            for (spectator, spect) in event.iter().enumerate().skip(INCOMING) {
                if radiator == spectator || !split.is_color_connected(spect) {
                    continue;
                }

                let m2 = (split.mom + spect.mom).m2();

                // no phase space for a resolvable emission
                if m2 <= 4.0 * self.t0 {
                    continue;
                }

                let zp = 0.5 * (1.0 + (1.0 - 4.0 * self.t0 / m2).sqrt());

                for &splitting in self.splittings(split.pid) {
                    candidates.push(Candidate {
                        radiator,
                        spectator,
                        splitting,
                        m2,
                        zp,
                        g: self.alphas_max / (2.0 * PI) * splitting.kernel.integral(1.0 - zp, zp),
                    });
                }
            }
        }

        candidates
    }

    /// Lowers the scale of `state` until either one branching is accepted, which is then applied
    /// to `event`, or the cutoff is reached. Returns `true` if `event` was changed.
    pub fn generate_next_emission<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        event: &mut Vec<Particle>,
        state: &mut ShowerState,
    ) -> Result<bool> {
        event::outgoing(event)?;

        let candidates = self.candidates(event);

        while state.t > self.t0 {
            let mut t = self.t0;
            let mut winner = None;

            for candidate in &candidates {
                let trial = state.t * rng.gen::<f64>().powf(1.0 / candidate.g);

                if trial > t {
                    t = trial;
                    winner = Some(candidate);
                }
            }

            state.t = t;

            let candidate = match winner {
                Some(candidate) => candidate,
                None => break,
            };

            let kernel = candidate.splitting.kernel;
            let z = kernel.generate_z(rng, 1.0 - candidate.zp, candidate.zp);
            let y = t / candidate.m2 / z / (1.0 - z);

            if y >= 1.0 {
                continue;
            }

            let f = (1.0 - y) * self.alphas.at(t) * kernel.value(z, y);
            let g = self.alphas_max * kernel.estimate(z);

            if f / g <= rng.gen::<f64>() {
                continue;
            }

            let phi = 2.0 * PI * rng.gen::<f64>();
            let [p_i, p_j, p_k] = make_kinematics(
                z,
                y,
                phi,
                event[candidate.radiator].mom,
                event[candidate.spectator].mom,
            );
            let [color_i, color_j] = make_colors(
                rng,
                &mut state.color_index,
                candidate.splitting.flavours,
                event[candidate.radiator].color,
                event[candidate.spectator].color,
            );

            let flavours = candidate.splitting.flavours;
            event.push(Particle::new(flavours[2], p_j, color_j));
            event[candidate.radiator] = Particle::new(flavours[1], p_i, color_i);
            event[candidate.spectator].mom = p_k;

            return Ok(true);
        }

        Ok(false)
    }

    /// Showers `event` starting from the scale `t` down to the cutoff and returns the number of
    /// particles afterwards. The first two particles are incoming and stay untouched.
    pub fn run<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        event: &mut Vec<Particle>,
        t: f64,
    ) -> Result<usize> {
        event::outgoing(event)?;

        let mut state = ShowerState::new(event, t);
        let mut emissions = 0;

        while state.t > self.t0 {
            if self.generate_next_emission(rng, event, &mut state)? {
                emissions += 1;
            }
        }

        debug!("shower finished after {} emissions", emissions);

        Ok(event.len())
    }
}

/// Momenta of the two daughters of the radiator `p_ij` and of the spectator `p_k` after a
/// branching with momentum fraction `z`, recoil `y` and azimuth `phi`.
pub fn make_kinematics(z: f64, y: f64, phi: f64, p_ij: Vec4, p_k: Vec4) -> [Vec4; 3] {
    let q = p_ij + p_k;
    let rkt = (q.m2() * y * z * (1.0 - z)).sqrt();

    let mut kt1 = p_ij.cross(&p_k);

    // radiator and spectator are collinear, pick any direction perpendicular to the radiator
    if kt1.p3_abs() < 1e-6 {
        kt1 = p_ij.cross(&Vec4::new(0.0, 1.0, 0.0, 0.0));
    }
    if kt1.p3_abs() < 1e-6 {
        kt1 = p_ij.cross(&Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    kt1 = kt1 * (rkt * phi.cos() / kt1.p3_abs());

    let kt2cms = q.boost(&p_ij).cross(&kt1);
    let kt2cms = kt2cms * (rkt * phi.sin() / kt2cms.p3_abs());
    let kt2 = q.boost_back(&kt2cms);

    let p_i = z * p_ij + (1.0 - z) * y * p_k + kt1 + kt2;
    let p_j = (1.0 - z) * p_ij + z * y * p_k - kt1 - kt2;

    [p_i, p_j, (1.0 - y) * p_k]
}

/// Colours of the two daughters of a branching with PDG ids `flavours` of a radiator with colour
/// `color_ij` next to a spectator with colour `color_k`. A new index is taken from `color_index`
/// for every branching.
pub fn make_colors<R: Rng + ?Sized>(
    rng: &mut R,
    color_index: &mut u32,
    flavours: [i32; 3],
    color_ij: Color,
    color_k: Color,
) -> [Color; 2] {
    *color_index += 1;
    let c = *color_index;

    if flavours[0] != GLUON {
        if flavours[0] > 0 {
            [[c, 0], [color_ij[0], c]]
        } else {
            [[0, c], [c, color_ij[1]]]
        }
    } else if flavours[1] == GLUON {
        if color_ij[0] == color_k[1] {
            if color_ij[1] == color_k[0] && rng.gen::<f64>() > 0.5 {
                [[color_ij[0], c], [c, color_ij[1]]]
            } else {
                [[c, color_ij[1]], [color_ij[0], c]]
            }
        } else {
            [[color_ij[0], c], [c, color_ij[1]]]
        }
    } else if flavours[1] > 0 {
        [[color_ij[0], 0], [0, color_ij[1]]]
    } else {
        [[0, color_ij[1]], [color_ij[0], 0]]
    }
}
