//! Differential and integrated jet rates of the $k_T$ clustering algorithm.
//!
//! Every event is clustered down to two jets without a resolution cut, which gives the sequence of
//! splitting scales $y_{23}, y_{34}, \ldots$. Their logarithms are filled into histograms, and the
//! integrated $n$-jet rates as a function of $\log_{10} y_\mathrm{cut}$ into scatters.
use crate::error::{Error, Result};
use crate::event::{self, INCOMING};
use crate::histograms::{Histo1D, Scatter2D};
use crate::particle::Particle;
use crate::vector::Vec4;
use log::info;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Default number of bins of every histogram.
pub const BINS: usize = 100;
/// Default lower edge of every histogram.
pub const LEFT_EDGE: f64 = -4.3;
/// Default upper edge of every histogram.
pub const RIGHT_EDGE: f64 = -0.3;
/// Default number of differential jet rates, $y_{23}$ up to $y_{56}$.
pub const N_MAX: usize = 4;

/// The scale $Q^2$ the clustering measure is normalized to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClusterReference {
    /// Invariant mass of the two incoming particles.
    Incoming,
    /// Invariant mass of all outgoing particles.
    Outgoing,
    /// A fixed value.
    Fixed(f64),
}

impl Default for ClusterReference {
    fn default() -> Self {
        Self::Incoming
    }
}

impl FromStr for ClusterReference {
    type Err = Error;

    /// Parses `incoming`, `outgoing` or a positive number.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            _ => match s.parse::<f64>() {
                Ok(q2) if q2.is_finite() && q2 > 0.0 => Ok(Self::Fixed(q2)),
                _ => Err(Error::UnknownClusterReference(s.to_string())),
            },
        }
    }
}

impl ClusterReference {
    /// Returns $Q^2$ for `event`.
    pub fn q2(&self, event: &[Particle]) -> Result<f64> {
        let outgoing = event::outgoing(event)?;

        Ok(match *self {
            Self::Incoming => (event[0].mom + event[1].mom).m2(),
            Self::Outgoing => outgoing
                .iter()
                .fold(Vec4::default(), |sum, particle| sum + particle.mom)
                .m2(),
            Self::Fixed(q2) => q2,
        })
    }
}

/// The $k_T$ distance of the momenta `p_i` and `p_j` relative to the scale `q2`.
pub fn y_ij(p_i: &Vec4, p_j: &Vec4, q2: f64) -> f64 {
    let pipj = p_i.px * p_j.px + p_i.py * p_j.py + p_i.pz * p_j.pz;
    let cos_theta = (pipj / (p_i.p3_abs2() * p_j.p3_abs2()).sqrt())
        .max(-1.0)
        .min(1.0);

    2.0 * p_i.e.powi(2).min(p_j.e.powi(2)) * (1.0 - cos_theta) / q2
}

/// Clusters `momenta` until two are left and returns the $N - 2$ splitting scales in ascending
/// order.
pub fn cluster_momenta(mut momenta: Vec<Vec4>, q2: f64) -> Vec<f64> {
    let mut scales = Vec::with_capacity(momenta.len().saturating_sub(2));

    while momenta.len() > 2 {
        let mut min = (f64::INFINITY, 0, 1);

        for i in 0..momenta.len() - 1 {
            for j in i + 1..momenta.len() {
                let y = y_ij(&momenta[i], &momenta[j], q2);

                if y < min.0 {
                    min = (y, i, j);
                }
            }
        }

        let (y, i, j) = min;
        scales.push(y);

        // `j > i`, so removing `j` first leaves `i` in place
        let p_j = momenta.remove(j);
        let p_i = momenta.remove(i);
        momenta.push(p_i + p_j);
    }

    scales.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    scales
}

/// Histograms of the differential and integrated jet rates.
#[derive(Clone, Debug)]
pub struct Analysis {
    reference: ClusterReference,
    left_edge: f64,
    differential: Vec<Histo1D>,
    integrated: Vec<Scatter2D>,
    num_events: usize,
    finalized: bool,
}

impl Analysis {
    /// Creates the analysis with 100 bins on $[-4.3, -0.3)$ for $y_{23}$ up to $y_{56}$.
    pub fn new(reference: ClusterReference) -> Result<Self> {
        Self::with_binning(reference, BINS, LEFT_EDGE, RIGHT_EDGE, N_MAX)
    }

    /// Creates the analysis with `bins` bins on `[left_edge, right_edge)` for `n_max`
    /// differential jet rates.
    pub fn with_binning(
        reference: ClusterReference,
        bins: usize,
        left_edge: f64,
        right_edge: f64,
        n_max: usize,
    ) -> Result<Self> {
        let differential = (0..n_max)
            .map(|i| {
                Histo1D::new(
                    &format!("/LL_JetRates/log10_y_{}{}", i + 2, i + 3),
                    bins,
                    left_edge,
                    right_edge,
                )
            })
            .collect::<Result<_>>()?;
        let integrated = (0..=n_max)
            .map(|i| {
                Scatter2D::new(
                    &format!("/LL_JetRates/integ_log10_y_{}", i + 2),
                    bins,
                    left_edge,
                    right_edge,
                )
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            reference,
            left_edge,
            differential,
            integrated,
            num_events: 0,
            finalized: false,
        })
    }

    /// Returns the reference scale of the clustering.
    pub const fn reference(&self) -> ClusterReference {
        self.reference
    }

    /// Returns the histograms of $\log_{10} y_{n,n+1}$.
    pub fn differential(&self) -> &[Histo1D] {
        &self.differential
    }

    /// Returns the integrated $n$-jet rates.
    pub fn integrated(&self) -> &[Scatter2D] {
        &self.integrated
    }

    /// Returns the number of analyzed events.
    pub const fn num_events(&self) -> usize {
        self.num_events
    }

    /// Clusters the outgoing particles of `event` and returns the splitting scales in ascending
    /// order.
    pub fn cluster(&self, event: &[Particle]) -> Result<Vec<f64>> {
        let q2 = self.reference.q2(event)?;
        let momenta = event[INCOMING..].iter().map(|particle| particle.mom).collect();

        Ok(cluster_momenta(momenta, q2))
    }

    /// Adds `event` with `weight` to the histograms. Fails once the analysis is finalized.
    pub fn analyze(&mut self, event: &[Particle], weight: f64) -> Result<()> {
        if self.finalized {
            return Err(Error::Finalized);
        }

        let scales = self.cluster(event)?;
        self.num_events += 1;

        // events with too few scales go into the underflow
        let underflow = self.left_edge - 1.0;
        let log_y = |j: usize| {
            scales
                .len()
                .checked_sub(j + 1)
                .map_or(underflow, |index| scales[index].log10())
        };

        for (j, histo) in self.differential.iter_mut().enumerate() {
            histo.fill(log_y(j), weight);
        }

        let mut previous = 1e20;
        let (last, rates) = match self.integrated.split_last_mut() {
            Some(split) => split,
            None => return Ok(()),
        };

        for (j, rate) in rates.iter_mut().enumerate() {
            let current = log_y(j);

            for point in rate.points_mut() {
                if current < point.x && point.x < previous {
                    point.y += weight;
                }
            }

            previous = current;
        }

        for point in last.points_mut() {
            if point.x < previous {
                point.y += weight;
            }
        }

        Ok(())
    }

    /// Normalizes all histograms to the number of analyzed events. Calling it again has no effect.
    pub fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }

        if self.num_events == 0 {
            return Err(Error::NoEvents);
        }

        let factor = 1.0 / self.num_events as f64;
        self.differential
            .iter_mut()
            .for_each(|histo| histo.scale(factor));
        self.integrated
            .iter_mut()
            .for_each(|scatter| scatter.scale(factor));
        self.finalized = true;

        info!("finalized jet rates of {} events", self.num_events);

        Ok(())
    }

    /// Writes all histograms and scatters to `writer`, separated by blank lines.
    pub fn write_yoda<W: Write>(&self, writer: &mut W) -> Result<()> {
        let blocks: Vec<String> = self
            .differential
            .iter()
            .map(ToString::to_string)
            .chain(self.integrated.iter().map(ToString::to_string))
            .collect();

        write!(writer, "{}", blocks.join("\n"))?;
        writer.flush()?;

        Ok(())
    }

    /// Finalizes the analysis and writes it to the file at `path`.
    pub fn write_to_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.finalize()?;

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_yoda(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn three_jet_event() -> Vec<Particle> {
        let e = 45.6;
        // massless gluon with energy 10, the antiquark balances the event
        let e_g: f64 = 10.0;
        let pz_g = (1021.44 - 102.4 * e_g) / 80.0;
        let py_g = (e_g * e_g - pz_g * pz_g).sqrt();

        vec![
            Particle::colorless(11, Vec4::new(e, 0.0, 0.0, e)),
            Particle::colorless(-11, Vec4::new(e, 0.0, 0.0, -e)),
            Particle::new(1, Vec4::new(40.0, 0.0, 0.0, 40.0), [1, 0]),
            Particle::new(-1, Vec4::new(51.2 - e_g, 0.0, -py_g, -40.0 - pz_g), [0, 2]),
            Particle::new(21, Vec4::new(e_g, 0.0, py_g, pz_g), [2, 1]),
        ]
    }

    #[test]
    fn reference_from_str() {
        assert_eq!(
            "incoming".parse::<ClusterReference>().unwrap(),
            ClusterReference::Incoming
        );
        assert_eq!(
            "outgoing".parse::<ClusterReference>().unwrap(),
            ClusterReference::Outgoing
        );
        assert_eq!(
            "8317.44".parse::<ClusterReference>().unwrap(),
            ClusterReference::Fixed(8317.44)
        );
        assert!(matches!(
            "beam".parse::<ClusterReference>(),
            Err(Error::UnknownClusterReference(ref name)) if name == "beam"
        ));
        assert_eq!(ClusterReference::default(), ClusterReference::Incoming);
    }

    #[test]
    fn distance_measure() {
        let p_i = Vec4::new(10.0, 0.0, 0.0, 10.0);
        let p_j = Vec4::new(5.0, 0.0, 5.0, 0.0);

        // perpendicular momenta: 2 * 25 * 1 / 100
        assert_approx_eq!(y_ij(&p_i, &p_j, 100.0), 0.5, 1e-15);
        // back to back
        assert_approx_eq!(y_ij(&p_i, &-p_i, 100.0), 4.0, 1e-15);
        assert_approx_eq!(y_ij(&p_i, &p_i, 100.0), 0.0, 1e-15);
    }

    #[test]
    fn cluster_three_partons() {
        let analysis = Analysis::new(ClusterReference::Incoming).unwrap();
        let event = three_jet_event();
        let scales = analysis.cluster(&event).unwrap();

        assert_eq!(scales.len(), 1);
        // the gluon is closest to the quark
        let q2 = 91.2 * 91.2;
        assert_approx_eq!(scales[0], y_ij(&event[2].mom, &event[4].mom, q2), 1e-12);
        assert!(event[3].mom.m2().abs() < 1e-9);

        let two = &event[..4];
        assert!(analysis.cluster(two).unwrap().is_empty());
        assert!(matches!(
            analysis.cluster(&event[..1]),
            Err(Error::MalformedEvent(1))
        ));
    }

    #[test]
    fn outgoing_reference_uses_the_final_state() {
        let event = three_jet_event();

        assert_approx_eq!(
            ClusterReference::Outgoing.q2(&event).unwrap(),
            91.2 * 91.2,
            1e-9
        );
        assert_eq!(ClusterReference::Fixed(2.0).q2(&event).unwrap(), 2.0);
    }

    #[test]
    fn rates_of_a_three_jet_event() {
        let mut analysis = Analysis::new(ClusterReference::Incoming).unwrap();
        let event = three_jet_event();
        let y23 = analysis.cluster(&event).unwrap()[0].log10();

        analysis.analyze(&event, 2.0).unwrap();
        analysis.analyze(&event[..4], 2.0).unwrap();
        analysis.finalize().unwrap();
        // finalizing twice does not scale twice
        analysis.finalize().unwrap();

        let histos = analysis.differential();
        assert_eq!(histos.len(), 4);
        assert_eq!(histos[0].path(), "/LL_JetRates/log10_y_23");
        assert_eq!(histos[3].path(), "/LL_JetRates/log10_y_56");
        assert_approx_eq!(histos[0].total().sumw(), 2.0, 1e-15);
        assert_approx_eq!(histos[0].underflow().sumw(), 1.0, 1e-15);
        assert_approx_eq!(histos[1].underflow().sumw(), 2.0, 1e-15);

        let scatters = analysis.integrated();
        assert_eq!(scatters.len(), 5);
        assert_eq!(scatters[4].path(), "/LL_JetRates/integ_log10_y_6");

        for point in scatters[0].points() {
            // the two-jet event is a two-jet event everywhere, the other one above y23
            let expected = if point.x > y23 { 2.0 } else { 1.0 };
            assert_approx_eq!(point.y, expected, 1e-15);
        }

        for point in scatters[1].points() {
            let expected = if point.x < y23 { 1.0 } else { 0.0 };
            assert_approx_eq!(point.y, expected, 1e-15);
        }
    }

    #[test]
    fn finalized_analysis_rejects_events() {
        let mut analysis = Analysis::new(ClusterReference::Incoming).unwrap();
        let event = three_jet_event();

        analysis.analyze(&event[..4], 1.0).unwrap();
        analysis.finalize().unwrap();

        assert!(matches!(
            analysis.analyze(&event[..4], 1.0),
            Err(Error::Finalized)
        ));
        assert_eq!(analysis.num_events(), 1);
        assert_eq!(analysis.differential()[0].underflow().sumw(), 1.0);
    }

    #[test]
    fn finalize_requires_events() {
        let mut analysis = Analysis::new(ClusterReference::Incoming).unwrap();

        assert!(matches!(analysis.finalize(), Err(Error::NoEvents)));
    }
}
