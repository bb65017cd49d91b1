//! This module contains everything related to histograms.
//!
//! The histograms follow the conventions of YODA: every bin accumulates the sum of weights, the
//! sum of squared weights and the first and second moments of the filled values, and a histogram
//! additionally keeps track of the underflow, the overflow and the total.
use crate::core::estimators::MeanVar;
use crate::error::{Error, Result};
use crate::yoda::{self, format_sci};
use std::fmt::{self, Display};

/// A single bin of a [`Histo1D`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bin1D {
    xmin: f64,
    xmax: f64,
    sumw: f64,
    sumw2: f64,
    sumwx: f64,
    sumwx2: f64,
    entries: usize,
}

impl Bin1D {
    /// Creates an empty bin for the interval `[xmin, xmax)`.
    pub const fn new(xmin: f64, xmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            sumw: 0.0,
            sumw2: 0.0,
            sumwx: 0.0,
            sumwx2: 0.0,
            entries: 0,
        }
    }

    /// Returns the lower edge.
    pub const fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Returns the upper edge.
    pub const fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Returns the sum of weights.
    pub const fn sumw(&self) -> f64 {
        self.sumw
    }

    /// Returns the sum of squared weights.
    pub const fn sumw2(&self) -> f64 {
        self.sumw2
    }

    /// Returns the sum of weights times values.
    pub const fn sumwx(&self) -> f64 {
        self.sumwx
    }

    /// Returns the sum of weights times squared values.
    pub const fn sumwx2(&self) -> f64 {
        self.sumwx2
    }

    /// Returns the number of fills.
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Adds the value `x` with weight `w`.
    pub fn fill(&mut self, x: f64, w: f64) {
        self.sumw += w;
        self.sumw2 += w * w;
        self.sumwx += w * x;
        self.sumwx2 += w * x * x;
        self.entries += 1;
    }

    /// Scales all weights by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.sumw *= factor;
        self.sumw2 *= factor * factor;
        self.sumwx *= factor;
        self.sumwx2 *= factor;
    }

    /// The content of this bin with its squared uncertainty.
    pub const fn estimate(&self) -> MeanVar<f64> {
        MeanVar::new(self.sumw, self.sumw2)
    }

    fn write_sums(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            format_sci(self.sumw),
            format_sci(self.sumw2),
            format_sci(self.sumwx),
            format_sci(self.sumwx2),
            self.entries
        )
    }

    fn write_tagged(&self, f: &mut fmt::Formatter<'_>, tag: &str) -> fmt::Result {
        write!(f, "{}\t{}\t", tag, tag)?;
        self.write_sums(f)?;
        writeln!(f)
    }
}

impl Display for Bin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t", format_sci(self.xmin), format_sci(self.xmax))?;
        self.write_sums(f)
    }
}

/// A one-dimensional histogram with equally wide bins.
#[derive(Clone, Debug, PartialEq)]
pub struct Histo1D {
    path: String,
    xmin: f64,
    xmax: f64,
    bins: Vec<Bin1D>,
    underflow: Bin1D,
    overflow: Bin1D,
    total: Bin1D,
    scaled_by: f64,
}

fn check_binning(bins: usize, xmin: f64, xmax: f64) -> Result<()> {
    if bins == 0 {
        return Err(Error::InvalidParameter {
            name: "bins",
            reason: "a histogram needs at least one bin".to_string(),
        });
    }

    if !(xmin.is_finite() && xmax.is_finite() && xmin < xmax) {
        return Err(Error::InvalidParameter {
            name: "xmin",
            reason: format!("empty or unbounded range [{}, {})", xmin, xmax),
        });
    }

    Ok(())
}

impl Histo1D {
    /// Creates a histogram with the name `path` and `bins` bins over `[xmin, xmax)`.
    pub fn new(path: &str, bins: usize, xmin: f64, xmax: f64) -> Result<Self> {
        check_binning(bins, xmin, xmax)?;

        let width = (xmax - xmin) / bins as f64;

        Ok(Self {
            path: path.to_string(),
            xmin,
            xmax,
            bins: (0..bins)
                .map(|i| Bin1D::new(xmin + i as f64 * width, xmin + (i + 1) as f64 * width))
                .collect(),
            underflow: Bin1D::new(f64::MIN, xmin),
            overflow: Bin1D::new(xmax, f64::MAX),
            total: Bin1D::new(f64::MIN, f64::MAX),
            scaled_by: 1.0,
        })
    }

    /// Returns the name of the histogram.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the regular bins.
    pub fn bins(&self) -> &[Bin1D] {
        &self.bins
    }

    /// Returns the bin collecting everything below the range.
    pub const fn underflow(&self) -> &Bin1D {
        &self.underflow
    }

    /// Returns the bin collecting everything at or above the upper edge.
    pub const fn overflow(&self) -> &Bin1D {
        &self.overflow
    }

    /// Returns the bin collecting every fill.
    pub const fn total(&self) -> &Bin1D {
        &self.total
    }

    /// Returns the product of all factors this histogram was scaled with.
    pub const fn scaled_by(&self) -> f64 {
        self.scaled_by
    }

    /// Fills the value `x` with weight `w` into the bin containing it.
    pub fn fill(&mut self, x: f64, w: f64) {
        self.total.fill(x, w);

        // NaN ends up in the underflow
        if !(x >= self.xmin) {
            self.underflow.fill(x, w);
        } else if x >= self.xmax {
            self.overflow.fill(x, w);
        } else {
            let n = self.bins.len();
            let index = ((x - self.xmin) / (self.xmax - self.xmin) * n as f64) as usize;
            self.bins[index.min(n - 1)].fill(x, w);
        }
    }

    /// Scales every bin by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.total.scale(factor);
        self.underflow.scale(factor);
        self.overflow.scale(factor);
        self.bins.iter_mut().for_each(|bin| bin.scale(factor));
        self.scaled_by *= factor;
    }

    /// Returns the rows `[xlow, xhigh, sumw, sumw2]` of the regular bins.
    pub fn rows(&self) -> Vec<[f64; 4]> {
        self.bins
            .iter()
            .map(|bin| [bin.xmin, bin.xmax, bin.sumw, bin.sumw2])
            .collect()
    }

    /// Returns for every bin the difference to `reference` in units of the reference's
    /// uncertainty. Bins whose reference is empty give NaN.
    pub fn deviations(&self, reference: &Self) -> Result<Vec<f64>> {
        yoda::deviations(&self.rows(), &reference.rows())
    }
}

impl Display for Histo1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# BEGIN YODA_HISTO1D {}", self.path)?;
        writeln!(f, "Path={}", self.path)?;
        writeln!(f, "ScaledBy={}", format_sci(self.scaled_by))?;
        writeln!(f, "Title=")?;
        writeln!(f, "Type=Histo1D")?;
        writeln!(f, "# ID\tID\tsumw\tsumw2\tsumwx\tsumwx2\tnumEntries")?;
        self.total.write_tagged(f, "Total")?;
        self.underflow.write_tagged(f, "Underflow")?;
        self.overflow.write_tagged(f, "Overflow")?;
        writeln!(f, "# xlow\txhigh\tsumw\tsumw2\tsumwx\tsumwx2\tnumEntries")?;

        for bin in &self.bins {
            writeln!(f, "{}", bin)?;
        }

        writeln!(f, "# END YODA_HISTO1D")
    }
}

/// A point of a [`Scatter2D`] with asymmetric errors.
#[derive(Clone, Debug, PartialEq)]
pub struct Point2D {
    /// Position.
    pub x: f64,
    /// Lower and upper error of the position.
    pub xerr: [f64; 2],
    /// Value.
    pub y: f64,
    /// Lower and upper error of the value.
    pub yerr: [f64; 2],
}

impl Point2D {
    /// Creates a point at the centre of `[xmin, xmax)` with zero value.
    pub fn new(xmin: f64, xmax: f64) -> Self {
        let half_width = 0.5 * (xmax - xmin);

        Self {
            x: 0.5 * (xmin + xmax),
            xerr: [half_width; 2],
            y: 0.0,
            yerr: [0.0; 2],
        }
    }

    /// Scales the value and its errors by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.y *= factor;
        self.yerr.iter_mut().for_each(|err| *err *= factor);
    }
}

impl Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            format_sci(self.x),
            format_sci(self.xerr[0]),
            format_sci(self.xerr[1]),
            format_sci(self.y),
            format_sci(self.yerr[0]),
            format_sci(self.yerr[1])
        )
    }
}

/// A set of points on equally wide windows.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter2D {
    path: String,
    points: Vec<Point2D>,
    scaled_by: f64,
}

impl Scatter2D {
    /// Creates `points` points with name `path` on `[xmin, xmax)`.
    pub fn new(path: &str, points: usize, xmin: f64, xmax: f64) -> Result<Self> {
        check_binning(points, xmin, xmax)?;

        let width = (xmax - xmin) / points as f64;

        Ok(Self {
            path: path.to_string(),
            points: (0..points)
                .map(|i| Point2D::new(xmin + i as f64 * width, xmin + (i + 1) as f64 * width))
                .collect(),
            scaled_by: 1.0,
        })
    }

    /// Returns the name of the scatter.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the points.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Returns the points for modification.
    pub fn points_mut(&mut self) -> &mut [Point2D] {
        &mut self.points
    }

    /// Returns the product of all factors this scatter was scaled with.
    pub const fn scaled_by(&self) -> f64 {
        self.scaled_by
    }

    /// Scales every point by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.points.iter_mut().for_each(|point| point.scale(factor));
        self.scaled_by *= factor;
    }
}

impl Display for Scatter2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# BEGIN YODA_SCATTER2D {}", self.path)?;
        writeln!(f, "Path={}", self.path)?;
        writeln!(f, "Title=")?;
        writeln!(f, "Type=Scatter2D")?;
        writeln!(f, "# xval\txerr-\txerr+\tyval\tyerr-\tyerr+")?;

        for point in &self.points {
            writeln!(f, "{}", point)?;
        }

        writeln!(f, "# END YODA_SCATTER2D")
    }
}
