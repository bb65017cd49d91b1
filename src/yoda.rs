//! Reading and writing the plain-text format of the YODA histogramming library.
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Formats `value` like `printf("%.6e")`: six digits after the decimal point and an exponent
/// with sign and at least two digits.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    } else if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.6e}", value);

    match formatted.find('e') {
        Some(pos) => {
            let (mantissa, exponent) = formatted.split_at(pos);
            let exponent: i32 = exponent[1..].parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// The two kinds of objects written by this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Histograms, see [`crate::histograms::Histo1D`].
    Histo1D,
    /// Scatters, see [`crate::histograms::Scatter2D`].
    Scatter2D,
}

impl Kind {
    fn tag(self) -> &'static str {
        match self {
            Self::Histo1D => "YODA_HISTO1D",
            Self::Scatter2D => "YODA_SCATTER2D",
        }
    }
}

/// An object read back from a YODA file.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    /// Name of the object.
    pub path: String,
    /// Factor the object was scaled with; one if the file does not say.
    pub scaled_by: f64,
    /// The rows `[xlow, xhigh, sumw, sumw2]`. For scatters the window is reconstructed from the
    /// position and its errors, the value is stored in `sumw` and `sumw2` is zero.
    pub rows: Vec<[f64; 4]>,
}

impl Object {
    /// See [`deviations`].
    pub fn deviations(&self, reference: &Self) -> Result<Vec<f64>> {
        deviations(&self.rows, &reference.rows)
    }
}

fn parse_row(words: &[&str], kind: Kind, line: usize) -> Result<[f64; 4]> {
    let expected = match kind {
        Kind::Histo1D => 7,
        Kind::Scatter2D => 6,
    };

    if words.len() != expected {
        return Err(Error::Yoda {
            line,
            reason: format!("expected {} columns, found {}", expected, words.len()),
        });
    }

    let mut numbers = [0.0; 4];

    for (number, word) in numbers.iter_mut().zip(words) {
        *number = word.parse().map_err(|_| Error::Yoda {
            line,
            reason: format!("`{}` is not a number", word),
        })?;
    }

    Ok(match kind {
        Kind::Histo1D => numbers,
        Kind::Scatter2D => [
            numbers[0] - numbers[1],
            numbers[0] + numbers[2],
            numbers[3],
            0.0,
        ],
    })
}

/// Reads all objects of the given `kind` from `reader` in the order they appear. Objects of other
/// kinds are skipped.
pub fn read_objects<B: BufRead>(reader: B, kind: Kind) -> Result<Vec<Object>> {
    let mut objects = Vec::new();
    let mut current: Option<Object> = None;
    let mut skipping = false;
    let mut last_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        last_line = number;
        let words: Vec<_> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["#", "BEGIN", tag, path, ..] => {
                if current.is_some() || skipping {
                    return Err(Error::Yoda {
                        line: number,
                        reason: "nested BEGIN".to_string(),
                    });
                }

                if *tag == kind.tag() {
                    current = Some(Object {
                        path: (*path).to_string(),
                        scaled_by: 1.0,
                        rows: Vec::new(),
                    });
                } else {
                    skipping = true;
                }
            }
            ["#", "END", ..] => {
                if let Some(object) = current.take() {
                    objects.push(object);
                } else if skipping {
                    skipping = false;
                } else {
                    return Err(Error::Yoda {
                        line: number,
                        reason: "END without BEGIN".to_string(),
                    });
                }
            }
            _ if skipping => {}
            [first, ..] if first.starts_with('#') => {}
            [first, ..] => {
                let object = match current.as_mut() {
                    Some(object) => object,
                    None => {
                        return Err(Error::Yoda {
                            line: number,
                            reason: "content outside of an object".to_string(),
                        })
                    }
                };

                if let Some(value) = line.trim().strip_prefix("ScaledBy=") {
                    object.scaled_by = value.trim().parse().map_err(|_| Error::Yoda {
                        line: number,
                        reason: format!("invalid scale factor `{}`", value),
                    })?;
                } else if first.contains('=') {
                    // other annotations like `Path=` or `Type=`
                } else if ["Total", "Underflow", "Overflow"].contains(first) {
                    // summary bins are not part of the rows
                } else {
                    object.rows.push(parse_row(&words, kind, number)?);
                }
            }
        }
    }

    if current.is_some() || skipping {
        return Err(Error::Yoda {
            line: last_line,
            reason: "missing END".to_string(),
        });
    }

    Ok(objects)
}

/// Reads all objects of the given `kind` from the file at `path`.
pub fn read_path(path: impl AsRef<Path>, kind: Kind) -> Result<Vec<Object>> {
    read_objects(BufReader::new(File::open(path)?), kind)
}

/// Returns for every row of `rows` the difference of its `sumw` to the one of `reference`, in
/// units of the reference's uncertainty $\sqrt{\mathrm{sumw2}}$. Rows with an empty reference give
/// NaN.
pub fn deviations(rows: &[[f64; 4]], reference: &[[f64; 4]]) -> Result<Vec<f64>> {
    if rows.len() != reference.len() {
        return Err(Error::BinningMismatch {
            expected: reference.len(),
            found: rows.len(),
        });
    }

    Ok(rows
        .iter()
        .zip(reference)
        .map(|(row, reference)| {
            if reference[3] > 0.0 {
                (row[2] - reference[2]) / reference[3].sqrt()
            } else {
                f64::NAN
            }
        })
        .collect())
}
