//! Loading and downsampling externally broadened spectra.
//!
//! The spectrum files hold one dense curve per molecule on a 1 cm⁻¹ grid.
//! Row 0 is a header, and data row `i` belongs to the molecule with 1-based
//! index `i`. The first column of every row is an index and is skipped.

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::Error;

/// first wavenumber of the broadened curves in cm⁻¹
pub const GRID_START: usize = 500;

/// last wavenumber of the broadened curves in cm⁻¹, inclusive
pub const GRID_END: usize = 4000;

/// default downsampling stride
pub const STRIDE: usize = 10;

/// a wavenumber grid `start..=end` in 1 cm⁻¹ steps, to be downsampled by
/// keeping every `stride`th point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub start: usize,
    pub end: usize,
    pub stride: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            start: GRID_START,
            end: GRID_END,
            stride: STRIDE,
        }
    }
}

impl Grid {
    /// the number of points on the full-resolution grid
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// the downsampled wavenumbers
    pub fn wavenumbers(&self) -> Vec<usize> {
        (self.start..=self.end).step_by(self.stride).collect()
    }

    /// downsample `curve`, which should have [Grid::len] points. longer
    /// curves are truncated and shorter ones padded with zeros first
    fn downsample(&self, curve: &[f64]) -> Vec<f64> {
        let n = self.len();
        curve
            .iter()
            .copied()
            .chain(std::iter::repeat(0.0))
            .take(n)
            .step_by(self.stride)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub wavenumbers: Vec<usize>,
    pub ir: Vec<f64>,
    pub raman: Vec<f64>,
}

impl Spectrum {
    /// downsample the optional IR and Raman curves onto `grid`. a missing
    /// curve is replaced with zeros, but if both are missing there is no
    /// spectrum at all
    pub fn new(
        grid: &Grid,
        ir: Option<&[f64]>,
        raman: Option<&[f64]>,
    ) -> Option<Self> {
        if ir.is_none() && raman.is_none() {
            return None;
        }
        let wavenumbers = grid.wavenumbers();
        let zeros = || vec![0.0; wavenumbers.len()];
        for (name, curve) in [("ir", ir), ("raman", raman)] {
            if let Some(c) = curve
                && c.len() != grid.len()
            {
                warn!(
                    "{name} curve has {} points, expected {}",
                    c.len(),
                    grid.len()
                );
            }
        }
        let ir = ir.map(|c| grid.downsample(c)).unwrap_or_else(zeros);
        let raman = raman.map(|c| grid.downsample(c)).unwrap_or_else(zeros);
        Some(Self {
            wavenumbers,
            ir,
            raman,
        })
    }
}

/// the broadened curves for a set of molecules, keyed by 1-based molecule
/// index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curves {
    curves: HashMap<usize, Vec<f64>>,
}

impl Curves {
    /// read the rows of the curve file at `path` belonging to the molecules in
    /// `wanted`. a missing file yields an empty set of curves, and a row that
    /// cannot be read or holds a value that is not a finite number is left
    /// out with a warning
    pub fn load<P: AsRef<Path>>(
        path: P,
        wanted: &BTreeSet<usize>,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("spectrum file {} not found", path.display());
            return Ok(Self::default());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| Error::csv(path, e))?;

        let Some(&last) = wanted.last() else {
            return Ok(Self::default());
        };
        let mut curves = HashMap::new();
        for (i, rec) in rdr.records().enumerate() {
            let index = i + 1;
            if index > last {
                break;
            }
            if !wanted.contains(&index) {
                continue;
            }
            let rec = match rec {
                Ok(rec) => rec,
                Err(e) if e.is_io_error() => return Err(Error::csv(path, e)),
                Err(e) => {
                    warn!("skipping curve {index} in {}: {e}", path.display());
                    continue;
                }
            };
            let curve = rec
                .iter()
                .skip(1)
                .filter(|s| !s.is_empty())
                .map(|s| match s.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(f),
                    _ => Err(s),
                })
                .collect::<Result<Vec<_>, _>>();
            match curve {
                Ok(curve) => {
                    curves.insert(index, curve);
                }
                Err(s) => {
                    let line =
                        rec.position().map_or(index + 1, |p| p.line() as usize);
                    warn!(
                        "skipping curve {index} in {}:{line}: \
                         invalid spectrum value {s:?}",
                        path.display()
                    );
                }
            }
        }
        debug!(
            "loaded {} of {} curves from {}",
            curves.len(),
            wanted.len(),
            path.display()
        );
        Ok(Self { curves })
    }

    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.curves.get(&index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
