//! Configuration settings for a vibescope run

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use chem::{BOND_TOLERANCE, BondParams, DOUBLE_MARGIN};
use nmodes::{
    Harmonic,
    consts::{LINEAR_THRESH, WAVE},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    spectrum::{GRID_END, GRID_START, Grid, STRIDE},
};

#[cfg(test)]
mod tests;

/// modes with a frequency magnitude below this value, in cm⁻¹, are dropped
/// from the output
pub const FREQ_CUTOFF: f64 = 10.0;

/// a single molecule to extract from the records
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// the 1-based index of the molecule in the source data set. used both to
    /// locate its record file and its row in the spectrum files
    pub index: usize,

    /// the identifier of the molecule, used as its output file name
    pub name: String,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// The directory or zip archive containing one CSV record per molecule.
    /// Records are matched to molecules by file name, either
    /// `<anything>_<index>.csv` or `<index>.csv`, falling back on a
    /// zero-padded `<index>.csv`.
    records: String,

    /// The directory to write the per-molecule JSON files and the index.json
    /// manifest to. It is created if it does not exist.
    output: String,

    /// An optional CSV file of pre-broadened IR spectra, one row per molecule
    /// after a header row.
    ir: Option<String>,

    /// An optional CSV file of pre-broadened Raman spectra in the same layout
    /// as `ir`.
    raman: Option<String>,

    /// The molecules to process, in order.
    molecules: Vec<Target>,

    /// Extra distance in Å added to the sum of covalent radii when deciding
    /// whether two atoms are bonded. Defaults to 0.45.
    bond_tolerance: Option<f64>,

    /// Distance in Å above a reference double-bond length still counted as a
    /// double bond. Defaults to 0.10.
    double_margin: Option<f64>,

    /// Threshold on the sixth-smallest eigenvalue magnitude below which a
    /// molecule is treated as linear. Defaults to 0.001.
    linear_thresh: Option<f64>,

    /// Conversion factor from mass-weighted Hessian eigenvalues to cm⁻¹.
    /// Defaults to 521.470898.
    wave: Option<f64>,

    /// Modes with |frequency| below this value in cm⁻¹ are dropped. Defaults
    /// to 10.
    freq_cutoff: Option<f64>,

    /// First wavenumber of the spectrum grid. Defaults to 500.
    grid_start: Option<usize>,

    /// Last wavenumber of the spectrum grid, inclusive. Defaults to 4000.
    grid_end: Option<usize>,

    /// Keep every `stride`th point of the spectrum grid. Defaults to 10.
    stride: Option<usize>,
}

/// Construct a full `Config` using [Config::load] on a TOML file or use
/// [Config::new] and the builder methods
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(from = "RawConfig")]
pub struct Config {
    /// directory or zip archive of per-molecule record files
    pub records: PathBuf,

    /// directory for the JSON output
    pub output: PathBuf,

    /// optional broadened IR curves
    pub ir: Option<PathBuf>,

    /// optional broadened Raman curves
    pub raman: Option<PathBuf>,

    pub molecules: Vec<Target>,

    pub bond_tolerance: f64,

    pub double_margin: f64,

    pub linear_thresh: f64,

    pub wave: f64,

    pub freq_cutoff: f64,

    pub grid_start: usize,

    pub grid_end: usize,

    pub stride: usize,
}

impl From<RawConfig> for Config {
    fn from(rc: RawConfig) -> Self {
        Self {
            records: rc.records.into(),
            output: rc.output.into(),
            ir: rc.ir.map(PathBuf::from),
            raman: rc.raman.map(PathBuf::from),
            molecules: rc.molecules,
            bond_tolerance: rc.bond_tolerance.unwrap_or(BOND_TOLERANCE),
            double_margin: rc.double_margin.unwrap_or(DOUBLE_MARGIN),
            linear_thresh: rc.linear_thresh.unwrap_or(LINEAR_THRESH),
            wave: rc.wave.unwrap_or(WAVE),
            freq_cutoff: rc.freq_cutoff.unwrap_or(FREQ_CUTOFF),
            grid_start: rc.grid_start.unwrap_or(GRID_START),
            grid_end: rc.grid_end.unwrap_or(GRID_END),
            stride: rc.stride.unwrap_or(STRIDE),
        }
    }
}

macro_rules! float_builders {
    ($($name: ident$(,)*)*) => {
        $(pub fn $name(mut self, x: f64) -> Self {
            self.$name = x;
            self
        })*
    }
}

impl Config {
    /// Construct a [Config] with no spectrum files and default values for
    /// every constant
    pub fn new(
        records: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        molecules: Vec<Target>,
    ) -> Self {
        Self {
            records: records.into(),
            output: output.into(),
            ir: None,
            raman: None,
            molecules,
            bond_tolerance: BOND_TOLERANCE,
            double_margin: DOUBLE_MARGIN,
            linear_thresh: LINEAR_THRESH,
            wave: WAVE,
            freq_cutoff: FREQ_CUTOFF,
            grid_start: GRID_START,
            grid_end: GRID_END,
            stride: STRIDE,
        }
    }

    pub fn ir(mut self, path: impl Into<PathBuf>) -> Self {
        self.ir = Some(path.into());
        self
    }

    pub fn raman(mut self, path: impl Into<PathBuf>) -> Self {
        self.raman = Some(path.into());
        self
    }

    float_builders!(
        bond_tolerance,
        double_margin,
        linear_thresh,
        wave,
        freq_cutoff
    );

    pub fn grid(mut self, start: usize, end: usize, stride: usize) -> Self {
        self.grid_start = start;
        self.grid_end = end;
        self.stride = stride;
        self
    }

    /// load a [Config] from the TOML file specified by `filename` and check
    /// that its settings make sense
    pub fn load<P>(filename: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = filename.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path, e))?;
        let ret: Self = toml::from_str(&contents).map_err(|e| Error::Toml {
            path: path.to_owned(),
            source: e,
        })?;

        ret.validate()?;

        Ok(ret)
    }

    /// check that the spectrum grid is well formed and that the molecule
    /// names are unique, since they become output file names
    pub fn validate(&self) -> Result<(), Error> {
        if self.stride == 0 {
            return Err(Error::Config("stride must be at least 1".to_owned()));
        }
        if self.grid_start > self.grid_end {
            return Err(Error::Config(format!(
                "grid_start ({}) is past grid_end ({})",
                self.grid_start, self.grid_end
            )));
        }
        for (i, m) in self.molecules.iter().enumerate() {
            if m.name.is_empty() {
                return Err(Error::Config(format!(
                    "molecule {} has an empty name",
                    m.index
                )));
            }
            if self.molecules[..i].iter().any(|n| n.name == m.name) {
                return Err(Error::Config(format!(
                    "duplicate molecule name {}",
                    m.name
                )));
            }
        }
        Ok(())
    }

    pub fn harmonic(&self) -> Harmonic {
        Harmonic {
            wave: self.wave,
            linear_thresh: self.linear_thresh,
        }
    }

    pub fn bond_params(&self) -> BondParams {
        BondParams {
            tolerance: self.bond_tolerance,
            double_margin: self.double_margin,
        }
    }

    pub fn spectrum_grid(&self) -> Grid {
        Grid {
            start: self.grid_start,
            end: self.grid_end,
            stride: self.stride,
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            records,
            output,
            ir,
            raman,
            molecules,
            bond_tolerance,
            double_margin,
            linear_thresh,
            wave,
            freq_cutoff,
            grid_start,
            grid_end,
            stride,
        } = self;
        let opt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        write!(
            f,
            "
Configuration Options:
records = {}
output = {}
ir = {}
raman = {}
bond_tolerance = {bond_tolerance}
double_margin = {double_margin}
linear_thresh = {linear_thresh}
wave = {wave}
freq_cutoff = {freq_cutoff}
grid = {grid_start}..={grid_end} step {stride}
",
            records.display(),
            output.display(),
            opt(ir),
            opt(raman),
        )?;
        writeln!(f, "molecules = [")?;
        for Target { index, name } in molecules {
            writeln!(f, "{index:>8} {name}")?;
        }
        writeln!(f, "]")
    }
}
