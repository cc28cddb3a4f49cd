//! Reader for the per-molecule CSV records.
//!
//! Every row starts with a row-index column, and empty cells are dropped
//! before a row is interpreted. After a header row, the layout is
//!
//! ```text
//! row, qm9s_index, qm9_index, SMILES, n_atoms
//! 9 rows of molecular properties (ignored)
//! N rows of geometry: row, Z, x, y, z
//! N rows of dipole derivatives: row, 9 values, α-major
//! N rows of polarizability derivatives (ignored)
//! 3N rows of the Cartesian Hessian: row, 3N values
//! ```

use std::{
    fs::{File, read_dir},
    io::Read,
    path::{Path, PathBuf},
};

use chem::Molecule;
use log::debug;
use nmodes::{Dmat, Mat3};
use zip::ZipArchive;

use crate::Error;

/// number of molecular property rows between the metadata and the geometry
const PROPERTY_ROWS: usize = 9;

/// index of the first geometry row, counting the header as row 0
const GEOM_START: usize = 2 + PROPERTY_ROWS;

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// the canonical SMILES string of the molecule
    pub smiles: String,

    pub atomic_numbers: Vec<usize>,

    /// Cartesian positions in Å
    pub coords: Vec<[f64; 3]>,

    /// dipole derivatives for each atom, if the record has them. entry
    /// `(α, β)` is ∂μ_α/∂R_iβ
    pub dipole: Option<Vec<Mat3>>,

    /// Cartesian Hessian in eV/Å²
    pub hessian: Dmat,
}

/// the non-empty cells of one row along with its line number
struct Row {
    line: usize,
    cells: Vec<String>,
}

struct Parser<'a> {
    path: &'a Path,
    rows: Vec<Row>,
}

impl Parser<'_> {
    fn err(&self, line: usize, msg: impl Into<String>) -> Error {
        Error::Parse {
            path: self.path.to_owned(),
            line,
            msg: msg.into(),
        }
    }

    fn row(&self, i: usize) -> Result<&Row, Error> {
        self.rows.get(i).ok_or_else(|| {
            let line = self.rows.last().map_or(0, |r| r.line);
            self.err(line, format!("unexpected end of record, wanted row {i}"))
        })
    }

    fn float(&self, row: &Row, s: &str) -> Result<f64, Error> {
        let f: f64 = s.parse().map_err(|e| {
            self.err(row.line, format!("invalid float {s:?}: {e}"))
        })?;
        if !f.is_finite() {
            return Err(self.err(row.line, format!("non-finite value {s:?}")));
        }
        Ok(f)
    }

    /// parse an integer that may be written as a float, like `3.0`
    fn int(&self, row: &Row, s: &str) -> Result<usize, Error> {
        let f = self.float(row, s)?;
        if f < 0.0 || f.fract() != 0.0 {
            return Err(self.err(row.line, format!("invalid integer {s:?}")));
        }
        Ok(f as usize)
    }

    /// the values following the row-index column of row `i`
    fn values(&self, i: usize) -> Result<Vec<f64>, Error> {
        let row = self.row(i)?;
        row.cells
            .iter()
            .skip(1)
            .map(|s| self.float(row, s))
            .collect()
    }

    fn parse(&self) -> Result<Record, Error> {
        let meta = self.row(1)?;
        if meta.cells.len() < 5 {
            return Err(self.err(
                meta.line,
                format!(
                    "metadata row has {} fields, expected 5",
                    meta.cells.len()
                ),
            ));
        }
        let smiles = meta.cells[3].clone();
        let natoms = self.int(meta, &meta.cells[4])?;
        // three blocks of N rows followed by the 3N Hessian rows
        let needed =
            natoms.checked_mul(6).and_then(|n| n.checked_add(GEOM_START));
        if needed.is_none_or(|n| n > self.rows.len()) {
            return Err(self.err(
                meta.line,
                format!(
                    "record claims {natoms} atoms but has only {} rows",
                    self.rows.len()
                ),
            ));
        }

        let mut atomic_numbers = Vec::with_capacity(natoms);
        let mut coords = Vec::with_capacity(natoms);
        for i in GEOM_START..GEOM_START + natoms {
            let row = self.row(i)?;
            if row.cells.len() < 5 {
                return Err(self.err(
                    row.line,
                    format!(
                        "geometry row has {} fields, expected 5",
                        row.cells.len()
                    ),
                ));
            }
            atomic_numbers.push(self.int(row, &row.cells[1])?);
            coords.push([
                self.float(row, &row.cells[2])?,
                self.float(row, &row.cells[3])?,
                self.float(row, &row.cells[4])?,
            ]);
        }

        let dd_start = GEOM_START + natoms;
        let mut dipole = Some(Vec::with_capacity(natoms));
        for i in dd_start..dd_start + natoms {
            let vals = self.values(i)?;
            if vals.len() < 9 {
                dipole = None;
            } else if let Some(d) = dipole.as_mut() {
                d.push(Mat3::from_row_slice(&vals[..9]));
            }
        }
        if dipole.is_none() {
            debug!("no dipole derivatives in {}", self.path.display());
        }

        let n3n = 3 * natoms;
        let hess_start = dd_start + 2 * natoms;
        let mut hessian = Dmat::zeros(n3n, n3n);
        for (r, i) in (hess_start..hess_start + n3n).enumerate() {
            let vals = self.values(i)?;
            if vals.len() != n3n {
                return Err(nmodes::Error::NotSquare {
                    rows: n3n,
                    cols: vals.len(),
                }
                .into());
            }
            hessian.row_mut(r).copy_from_slice(&vals);
        }

        Ok(Record {
            smiles,
            atomic_numbers,
            coords,
            dipole,
            hessian,
        })
    }
}

impl Record {
    /// read a [Record] from `rdr`, naming `path` in any error messages
    pub fn from_reader<R: Read>(rdr: R, path: &Path) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let mut rows = Vec::new();
        for (i, rec) in rdr.records().enumerate() {
            let rec = rec.map_err(|e| Error::csv(path, e))?;
            let line = rec.position().map_or(i + 1, |p| p.line() as usize);
            let cells = rec
                .iter()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
            rows.push(Row { line, cells });
        }
        Parser { path, rows }.parse()
    }

    /// load a [Record] from the CSV file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        Self::from_reader(f, path)
    }

    pub fn natoms(&self) -> usize {
        self.atomic_numbers.len()
    }

    /// the uncentered geometry of the record
    pub fn molecule(&self) -> Molecule {
        Molecule::from_slices(&self.atomic_numbers, &self.coords)
    }
}

/// the file name part of a `/`-separated path
fn file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// pick the record for the molecule with `index` out of the sorted `names`.
/// the first name whose file name is `<index>.csv` or that ends with
/// `_<index>.csv` wins. failing that, a file name like `007.csv` whose stem
/// parses to `index` is accepted
pub fn match_record(names: &[String], index: usize) -> Option<&str> {
    let exact = format!("{index}.csv");
    let suffix = format!("_{exact}");
    let mut names = names.iter().map(String::as_str);
    names
        .clone()
        .find(|name| file_name(name) == exact || name.ends_with(&suffix))
        .or_else(|| {
            names.find(|name| {
                file_name(name)
                    .strip_suffix(".csv")
                    .and_then(|stem| stem.parse::<usize>().ok())
                    == Some(index)
            })
        })
}

/// the collection of record files, either a directory or a zip archive like
/// the `qm9s_csv.zip` export
pub enum Records {
    Dir {
        path: PathBuf,
        names: Vec<String>,
    },
    Zip {
        path: PathBuf,
        names: Vec<String>,
        archive: ZipArchive<File>,
    },
}

impl Records {
    /// open the records at `path`. a directory is listed once up front, and
    /// anything else is opened as a zip archive
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let ret = if path.is_dir() {
            let mut names = Vec::new();
            for entry in read_dir(path).map_err(|e| Error::io(path, e))? {
                let entry = entry.map_err(|e| Error::io(path, e))?;
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
            names.sort();
            Self::Dir {
                path: path.to_owned(),
                names,
            }
        } else {
            let f = File::open(path).map_err(|e| Error::io(path, e))?;
            let archive =
                ZipArchive::new(f).map_err(|e| Error::zip(path, e))?;
            let mut names: Vec<_> =
                archive.file_names().map(str::to_owned).collect();
            names.sort();
            Self::Zip {
                path: path.to_owned(),
                names,
                archive,
            }
        };
        debug!("found {} record files in {}", ret.len(), path.display());
        Ok(ret)
    }

    pub fn path(&self) -> &Path {
        match self {
            Records::Dir { path, .. } | Records::Zip { path, .. } => path,
        }
    }

    fn names(&self) -> &[String] {
        match self {
            Records::Dir { names, .. } | Records::Zip { names, .. } => names,
        }
    }

    /// the number of entries, which may include files that are not records
    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// the path of the record for the molecule with `index`. for an archive
    /// this is the member name joined onto the archive path
    pub fn find(&self, index: usize) -> Result<PathBuf, Error> {
        match_record(self.names(), index)
            .map(|name| self.path().join(name))
            .ok_or_else(|| Error::NotFound {
                index,
                dir: self.path().to_owned(),
            })
    }

    /// locate and read the record for the molecule with `index`, returning
    /// its path along with it
    pub fn load(&mut self, index: usize) -> Result<(PathBuf, Record), Error> {
        let found = self.find(index)?;
        match self {
            Records::Dir { .. } => {
                let rec = Record::load(&found)?;
                Ok((found, rec))
            }
            Records::Zip {
                path,
                names,
                archive,
            } => {
                let Some(name) = match_record(names, index) else {
                    return Err(Error::NotFound {
                        index,
                        dir: path.clone(),
                    });
                };
                let member = archive
                    .by_name(name)
                    .map_err(|e| Error::zip(path.as_path(), e))?;
                let rec = Record::from_reader(member, &found)?;
                Ok((found, rec))
            }
        }
    }
}
