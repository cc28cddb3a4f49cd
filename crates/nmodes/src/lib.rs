//! Harmonic normal modes from a Cartesian Hessian.
//!
//! The Hessian is mass-weighted, symmetrized, and diagonalized. The lowest
//! five (linear) or six (nonlinear) eigenpairs are treated as translations and
//! rotations and discarded, and the remaining eigenvectors are turned back
//! into Cartesian displacements scaled so the largest atomic displacement is
//! 1.

use consts::{LINEAR_SKIP, LINEAR_THRESH, NONLINEAR_SKIP, NORM_EPS, WAVE};
use log::debug;
use thiserror::Error;
use utils::linalg::symm_eigen_decomp;
use utils::*;

pub use intensity::*;

pub mod consts;
pub mod intensity;
pub mod utils;


pub type Mat3 = nalgebra::Matrix3<f64>;
pub type Dvec = nalgebra::DVector<f64>;
pub type Dmat = nalgebra::DMatrix<f64>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("empty Hessian")]
    Empty,

    #[error("Hessian is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Hessian of size {dim} does not match {natoms} atoms")]
    DimensionMismatch { dim: usize, natoms: usize },

    #[error("no atomic mass for atomic number {atomic_number} on atom {atom}")]
    UnknownAtom { atom: usize, atomic_number: usize },

    #[error("non-finite Hessian element {value} at ({row}, {col})")]
    NonFinite { row: usize, col: usize, value: f64 },
}

/// a single vibrational normal mode
#[derive(Clone, Debug, PartialEq)]
pub struct Mode {
    /// harmonic frequency in cm⁻¹. negative for imaginary modes
    pub freq: f64,

    /// N×3 Cartesian displacements, normalized to a maximum atomic
    /// displacement of 1
    pub disp: Dmat,
}

impl Mode {
    pub fn is_imaginary(&self) -> bool {
        self.freq < 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// every eigenvalue of the mass-weighted Hessian in ascending order,
    /// including the discarded rigid-body ones
    pub eigenvalues: Dvec,

    /// whether the molecule was classified as linear
    pub linear: bool,

    /// the retained modes in ascending order of eigenvalue
    pub modes: Vec<Mode>,
}

impl Output {
    /// the number of discarded translational and rotational modes
    pub fn nskip(&self) -> usize {
        self.eigenvalues.len() - self.modes.len()
    }
}

/// settings for the normal mode analysis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Harmonic {
    /// eigenvalue to cm⁻¹ conversion factor
    pub wave: f64,

    /// threshold for the linearity check in [Harmonic::is_linear]
    pub linear_thresh: f64,
}

impl Default for Harmonic {
    fn default() -> Self {
        Self {
            wave: WAVE,
            linear_thresh: LINEAR_THRESH,
        }
    }
}

impl Harmonic {
    /// look up the square root of the mass of each atom in `atomic_numbers`
    pub fn sqrt_masses(atomic_numbers: &[usize]) -> Result<Vec<f64>, Error> {
        atomic_numbers
            .iter()
            .enumerate()
            .map(|(atom, &atomic_number)| {
                chem::mass(atomic_number).map(f64::sqrt).ok_or(
                    Error::UnknownAtom {
                        atom,
                        atomic_number,
                    },
                )
            })
            .collect()
    }

    /// check that `fc2` is a finite 3N×3N matrix for `natoms` atoms
    pub fn check_dims(fc2: &Dmat, natoms: usize) -> Result<(), Error> {
        let (rows, cols) = fc2.shape();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        if natoms == 0 {
            return Err(Error::Empty);
        }
        if rows != 3 * natoms {
            return Err(Error::DimensionMismatch { dim: rows, natoms });
        }
        for row in 0..rows {
            for col in 0..cols {
                let value = fc2[(row, col)];
                if !value.is_finite() {
                    return Err(Error::NonFinite { row, col, value });
                }
            }
        }
        Ok(())
    }

    /// formation of the secular equation. divide each element of `fx` by the
    /// square roots of the masses of the atoms it couples, taken from the
    /// per-atom `sqm`, and symmetrize the result to remove any numerical noise
    /// in the input
    pub fn form_sec(&self, mut fx: Dmat, sqm: &[f64]) -> Dmat {
        let (n3n, _) = fx.shape();
        for i in 0..n3n {
            let ii = i / 3;
            for j in 0..n3n {
                let jj = j / 3;
                fx[(i, j)] /= sqm[ii] * sqm[jj];
            }
        }
        symmetrize(fx)
    }

    /// decide whether a molecule of `natoms` atoms with mass-weighted Hessian
    /// eigenvalues `vals` is linear. molecules with one or two atoms always
    /// are. otherwise the molecule is linear if there are fewer than six
    /// eigenvalues or if the sixth-smallest eigenvalue magnitude is below
    /// `self.linear_thresh`
    pub fn is_linear(&self, natoms: usize, vals: &Dvec) -> bool {
        if natoms <= 2 {
            return true;
        }
        match nth_smallest_abs(vals, NONLINEAR_SKIP - 1) {
            Some(v) => v < self.linear_thresh,
            None => true,
        }
    }

    /// run the normal mode analysis on the Cartesian Hessian `fc2`, in
    /// eV/Å², for the atoms in `atomic_numbers`
    pub fn run(
        &self,
        fc2: &Dmat,
        atomic_numbers: &[usize],
    ) -> Result<Output, Error> {
        let natoms = atomic_numbers.len();
        Self::check_dims(fc2, natoms)?;
        let sqm = Self::sqrt_masses(atomic_numbers)?;

        let fxm = self.form_sec(fc2.clone(), &sqm);
        let (vals, lxm) = symm_eigen_decomp(fxm);
        let freqs = to_wavenumbers(&vals, self.wave);

        let linear = self.is_linear(natoms, &vals);
        let nskip = if linear { LINEAR_SKIP } else { NONLINEAR_SKIP };
        debug!(
            "{natoms} atoms, linear = {linear}, skipping {nskip} of {} modes",
            vals.len()
        );

        let modes = freqs
            .iter()
            .zip(lxm.column_iter())
            .skip(nskip)
            .map(|(&freq, col)| {
                let mut disp = make_disps(col, &sqm);
                normalize(&mut disp, NORM_EPS);
                Mode { freq, disp }
            })
            .collect();

        Ok(Output {
            eigenvalues: vals,
            linear,
            modes,
        })
    }
}
