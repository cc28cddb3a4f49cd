use nalgebra::DVectorView;

use crate::{Dmat, Dvec};

pub mod linalg;

/// convert mass-weighted Hessian eigenvalues to wavenumbers using the factor
/// `wave`. negative eigenvalues become negative (imaginary) frequencies
pub fn to_wavenumbers(vals: &Dvec, wave: f64) -> Dvec {
    vals.map(|v| {
        if v < 0.0 {
            -wave * f64::sqrt(-v)
        } else {
            wave * f64::sqrt(v)
        }
    })
}

/// return `0.5 * (mat + matᵀ)`
pub fn symmetrize(mat: Dmat) -> Dmat {
    let t = mat.transpose();
    0.5 * (mat + t)
}

/// undo the mass weighting of the 3N-long eigenvector `lxm` by dividing each
/// component by the square root of its atom's mass in `sqm` and reshape it
/// into an N×3 matrix of Cartesian displacements
pub fn make_disps(lxm: DVectorView<f64>, sqm: &[f64]) -> Dmat {
    Dmat::from_fn(sqm.len(), 3, |i, k| lxm[3 * i + k] / sqm[i])
}

/// scale `disp` so that its largest per-atom (row) norm is exactly 1.0. if
/// every row norm is below `eps`, `disp` is left untouched. returns the
/// original largest norm
pub fn normalize(disp: &mut Dmat, eps: f64) -> f64 {
    let max = disp
        .row_iter()
        .map(|row| row.norm())
        .fold(0.0, f64::max);
    if max > eps {
        *disp /= max;
    }
    max
}

/// the `n`th smallest magnitude in `vals`, or None if there aren't that many
pub(crate) fn nth_smallest_abs(vals: &Dvec, n: usize) -> Option<f64> {
    let mut mags: Vec<f64> = vals.iter().map(|v| v.abs()).collect();
    mags.sort_by(f64::total_cmp);
    mags.get(n).copied()
}
