//! Infrared intensities from atomic dipole derivatives.
//!
//! The intensity of a mode is taken as the squared norm of the dipole change
//! along its displacement,
//!
//! ```text
//! I = Σ_α ( Σ_i Σ_β ∂μ_α/∂R_iβ · X_iβ )²
//! ```
//!
//! where `X` is the normalized Cartesian displacement of the mode. This is
//! proportional to, not equal to, the absolute IR intensity: the
//! reduced-mass and frequency prefactors of the textbook expression are
//! omitted, and the max-norm-1 displacement is used in place of a normal
//! coordinate. Values are only meaningful relative to other modes.

use crate::{Dmat, Mat3};

/// Dipole derivatives for each atom. Entry `(α, β)` of the `i`th matrix is
/// ∂μ_α/∂R_iβ
pub type DipoleDerivs = Vec<Mat3>;

/// compute the approximate IR intensity of the mode with displacements
/// `disp`. with no dipole derivatives the intensity is exactly 0.0. extra rows
/// on either side are ignored
pub fn ir_intensity(dipole: Option<&[Mat3]>, disp: &Dmat) -> f64 {
    let Some(dipole) = dipole else {
        return 0.0;
    };
    let mut dmu = [0.0; 3];
    for (dd, x) in dipole.iter().zip(disp.row_iter()) {
        for (alpha, d) in dmu.iter_mut().enumerate() {
            for beta in 0..3 {
                *d += dd[(alpha, beta)] * x[beta];
            }
        }
    }
    dmu.iter().map(|d| d * d).sum()
}
