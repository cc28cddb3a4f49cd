/// converts the square root of a mass-weighted Hessian eigenvalue in
/// eV/(Å²·amu) to a frequency in cm⁻¹
pub const WAVE: f64 = 521.470898;

/// the 6th-smallest eigenvalue magnitude, in eV/(Å²·amu), below which a
/// molecule is treated as linear
pub const LINEAR_THRESH: f64 = 1e-3;

/// largest atomic displacement below which a mode is left unnormalized
pub const NORM_EPS: f64 = 1e-10;

/// number of translational plus rotational modes of a linear molecule
pub(crate) const LINEAR_SKIP: usize = 5;

/// number of translational plus rotational modes of a nonlinear molecule
pub(crate) const NONLINEAR_SKIP: usize = 6;
