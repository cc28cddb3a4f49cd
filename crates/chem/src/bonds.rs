//! Distance-based bond inference. Two atoms are bonded when they sit closer
//! than the sum of their covalent radii plus a fixed tolerance, and a bond is
//! promoted to a double bond when it is within a small margin of the reference
//! double-bond length for its element pair.

use serde::{Deserialize, Serialize};

use crate::Molecule;

/// default slack in Å added to the sum of covalent radii. large enough to
/// admit ordinary single bonds but not van der Waals contacts
pub const BOND_TOLERANCE: f64 = 0.45;

/// default margin in Å above a reference double-bond length that still counts
/// as a double bond
pub const DOUBLE_MARGIN: f64 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: usize,
}

impl Bond {
    /// construct a [Bond], swapping `i` and `j` if needed so that
    /// `atom1 < atom2`
    pub fn new(i: usize, j: usize, order: usize) -> Self {
        let (atom1, atom2) = if i < j { (i, j) } else { (j, i) };
        Self {
            atom1,
            atom2,
            order,
        }
    }
}

/// tunable distances for [Molecule::bonds]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondParams {
    pub tolerance: f64,
    pub double_margin: f64,
}

impl Default for BondParams {
    fn default() -> Self {
        Self {
            tolerance: BOND_TOLERANCE,
            double_margin: DOUBLE_MARGIN,
        }
    }
}

/// reference double-bond length in Å for the unordered element pair `(z1,
/// z2)`. there are no triple-bond entries, so triple bonds are never inferred
pub const fn double_bond_length(z1: usize, z2: usize) -> Option<f64> {
    let (a, b) = if z1 <= z2 { (z1, z2) } else { (z2, z1) };
    match (a, b) {
        (6, 6) => Some(1.34),
        (6, 7) => Some(1.29),
        (6, 8) => Some(1.21),
        (7, 7) => Some(1.25),
        (7, 8) => Some(1.24),
        _ => None,
    }
}

/// estimate the order of a bond between elements `z1` and `z2` separated by
/// `dist`. pairs without a reference double-bond length are always single
pub fn bond_order(z1: usize, z2: usize, dist: f64, margin: f64) -> usize {
    match double_bond_length(z1, z2) {
        Some(double) if dist < double + margin => 2,
        _ => 1,
    }
}

impl Molecule {
    /// infer the bonds in `self` from interatomic distances. the result is
    /// ordered by `atom1` and then `atom2`
    pub fn bonds(&self, params: &BondParams) -> Vec<Bond> {
        let mut ret = Vec::new();
        for (i, a) in self.atoms.iter().enumerate() {
            for (j, b) in self.atoms.iter().enumerate().skip(i + 1) {
                let dist = a.dist(b);
                if dist < a.radius() + b.radius() + params.tolerance {
                    let order = bond_order(
                        a.atomic_number,
                        b.atomic_number,
                        dist,
                        params.double_margin,
                    );
                    ret.push(Bond::new(i, j, order));
                }
            }
        }
        ret
    }
}
