use crate::Molecule;
use approx::AbsDiffEq;

/// A Molecule is AbsDiffEq if each of its Atoms is
impl AbsDiffEq for Molecule {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    /// compare molecules for equality, irrespective of order. try to find an
    /// atom in other that equals the current atom in self. If found, remove
    /// it, so it can't be double-counted.
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let mut theirs = other.atoms.clone();
        if self.atoms.len() != theirs.len() {
            return false;
        }
        for atom in &self.atoms {
            match theirs.iter().position(|b| atom.abs_diff_eq(b, epsilon)) {
                Some(i) => {
                    theirs.remove(i);
                }
                None => return false,
            }
        }
        true
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}
