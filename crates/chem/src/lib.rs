use std::collections::BTreeMap;

pub use atom::*;
pub use bonds::*;


pub mod atom;
pub mod bonds;
mod mol_traits;

use nalgebra as na;

pub type Vec3 = na::Vector3<f64>;

#[macro_export]
macro_rules! molecule {
    ($($num:ident $x:literal $y:literal $z:literal)+) => {
	$crate::Molecule::new(vec![
	    $($crate::Atom::new_from_label(stringify!($num), $x, $y, $z),)*
	    ])
    };
}

#[derive(Clone, Debug, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// build a `Molecule` from a slice of atomic numbers and a slice of
    /// positions. the two slices are zipped, so any excess entries in the
    /// longer one are dropped
    pub fn from_slices(atomic_numbers: &[usize], coords: &[[f64; 3]]) -> Self {
        let atoms = atomic_numbers
            .iter()
            .zip(coords)
            .map(|(&n, &[x, y, z])| Atom::new(n, x, y, z))
            .collect();
        Self { atoms }
    }

    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }

    /// return the atomic numbers of each atom as a vector
    pub fn atomic_numbers(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.atomic_number).collect()
    }

    /// return the mass of each atom, using [DEFAULT_MASS] for any atom missing
    /// from the mass table
    pub fn masses(&self) -> Vec<f64> {
        self.atoms.iter().map(Atom::mass).collect()
    }

    /// compute the mass-weighted center of `self`
    pub fn com(&self) -> Vec3 {
        let mut sum = 0.0;
        let mut com = Vec3::zeros();
        for atom in &self.atoms {
            let w = atom.mass();
            sum += w;
            com += w * atom.coord();
        }
        if sum == 0.0 {
            return com;
        }
        com / sum
    }

    /// translate each of the atoms in `self` by vec
    pub fn translate(&mut self, vec: Vec3) -> &mut Self {
        for atom in self.atoms.iter_mut() {
            *atom += vec;
        }
        self
    }

    /// move the center of mass of `self` to the origin, returning the old
    /// center of mass
    pub fn center(&mut self) -> Vec3 {
        let com = self.com();
        self.translate(-com);
        com
    }

    /// the molecular formula of `self` with carbon and hydrogen first and the
    /// remaining elements in alphabetical order, omitting counts of 1. atoms
    /// without a known symbol are counted as "?"
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.label()).or_default() += 1;
        }
        let mut ret = String::new();
        let mut push = |sym: &str, n: usize| {
            ret.push_str(sym);
            if n > 1 {
                ret.push_str(&n.to_string());
            }
        };
        for sym in ["C", "H"] {
            if let Some(n) = counts.remove(sym) {
                push(sym, n);
            }
        }
        for (sym, n) in counts {
            push(sym, n);
        }
        ret
    }
}
