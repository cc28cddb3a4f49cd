use std::ops::{Add, AddAssign};

use approx::AbsDiffEq;

use crate::Vec3;

/// mass used for display and centering when an element is missing from
/// [mass]
pub const DEFAULT_MASS: f64 = 1.0;

/// covalent radius in Å used for elements missing from [covalent_radius]
pub const DEFAULT_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct Atom {
    pub atomic_number: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl AbsDiffEq for Atom {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < epsilon;
        self.atomic_number == other.atomic_number
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
    }
}

impl Add<Vec3> for Atom {
    type Output = Atom;

    fn add(self, rhs: Vec3) -> Self::Output {
        Atom {
            x: self.x + rhs[0],
            y: self.y + rhs[1],
            z: self.z + rhs[2],
            ..self
        }
    }
}

impl AddAssign<Vec3> for Atom {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs
    }
}

pub const NUMBER_TO_SYMBOL: [&str; 55] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe",
];

fn symbol_to_number(s: &str) -> Option<usize> {
    NUMBER_TO_SYMBOL.iter().skip(1).position(|&x| x == s).map(|i| i + 1)
}

pub(crate) fn titlecase(s: &str) -> String {
    let mut cs = s.chars();
    let Some(first) = cs.next() else {
        return String::new();
    };
    let mut ret = first.to_uppercase().to_string();
    for c in cs {
        ret.push_str(&c.to_lowercase().to_string());
    }
    ret
}

/// average atomic mass in amu for the elements found in the QM9S data set.
/// anything else is unknown, and unknown atoms cannot be mass-weighted
pub const fn mass(atomic_number: usize) -> Option<f64> {
    match atomic_number {
        1 => Some(1.008),
        6 => Some(12.011),
        7 => Some(14.007),
        8 => Some(15.999),
        9 => Some(18.998),
        16 => Some(32.065),
        17 => Some(35.453),
        _ => None,
    }
}

/// single-bond covalent radius in Å
pub const fn covalent_radius(atomic_number: usize) -> Option<f64> {
    match atomic_number {
        1 => Some(0.31),
        6 => Some(0.76),
        7 => Some(0.71),
        8 => Some(0.66),
        9 => Some(0.57),
        16 => Some(1.05),
        17 => Some(1.02),
        _ => None,
    }
}

/// element symbol for `atomic_number`, or "?" if it's outside of the table
pub fn symbol(atomic_number: usize) -> &'static str {
    match atomic_number {
        1..55 => NUMBER_TO_SYMBOL[atomic_number],
        _ => "?",
    }
}

impl Atom {
    pub fn new(atomic_number: usize, x: f64, y: f64, z: f64) -> Self {
        Self {
            atomic_number,
            x,
            y,
            z,
        }
    }

    /// panics if `atomic_symbol` is not a recognized element
    pub fn new_from_label(atomic_symbol: &str, x: f64, y: f64, z: f64) -> Self {
        let num = match symbol_to_number(atomic_symbol) {
            Some(s) => s,
            None => symbol_to_number(&titlecase(atomic_symbol)).unwrap_or_else(
                || panic!("failed to locate atomic symbol {atomic_symbol}"),
            ),
        };
        Self::new(num, x, y, z)
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        symbol(self.atomic_number)
    }

    pub fn coord(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// the tabulated mass of `self`, falling back on [DEFAULT_MASS]
    pub fn mass(&self) -> f64 {
        mass(self.atomic_number).unwrap_or(DEFAULT_MASS)
    }

    /// the tabulated covalent radius of `self`, falling back on
    /// [DEFAULT_RADIUS]
    pub fn radius(&self) -> f64 {
        covalent_radius(self.atomic_number).unwrap_or(DEFAULT_RADIUS)
    }

    /// Euclidean distance between `self` and `other`
    pub fn dist(&self, other: &Self) -> f64 {
        (self.coord() - other.coord()).norm()
    }
}
