//! The JSON output for a single molecule and the manifest of every molecule
//! in a run

use chem::{Bond, Molecule};
use nmodes::{Mat3, ir_intensity};
use serde::{Deserialize, Serialize};

use crate::spectrum::Spectrum;

/// name of the manifest file written alongside the per-molecule files
pub const MANIFEST: &str = "index.json";

/// round `x` to `places` decimal places
pub fn round(x: f64, places: i32) -> f64 {
    let p = 10f64.powi(places);
    (x * p).round() / p
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomOut {
    pub element: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub mass: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeOut {
    pub index: usize,

    /// cm⁻¹, negative for imaginary modes
    pub frequency: f64,

    pub ir_intensity: f64,

    /// always 0.0
    pub raman_activity: f64,

    /// always empty
    pub symmetry: String,

    pub displacements: Vec<[f64; 3]>,
}

/// the full output record for one molecule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoleculeOut {
    pub name: String,
    pub formula: String,
    pub smiles: String,
    #[serde(rename = "atomCount")]
    pub atom_count: usize,
    pub atoms: Vec<AtomOut>,
    pub bonds: Vec<Bond>,
    pub modes: Vec<ModeOut>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub spectrum: Option<Spectrum>,
}

/// combines the geometry, normal modes, bonds, and spectrum of a molecule
/// into a [MoleculeOut]. modes with |frequency| below `freq_cutoff` are dropped
/// and the survivors renumbered from 0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assembler {
    pub freq_cutoff: f64,
}

impl Assembler {
    pub fn assemble(
        &self,
        name: &str,
        smiles: &str,
        mol: &Molecule,
        bonds: Vec<Bond>,
        harm: &nmodes::Output,
        dipole: Option<&[Mat3]>,
        spectrum: Option<Spectrum>,
    ) -> MoleculeOut {
        let atoms = mol
            .atoms
            .iter()
            .map(|a| AtomOut {
                element: a.label().to_owned(),
                x: round(a.x, 6),
                y: round(a.y, 6),
                z: round(a.z, 6),
                mass: a.mass(),
            })
            .collect();

        let modes = harm
            .modes
            .iter()
            .filter(|m| m.freq.abs() >= self.freq_cutoff)
            .enumerate()
            .map(|(index, m)| ModeOut {
                index,
                frequency: round(m.freq, 1),
                ir_intensity: round(ir_intensity(dipole, &m.disp), 4),
                raman_activity: 0.0,
                symmetry: String::new(),
                displacements: m
                    .disp
                    .row_iter()
                    .map(|r| [round(r[0], 6), round(r[1], 6), round(r[2], 6)])
                    .collect(),
            })
            .collect();

        MoleculeOut {
            name: name.to_owned(),
            formula: mol.formula(),
            smiles: smiles.to_owned(),
            atom_count: mol.natoms(),
            atoms,
            bonds,
            modes,
            spectrum,
        }
    }
}

/// turn an identifier like `hydrogen_cyanide` into `Hydrogen Cyanide`
pub fn display_name(id: &str) -> String {
    let mut ret = String::with_capacity(id.len());
    let mut prev_alpha = false;
    for c in id.chars() {
        let c = if c == '_' { ' ' } else { c };
        if prev_alpha {
            ret.extend(c.to_lowercase());
        } else {
            ret.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    ret
}

/// a summary of one molecule for the manifest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    pub formula: String,
    pub smiles: String,
    #[serde(rename = "atomCount")]
    pub atom_count: usize,
    #[serde(rename = "modeCount")]
    pub mode_count: usize,
}

impl ManifestEntry {
    pub fn new(id: &str, mol: &MoleculeOut) -> Self {
        Self {
            id: id.to_owned(),
            name: display_name(id),
            formula: mol.formula.clone(),
            smiles: mol.smiles.clone(),
            atom_count: mol.atom_count,
            mode_count: mol.modes.len(),
        }
    }
}

/// sort `entries` by atom count and then by display name
pub fn sort_manifest(entries: &mut [ManifestEntry]) {
    entries.sort_by(|a, b| {
        a.atom_count
            .cmp(&b.atom_count)
            .then_with(|| a.name.cmp(&b.name))
    });
}
