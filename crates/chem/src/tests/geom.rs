use approx::assert_abs_diff_eq;

use super::water;
use crate::*;

#[test]
fn com() {
    let mol = water();
    let got = mol.com();
    let want = Vec3::new(0.0, 0.0, 0.06556537818484597);
    assert_abs_diff_eq!(got, want, epsilon = 1e-12);
}

#[test]
fn center() {
    let mut mol = water();
    let old = mol.center();
    assert_abs_diff_eq!(old[2], 0.06556537818484597, epsilon = 1e-12);
    assert_abs_diff_eq!(mol.com(), Vec3::zeros(), epsilon = 1e-12);
    assert_abs_diff_eq!(mol.atoms[0].z, -0.06556537818484597, epsilon = 1e-12);

    // centering twice is a no-op
    let before = mol.clone();
    mol.center();
    assert_eq!(mol, before);
}

#[test]
fn from_slices() {
    let got = Molecule::from_slices(
        &[8, 1, 1],
        &[
            [0.0, 0.0, 0.0],
            [0.0, 0.756952, 0.585893],
            [0.0, -0.756952, 0.585893],
        ],
    );
    assert_eq!(got, water());
    assert_eq!(got.atomic_numbers(), vec![8, 1, 1]);
    assert_eq!(got.masses(), vec![15.999, 1.008, 1.008]);
}

#[test]
fn formula() {
    assert_eq!(water().formula(), "H2O");

    let ethanol = Molecule::from_slices(
        &[6, 6, 8, 1, 1, 1, 1, 1, 1],
        &[[0.0; 3]; 9],
    );
    assert_eq!(ethanol.formula(), "C2H6O");

    let hcn = Molecule::from_slices(&[1, 6, 7], &[[0.0; 3]; 3]);
    assert_eq!(hcn.formula(), "CHN");

    let chloromethane =
        Molecule::from_slices(&[17, 6, 1, 1, 1], &[[0.0; 3]; 5]);
    assert_eq!(chloromethane.formula(), "CH3Cl");

    let formamide = Molecule::from_slices(&[8, 6, 7, 1, 1, 1], &[[0.0; 3]; 6]);
    assert_eq!(formamide.formula(), "CH3NO");

    assert_eq!(Molecule::default().formula(), "");
}
