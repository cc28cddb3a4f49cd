use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn no_dipole() {
    let disp = Dmat::from_element(3, 3, 1.0);
    assert_eq!(ir_intensity(None, &disp), 0.0);
}

#[test]
fn identity() {
    let dipole = vec![Mat3::identity(); 2];
    let disp = Dmat::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 1.0, 2.0, 0.0]);
    // dμ = (2, 2, 0)
    assert_abs_diff_eq!(ir_intensity(Some(dipole.as_slice()), &disp), 8.0);
}

#[test]
fn off_diagonal() {
    let mut dd = Mat3::zeros();
    dd[(0, 1)] = 1.0;
    let disp = Dmat::from_row_slice(1, 3, &[0.0, 3.0, 0.0]);
    assert_abs_diff_eq!(ir_intensity(Some(&[dd][..]), &disp), 9.0);

    // the transposed derivative does not respond to y motion
    assert_eq!(ir_intensity(Some(&[dd.transpose()][..]), &disp), 0.0);
}

#[test]
fn water() {
    let mol = super::water();
    let got = Harmonic::default()
        .run(&water_hessian(), &mol.atomic_numbers())
        .unwrap();
    let dipole = vec![
        Mat3::from_diagonal_element(-0.6),
        Mat3::from_diagonal_element(0.3),
        Mat3::from_diagonal_element(0.3),
    ];
    let got: Vec<_> = got
        .modes
        .iter()
        .map(|m| ir_intensity(Some(dipole.as_slice()), &m.disp))
        .collect();
    let want = [0.2985949808823583, 0.28532571138218216, 0.13326367238464912];
    for (g, w) in got.iter().zip(want) {
        assert_abs_diff_eq!(*g, w, epsilon = 1e-8);
    }
}
