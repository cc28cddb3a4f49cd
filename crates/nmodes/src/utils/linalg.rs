use crate::Dmat;
use crate::Dvec;
use nalgebra::SymmetricEigen;

/// compute the eigen decomposition of the symmetric matrix `mat` and return
/// both the eigenvalues and the corresponding eigenvectors (as columns) sorted
/// in ascending order of eigenvalue
pub fn symm_eigen_decomp(mat: Dmat) -> (Dvec, Dmat) {
    let SymmetricEigen {
        eigenvectors: vecs,
        eigenvalues: vals,
    } = SymmetricEigen::new(mat);
    let mut order: Vec<usize> = (0..vals.len()).collect();
    order.sort_by(|&a, &b| vals[a].total_cmp(&vals[b]));
    (
        Dvec::from_iterator(order.len(), order.iter().map(|&i| vals[i])),
        vecs.select_columns(&order),
    )
}
