//! # Gauss-Jordan elimination
//!
//! Solving small linear systems by pivoting a tableau with outer products, the way a simplex
//! implementation updates its tableau after choosing a pivot.
use sparse_tableau::{List, SparseTableau, StorageFormat, Tableau};


type T = f64;

/// Tableau for the augmented system `[A | b]`.
fn augmented(a: &[Vec<T>], b: &[T], format: StorageFormat) -> Tableau<T> {
    let nr_columns = a[0].len() + 1;
    let rows = a.iter()
        .zip(b)
        .map(|(row, &rhs)| {
            row.iter()
                .chain(std::iter::once(&rhs))
                .copied()
                .enumerate()
                .filter(|&(_, value)| value != 0.0)
                .collect::<List<T>>()
        })
        .collect();

    Tableau::from_rows(nr_columns, rows, format)
}

/// Row with the largest absolute value in `column`, among the rows not yet pivoted on.
fn choose_pivot_row(tableau: &Tableau<T>, column: usize, pivoted: &[bool]) -> usize {
    let candidates = tableau.column(column).unwrap()
        .map_indexed(|row, value| if pivoted[row] { 0.0 } else { value });
    let (row, value) = candidates.reduce(List::max_abs_reduce, (usize::MAX, 0.0));
    assert!(value.abs() > 1e-12, "singular system");

    row
}

/// Eliminate `column` from every row but `row`, and normalize `row`.
///
/// The update is the outer product `-(column / pivot) ⊗ row`, added either as a full tableau or as
/// a sparse tableau.
fn pivot(tableau: &mut Tableau<T>, row: usize, column: usize, sparse: bool) {
    let pivot_row = tableau.row(row).unwrap().clone();
    let pivot_column = tableau.column(column).unwrap().clone();
    let pivot_value = pivot_row.at(column);

    let factors = pivot_column.scaled(-1.0 / pivot_value);
    if sparse {
        let update: SparseTableau<T> = factors.sparse_cross(&pivot_row);
        tableau.add_sparse(&update);
    } else {
        let update = factors.cross(&pivot_row, tableau.nr_rows(), tableau.nr_columns());
        tableau.add(&update);
    }

    tableau.append_row(row, pivot_row.scaled(1.0 / pivot_value));
}

/// Solve `Ax = b` for a nonsingular `A`.
fn solve(a: &[Vec<T>], b: &[T], sparse: bool) -> (Tableau<T>, Vec<T>) {
    let n = a.len();
    let mut tableau = augmented(a, b, StorageFormat::RowAndColumn);
    let mut pivoted = vec![false; n];
    let mut pivot_rows = Vec::with_capacity(n);

    for column in 0..n {
        let row = choose_pivot_row(&tableau, column, &pivoted);
        pivot(&mut tableau, row, column, sparse);
        pivoted[row] = true;
        pivot_rows.push(row);
    }

    let solution = pivot_rows.into_iter().map(|row| tableau.at(row, n)).collect();
    (tableau, solution)
}

/// Both views hold exactly the same values.
fn assert_views_agree(tableau: &Tableau<T>) {
    for i in 0..tableau.nr_rows() {
        for j in 0..tableau.nr_columns() {
            assert_eq!(tableau.row(i).unwrap().at(j), tableau.column(j).unwrap().at(i));
        }
    }
}
