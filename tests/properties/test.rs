use sparse_tableau::{Axis, List, Mode, StorageFormat, Tableau};

use super::{sparse_list, values, T};

const FORMATS: [StorageFormat; 3] = [
    StorageFormat::RowOnly,
    StorageFormat::ColumnOnly,
    StorageFormat::RowAndColumn,
];

#[test]
fn add_is_pointwise_and_compact() {
    for seed in 0..32 {
        let left = sparse_list(seed, 64);
        let right = sparse_list(seed + 1000, 64);

        let mut sum = left.clone();
        sum.add(&right);

        for i in 0..64 {
            assert_eq!(sum.at(i), left.at(i) + right.at(i));
        }
        assert!(sum.iter().all(|(_, value)| value != 0));
        assert!(sum.iter().zip(sum.iter().skip(1)).all(|((i, _), (j, _))| i < j));
    }
}

#[test]
fn add_scaled_inverse_cancels() {
    for seed in 0..32 {
        let list = sparse_list(seed, 128);
        let mut difference = list.clone();
        difference.add_scaled(&list, -1);

        assert!(difference.is_empty());
        assert_eq!(difference.mode(), Mode::Sparse);
    }
}

#[test]
fn dot_matches_pointwise_sum() {
    for seed in 0..32 {
        let left = sparse_list(seed, 48);
        let right = sparse_list(seed + 1000, 48);
        let expected = (0..48).map(|i| left.at(i) * right.at(i)).sum::<T>();

        let dense_left = left.to_dense(48);
        let dense_right = right.to_dense(48);
        assert_eq!(left.dot(&right), expected);
        assert_eq!(left.dot(&dense_right), expected);
        assert_eq!(dense_left.dot(&right), expected);
        assert_eq!(dense_left.dot(&dense_right), expected);
    }
}

#[test]
fn mul_matches_pointwise_product() {
    for seed in 0..32 {
        let left = sparse_list(seed, 48);
        let right = sparse_list(seed + 1000, 48);

        let mut sparse = left.clone();
        sparse.mul(&right);
        let mut mixed = left.to_dense(48);
        mixed.mul(&right);
        assert_eq!(mixed.to_dense(48), sparse.to_dense(48));
        assert_eq!(mixed.is_dense(), sparse.size() * 2 > 48);

        for i in 0..48 {
            assert_eq!(sparse.at(i), left.at(i) * right.at(i));
        }
    }
}

#[test]
fn promotion() {
    for seed in 0..32 {
        let sparse = sparse_list(seed, 40);
        let dense = sparse_list(seed + 1000, 40).to_dense(40);

        let mut into_dense = dense.clone();
        into_dense.add(&sparse);
        assert_eq!(into_dense.size(), 40);
        assert_eq!(into_dense.capacity(), 40);
        for i in 0..40 {
            assert_eq!(into_dense.at(i), dense.at(i) + sparse.at(i));
        }

        let mut promoted = sparse.clone();
        promoted.add(&dense);
        assert_eq!(promoted.mode(), Mode::Dense);

        let mut both_dense = sparse.to_dense(40);
        both_dense.add(&dense);
        assert_eq!(promoted, both_dense);
        assert_eq!(promoted, into_dense);
    }
}

#[test]
fn cross_is_outer_product() {
    for seed in 0..8 {
        let left = sparse_list(seed, 24);
        let right = sparse_list(seed + 1000, 20);

        for format in FORMATS {
            let tableau = left.cross_with_format(&right, 24, 20, format);
            for i in 0..24 {
                for j in 0..20 {
                    assert_eq!(tableau.at(i, j), left.at(i) * right.at(j));
                }
            }
        }

        let tableau = left.cross(&right, 24, 20);
        for i in 0..24 {
            for j in 0..20 {
                assert_eq!(tableau.row(i).unwrap().at(j), tableau.column(j).unwrap().at(i));
            }
        }
    }
}

#[test]
fn sparse_cross_restricts_cross() {
    for seed in 0..8 {
        let left = sparse_list(seed, 24);
        let right = sparse_list(seed + 1000, 20);
        let sparse = left.sparse_cross(&right);

        assert_eq!(sparse.nr_rows(), left.size());
        assert_eq!(sparse.nr_columns(), right.size());
        for slot in 0..sparse.nr_rows() {
            let i = sparse.row_index_of(slot);
            for j in 0..20 {
                assert_eq!(sparse.row(slot).unwrap().at(j), left.at(i) * right.at(j));
            }
        }
        for slot in 0..sparse.nr_columns() {
            let j = sparse.column_index_of(slot);
            for i in 0..24 {
                assert_eq!(sparse.column(slot).unwrap().at(i), left.at(i) * right.at(j));
            }
        }
    }
}

#[test]
fn add_sparse_equals_add_of_full_cross() {
    for seed in 0..8 {
        let base = sparse_list(seed, 24).cross(&sparse_list(seed + 1, 20), 24, 20);
        let left = sparse_list(seed + 2, 24);
        let right = sparse_list(seed + 3, 20);

        let mut with_sparse = base.clone();
        with_sparse.add_sparse(&left.sparse_cross(&right));
        let mut with_full = base.clone();
        with_full.add(&left.cross(&right, 24, 20));

        assert_eq!(with_sparse, with_full);
    }
}

#[test]
fn appended_lines_are_visible_in_both_views() {
    let mut tableau = Tableau::new(12, 10, StorageFormat::RowAndColumn);
    let mut expected = vec![vec![0; 10]; 12];

    for seed in 0..40 {
        let (axis, index) = if seed % 2 == 0 {
            (Axis::Row, (seed as usize * 7) % 12)
        } else {
            (Axis::Column, (seed as usize * 5) % 10)
        };
        match axis {
            Axis::Row => {
                let row = sparse_list(seed, 10);
                for j in 0..10 {
                    expected[index][j] = row.at(j);
                }
                tableau.append_row(index, row);
            },
            Axis::Column => {
                let column = sparse_list(seed, 12);
                for (i, expected_row) in expected.iter_mut().enumerate() {
                    expected_row[index] = column.at(i);
                }
                tableau.append_column(index, column);
            },
        }

        for i in 0..12 {
            for j in 0..10 {
                assert_eq!(tableau.row(i).unwrap().at(j), expected[i][j]);
                assert_eq!(tableau.column(j).unwrap().at(i), expected[i][j]);
            }
        }
    }
}

#[test]
fn single_view_append_matches_both_views() {
    for format in FORMATS {
        let mut tableau = Tableau::new(8, 6, format);
        let mut reference = Tableau::new(8, 6, StorageFormat::RowAndColumn);
        for seed in 0..16 {
            if seed % 3 == 0 {
                let column = (seed as usize) % 6;
                tableau.append_column(column, sparse_list(seed, 8));
                reference.append_column(column, sparse_list(seed, 8));
            } else {
                let row = (seed as usize) % 8;
                tableau.append_row(row, sparse_list(seed, 6));
                reference.append_row(row, sparse_list(seed, 6));
            }
        }

        assert_eq!(values(&tableau), values(&reference));
    }
}

#[test]
fn extra_column_round_trip() {
    for format in FORMATS {
        for seed in 0..8 {
            let rows = (0..10).map(|i| sparse_list(seed * 100 + i, 7)).collect();
            let original = Tableau::from_rows(7, rows, format);
            let mut tableau = original.clone();

            let extra = sparse_list(seed + 1000, 10);
            tableau.append_extra_column(extra.clone());
            assert_eq!(tableau.nr_columns(), 8);
            for i in 0..10 {
                assert_eq!(tableau.at(i, 7), extra.at(i));
            }

            let removed = tableau.remove_extra_column();
            assert_eq!(removed.is_some(), format.stores(Axis::Column));
            assert_eq!(tableau, original);
        }
    }
}

#[test]
fn reductions_agree_across_formats() {
    for seed in 0..8 {
        let rows = (0..10).map(|i| sparse_list(seed * 100 + i, 7)).collect::<Vec<_>>();
        let scale = sparse_list(seed + 1000, 10);
        let x = sparse_list(seed + 2000, 7);

        let expected_sum = (0..7)
            .map(|j| (0..10).map(|i| scale.at(i) * rows[i].at(j)).sum::<T>())
            .collect::<Vec<_>>();
        let expected_product = (0..10)
            .map(|i| (0..7).map(|j| rows[i].at(j) * x.at(j)).sum::<T>())
            .collect::<Vec<_>>();

        for format in FORMATS {
            let tableau = Tableau::from_rows(7, rows.clone(), format);

            let sum = tableau.sum_scaled_rows(&scale);
            assert_eq!(sum, List::from(expected_sum.clone()));

            match tableau.times(&x) {
                Ok(product) => assert_eq!(product, List::from(expected_product.clone())),
                Err(_) => assert_eq!(format, StorageFormat::ColumnOnly),
            }
        }
    }
}
