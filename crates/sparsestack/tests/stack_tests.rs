use ndarray::{array, Array1, Array2};
use sparsestack::{
    Axis, Coo, DType, DenseArray, DenseLayer, DenseRecords, Error, IndexKey, JoinType,
    LayerData, RangeFilter, Records, Scalar, StackedSparseMatrix,
};

/// 12x10 values `10 * i + j`, keeping only those equal to 2 mod 4.
fn dense_array_sparse() -> Array2<i64> {
    Array2::from_shape_fn((12, 10), |(i, j)| {
        let v = (i * 10 + j) as i64;
        if v % 4 == 2 {
            v
        } else {
            0
        }
    })
}

fn arange_12x10() -> Array2<i64> {
    Array2::from_shape_fn((12, 10), |(i, j)| (i * 10 + j) as i64)
}

fn coo_from_dense<T: sparsestack::Element>(dense: &Array2<T>) -> Coo<T, i64> {
    let mut row = Vec::new();
    let mut col = Vec::new();
    let mut data = Vec::new();
    for ((i, j), &v) in dense.indexed_iter() {
        if v.is_nonzero() {
            row.push(i as i64);
            col.push(j as i64);
            data.push(v);
        }
    }
    Coo::from_parts(dense.nrows(), dense.ncols(), row, col, data, true).unwrap()
}

fn example_5x6() -> StackedSparseMatrix {
    let mut matrix = StackedSparseMatrix::new(5, 6);
    let dense = dense_array_sparse();
    matrix
        .add_dense_layer(dense.slice(ndarray::s![..5, ..6]), "scoreA", JoinType::Left)
        .unwrap();
    matrix
}

/// Two int32 layers: scores1 from the fixture, scores2 = scores1 / 2 with
/// multiples of ten zeroed.
fn two_coo_layers(name1: &str, name2: &str) -> StackedSparseMatrix {
    let scores1 = dense_array_sparse().mapv(|v| v as i32);
    let scores2 = scores1.mapv(|v| if v % 10 == 0 { 0 } else { v / 2 });
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_coo_layer(&coo_from_dense(&scores1), name1, JoinType::Left)
        .unwrap();
    matrix
        .add_coo_layer(&coo_from_dense(&scores2), name2, JoinType::Left)
        .unwrap();
    matrix
}

#[test]
fn empty_matrix() {
    let matrix = StackedSparseMatrix::new(200, 100);
    assert_eq!(matrix.shape(), (200, 100, 0));
    assert!(matrix.layer_names().is_empty());
    assert_eq!(matrix.nnz(), 0);
}

#[test]
fn add_dense_array() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(arange_12x10().view(), "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (12, 10, 1));
    let expected: Vec<i64> = (1..120).collect();
    assert_eq!(matrix.layer_as::<i64>("test_score").unwrap(), expected.as_slice());
}

#[test]
fn add_dense_too_large_is_rejected() {
    let mut matrix = StackedSparseMatrix::new(2, 2);
    let err = matrix
        .add_dense_layer(arange_12x10().view(), "x", JoinType::Left)
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
    assert_eq!(matrix.shape(), (2, 2, 0));
}

#[test]
fn add_dense_vector_is_a_column() {
    let mut matrix = StackedSparseMatrix::new(3, 1);
    let v: Array1<f64> = array![0.5, 0.0, 2.0];
    matrix
        .add_dense_vector(v.view(), "score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.row(), &[0, 2]);
    assert_eq!(matrix.col(), &[0, 0]);
    assert_eq!(matrix.layer_as::<f64>("score").unwrap(), &[0.5, 2.0]);
}

#[test]
fn add_structured_dense_array() {
    let x: Array2<i64> = array![[1, 2], [2, 4]];
    let y: Array2<f64> = array![[1.5, 3.0], [2.3, 5.5]];

    // single column of each field
    let column = DenseRecords::new(vec![
        ("x", DenseLayer::from(x.slice(ndarray::s![.., ..1]).to_owned())),
        ("y", DenseLayer::from(y.slice(ndarray::s![.., ..1]).to_owned())),
    ])
    .unwrap();
    let mut matrix = StackedSparseMatrix::new(2, 1);
    matrix
        .add_dense_records(&column, "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (2, 1, 2));

    let records = DenseRecords::new(vec![
        ("x", DenseLayer::from(x)),
        ("y", DenseLayer::from(y.clone())),
    ])
    .unwrap();
    let mut matrix = StackedSparseMatrix::new(2, 2);
    matrix
        .add_dense_records(&records, "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (2, 2, 2));
    assert_eq!(matrix.layer_names(), &["test_score_x", "test_score_y"]);
    assert_eq!(matrix.to_array::<f64>(Some("test_score_y")).unwrap(), y);
}

#[test]
fn structured_dense_add_is_all_or_nothing() {
    let mut matrix = StackedSparseMatrix::new(2, 2);
    matrix
        .add_dense_layer(array![[1.0, 0.0], [0.0, 1.0]].view(), "a", JoinType::Left)
        .unwrap();
    matrix
        .add_dense_layer(array![[2.0, 0.0], [0.0, 2.0]].view(), "b", JoinType::Left)
        .unwrap();
    let before = matrix.clone();

    // second field clashes with the existing layer "b"
    let records = DenseRecords::new(vec![
        ("c", DenseLayer::from(array![[1_i32, 1], [1, 1]])),
        ("b", DenseLayer::from(array![[1_i32, 1], [1, 1]])),
    ])
    .unwrap();
    let err = matrix.add_dense_records(&records, "", JoinType::Outer).unwrap_err();
    assert_eq!(err, Error::DuplicateLayer("b".to_owned()));
    assert_eq!(matrix, before);
    assert_eq!(matrix.layer_names(), &["a", "b"]);
}

#[test]
fn add_all_zero_array() {
    let arr = array![[false, false], [false, false]];
    let mut matrix = StackedSparseMatrix::new(2, 2);
    matrix
        .add_dense_layer(arr.view(), "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (2, 2, 1));
    assert_eq!(matrix.nnz(), 0);
    assert_eq!(matrix.to_array::<bool>(None).unwrap(), arr);
}

#[test]
fn no_setter() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(arange_12x10().view(), "test_score", JoinType::Left)
        .unwrap();
    let err = matrix.set((1, 2), vec![5_i64]).unwrap_err();
    assert!(matches!(err, Error::NotSupported(_)));
}

#[test]
fn display_message() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(dense_array_sparse().view(), "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(
        matrix.to_string(),
        "<12x10x1 stacked sparse array containing scores for [\"test_score\"] \
         with 30 stored elements in COOrdinate format>"
    );
    assert_eq!(
        format!("{matrix:#}"),
        "StackedSparseArray array of shape (12, 10, 1) containing scores for [\"test_score\"]."
    );
}

#[test]
fn add_coo() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_coo_layer(&coo_from_dense(&dense_array_sparse()), "test_score", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (12, 10, 1));
    let expected: Vec<i64> = (2..120).step_by(4).collect();
    assert_eq!(matrix.layer_as::<i64>("test_score").unwrap(), expected.as_slice());

    let entries = matrix.get("test_score").unwrap().into_entries().unwrap();
    assert_eq!(entries.values().unwrap().as_slice::<i64>().unwrap(), expected.as_slice());
    assert_eq!(
        entries.row,
        vec![0, 0, 1, 1, 1, 2, 2, 3, 3, 3, 4, 4, 5, 5, 5, 6, 6, 7, 7, 7, 8, 8, 9, 9, 9, 10, 10, 11, 11, 11]
    );
    assert_eq!(&entries.col[..6], &[2, 6, 0, 4, 8, 2]);
}

#[test]
fn add_coo_twice_then_filter() {
    let matrix = two_coo_layers("scores1", "scores2");
    assert_eq!(matrix.shape(), (12, 10, 2));
    let expected: Vec<i32> = (2..120).step_by(4).collect();
    assert_eq!(matrix.layer_as::<i32>("scores1").unwrap(), expected.as_slice());
    assert_eq!(
        matrix.layer_as::<i32>("scores2").unwrap(),
        &[
            1, 3, 0, 7, 9, 11, 13, 0, 17, 19, 21, 23, 0, 27, 29, 31, 33, 0, 37, 39, 41, 43, 0, 47,
            49, 51, 53, 0, 57, 59
        ]
    );
    assert_eq!(matrix.layer("scores1").unwrap().dtype(), DType::I32);
    assert_eq!(matrix.layer("scores2").unwrap().dtype(), DType::I32);

    let filtered = matrix.filter_by_range(Some("scores2"), 0.0, 40.0).unwrap();
    assert_eq!(
        filtered.layer_as::<i32>("scores1").unwrap(),
        &[2, 6, 14, 18, 22, 26, 34, 38, 42, 46, 54, 58, 62, 66, 74, 78]
    );
    assert_eq!(
        filtered.layer_as::<i32>("scores2").unwrap(),
        &[1, 3, 7, 9, 11, 13, 17, 19, 21, 23, 27, 29, 31, 33, 37, 39]
    );
    // the source is untouched
    assert_eq!(matrix.nnz(), 30);

    let err = filtered.filter_by_range(None, f64::NEG_INFINITY, f64::INFINITY).unwrap_err();
    assert_eq!(err, Error::NameRequired);
    assert_eq!(err.to_string(), "Name of score is required.");
}

#[test]
fn equality() {
    let matrix = two_coo_layers("scores1", "scores2");
    assert_eq!(matrix, two_coo_layers("scores1", "scores2"));
    assert_ne!(matrix, two_coo_layers("scores1", "scores_2"));

    let mut changed = two_coo_layers("scores1", "scores2");
    changed
        .add_sparse_data(&[0_i64], &[2], vec![5_i32], "scores2", JoinType::Left)
        .unwrap_err();
    assert_eq!(matrix, changed);

    let mut smaller = StackedSparseMatrix::new(12, 10);
    smaller
        .add_coo_layer(&coo_from_dense(&dense_array_sparse().mapv(|v| v as i32)), "scores1", JoinType::Left)
        .unwrap();
    assert_ne!(matrix, smaller);
    assert_ne!(StackedSparseMatrix::new(12, 10), StackedSparseMatrix::new(10, 12));
}

#[test]
fn clones_share_until_changed() {
    let matrix = example_5x6();
    let mut copy = matrix.clone();
    assert_eq!(copy, matrix);
    copy.add_sparse_data(&[0_i64], &[0], vec![1.0_f64], "scoreB", JoinType::Outer)
        .unwrap();
    assert_eq!(matrix.shape(), (5, 6, 1));
    assert_eq!(copy.shape(), (5, 6, 2));
    assert_eq!(copy.nnz(), matrix.nnz() + 1);
}

#[test]
fn add_sparse_data_to_empty() {
    let mut matrix = StackedSparseMatrix::new(5, 6);
    matrix
        .add_sparse_data(&[0_i64, 2, 4], &[1, 0, 5], vec![3.0, 2.0, 1.1], "scoreA", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (5, 6, 1));
    assert_eq!(matrix.layer_as::<f64>("scoreA").unwrap(), &[3.0, 2.0, 1.1]);
}

#[test]
fn add_unsorted_sparse_data_to_empty() {
    let mut matrix = StackedSparseMatrix::new(5, 6);
    matrix
        .add_sparse_data(&[4_usize, 0, 2], &[5, 1, 0], vec![1.1, 3.0, 2.0], "scoreA", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.row(), &[0, 2, 4]);
    assert_eq!(matrix.col(), &[1, 0, 5]);
    assert_eq!(matrix.layer_as::<f64>("scoreA").unwrap(), &[3.0, 2.0, 1.1]);
}

#[test]
fn add_structured_sparse_data_to_empty() {
    let fields = Records::from_columns(
        vec!["score".to_owned(), "matches".to_owned()],
        vec![LayerData::F64(vec![0.1, 0.2, 0.3]), LayerData::I32(vec![3, 2, 1])],
    )
    .unwrap();
    let mut matrix = StackedSparseMatrix::new(5, 6);
    matrix
        .add_sparse_data(&[0_i64, 2, 4], &[1, 0, 5], fields, "scoreA", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (5, 6, 2));
    assert_eq!(matrix.layer_as::<f64>("scoreA_score").unwrap(), &[0.1, 0.2, 0.3]);
    assert_eq!(matrix.layer_as::<i32>("scoreA_matches").unwrap(), &[3, 2, 1]);
}

#[test]
fn add_sparse_data_to_existing() {
    let mut matrix = example_5x6();
    assert_eq!(matrix.nnz(), 7);
    let row = matrix.row().to_vec();
    let col = matrix.col().to_vec();
    matrix
        .add_sparse_data(
            &row,
            &col,
            vec![0.2, 0.5, 0.2, 0.1, 0.8, 1.0, 1.0],
            "scoreB",
            JoinType::Left,
        )
        .unwrap();

    let score_b = matrix.to_array::<f64>(Some("scoreB")).unwrap();
    assert_eq!(score_b.column(2).to_vec(), vec![0.2, 0.0, 0.1, 0.0, 1.0]);

    let Ok(DenseArray::Records(all)) = matrix.to_dense_array(None) else {
        panic!("expected one field per layer");
    };
    assert_eq!(all.shape(), Some((5, 6)));
    let score_a = all.field("scoreA").unwrap().clone().into_array::<i64>().unwrap();
    assert_eq!(score_a.row(3).to_vec(), vec![30, 0, 0, 0, 34, 0]);
    let score_b = all.field("scoreB").unwrap().clone().into_array::<f64>().unwrap();
    assert_eq!(score_b.column(2).to_vec(), vec![0.2, 0.0, 0.1, 0.0, 1.0]);
}

#[test]
fn add_sparse_data_too_large() {
    let mut matrix = example_5x6();
    let err = matrix
        .add_sparse_data(&[50_i64, 100], &[0, 1], vec![0.1, 0.8], "scoreB", JoinType::Right)
        .unwrap_err();
    assert_eq!(
        err,
        Error::BoundsExceeded {
            axis: Axis::Row,
            max: 100,
            bound: 5
        }
    );
    assert!(err
        .to_string()
        .contains("row values have dimension larger than sparse stack"));
    assert_eq!(matrix.shape(), (5, 6, 1));
}

#[test]
fn left_and_inner_joins_ignore_out_of_bounds_incoming() {
    let mut matrix = example_5x6();
    matrix
        .add_sparse_data(&[50_i64, 1], &[0, 0], vec![0.1, 0.8], "scoreB", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.nnz(), 7);
    assert_eq!(matrix.get((1, 0, "scoreB")).unwrap().as_cell().unwrap().get("scoreB"), Some(Scalar::F64(0.8)));
}

#[test]
fn sole_layer_name_reseeds() {
    let mut matrix = example_5x6();
    matrix
        .add_sparse_data(&[0_i64], &[0], vec![9.5_f64], "scoreA", JoinType::Left)
        .unwrap();
    assert_eq!(matrix.shape(), (5, 6, 1));
    assert_eq!(matrix.nnz(), 1);
    assert_eq!(matrix.layer("scoreA").unwrap().dtype(), DType::F64);
}

#[test]
fn duplicate_layer_and_coordinates_are_rejected() {
    let mut matrix = two_coo_layers("scores1", "scores2");
    let err = matrix
        .add_sparse_data(&[0_i64], &[2], vec![1_i32], "scores1", JoinType::Outer)
        .unwrap_err();
    assert_eq!(err, Error::DuplicateLayer("scores1".to_owned()));

    let err = matrix
        .add_sparse_data(&[0_i64, 0], &[2, 2], vec![1_i32, 2], "scores3", JoinType::Outer)
        .unwrap_err();
    assert_eq!(err, Error::DuplicateCoordinate { row: 0, col: 2 });

    let err = matrix
        .add_sparse_data(&[-1_i64], &[2], vec![1_i32], "scores3", JoinType::Outer)
        .unwrap_err();
    assert_eq!(err, Error::NegativeIndex(-1));
    assert_eq!(matrix.shape(), (12, 10, 2));
}

#[test]
fn unequal_lengths_are_rejected() {
    let mut matrix = StackedSparseMatrix::new(5, 5);
    let err = matrix
        .add_sparse_data(&[0_i64, 1], &[0, 1], vec![1.0], "a", JoinType::Left)
        .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }));
    assert_eq!(matrix.shape(), (5, 5, 0));
}

#[test]
fn outer_join_fills_zeros() {
    let mut matrix = StackedSparseMatrix::new(4, 4);
    matrix
        .add_sparse_data(&[0_i64, 2], &[0, 2], vec![1.0_f64, 2.0], "a", JoinType::Left)
        .unwrap();
    matrix
        .add_sparse_data(&[3_i64, 2, 1], &[3, 2, 1], vec![30_i64, 20, 10], "b", JoinType::Outer)
        .unwrap();
    assert_eq!(matrix.row(), &[0, 1, 2, 3]);
    assert_eq!(matrix.col(), &[0, 1, 2, 3]);
    assert_eq!(matrix.layer_as::<f64>("a").unwrap(), &[1.0, 0.0, 2.0, 0.0]);
    assert_eq!(matrix.layer_as::<i64>("b").unwrap(), &[0, 10, 20, 30]);
}

#[test]
fn right_join_keeps_incoming_coordinates() {
    let mut matrix = StackedSparseMatrix::new(4, 4);
    matrix
        .add_sparse_data(&[0_i64, 2], &[0, 2], vec![1.0_f64, 2.0], "a", JoinType::Left)
        .unwrap();
    matrix
        .add_sparse_data(&[3_i64, 2], &[3, 2], vec![30_i64, 20], "b", JoinType::Right)
        .unwrap();
    assert_eq!(matrix.layer_names(), &["a", "b"]);
    assert_eq!(matrix.row(), &[2, 3]);
    assert_eq!(matrix.layer_as::<f64>("a").unwrap(), &[2.0, 0.0]);
    assert_eq!(matrix.layer_as::<i64>("b").unwrap(), &[20, 30]);
}

#[test]
fn join_mode_from_str() {
    assert_eq!("outer".parse::<JoinType>().unwrap(), JoinType::Outer);
    let err = "sideways".parse::<JoinType>().unwrap_err();
    assert_eq!(err, Error::UnsupportedJoinMode("sideways".to_owned()));
}

#[test]
fn filter_by_range() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(arange_12x10().view(), "test_score", JoinType::Left)
        .unwrap();
    let filtered = matrix.filter_by_range(None, 70.0, 85.0).unwrap();
    let expected: Vec<i64> = (71..85).collect();
    assert_eq!(filtered.layer_as::<i64>("test_score").unwrap(), expected.as_slice());
}

#[test]
fn filter_with_inclusive_operators() {
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(arange_12x10().view(), "test_score", JoinType::Left)
        .unwrap();
    let filter = RangeFilter::new(70.0, 85.0)
        .layer("test_score")
        .with_operators(">=", "<=")
        .unwrap();
    let filtered = matrix.filter_by_range_with(&filter).unwrap();
    let expected: Vec<i64> = (70..=85).collect();
    assert_eq!(filtered.layer_as::<i64>("test_score").unwrap(), expected.as_slice());

    let err = RangeFilter::new(0.0, 1.0).with_operators("=>", "<").unwrap_err();
    assert_eq!(err, Error::UnknownOperator("=>".to_owned()));
}

#[test]
fn filter_by_range_stacked() {
    let scores2 = arange_12x10().mapv(|v| if v < 80 { 0.0 } else { 0.9 });
    let mut matrix = StackedSparseMatrix::new(12, 10);
    matrix
        .add_dense_layer(arange_12x10().view(), "scores1", JoinType::Left)
        .unwrap();
    let mut matrix = matrix.filter_by_range(None, 70.0, 85.0).unwrap();
    assert_eq!(matrix.shape(), (12, 10, 1));

    matrix
        .add_dense_layer(scores2.view(), "scores2", JoinType::Left)
        .unwrap();
    let matrix = matrix
        .filter_by_range(Some("scores2"), 0.5, f64::INFINITY)
        .unwrap();

    let cell = |key: IndexKey| matrix.get(key).unwrap().as_cell().cloned().unwrap();
    assert_eq!(cell((8, 1, 0).into()).get("scores1"), Some(Scalar::I64(81)));
    assert_eq!(cell((8, 1, 1).into()).get("scores2"), Some(Scalar::F64(0.9)));
    let both = cell((8, 3).into());
    assert_eq!(both.values().collect::<Vec<_>>(), vec![Scalar::I64(83), Scalar::F64(0.9)]);

    let row = matrix.get((8, ..)).unwrap().into_entries().unwrap();
    assert_eq!(row.records.column_as::<i64>("scores1").unwrap(), &[80, 81, 82, 83, 84]);
    assert_eq!(row.records.column_as::<f64>("scores2").unwrap(), &[0.9; 5]);
    for key in [IndexKey::new(8, .., "scores2"), IndexKey::new(8, .., 1)] {
        let entries = matrix.get(key).unwrap().into_entries().unwrap();
        assert_eq!(entries.values().unwrap().as_slice::<f64>().unwrap(), &[0.9; 5]);
    }

    assert_eq!(matrix.col(), &[0, 1, 2, 3, 4]);
    assert!(matrix.row().iter().all(|&r| r == 8));
    assert_eq!(matrix.shape(), (12, 10, 2));
    assert_eq!(matrix.layer_names(), &["scores1", "scores2"]);
}

#[test]
fn guess_layer_name() {
    let matrix = StackedSparseMatrix::new(2, 4);
    let err = matrix.guess_layer_name().unwrap_err();
    assert_eq!(err, Error::EmptyArray);
    assert_eq!(err.to_string(), "Array is empty.");
    assert_eq!(matrix.to_dense_array(None).unwrap_err(), Error::EmptyArray);

    assert_eq!(example_5x6().guess_layer_name().unwrap(), "scoreA");
    assert_eq!(
        two_coo_layers("a", "b").guess_layer_name().unwrap_err(),
        Error::NameRequired
    );
}

#[test]
fn dense_export_keeps_dtype() {
    let matrix = two_coo_layers("scores1", "scores2");
    let Ok(DenseArray::Layer(layer)) = matrix.to_dense_array(Some("scores2")) else {
        panic!("expected a single layer");
    };
    assert_eq!(layer.dtype(), DType::I32);
    assert_eq!(layer.shape(), (12, 10));
    assert_eq!(layer.get(0, 2), Some(Scalar::I32(1)));
    assert_eq!(layer.get(1, 0), Some(Scalar::I32(0)));

    let err = matrix.to_array::<f64>(Some("scores1")).unwrap_err();
    assert_eq!(
        err,
        Error::DTypeMismatch {
            expected: DType::F64,
            got: DType::I32
        }
    );
}

#[test]
fn coo_export_matches_entries() {
    let matrix = example_5x6();
    let coo = matrix.to_coo::<i64>(None).unwrap();
    assert_eq!(coo.shape(), (5, 6));
    assert_eq!(coo.nnz(), 7);
    assert_eq!(coo.row, matrix.row());
    assert_eq!(coo.data, vec![2, 10, 14, 22, 30, 34, 42]);

    let mut copy = StackedSparseMatrix::new(5, 6);
    copy.add_coo_layer(&coo, "scoreA", JoinType::Left).unwrap();
    assert_eq!(copy, matrix);
}

#[test]
fn table_export() {
    let mut matrix = StackedSparseMatrix::new(3, 3);
    matrix
        .add_sparse_data(&[0_i64, 2], &[1, 2], vec![1.5_f64, 2.5], "a", JoinType::Left)
        .unwrap();
    matrix
        .add_sparse_data(&[2_i64], &[2], vec![7_i32], "b", JoinType::Left)
        .unwrap();
    let table = matrix.to_table();
    assert_eq!(table.columns(), &["row", "col", "a", "b"]);
    assert_eq!(table.len(), 2);

    let mut out = Vec::new();
    table.write_delimited(&mut out, ',').unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "row,col,a,b\n0,1,1.5,0\n2,2,2.5,7\n");
}
