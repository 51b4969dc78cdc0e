// File: crates/difplot-core/tests/curve.rs
// Purpose: Curve construction from columns, pairs, and rows.

use difplot_core::{Curve, Error, InvalidInput, SampleOptions};

#[test]
fn constructors_agree() {
    let from_cols = Curve::new(vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]).expect("columns");
    let from_pairs = Curve::from_points(&[(0.0, 3.0), (1.0, 4.0), (2.0, 5.0)]);
    let from_rows = Curve::from_rows(&[[0.0, 3.0], [1.0, 4.0], [2.0, 5.0]]);
    assert_eq!(from_cols, from_pairs);
    assert_eq!(from_cols, from_rows);
    assert_eq!(from_cols.first(), Some((0.0, 3.0)));
    assert_eq!(from_cols.last(), Some((2.0, 5.0)));
    assert_eq!(from_cols.get(3), None);
}

#[test]
fn mismatched_columns_are_rejected() {
    let err = Curve::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(InvalidInput::LengthMismatch { x: 2, y: 1 })));
}

#[test]
fn select_keeps_given_rows() {
    let curve = Curve::from_fn(0.0, 4.0, 5, |x| x * 10.0);
    let picked = curve.select(&[0, 2, 4]);
    assert_eq!(picked.to_points(), vec![(0.0, 0.0), (2.0, 20.0), (4.0, 40.0)]);
    assert!(Curve::default().is_empty());
    assert_eq!(Curve::default().last(), None);
}

#[test]
fn downsample_method_matches_free_function() {
    let curve = Curve::from_fn(0.0, 6.0, 400, |x| x.powi(3) - 4.0 * x);
    let opts = SampleOptions::default().with_max_gap(0.25);
    let via_method = curve.downsample(40, &opts).expect("method");
    let via_fn = difplot_core::sample_with(&curve, 40, &opts).expect("function");
    assert_eq!(via_method.indices, via_fn.indices);
    assert_eq!(via_method.curve.first(), curve.first());
    assert_eq!(via_method.curve.last(), curve.last());
}
