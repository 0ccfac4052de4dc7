//! Fixture-driven stencil tests.
//!
//! Every `fixtures/stencil/<name>.matrix` has matching `before/` and
//! `after/` files. Each fixture is checked directly against the engine and
//! again through a generated program.

use stencil_runtime::{apply_stencil, apply_stencil_with, Matrix};
use stencil_tests::{open_matrix, smx_operands, stencil_fixture_names, TestHarness};

fn fixture(name: &str) -> (Matrix, Matrix, Matrix) {
    (
        open_matrix("stencil", name),
        open_matrix("before", name),
        open_matrix("after", name),
    )
}

#[test]
fn test_fixtures_present() {
    let names = stencil_fixture_names();
    assert!(names.len() >= 5, "expected stencil fixtures, found {names:?}");
    assert!(names.contains(&"identity.matrix".to_string()));
}

#[test]
fn test_successful_application() {
    for name in stencil_fixture_names() {
        let (stencil, before, after) = fixture(&name);
        let computed = apply_stencil(&stencil, &before)
            .unwrap_or_else(|e| panic!("{name}: stencil failed: {e}"));
        assert_eq!(computed, after, "fixture {name}");
    }
}

#[test]
fn test_sequential_application() {
    for name in stencil_fixture_names() {
        let (stencil, before, after) = fixture(&name);
        let computed = apply_stencil_with(&stencil, &before, false).unwrap();
        assert_eq!(computed, after, "fixture {name}");
    }
}

#[test]
fn test_identity_stencil_leaves_matrix() {
    let (stencil, before, after) = fixture("identity.matrix");
    assert_eq!(stencil.dimensions(), (1, 1));
    assert_eq!(before, after);
}

#[test]
fn test_fixtures_through_programs() {
    for name in stencil_fixture_names() {
        let (stencil, before, after) = fixture(&name);
        let (stencil_rows, stencil_cols) = stencil.dimensions();
        let (rows, cols) = before.dimensions();
        let source = format!(
            "CMX 1 {stencil_rows} {stencil_cols}\n\
             SMX 1 {}\n\
             CMX 2 {rows} {cols}\n\
             SMX 2 {}\n\
             PDE 1 2\n",
            smx_operands(&stencil),
            smx_operands(&before),
        );

        let harness = TestHarness::from_source(&source);
        assert!(harness.succeeded(), "{name}: {:?}", harness.error());
        assert_eq!(harness.matrix(2), Some(&after), "fixture {name}");
        assert_eq!(harness.matrix(1), Some(&stencil), "fixture {name}");
    }
}

#[test]
fn test_zero_dimension() {
    let err = apply_stencil(&Matrix::unpopulated(0, 4), &counting(4, 4)).unwrap_err();
    assert_eq!(err.to_string(), "Invalid odd dimensions for stencil: (0, 4)");
}

#[test]
fn test_even_dimension() {
    let err = apply_stencil(&counting(2, 2), &counting(4, 4)).unwrap_err();
    assert_eq!(err.to_string(), "Invalid odd dimensions for stencil: (2, 2)");
}

fn counting(rows: i64, cols: i64) -> Matrix {
    Matrix::new(rows, cols, (0..rows * cols).map(|v| v as f64).collect())
}
