//! Integration tests for end-to-end stencil execution.
//!
//! These tests verify the full pipeline:
//! Source → Lex → Parse → Evaluate → Output and final state

use stencil_lang::{MatrixStyle, NumericValue, RunConfig};
use stencil_tests::{run_output, TestHarness};

/// Store then print a real register.
#[test]
fn test_store_and_print_real() {
    let harness = TestHarness::from_source(
        "
        STO 37 -452.11
        PR 37
        ",
    );
    assert!(harness.succeeded());
    assert_eq!(harness.output(), "-452.11\n");
}

/// Create, populate and print a matrix in the default style.
#[test]
fn test_create_populate_print_matrix() {
    let harness = TestHarness::from_source(
        "
        CMX 31 2 3
        SMX 31 -13.4 9876 45.234 -42 34.8 -88.2
        PMX 31
        ",
    );
    assert!(harness.succeeded());
    assert_eq!(harness.output(), "[[-13.4 9876 45.234]\n [-42 34.8 -88.2]]\n");
}

/// Printing an unwritten register fails before any output.
#[test]
fn test_print_uninitialized_register() {
    let harness = TestHarness::from_source("PR 6");
    let error = harness.error().unwrap();
    assert_eq!(error.name(), "UninitializedVariableError");
    assert_eq!(
        error.to_string(),
        "Register 6 is not initialized. Please STO first."
    );
    assert_eq!(harness.output(), "");

    assert_eq!(
        run_output("PR 6"),
        "UninitializedVariableError: Register 6 is not initialized. Please STO first.\n"
    );
}

#[test]
fn test_values_print_with_their_tag() {
    let harness = TestHarness::from_source(
        "
        STO 1 32 PR 1
        STO 2 -88 PR 2
        STO 3 5. PR 3
        STO 4 -768.245 PR 4
        ",
    );
    assert_eq!(harness.lines(), vec!["32", "-88", "5.0", "-768.245"]);
}

#[test]
fn test_add_promotes_to_real() {
    let harness = TestHarness::from_source("STO 10 -88 ADD 10 22 PR 10 ADD 10 22.2 PR 10");
    assert_eq!(harness.lines(), vec!["-66", "-43.8"]);
    assert_eq!(harness.register(10), Some(NumericValue::Real(-43.8)));
}

#[test]
fn test_add_to_uninitialized_register() {
    let harness = TestHarness::from_source("ADD 7 89.2");
    assert_eq!(
        harness.error().unwrap().to_string(),
        "Register 7 is not initialized. Please STO first."
    );
    assert!(harness.register(7).is_none());
}

#[test]
fn test_invalid_matrix_dimensions() {
    assert_eq!(
        run_output("CMX 11 0 32"),
        "InvalidMatrixDimensionsError: Invalid positive dimensions for matrix 11: (0, 32)\n"
    );
}

#[test]
fn test_wrong_value_count_leaves_matrix_unpopulated() {
    let harness = TestHarness::from_source("CMX 31 2 3 SMX 31 -13.4 9876 45.234 -42 34.8");
    assert_eq!(harness.error().unwrap().name(), "ArgumentError");
    assert_eq!(
        harness.error().unwrap().to_string(),
        "Takes exactly 6 arguments (5 given)"
    );
    assert!(!harness.matrix(31).unwrap().is_populated());
}

/// Dimensions whose product exceeds the platform word still count exactly.
#[test]
fn test_populating_huge_matrix() {
    let harness = TestHarness::from_source("CMX 1 4294967296 4294967296 SMX 1 0");
    let error = harness.error().unwrap();
    assert_eq!(error.name(), "ArgumentError");
    assert_eq!(
        error.to_string(),
        "Takes exactly 18446744073709551616 arguments (1 given)"
    );
}

#[test]
fn test_print_unpopulated_matrix() {
    let harness = TestHarness::from_source("CMX 40 22 78 PMX 40");
    assert_eq!(harness.output(), "Unpopulated matrix of dimensions (22, 78)\n");
}

#[test]
fn test_recreating_matrix_discards_contents() {
    let harness = TestHarness::from_source("CMX 1 1 2 SMX 1 3 4 CMX 1 1 2 PMX 1");
    assert_eq!(harness.output(), "Unpopulated matrix of dimensions (1, 2)\n");
}

#[test]
fn test_aligned_style() {
    let config = RunConfig {
        matrix_style: MatrixStyle::Aligned,
        ..RunConfig::default()
    };
    let harness = TestHarness::with_config(
        "CMX 31 2 3 SMX 31 -13.4 9876 45.234 -42 34.8 -88.2 PMX 31",
        config,
    );
    assert_eq!(
        harness.output(),
        "[[ -13.4   9876       45.234]\n [ -42       34.8    -88.2  ]]\n"
    );
}

#[test]
fn test_pde_in_program() {
    let harness = TestHarness::from_source(
        "
        CMX 1 3 3
        SMX 1 0 1 0 1 -4 1 0 1 0
        CMX 2 3 4
        SMX 2 0 1 2 3 4 5 6 7 8 9 10 11
        PDE 1 2
        PMX 2
        ",
    );
    assert!(harness.succeeded());
    assert_eq!(harness.output(), "[[16 13 14 11]\n [8 5 6 3]\n [0 -3 -2 -5]]\n");
}

#[test]
fn test_pde_even_stencil() {
    assert_eq!(
        run_output("CMX 1 2 2 SMX 1 0 1 2 3 CMX 2 2 2 SMX 2 0 1 2 3 PDE 1 2"),
        "InvalidStencilDimensionsError: Invalid odd dimensions for stencil: (2, 2)\n"
    );
}

#[test]
fn test_pde_unpopulated_matrix() {
    let harness = TestHarness::from_source("CMX 1 1 1 SMX 1 0 CMX 2 2 2 PDE 1 2");
    assert_eq!(harness.error().unwrap().name(), "MatrixIndexError");
}

// =============================================================================
// Branching
// =============================================================================

/// `BNE 1 72 0` fails whether or not register 1 exists.
#[test]
fn test_branch_to_current_location() {
    for source in ["STO 1 72 BNE 1 72 0", "STO 1 5 BNE 1 72 0", "STO 2 0 BNE 1 72 0"] {
        let harness = TestHarness::from_source(source);
        let error = harness.error().unwrap();
        assert_eq!(error.name(), "InvalidBranchOffsetError");
        assert_eq!(
            error.to_string(),
            "Cannot branch to current location. Invalid branch offset: 0"
        );
        assert_eq!(harness.pc(), 1);
    }
}

#[test]
fn test_branch_out_of_program() {
    assert_eq!(
        run_output("STO 1 0 PR 1 BNE 1 5 -5"),
        "0\nInvalidBranchOffsetError: Cannot branch before beginning of program. Invalid branch offset: -5 with destination: -3\n"
    );
    assert_eq!(
        run_output("STO 1 0 BNE 1 5 4 PR 1 PR 1"),
        "InvalidBranchOffsetError: Cannot branch past end of program. Invalid branch offset: 4 with destination: 5\n"
    );
}

/// Offsets near the integer limit are rejected, never wrapped.
#[test]
fn test_branch_offset_at_integer_limit() {
    let harness = TestHarness::from_source("STO 1 0 BNE 1 5 9223372036854775807");
    let error = harness.error().unwrap();
    assert_eq!(error.name(), "InvalidBranchOffsetError");
    assert_eq!(
        error.to_string(),
        "Cannot branch past end of program. Invalid branch offset: 9223372036854775807 with destination: 9223372036854775808"
    );
}

#[test]
fn test_counting_loop() {
    let harness = TestHarness::from_source(
        "
        STO 1 0
        ADD 1 1
        PR 1
        BNE 1 5 -2
        ",
    );
    assert!(harness.succeeded());
    assert_eq!(harness.lines(), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(harness.register(1), Some(NumericValue::Integer(5)));
}

#[test]
fn test_real_register_compares_numerically() {
    let harness = TestHarness::from_source("STO 1 0.5 ADD 1 0.5 PR 1 BNE 1 3 -2");
    assert_eq!(harness.lines(), vec!["1.0", "1.5", "2.0", "2.5", "3.0"]);
}

#[test]
fn test_forward_branch_skips() {
    let harness = TestHarness::from_source("STO 1 1 BNE 1 0 2 PR 1 STO 2 9 PR 2");
    assert_eq!(harness.output(), "9\n");
}

/// Repeated stencil application inside a loop.
#[test]
fn test_loop_applies_stencil_repeatedly() {
    let harness = TestHarness::from_source(
        "
        CMX 1 1 3
        SMX 1 1 0 0
        CMX 2 1 4
        SMX 2 1 0 0 0
        STO 0 0
        PDE 1 2
        ADD 0 1
        BNE 0 3 -2
        PMX 2
        ",
    );
    assert!(harness.succeeded());
    assert_eq!(harness.output(), "[[1 3 3 1]]\n");
}

#[test]
fn test_output_before_error_is_kept() {
    assert_eq!(
        run_output("STO 1 9 PR 1 PMX 20 PR 1"),
        "9\nUninitializedVariableError: Matrix 20 is not initialized. Please CMX first.\n"
    );
}

#[test]
fn test_compile_errors_run_nothing() {
    assert_eq!(run_output("STO 1 2 PR 1 PR"), "ParseError: Unexpected `$end'\n");
    assert_eq!(
        run_output("STO 1 2 PR 1 SMXF 1"),
        "LexingError: Unrecognized input `SMXF' at byte 13\n"
    );
}
