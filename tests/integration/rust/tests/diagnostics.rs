//! Diagnostics Integration Tests
//!
//! Tests that errors raised by the native class layer carry their kind and
//! message and render with captured source context.

use integration_tests::Point;
use native_classes::{dispatch, ClassRegistry};
use var_core::{ErrorKind, SourceInfo, Value};

const SCRIPT: &str = "var p = Point(1, 2)\nvar d = p.length(1)\nprint(d)";

/// Test: an argument count error rendered with the offending line
#[test]
fn test_arg_count_error_report() {
    let registry = ClassRegistry::new();
    registry.register::<Point>().unwrap();
    let p = Value::Object(registry.construct("Point", &[Value::from(1), Value::from(2)]).unwrap());

    let err = dispatch::call_method(&registry, &p, "length", &[Value::from(1)])
        .unwrap_err()
        .with_source_info(SourceInfo::capture("main.vs", SCRIPT, (2, 9), 8, "main"));

    assert_eq!(err.kind, ErrorKind::InvalidArgCount);
    let report = err.report();
    let lines: Vec<&str> = report.lines().collect();
    assert!(lines[0].starts_with("InvalidArgCount: "));
    assert_eq!(lines[1], "  at main.vs:2:9 in main");
    assert_eq!(lines[2], "var d = p.length(1)");
    assert_eq!(lines[3], "        ^^^^^^^^");
}

/// Test: captured context keeps the neighbouring lines only
#[test]
fn test_capture_keeps_neighbours() {
    let info = SourceInfo::capture("main.vs", SCRIPT, (2, 9), 1, "");
    assert_eq!(info.line_before, "var p = Point(1, 2)");
    assert_eq!(info.line_str, "var d = p.length(1)");
    assert_eq!(info.line_after, "print(d)");
}

/// Test: unknown attribute errors name the class
#[test]
fn test_unknown_attribute_message() {
    let registry = ClassRegistry::new();
    registry.register::<Point>().unwrap();
    let err = dispatch::get_static(&registry, "Point", "z").unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    assert_eq!(
        err.to_string(),
        "AttributeError: type Point has no attribute named \"z\"."
    );
}
