//! Integration tests for script to document pipeline

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use gnomon_core::ExportOptions;
use gnomon_math::Vector;
use gnomon_script::{ConstructionFailure, ScriptEngine};
use serde_json::json;
use std::path::Path;

#[test]
fn script_to_document_pipeline() {
    let script = r#"
        cube("ABCDEFGH");
        mid_point("M", "AG");
        section("ACG");
        arrow("AM");
    "#;

    let engine = ScriptEngine::new();
    let scene = engine.eval_scene(script).expect("Script should evaluate");
    let json = scene
        .export_json(&ExportOptions::default())
        .expect("Scene should export");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["points"].as_array().unwrap().len(), 9);
    assert_eq!(value["shapes"][0]["faces_data"].as_array().unwrap().len(), 6);
    assert_eq!(value["planes"][0][4], json!(true));
    assert_eq!(value["arrows"], json!(["AM"]));
    assert_eq!(value["lines"].as_array().unwrap().len(), 12);
}

#[test]
fn point_from_vec_orientation() {
    let script = r#"
        new_point("A", vector(1, 0, 0));
        pointFromVec("AB", vector(0, 2, 0));
        pointFromVec("CA", vector(0, 0, 3));
    "#;

    let scene = ScriptEngine::new().eval_scene(script).unwrap();
    // B was free: B = A + e
    assert_eq!(scene.position("B").unwrap(), Vector::new(1.0, 2.0, 0.0));
    // A was registered: C = A - e
    assert_eq!(scene.position("C").unwrap(), Vector::new(1.0, 0.0, -3.0));
}

#[test]
fn point_from_vec_fixed_anchor() {
    let script = r#"
        new_point("A", vector(0, 0, 0));
        new_point("B", vector(5, 5, 5));
        point_from_vec("AB", vector(1, 0, 0), "A");
    "#;

    let scene = ScriptEngine::new().eval_scene(script).unwrap();
    assert_eq!(scene.position("B").unwrap(), Vector::X);
    assert_eq!(scene.position("A").unwrap(), Vector::ZERO);
}

#[test]
fn repeated_mid_point_is_stable() {
    let script = r#"
        square("ABCD");
        midPoint("M", "AB");
        midPoint("M", "AB");
    "#;

    let scene = ScriptEngine::new().eval_scene(script).unwrap();
    let m = scene.position("M").unwrap();
    assert_relative_eq!(m.x, 0.0);
    assert_relative_eq!(m.y, -1.0);
    assert_eq!(scene.point_count(), 5);
}

#[test]
fn lines_are_unordered_arrows_are_not() {
    let script = r#"
        square("ABCD");
        line("AC");
        line("CA");
        arrow("AC");
        arrow("CA");
    "#;

    let scene = ScriptEngine::new().eval_scene(script).unwrap();
    assert_eq!(scene.lines().len(), 5);
    assert_eq!(scene.arrows().codes(), vec!["AC", "CA"]);
}

#[test]
fn array_names_are_accepted() {
    let script = r#"
        cube(["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7"]);
        line(["p0", "p6"]);
    "#;

    let scene = ScriptEngine::new().eval_scene(script).unwrap();
    assert!(scene.contains_point("p7"));
    assert_eq!(scene.lines().len(), 13);
}

#[test]
fn unknown_point_reports_operation() {
    let engine = ScriptEngine::new();
    let err = engine
        .eval_scene(r#"square("ABCD"); plane("ABZ");"#)
        .unwrap_err();
    let failure = err
        .downcast_ref::<ConstructionFailure>()
        .expect("Should carry the construction failure");
    assert_eq!(failure.unknown_name.as_deref(), Some("Z"));
    assert_eq!(failure.operation, Some("plane"));
}

#[test]
fn wrong_name_count_is_rejected() {
    let engine = ScriptEngine::new();
    let err = engine.eval_scene(r#"cube("ABC");"#).unwrap_err();
    let failure = err.downcast_ref::<ConstructionFailure>().unwrap();
    assert_eq!(failure.operation, Some("cube"));
    assert!(failure.unknown_name.is_none());
}

#[test]
fn rotation_controls() {
    let engine = ScriptEngine::new();
    let scene = engine.eval_scene("rotate(2);").unwrap();
    assert_relative_eq!(scene.settings().rotate, 2.0);

    let scene = engine.eval_scene("dont_rotate();").unwrap();
    assert!(!scene.settings().rotates());
}

#[test]
fn all_scenes_evaluate() {
    let engine = ScriptEngine::new();

    // Find scenes directory relative to the crate root
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let scenes_dir = Path::new(manifest_dir)
        .parent()
        .expect("Should have parent")
        .parent()
        .expect("Should have grandparent")
        .join("scenes");

    if !scenes_dir.exists() {
        eprintln!("Scenes directory not found at {:?}, skipping test", scenes_dir);
        return;
    }

    let mut count = 0;
    for entry in std::fs::read_dir(&scenes_dir).expect("Should read scenes dir") {
        let path = entry.expect("Should read entry").path();
        if path.extension().is_some_and(|e| e == "rhai") {
            let scene = engine
                .eval_scene_file(&path)
                .unwrap_or_else(|e| panic!("Scene {} should evaluate: {:#}", path.display(), e));
            scene
                .export_json(&ExportOptions::default())
                .unwrap_or_else(|e| panic!("Scene {} should export: {}", path.display(), e));
            count += 1;
        }
    }

    assert!(count > 0, "Should have found at least one scene file");
}
