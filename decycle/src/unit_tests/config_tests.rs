// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::constraints::{Constraint, Layer, Layering};
use crate::errors::Error;
use crate::unit_tests::fixtures;
use crate::{ClassRefs, Configuration};
use pretty_assertions::assert_eq;

#[test]
fn build_rejects_malformed_patterns() {
    let result = Configuration::builder().including("(a)(b)").build();
    assert!(matches!(
        result,
        Err(Error::InvalidPattern { pattern, .. }) if pattern == "(a)(b)"
    ));
}

#[test]
fn build_rejects_duplicate_slicings() {
    let result = Configuration::builder()
        .slicing("module", ["a.**"])
        .slicing("module", ["b.**"])
        .build();
    assert!(matches!(result, Err(Error::DuplicateSlicing(name)) if name == "module"));
}

#[test]
fn build_rejects_constraints_over_unknown_slicings() {
    let result = Configuration::builder()
        .slicing("module", ["a.**"])
        .constraint(Constraint::cycle_free("layers"))
        .build();
    assert!(matches!(result, Err(Error::UnknownSlicing(name)) if name == "layers"));
}

#[test]
fn build_rejects_duplicate_layer_entries() {
    let layering = Layering::new(
        "module",
        vec![Layer::strict(["a"]), Layer::lenient(["b", "a"])],
    );
    let result = Configuration::builder()
        .slicing("module", ["(*).**"])
        .constraint(layering)
        .build();
    assert!(matches!(
        result,
        Err(Error::DuplicateLayerEntry { slicing, member })
            if slicing == "module" && member == "a"
    ));
}

#[test]
fn excluding_a_module_removes_its_cycle() {
    let scan = fixtures::scan(fixtures::SIMPLE_CYCLE);
    let base = Configuration::builder()
        .slicing("module", ["(*).*"])
        .constraint(Constraint::cycle_free("module"));
    let configuration = base.excluding("m2.**").build().expect("configuration builds");
    assert_eq!(configuration.check(&scan).expect("check succeeds"), vec![]);
}

#[test]
fn ignoring_a_reference_removes_its_cycle() {
    let scan = fixtures::scan(fixtures::SIMPLE_CYCLE);
    let configuration = Configuration::builder()
        .slicing("module", ["(*).*"])
        .constraint(Constraint::cycle_free("module"))
        .ignoring("m2.**", "m1.**")
        .build()
        .expect("configuration builds");
    assert_eq!(configuration.check(&scan).expect("check succeeds"), vec![]);
}

#[test]
fn violations_follow_constraint_declaration_order() {
    let scan = fixtures::slice_refs(&[("m1", "m2"), ("m2", "m1"), ("b", "a")]);
    let layering = Layering::new("t", vec![Layer::lenient(["a"]), Layer::lenient(["b"])]);
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(layering)
        .constraint(Constraint::cycle_free("t"))
        .build()
        .expect("configuration builds");
    let violations = configuration.check(&scan).expect("check succeeds");
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].constraint_id(), "layering");
    assert_eq!(violations[1].constraint_id(), "cycle-free");
}

#[test]
fn repeated_checks_are_identical() {
    let scan = fixtures::scan(fixtures::SIMPLE_CYCLE);
    let configuration = Configuration::builder()
        .slicing("module", ["(*).*"])
        .constraint(Constraint::cycle_free("module"))
        .build()
        .expect("configuration builds");
    let first = configuration.check(&scan).expect("check succeeds");
    let second = configuration.check(&scan).expect("check succeeds");
    assert_eq!(first, second);
}

#[test]
fn classpath_label_is_carried_through() {
    let configuration = Configuration::builder()
        .classpath("build/classes")
        .build()
        .expect("configuration builds");
    assert_eq!(configuration.classpath(), Some("build/classes"));
}

#[test]
fn scan_errors_surface_their_source() {
    assert!(matches!(
        ClassRefs::parse_json("not json"),
        Err(Error::ScanParseError(_))
    ));
    assert!(matches!(
        ClassRefs::from_path("no/such/scan.json"),
        Err(Error::ScanIoError { path, .. }) if path == "no/such/scan.json"
    ));
}
