// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::constraints::{Constraint, Layer, Layering};
use crate::unit_tests::fixtures::{self, first_segment_graph, layered_check, slice_refs};
use crate::{Configuration, SimpleNode};
use pretty_assertions::assert_eq;

fn dep(from: &str, to: &str) -> (SimpleNode, SimpleNode) {
    (SimpleNode::slice("t", from), SimpleNode::slice("t", to))
}

#[test]
fn skipping_a_layer_is_reported_in_the_direct_variant() {
    let violations = layered_check(true, &[("a", "c")]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].dependencies(), &[dep("a", "c")]);

    // the relaxed variant allows skipping
    assert_eq!(layered_check(false, &[("a", "c")]), vec![]);
}

#[test]
fn inverse_dependencies_are_reported() {
    let direct = layered_check(true, &[("b", "a")]);
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].dependencies(), &[dep("b", "a")]);

    let relaxed = layered_check(false, &[("b", "a")]);
    assert_eq!(relaxed.len(), 1);
    assert_eq!(relaxed[0].dependencies(), &[dep("b", "a")]);
}

#[test]
fn unknown_slices_at_the_edges_are_allowed() {
    assert_eq!(layered_check(false, &[("c", "x"), ("x", "a")]), vec![]);
    assert_eq!(layered_check(true, &[("c", "x"), ("x", "a")]), vec![]);
}

#[test]
fn unknown_slice_in_the_middle_is_reported() {
    let violations = layered_check(false, &[("b", "x")]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].dependencies(), &[dep("b", "x")]);

    let inbound = layered_check(false, &[("x", "b")]);
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].dependencies(), &[dep("x", "b")]);
}

#[test]
fn strict_layers_forbid_references_within_the_layer() {
    let layering = Layering::new(
        "t",
        vec![Layer::strict(["a", "a2"]), Layer::lenient(["b", "b2"])],
    );
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(layering)
        .build()
        .expect("configuration builds");
    let violations = configuration
        .check(&slice_refs(&[("a", "a2"), ("b", "b2"), ("a", "b")]))
        .expect("check succeeds");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].dependencies(), &[dep("a", "a2")]);
}

#[test]
fn direct_variant_accepts_the_next_layer_only() {
    assert_eq!(layered_check(true, &[("a", "b"), ("b", "c")]), vec![]);
}

#[test]
fn layering_violations_collect_all_offending_references() {
    let violations = layered_check(false, &[("b", "a"), ("c", "a"), ("a", "b")]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].dependencies(), &[dep("b", "a"), dep("c", "a")]);
}

#[test]
fn short_descriptions_render_layer_kinds() {
    let single = Layering::new("t", vec![Layer::strict(["a"]), Layer::lenient(["b"])]);
    assert_eq!(single.short_description(), "a => b");

    let multi = Layering::new(
        "t",
        vec![Layer::strict(["a", "x"]), Layer::lenient(["b", "y"])],
    );
    assert_eq!(multi.short_description(), "[a, x] => (b, y)");
}

#[test]
fn layering_violation_display() {
    let violations = layered_check(false, &[("b", "a")]);
    assert_eq!(violations[0].to_string(), "layering: a => b => c: b -> a");

    let direct = layered_check(true, &[("a", "c")]);
    assert_eq!(direct[0].to_string(), "direct-layering: a => b => c: a -> c");
}

#[test]
fn a_simple_cycle_is_reported_once() {
    let configuration = Configuration::builder()
        .slicing("module", ["(*).*"])
        .constraint(Constraint::cycle_free("module"))
        .build()
        .expect("configuration builds");
    let violations = configuration
        .check(&fixtures::scan(fixtures::SIMPLE_CYCLE))
        .expect("check succeeds");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].to_string(),
        "cycle-free: module: m1 -> m2, m2 -> m1"
    );
}

#[test]
fn separate_components_produce_separate_violations() {
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(Constraint::cycle_free("t"))
        .build()
        .expect("configuration builds");
    // insertion order deliberately unsorted
    let scan = slice_refs(&[("m4", "m3"), ("m3", "m4"), ("m2", "m1"), ("m1", "m2")]);
    let violations = configuration.check(&scan).expect("check succeeds");
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].to_string(), "cycle-free: t: m1 -> m2, m2 -> m1");
    assert_eq!(violations[1].to_string(), "cycle-free: t: m3 -> m4, m4 -> m3");
}

#[test]
fn a_ring_walk_starts_at_the_smallest_slice() {
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(Constraint::cycle_free("t"))
        .build()
        .expect("configuration builds");
    let scan = slice_refs(&[("r2", "r3"), ("r3", "r1"), ("r1", "r2")]);
    let violations = configuration.check(&scan).expect("check succeeds");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].to_string(),
        "cycle-free: t: r1 -> r2, r2 -> r3, r3 -> r1"
    );
}

#[test]
fn acyclic_projections_pass() {
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(Constraint::cycle_free("t"))
        .build()
        .expect("configuration builds");
    let scan = slice_refs(&[("a", "b"), ("b", "c"), ("a", "c")]);
    assert_eq!(configuration.check(&scan).expect("check succeeds"), vec![]);
}

#[test]
fn cycles_view_reports_membership() {
    let graph = first_segment_graph(&[("m1", "m2"), ("m2", "m1"), ("m2", "m3")]);
    let projection = graph.slice("t");
    let cycles = projection.cycles();
    assert!(cycles.is_cyclic("m1", "m2"));
    assert!(!cycles.is_cyclic("m1", "m3"));
    assert!(!cycles.is_cyclic("m1", "zz"));

    let members: Vec<Vec<SimpleNode>> = cycles
        .all_cycles()
        .into_iter()
        .map(|cycle| cycle.into_iter().cloned().collect())
        .collect();
    assert_eq!(
        members,
        vec![vec![SimpleNode::slice("t", "m1"), SimpleNode::slice("t", "m2")]]
    );
}
