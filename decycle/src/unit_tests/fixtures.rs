// Copyright (c) The decycle-rs Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::categorizer::{Categorizer, EdgeFilter, NodeFilter};
use crate::constraints::{Layer, Layering};
use crate::graph::DependencyGraph;
use crate::{ClassRefs, Configuration, Slicing, Violation};

/// Scan with a reference cycle between the `m1` and `m2` modules.
pub(crate) static SIMPLE_CYCLE: &str = r#"{ "classes": [
    { "name": "m1.A", "references": ["m2.B"] },
    { "name": "m2.C", "references": ["m1.D"] },
    { "name": "m1.D" },
    { "name": "m2.B" }
] }"#;

pub(crate) fn scan(json: &str) -> ClassRefs {
    ClassRefs::parse_json(json).expect("fixture scan parses")
}

/// Builds a scan document from slice-level references: an edge `a -> c`
/// becomes a class `a.A` referencing `c.A`.
pub(crate) fn slice_refs(edges: &[(&str, &str)]) -> ClassRefs {
    let classes: Vec<serde_json::Value> = edges
        .iter()
        .map(|(from, to)| {
            serde_json::json!({
                "name": format!("{}.A", from),
                "references": [format!("{}.A", to)],
            })
        })
        .collect();
    scan(&serde_json::json!({ "classes": classes }).to_string())
}

/// The three-layer fixture over slicing `t`: strict `a`, lenient `b`,
/// lenient `c`.
pub(crate) fn abc_layering(direct: bool) -> Layering {
    let layers = vec![
        Layer::strict(["a"]),
        Layer::lenient(["b"]),
        Layer::lenient(["c"]),
    ];
    if direct {
        Layering::direct("t", layers)
    } else {
        Layering::new("t", layers)
    }
}

/// Checks slice-level references against the three-layer fixture.
pub(crate) fn layered_check(direct: bool, edges: &[(&str, &str)]) -> Vec<Violation> {
    let configuration = Configuration::builder()
        .slicing("t", ["(*).*"])
        .constraint(abc_layering(direct))
        .build()
        .expect("fixture configuration builds");
    configuration
        .check(&slice_refs(edges))
        .expect("fixture check succeeds")
}

/// A graph slicing classes by their first package segment, without filters.
pub(crate) fn first_segment_graph(edges: &[(&str, &str)]) -> DependencyGraph {
    let categorizer =
        Categorizer::new(vec![Slicing::parse("t", ["(*).*"]).expect("fixture slicing compiles")])
            .expect("fixture categorizer builds");
    let mut graph =
        DependencyGraph::new(categorizer, NodeFilter::default(), EdgeFilter::default());
    for (from, to) in edges {
        graph.connect(&format!("{}.A", from), &format!("{}.A", to));
    }
    graph
}
