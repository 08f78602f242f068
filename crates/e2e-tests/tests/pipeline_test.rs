//! End-to-end pipeline tests: sentence rows -> aggregation -> similarity
//! graph -> five-way community detection.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use e2e_tests::{build_graph, community_of, init_tracing, two_block_labels, two_block_rows};
use frames_community::{CommunityConfig, DetectionEngine};
use frames_network::{aggregate, GraphBuilder, NetworkConfig, Reducer};
use frames_types::color_for;

#[test]
fn test_full_pipeline_two_blocks() {
    init_tracing();
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    assert_eq!(matrix.document_count(), 12);
    assert_eq!(matrix.topic_count(), 6);

    let graph = build_graph(&matrix, &two_block_labels());
    assert_eq!(graph.node_count(), 6);

    let report = DetectionEngine::default().run(&graph);
    assert!(report.is_complete(), "failures: {:?}", report.failures);

    // Every algorithm recovers the two topic blocks
    for (name, assignment) in &report.assignments {
        for (a, b) in [(0, 1), (1, 2), (3, 4), (4, 5)] {
            assert_eq!(
                assignment.community_of(a),
                assignment.community_of(b),
                "{name} separated same-block topics {a} and {b}"
            );
        }
        assert_ne!(
            assignment.community_of(0),
            assignment.community_of(3),
            "{name} merged the two blocks"
        );
    }
}

#[test]
fn test_graph_invariants_hold_on_pipeline_output() {
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    let graph = build_graph(&matrix, &two_block_labels());
    for &(a, b, w) in graph.edges() {
        assert!(a != b, "self loop on node {a}");
        assert!((-1.0..=1.0).contains(&w), "weight out of range: {w}");
    }
}

#[test]
fn test_pruning_restricts_to_labeled_topics() {
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    let labels = two_block_labels();

    let config = NetworkConfig {
        prune_unlabeled: true,
        ..NetworkConfig::default()
    };
    let pruned = GraphBuilder::new(config).build(&matrix, &labels).unwrap();
    let mut pruned_topics = pruned.topic_ids();
    pruned_topics.sort_unstable();
    let mut label_keys: Vec<_> = labels.keys().copied().collect();
    label_keys.sort_unstable();
    assert_eq!(pruned_topics, label_keys);

    let full = build_graph(&matrix, &labels);
    for topic in pruned.topic_ids() {
        assert!(full.topic_ids().contains(&topic));
    }
}

#[test]
fn test_colors_deterministic_across_runs() {
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    let graph = build_graph(&matrix, &two_block_labels());

    let first = DetectionEngine::default().run(&graph);
    let second = DetectionEngine::default().run(&graph);
    for (name, assignment) in &first.assignments {
        let other = second.assignment(name).expect("missing algorithm");
        assert_eq!(assignment.colors, other.colors, "{name} colors changed");
        // Color is a function of community index alone
        for (topic, &index) in &assignment.membership {
            assert_eq!(assignment.color_of(*topic), Some(color_for(index)));
        }
    }
}

/// Spec scenario: 4 documents x 3 topics, documents 1-2 loading on
/// topic 0, documents 3-4 on topic 1, topic 2 silent everywhere.
#[test]
fn test_two_camp_scenario_separates_topics() {
    let rows: Vec<(String, Vec<f32>)> = vec![
        ("doc-1".to_string(), vec![0.95, 0.0, 0.0]),
        ("doc-2".to_string(), vec![0.85, 0.0, 0.0]),
        ("doc-3".to_string(), vec![0.0, 0.9, 0.0]),
        ("doc-4".to_string(), vec![0.0, 0.8, 0.0]),
    ];
    let matrix = aggregate(&rows, Reducer::Max).unwrap();
    let graph = build_graph(&matrix, &HashMap::new());

    // The orthogonal camps share no edge, and the silent topic is
    // isolated with floor size
    let idx = |t| graph.index_of(t).unwrap();
    for &(a, b, _) in graph.edges() {
        assert!(!(a == idx(0) && b == idx(1)));
    }
    assert!(graph.neighbors(idx(2)).is_empty());
    assert!(graph.node(idx(2)).size.abs() < 1e-9);

    // Across seeded runs, every algorithm that places both topics puts
    // them in different communities more often than the same one
    let mut separated = 0usize;
    let mut together = 0usize;
    for seed in [1, 2, 3, 4, 5] {
        let config = CommunityConfig {
            seed,
            ..CommunityConfig::default()
        };
        let report = DetectionEngine::new(&config).run(&graph);
        assert!(report.is_complete(), "failures: {:?}", report.failures);
        for assignment in report.assignments.values() {
            match (assignment.community_of(0), assignment.community_of(1)) {
                (Some(a), Some(b)) if a == b => together += 1,
                (Some(_), Some(_)) => separated += 1,
                // Spinglass legitimately omits isolated nodes
                _ => {}
            }
        }
    }
    assert!(
        separated > together,
        "separated {separated} vs together {together}"
    );
}

/// Spec scenario: two identical sentence vectors aggregate to the same
/// vector under both reducers.
#[test]
fn test_identical_sentences_aggregate_to_identity() {
    let rows = vec![
        ("doc-1".to_string(), vec![0.1, 0.9]),
        ("doc-1".to_string(), vec![0.1, 0.9]),
    ];
    for reducer in [Reducer::Max, Reducer::Mean] {
        let matrix = aggregate(&rows, reducer).unwrap();
        assert_eq!(matrix.document_count(), 1);
        assert_eq!(matrix.rows()[0].probabilities, vec![0.1, 0.9]);
    }
}

#[test]
fn test_report_round_trips_through_json() {
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    let graph = build_graph(&matrix, &two_block_labels());
    let report = DetectionEngine::default().run(&graph);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: frames_community::DetectionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.assignments.len(), report.assignments.len());
    for (name, assignment) in &report.assignments {
        let other = parsed.assignment(name).unwrap();
        assert_eq!(other.communities, assignment.communities);
    }
}

#[test]
fn test_community_of_helper_matches_assignments() {
    let matrix = aggregate(&two_block_rows(), Reducer::Max).unwrap();
    let graph = build_graph(&matrix, &two_block_labels());
    let report = DetectionEngine::default().run(&graph);
    for assignment in report.assignments.values() {
        for (&topic, &index) in &assignment.membership {
            assert_eq!(community_of(&assignment.communities, topic), Some(index));
        }
    }
}
