use super::*;
use crate::config::EngineConfig;
use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::domain::types::SiteScope;
use crate::engine::error::EngineError;

fn points(ids: &[&str]) -> Vec<DrillPoint> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| DrillPoint::new(*id, SiteScope::new(1, 1), i as f64 * 3.0, 0.0))
        .collect()
}

fn builder() -> BlastNetworkBuilder {
    BlastNetworkBuilder::new(EngineConfig::default())
}

fn explicit_only() -> BlastNetworkBuilder {
    let mut config = EngineConfig::default();
    config.implicit_entry_points = false;
    BlastNetworkBuilder::new(config)
}

// ==========================================
// 正常构建
// ==========================================

#[test]
fn test_build_chain() {
    let pts = points(&["A", "B", "C"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 100).starting(),
        ConnectorEdge::new("e2", "B", "C", 150),
    ];

    let network = builder().build(&pts, &edges).unwrap();
    assert_eq!(network.point_count(), 3);
    assert_eq!(network.edge_count(), 2);
    assert_eq!(network.entry_ids(), vec!["A"]);

    let a = network.index_of("A").unwrap();
    let b = network.index_of("B").unwrap();
    assert_eq!(network.outgoing(a)[0].target, b);
    assert_eq!(network.outgoing(a)[0].delay_ms, 100);
    assert_eq!(network.in_degree(b), 1);

    let order: Vec<&str> = network
        .topological_order()
        .iter()
        .filter_map(|idx| network.point(*idx))
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn test_accessors_tolerate_out_of_range_index() {
    let pts = points(&["A", "B"]);
    let edges = vec![ConnectorEdge::new("e1", "A", "B", 10)];
    let network = builder().build(&pts, &edges).unwrap();

    let missing = network.point_count();
    assert!(network.point(missing).is_none());
    assert!(network.outgoing(missing).is_empty());
    assert_eq!(network.in_degree(missing), 0);
    assert!(!network.is_entry(missing));
    assert_eq!(network.hole_sequence(missing), None);
}

#[test]
fn test_no_edges_every_point_is_entry() {
    let pts = points(&["A", "B"]);
    let network = builder().build(&pts, &[]).unwrap();
    assert_eq!(network.entry_ids(), vec!["A", "B"]);
}

#[test]
fn test_empty_network() {
    let network = builder().build(&[], &[]).unwrap();
    assert_eq!(network.point_count(), 0);
    assert!(network.topological_order().is_empty());
}

#[test]
fn test_topological_order_respects_every_edge() {
    let pts = points(&["D", "C", "B", "A"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10),
        ConnectorEdge::new("e2", "A", "C", 10),
        ConnectorEdge::new("e3", "B", "D", 10),
        ConnectorEdge::new("e4", "C", "D", 10),
    ];
    let network = builder().build(&pts, &edges).unwrap();

    let order = network.topological_order();
    let position = |id: &str| {
        let idx = network.index_of(id).unwrap();
        order.iter().position(|v| *v == idx).unwrap()
    };
    for edge in &edges {
        assert!(position(&edge.from_id) < position(&edge.to_id));
    }
}

#[test]
fn test_hole_sequence_prefers_incoming_minimum() {
    let pts = points(&["A", "B", "C"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "C", 100).with_sequence(7),
        ConnectorEdge::new("e2", "B", "C", 100).with_sequence(3),
        ConnectorEdge::new("e3", "A", "B", 50).with_sequence(5),
    ];
    let network = builder().build(&pts, &edges).unwrap();

    // A 无入边,取出边最小值
    assert_eq!(network.hole_sequence(network.index_of("A").unwrap()), Some(5));
    assert_eq!(network.hole_sequence(network.index_of("B").unwrap()), Some(5));
    assert_eq!(network.hole_sequence(network.index_of("C").unwrap()), Some(3));
}

#[test]
fn test_isolated_point_has_no_sequence() {
    let pts = points(&["A", "B", "Z"]);
    let edges = vec![ConnectorEdge::new("e1", "A", "B", 100)];
    let network = builder().build(&pts, &edges).unwrap();
    assert_eq!(network.hole_sequence(network.index_of("Z").unwrap()), None);
}

// ==========================================
// 结构错误
// ==========================================

#[test]
fn test_duplicate_point_id() {
    let pts = points(&["A", "B", "A"]);
    assert_eq!(
        builder().build(&pts, &[]).unwrap_err(),
        EngineError::DuplicatePoint {
            point_id: "A".to_string()
        }
    );
}

#[test]
fn test_dangling_edge_checks_from_before_to() {
    let pts = points(&["A"]);
    let edges = vec![ConnectorEdge::new("e1", "X", "Y", 10)];
    assert_eq!(
        builder().build(&pts, &edges).unwrap_err(),
        EngineError::DanglingEdge {
            edge_id: "e1".to_string(),
            missing_point_id: "X".to_string()
        }
    );

    let edges = vec![ConnectorEdge::new("e2", "A", "Y", 10)];
    assert_eq!(
        builder().build(&pts, &edges).unwrap_err(),
        EngineError::DanglingEdge {
            edge_id: "e2".to_string(),
            missing_point_id: "Y".to_string()
        }
    );
}

#[test]
fn test_dangling_reported_before_self_loop() {
    // 自环在前、悬空在后,仍先报告悬空
    let pts = points(&["A"]);
    let edges = vec![
        ConnectorEdge::new("loop", "A", "A", 10),
        ConnectorEdge::new("dangling", "A", "Q", 10),
    ];
    assert!(matches!(
        builder().build(&pts, &edges),
        Err(EngineError::DanglingEdge { .. })
    ));
}

#[test]
fn test_self_loop() {
    let pts = points(&["A", "B"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10),
        ConnectorEdge::new("e2", "B", "B", 10),
    ];
    assert_eq!(
        builder().build(&pts, &edges).unwrap_err(),
        EngineError::SelfLoop {
            edge_id: "e2".to_string()
        }
    );
}

#[test]
fn test_duplicate_edge_ignores_delay_difference() {
    let pts = points(&["A", "B"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10),
        ConnectorEdge::new("e2", "A", "B", 42),
    ];
    assert_eq!(
        builder().build(&pts, &edges).unwrap_err(),
        EngineError::DuplicateEdge {
            from_id: "A".to_string(),
            to_id: "B".to_string()
        }
    );
}

#[test]
fn test_two_hole_cycle_reports_members() {
    let pts = points(&["A", "B"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10),
        ConnectorEdge::new("e2", "B", "A", 10),
    ];

    match builder().build(&pts, &edges) {
        Err(EngineError::CycleDetected { cycle }) => {
            assert_eq!(cycle.len(), 2);
            assert!(cycle.contains(&"A".to_string()));
            assert!(cycle.contains(&"B".to_string()));
        }
        other => panic!("expected cycle, got {:?}", other),
    }
}

#[test]
fn test_cycle_with_marked_start() {
    let pts = points(&["A", "B", "C", "D"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10).starting(),
        ConnectorEdge::new("e2", "B", "C", 10),
        ConnectorEdge::new("e3", "C", "D", 10),
        ConnectorEdge::new("e4", "D", "B", 10),
    ];

    match builder().build(&pts, &edges) {
        Err(EngineError::CycleDetected { cycle }) => {
            // 按遍历顺序,A 不在环上
            assert_eq!(cycle, vec!["B", "C", "D"]);
        }
        other => panic!("expected cycle, got {:?}", other),
    }
}

#[test]
fn test_no_starting_hole_in_explicit_mode() {
    let pts = points(&["A", "B"]);
    let edges = vec![ConnectorEdge::new("e1", "A", "B", 10)];
    assert_eq!(
        explicit_only().build(&pts, &edges).unwrap_err(),
        EngineError::NoStartingHole
    );

    // 无连接时不要求起爆孔
    assert!(explicit_only().build(&pts, &[]).is_ok());
}

#[test]
fn test_explicit_mode_isolated_holes_are_entries() {
    let pts = points(&["A", "B"]);
    let network = explicit_only().build(&pts, &[]).unwrap();
    assert_eq!(network.entry_ids(), vec!["A", "B"]);

    // 孤立孔不能充当网络的起爆孔
    let pts = points(&["A", "B", "C"]);
    let edges = vec![ConnectorEdge::new("e1", "A", "B", 10)];
    assert_eq!(
        explicit_only().build(&pts, &edges).unwrap_err(),
        EngineError::NoStartingHole
    );

    let edges = vec![ConnectorEdge::new("e1", "A", "B", 10).starting()];
    let network = explicit_only().build(&pts, &edges).unwrap();
    assert_eq!(network.entry_ids(), vec!["A", "C"]);
}

#[test]
fn test_explicit_mode_only_marks_flagged_sources() {
    let pts = points(&["A", "B", "C"]);
    let edges = vec![
        ConnectorEdge::new("e1", "A", "B", 10).starting(),
        ConnectorEdge::new("e2", "C", "B", 10),
    ];
    let network = explicit_only().build(&pts, &edges).unwrap();
    assert_eq!(network.entry_ids(), vec!["A"]);
}

#[test]
fn test_network_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BlastNetwork>();
}
