// ==========================================
// 孔网导入集成测试
// ==========================================
// 测试目标: CSV 文件 → 炮孔/连接 → 起爆时序
// ==========================================


use drill_blast_engine::config::EngineConfig;
use drill_blast_engine::domain::{ConnectorType, SiteScope};
use drill_blast_engine::engine::{BlastNetworkBuilder, DetonationScheduler};
use drill_blast_engine::importer::{ImportError, PatternImporter};
use drill_blast_engine::logging;
use test_helpers::write_temp_csv;

fn scope() -> SiteScope {
    SiteScope::new(12, 3)
}

#[test]
fn test_import_points_from_csv() {
    logging::init_test();

    let file = write_temp_csv(&[
        "Hole_ID,Easting,Northing,Depth,Spacing,Burden,Diameter,Stemming",
        "B1,512340.004,7210005.001,12,3.5,2.8,0.115,3",
        "B2,512343.504,7210005.003,12,3.5,2.8,0.115,3",
        "B3,not-a-number,7210005,12,3.5,2.8,,",
        "B4,512340.001,7210005.002,12,3.5,2.8,,",
        "B5,512347.0,7210005.0,11.5,3.5,2.8,,",
    ])
    .expect("Failed to write csv");

    let importer = PatternImporter::new(EngineConfig::default());
    let report = importer
        .import_points(file.path(), scope())
        .expect("import should succeed");

    assert_eq!(report.total_rows, 5);
    let ids: Vec<&str> = report.records.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2", "B5"]);

    // 坐标舍入到 2 位小数
    assert_eq!(report.records[0].x, 512340.0);
    assert_eq!(report.records[1].x, 512343.5);
    assert_eq!(report.records[0].diameter, 0.115);
    assert_eq!(report.records[2].depth, 11.5);
    assert!(report.records.iter().all(|p| p.scope == scope()));

    // B3 类型错误, B4 与 B1 重合
    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.row_number).collect();
    assert_eq!(skipped, vec![3, 4]);
    assert!(!report.batch_id.is_empty());
}

#[test]
fn test_import_connections_and_schedule() {
    logging::init_test();

    let points_file = write_temp_csv(&["id,x,y", "A,0,0", "B,3,0", "C,6,0"]).unwrap();
    let edges_file = write_temp_csv(&[
        "connection_id,from,to,type,delay_ms,seq,starting",
        "c1,A,B,detonating_cord,100,1,true",
        "c2,B,C,1,150,2,false",
        ",A,C,connectors,50,3,",
    ])
    .unwrap();

    let importer = PatternImporter::new(EngineConfig::default());
    let points = importer.import_points(points_file.path(), scope()).unwrap();
    let edges = importer.import_connections(edges_file.path()).unwrap();

    assert_eq!(edges.records.len(), 3);
    assert!(edges.skipped.is_empty());
    assert_eq!(edges.records[1].connector_type, ConnectorType::Connectors);
    // 缺少编号的连接自动生成 UUID
    assert_eq!(edges.records[2].id.len(), 36);

    let network = BlastNetworkBuilder::new(EngineConfig::default())
        .build(&points.records, &edges.records)
        .unwrap();
    let schedule = DetonationScheduler::new().schedule(&network).unwrap();
    assert_eq!(schedule.time_of("C"), Some(250));
}

#[test]
fn test_import_stops_at_configured_ceiling() {
    let mut config = EngineConfig::default();
    config.max_drill_points = 3;

    let file = write_temp_csv(&[
        "id,x,y",
        "H1,0,0",
        "H2,3,0",
        "H3,6,0",
        "H4,9,0",
        "H5,12,0",
    ])
    .unwrap();

    let report = PatternImporter::new(config)
        .import_points(file.path(), scope())
        .unwrap();
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.skipped.len(), 2);
}

#[test]
fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let result = PatternImporter::new(EngineConfig::default()).import_points(file.path(), scope());
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file() {
    let result = PatternImporter::new(EngineConfig::default())
        .import_connections("/nonexistent/connections.csv");
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}
