// ==========================================
// 穿孔爆破引擎 - 命令行入口
// ==========================================
// 用法: drill-blast-engine <points-file> [connections-file] [config-db]
// 输出: stdout 打印 JSON 报告; 日志写 stderr
// ==========================================

use anyhow::{bail, Context};
use drill_blast_engine::api::{
    ChargeAdvice, PatternAnalysis, PatternApi, PatternImport, SequenceApi, SequenceReport,
};
use drill_blast_engine::config::{ConfigManager, EngineConfigReader, StaticConfigReader};
use drill_blast_engine::domain::SiteScope;
use drill_blast_engine::logging;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// 命令行未区分项目/场地,统一使用该作用域读取覆写
const CLI_SCOPE: SiteScope = SiteScope {
    project_id: 0,
    site_id: 0,
};

const USAGE: &str = "用法: drill-blast-engine <points-file> [connections-file] [config-db]";

#[derive(Serialize)]
struct CliReport {
    version: &'static str,
    import: PatternImport,
    analysis: PatternAnalysis,
    charge: Vec<ChargeAdvice>,
    sequence: SequenceReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{}", USAGE);
        bail!("缺少炮孔文件参数");
    }

    let points_path = PathBuf::from(&args[0]);
    let connections_path = args.get(1).map(PathBuf::from);

    tracing::info!(version = drill_blast_engine::VERSION, "{} 启动", drill_blast_engine::APP_NAME);

    let report = match args.get(2) {
        Some(db_path) => {
            tracing::info!(db_path = %db_path, "使用配置数据库");
            let manager = ConfigManager::new(db_path)
                .with_context(|| format!("无法打开配置数据库: {}", db_path))?;
            run(Arc::new(manager), points_path, connections_path).await?
        }
        None => run(Arc::new(StaticConfigReader::default()), points_path, connections_path).await?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run<C: EngineConfigReader>(
    config_reader: Arc<C>,
    points_path: PathBuf,
    connections_path: Option<PathBuf>,
) -> anyhow::Result<CliReport> {
    let pattern_api = PatternApi::new(Arc::clone(&config_reader));
    let sequence_api = SequenceApi::new(config_reader);

    let import = pattern_api
        .import_pattern(CLI_SCOPE, &points_path, connections_path.as_deref())
        .await
        .context("孔网文件导入失败")?;

    let points = &import.points.records;
    let edges = import
        .connections
        .as_ref()
        .map(|c| c.records.clone())
        .unwrap_or_default();

    let analysis = pattern_api
        .analyze_pattern(CLI_SCOPE, points)
        .await
        .context("孔网分析失败")?;
    let charge = points.iter().map(|p| pattern_api.charge_advice(p)).collect();

    let sequence = sequence_api
        .simulate(CLI_SCOPE, points, &edges)
        .await
        .context("起爆时序计算失败")?;

    Ok(CliReport {
        version: drill_blast_engine::VERSION,
        import,
        analysis,
        charge,
        sequence,
    })
}
