// ==========================================
// 穿孔爆破引擎 - 起爆时序 API
// ==========================================
// 职责: 构建起爆网络 → 计算时序 → 汇总波次统计
// 并发: 多个场地网络互相独立,放入 tokio 阻塞线程池并行计算;
//       单个网络内部不并行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigResult, EngineConfig, EngineConfigReader};
use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::domain::schedule::{InitiationSchedule, ScheduleStatistics};
use crate::domain::types::SiteScope;
use crate::engine::{BlastNetwork, BlastNetworkBuilder, DetonationScheduler};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// 单个场地的时序计算结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport {
    pub scope: SiteScope,
    /// 起爆孔编号（按输入顺序）
    pub entry_ids: Vec<String>,
    pub schedule: InitiationSchedule,
    pub statistics: ScheduleStatistics,
}

/// 批量计算任务
#[derive(Debug, Clone)]
pub struct SimulationJob {
    pub scope: SiteScope,
    pub points: Vec<DrillPoint>,
    pub edges: Vec<ConnectorEdge>,
}

// ==========================================
// SequenceApi - 起爆时序 API
// ==========================================
pub struct SequenceApi<C>
where
    C: EngineConfigReader,
{
    config_reader: Arc<C>,
}

impl<C> SequenceApi<C>
where
    C: EngineConfigReader,
{
    pub fn new(config_reader: Arc<C>) -> Self {
        Self { config_reader }
    }

    /// 构建并校验起爆网络（可在多次计算间共享）
    #[instrument(skip(self, points, edges), fields(holes = points.len(), edges = edges.len()))]
    pub async fn build_network(
        &self,
        scope: SiteScope,
        points: &[DrillPoint],
        edges: &[ConnectorEdge],
    ) -> ApiResult<Arc<BlastNetwork>> {
        let config = self.config_reader.get_engine_config(Some(scope)).await?;
        let network = BlastNetworkBuilder::new(config)
            .build(points, edges)
            .map_err(|e| {
                warn!(scope = %scope, error = %e, "起爆网络校验未通过");
                ApiError::from(e)
            })?;

        debug!(scope = %scope, entries = network.entry_ids().len(), "起爆网络构建完成");
        Ok(Arc::new(network))
    }

    /// 单场地时序计算
    #[instrument(skip(self, points, edges), fields(holes = points.len(), edges = edges.len()))]
    pub async fn simulate(
        &self,
        scope: SiteScope,
        points: &[DrillPoint],
        edges: &[ConnectorEdge],
    ) -> ApiResult<SequenceReport> {
        let network = self.build_network(scope, points, edges).await?;
        schedule_network(scope, &network)
    }

    /// 多场地并行时序计算
    ///
    /// 结果顺序与输入任务一致; 单个任务失败不影响其他任务
    pub async fn simulate_many(&self, jobs: Vec<SimulationJob>) -> Vec<ApiResult<SequenceReport>> {
        let start = Instant::now();
        let job_count = jobs.len();
        info!(jobs = job_count, "开始批量计算起爆时序");

        let mut handles = Vec::with_capacity(job_count);
        for job in jobs {
            let config = self.config_reader.get_engine_config(Some(job.scope)).await;
            handles.push(spawn_job(config, job));
        }

        let results = join_all(handles).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            jobs = job_count,
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "批量计算起爆时序完成"
        );
        results
    }
}

/// 在已构建的网络上计算时序与统计
pub fn schedule_network(scope: SiteScope, network: &BlastNetwork) -> ApiResult<SequenceReport> {
    let scheduler = DetonationScheduler::new();
    let schedule = scheduler.schedule(network).map_err(|e| {
        warn!(scope = %scope, error = %e, "起爆时序计算失败");
        ApiError::from(e)
    })?;
    let statistics = scheduler.statistics(&schedule);

    info!(
        scope = %scope,
        holes = statistics.hole_count,
        waves = statistics.wave_count,
        total_ms = statistics.total_duration_ms,
        "起爆时序计算完成"
    );

    Ok(SequenceReport {
        scope,
        entry_ids: network.entry_ids().into_iter().map(String::from).collect(),
        schedule,
        statistics,
    })
}

async fn spawn_job(
    config: ConfigResult<EngineConfig>,
    job: SimulationJob,
) -> ApiResult<SequenceReport> {
    let config = config?;
    tokio::task::spawn_blocking(move || run_job(config, job))
        .await
        .map_err(|e| {
            error!(error = %e, "时序计算任务异常退出");
            ApiError::InternalError(format!("时序计算任务异常退出: {}", e))
        })?
}

fn run_job(config: EngineConfig, job: SimulationJob) -> ApiResult<SequenceReport> {
    let network = BlastNetworkBuilder::new(config)
        .build(&job.points, &job.edges)
        .map_err(|e| {
            warn!(scope = %job.scope, error = %e, "起爆网络校验未通过");
            ApiError::from(e)
        })?;
    schedule_network(job.scope, &network)
}
