// ==========================================
// 缝制产线负荷排产系统 - 排产 API
// ==========================================
// 职责: 读取配置 → 加载输入表 → 执行排产 → 返回完整结果
// 红线: 每次调用重新读取参数并独立构造引擎状态
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{PlanningConfigReader, PlanningParams};
use crate::domain::plan::PlanResult;
use crate::engine::events::{PlanningObserver, TracingObserver};
use crate::engine::orchestrator::PlanOrchestrator;
use crate::importer::file_parser::{PlanningTables, UniversalFileParser};
use crate::importer::raw_table::RawTable;
use tracing::{info, instrument};

// ==========================================
// PlanApi - 排产 API
// ==========================================

/// 排产API
///
/// 职责：
/// 1. 从配置读取排产参数
/// 2. 工作簿 / CSV 输入加载
/// 3. 执行一次完整排产
pub struct PlanApi<C>
where
    C: PlanningConfigReader,
{
    config: Arc<C>,
    observer: Arc<dyn PlanningObserver>,
    parser: UniversalFileParser,
}

impl<C> PlanApi<C>
where
    C: PlanningConfigReader,
{
    /// 创建排产API（观测事件输出到 tracing）
    pub fn new(config: Arc<C>) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: Arc<C>, observer: Arc<dyn PlanningObserver>) -> Self {
        Self {
            config,
            observer,
            parser: UniversalFileParser,
        }
    }

    /// 当前生效的排产参数
    pub fn planning_params(&self) -> ApiResult<PlanningParams> {
        self.config
            .planning_params()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 对两张输入表执行排产
    #[instrument(skip_all, fields(demand_rows = demand.len(), group_rows = groups.len()))]
    pub fn generate_plan(&self, demand: &RawTable, groups: &RawTable) -> ApiResult<PlanResult> {
        let params = self.planning_params()?;
        let orchestrator = PlanOrchestrator::with_observer(params, self.observer.clone());
        let result = orchestrator.run(demand, groups)?;
        Ok(result)
    }

    /// 从工作簿（demand_forecast / Output_forecast 两个工作表）排产
    pub fn generate_plan_from_workbook<P: AsRef<Path>>(&self, path: P) -> ApiResult<PlanResult> {
        info!(path = %path.as_ref().display(), "加载排产工作簿");
        let tables = self.parser.load_workbook(path)?;
        self.generate_from_tables(tables)
    }

    /// 从需求 CSV + 产线组 CSV 排产
    pub fn generate_plan_from_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        demand_path: P,
        groups_path: Q,
    ) -> ApiResult<PlanResult> {
        info!(
            demand = %demand_path.as_ref().display(),
            groups = %groups_path.as_ref().display(),
            "加载排产 CSV"
        );
        let tables = self.parser.load_csv_pair(demand_path, groups_path)?;
        self.generate_from_tables(tables)
    }

    fn generate_from_tables(&self, tables: PlanningTables) -> ApiResult<PlanResult> {
        self.generate_plan(&tables.demand, &tables.groups)
    }
}
