// ==========================================
// 缝制产线负荷排产系统 - 引擎编排器
// ==========================================
// 用途: 协调 规范化 → 亲和索引 → 产能 → 分配 → KPI → 排程 → 报表
// 红线:
// - 每次运行独立构造全部状态, 不跨运行共享
// - 全有或全无: 出错不返回部分结果
// ==========================================

use crate::config::PlanningParams;
use crate::domain::plan::PlanResult;
use crate::engine::affinity::AffinityIndexBuilder;
use crate::engine::allocation::AllocationEngine;
use crate::engine::capacity_model::CapacityModel;
use crate::engine::error::PlanError;
use crate::engine::events::{NoOpObserver, PlanningEvent, PlanningObserver};
use crate::engine::kpi::KpiCalculator;
use crate::engine::normalizer::InputNormalizer;
use crate::engine::report::ReportBuilder;
use crate::engine::schedule::ScheduleGenerator;
use crate::importer::raw_table::RawTable;
use crate::perf::PerfGuard;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// PlanOrchestrator - 引擎编排器
// ==========================================

pub struct PlanOrchestrator {
    params: PlanningParams,
    observer: Arc<dyn PlanningObserver>,
    normalizer: InputNormalizer,
    affinity: AffinityIndexBuilder,
    model: CapacityModel,
    allocator: AllocationEngine,
    kpi: KpiCalculator,
    scheduler: ScheduleGenerator,
    reports: ReportBuilder,
}

impl PlanOrchestrator {
    /// 创建新的编排器实例（不输出观测事件）
    ///
    /// # 参数
    /// - params: 已校验的排产参数
    pub fn new(params: PlanningParams) -> Self {
        Self::with_observer(params, Arc::new(NoOpObserver))
    }

    /// 创建带观测者的编排器实例
    pub fn with_observer(params: PlanningParams, observer: Arc<dyn PlanningObserver>) -> Self {
        let model = CapacityModel::new(params.clone());
        Self {
            normalizer: InputNormalizer::new(),
            affinity: AffinityIndexBuilder::new(),
            allocator: AllocationEngine::new(params.allocation_epsilon),
            kpi: KpiCalculator::new(),
            scheduler: ScheduleGenerator::new(model.clone()),
            reports: ReportBuilder::new(model.clone()),
            model,
            observer,
            params,
        }
    }

    pub fn params(&self) -> &PlanningParams {
        &self.params
    }

    /// 执行完整排产流程
    ///
    /// # 参数
    /// - demand: 需求表
    /// - groups: 产线组绩效表
    ///
    /// # 错误
    /// - PlanError::Validation / PlanError::Horizon: 输入不合法, 未做任何分配
    /// - PlanError::Internal: 结果自检失败
    pub fn run(&self, demand: &RawTable, groups: &RawTable) -> Result<PlanResult, PlanError> {
        let mut perf = PerfGuard::new("plan_run");
        let run_id = Uuid::new_v4().to_string();

        info!(
            run_id = %run_id,
            demand_rows = demand.len(),
            group_rows = groups.len(),
            "开始执行排产流程"
        );

        // ==========================================
        // 步骤1: 输入规范化
        // ==========================================
        debug!("步骤1: 输入规范化");
        let input = self.normalizer.normalize(demand, groups)?;
        let horizon = input.horizon();
        self.emit(PlanningEvent::InputNormalized {
            demand_lines: input.demand_lines.len(),
            group_records: input.group_records.len(),
            horizon_weeks: horizon,
        });

        // ==========================================
        // 步骤2: 亲和索引
        // ==========================================
        debug!("步骤2: 构建亲和索引");
        let index = self.affinity.build(&input.group_records);
        self.emit(PlanningEvent::AffinityIndexBuilt {
            style_size_entries: index.entry_count(),
            group_style_pairs: index.pairing_count(),
        });

        // ==========================================
        // 步骤3: 产线组产能
        // ==========================================
        debug!("步骤3: 计算产线组产能");
        let production_groups = self.model.build_groups(&input.group_records, horizon);
        self.emit(PlanningEvent::CapacityComputed {
            groups: production_groups.len(),
            total_capacity: production_groups.iter().map(|g| g.total_capacity).sum(),
        });

        // ==========================================
        // 步骤4: 两阶段分配
        // ==========================================
        debug!("步骤4: 两阶段分配");
        let outcome = self
            .allocator
            .allocate(&input.demand_lines, &production_groups, &index);
        for stats in &outcome.phase_stats {
            self.emit(PlanningEvent::PhaseCompleted {
                phase: stats.phase,
                allocations: stats.allocations,
                units: stats.units,
            });
        }

        // ==========================================
        // 步骤5: KPI
        // ==========================================
        debug!("步骤5: 计算 KPI");
        let total_demand = input.total_demand();
        let kpi = self.kpi.calculate(
            total_demand,
            &production_groups,
            &outcome.allocations,
            &outcome.state,
        );
        Self::check_conservation(total_demand, kpi.total_allocated, kpi.unallocated_qty)?;

        // ==========================================
        // 步骤6: 班次排程
        // ==========================================
        debug!("步骤6: 生成班次排程");
        let detailed_plan =
            self.scheduler.generate(&production_groups, &outcome.allocations, &input.weeks);
        self.emit(PlanningEvent::ScheduleGenerated {
            slots: detailed_plan.len(),
            idle_slots: detailed_plan.iter().filter(|s| s.is_idle()).count(),
        });

        // ==========================================
        // 步骤7: 报表
        // ==========================================
        debug!("步骤7: 汇总报表");
        let summary = self.reports.group_summary(&outcome.allocations, horizon);
        let demand_details = self.reports.demand_details(&input.demand_lines);
        let weekly_group_efficiency = self.reports.weekly_efficiency(&detailed_plan);

        perf.record_items(outcome.allocations.len());
        self.emit(PlanningEvent::RunFinished {
            run_id: run_id.clone(),
            elapsed_ms: perf.elapsed_ms(),
            unallocated_qty: kpi.unallocated_qty,
        });

        info!(
            run_id = %run_id,
            allocations = outcome.allocations.len(),
            total_allocated = kpi.total_allocated,
            unallocated_qty = kpi.unallocated_qty,
            cap_utilization = kpi.cap_utilization,
            "排产流程完成"
        );

        Ok(PlanResult {
            run_id,
            generated_at: Utc::now(),
            kpi,
            summary,
            demand_details,
            detailed_plan,
            planning_horizon: horizon,
            weekly_group_efficiency,
            allocations: outcome.allocations,
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn emit(&self, event: PlanningEvent) {
        self.observer.on_event(&event);
    }

    /// 已分配 + 未分配 = 初始需求
    fn check_conservation(
        total_demand: f64,
        allocated: f64,
        unallocated: f64,
    ) -> Result<(), PlanError> {
        let tolerance = 1e-6 * total_demand.abs().max(1.0);
        let drift = (allocated + unallocated - total_demand).abs();
        if drift > tolerance {
            return Err(PlanError::Internal(format!(
                "数量守恒校验失败: 已分配 {allocated} + 未分配 {unallocated} ≠ 需求 {total_demand}"
            )));
        }
        Ok(())
    }
}
