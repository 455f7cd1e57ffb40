// ==========================================
// 缝制产线负荷排产系统 - 排产过程观测
// ==========================================
// 职责: 定义排产事件与观测者 trait
// 说明: 引擎只负责发出结构化事件（计数 / 耗时）, 不持有输出渠道
// ==========================================

use crate::domain::types::AllocationPhase;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

// ==========================================
// 排产事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlanningEvent {
    /// 输入规范化完成
    InputNormalized {
        demand_lines: usize,
        group_records: usize,
        horizon_weeks: usize,
    },
    /// 亲和索引构建完成
    AffinityIndexBuilt {
        style_size_entries: usize,
        group_style_pairs: usize,
    },
    /// 产线组产能计算完成
    CapacityComputed { groups: usize, total_capacity: f64 },
    /// 单个分配阶段完成
    PhaseCompleted {
        phase: AllocationPhase,
        allocations: usize,
        units: f64,
    },
    /// 班次排程生成完成
    ScheduleGenerated { slots: usize, idle_slots: usize },
    /// 运行结束
    RunFinished {
        run_id: String,
        elapsed_ms: u64,
        unallocated_qty: f64,
    },
}

impl PlanningEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PlanningEvent::InputNormalized { .. } => "input_normalized",
            PlanningEvent::AffinityIndexBuilt { .. } => "affinity_index_built",
            PlanningEvent::CapacityComputed { .. } => "capacity_computed",
            PlanningEvent::PhaseCompleted { .. } => "phase_completed",
            PlanningEvent::ScheduleGenerated { .. } => "schedule_generated",
            PlanningEvent::RunFinished { .. } => "run_finished",
        }
    }
}

// ==========================================
// 观测者 Trait
// ==========================================

/// 排产观测者
///
/// 编排器在每个阶段结束时调用; 实现方不得影响排产结果
pub trait PlanningObserver: Send + Sync {
    fn on_event(&self, event: &PlanningEvent);
}

/// 空操作观测者
#[derive(Debug, Clone, Default)]
pub struct NoOpObserver;

impl PlanningObserver for NoOpObserver {
    fn on_event(&self, _event: &PlanningEvent) {}
}

/// 以 tracing 事件输出的观测者
#[derive(Debug, Clone, Default)]
pub struct TracingObserver;

impl PlanningObserver for TracingObserver {
    fn on_event(&self, event: &PlanningEvent) {
        match event {
            PlanningEvent::PhaseCompleted {
                phase,
                allocations,
                units,
            } => {
                tracing::info!(
                    target: "planning",
                    phase = %phase,
                    allocations,
                    units,
                    "分配阶段完成"
                );
            }
            PlanningEvent::RunFinished {
                run_id,
                elapsed_ms,
                unallocated_qty,
            } => {
                tracing::info!(
                    target: "planning",
                    run_id = %run_id,
                    elapsed_ms,
                    unallocated_qty,
                    "排产运行结束"
                );
            }
            other => {
                tracing::debug!(
                    target: "planning",
                    event = other.name(),
                    detail = ?other,
                    "排产事件"
                );
            }
        }
    }
}

/// 记录全部事件的观测者（测试 / 诊断用）
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PlanningEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录事件的副本
    pub fn events(&self) -> Vec<PlanningEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PlanningObserver for RecordingObserver {
    fn on_event(&self, event: &PlanningEvent) {
        let mut guard = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&PlanningEvent::CapacityComputed {
            groups: 2,
            total_capacity: 100.0,
        });
        observer.on_event(&PlanningEvent::PhaseCompleted {
            phase: AllocationPhase::Greedy,
            allocations: 1,
            units: 50.0,
        });

        let names: Vec<&str> = observer.events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["capacity_computed", "phase_completed"]);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&PlanningEvent::ScheduleGenerated {
            slots: 24,
            idle_slots: 12,
        })
        .unwrap();
        assert!(json.contains("\"event\":\"schedule_generated\""));
    }

    #[test]
    fn test_noop_and_tracing_observers_accept_events() {
        let event = PlanningEvent::RunFinished {
            run_id: "R1".to_string(),
            elapsed_ms: 3,
            unallocated_qty: 0.0,
        };
        NoOpObserver.on_event(&event);
        TracingObserver.on_event(&event);
    }
}
