// ==========================================
// 缝制产线负荷排产系统 - 两阶段分配引擎
// ==========================================
// 阶段1 亲和优先:
//   需求按原始数量降序, 按 (款式, 尺码档) 候选列表依次分配,
//   每次分配 min(剩余需求, 剩余产能), 剩余需求 ≤ ε 即停止
// 阶段2 贪心补位:
//   剩余需求降序 × 剩余产能降序, 双游标逐对分配, 任一列表耗尽即结束
// 效率: 优先 (产线组, 款式) 历史均值, 否则产线组平均效率
// 红线:
// - 剩余需求 / 剩余产能单调不增
// - 状态只存在于本次运行的状态表, 以稳定下标访问
// ==========================================

use crate::domain::demand::{DemandLine, DemandLineId};
use crate::domain::group::{GroupIdx, ProductionGroup};
use crate::domain::plan::Allocation;
use crate::domain::types::AllocationPhase;
use crate::engine::affinity::AffinityIndex;
use crate::engine::size_classifier::classify_size;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// AllocationState - 分配状态表
// ==========================================
// 以 DemandLineId / GroupIdx 为下标的剩余量
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationState {
    demand_remaining: Vec<f64>,
    group_remaining: Vec<f64>,
}

impl AllocationState {
    pub fn new(demand: &[DemandLine], groups: &[ProductionGroup]) -> Self {
        let demand_len = demand.iter().map(|d| d.id.index() + 1).max().unwrap_or(0);
        let group_len = groups.iter().map(|g| g.idx.index() + 1).max().unwrap_or(0);

        let mut demand_remaining = vec![0.0; demand_len];
        for line in demand {
            demand_remaining[line.id.index()] = line.quantity;
        }
        let mut group_remaining = vec![0.0; group_len];
        for group in groups {
            group_remaining[group.idx.index()] = group.total_capacity;
        }

        Self {
            demand_remaining,
            group_remaining,
        }
    }

    pub fn remaining_demand(&self, id: DemandLineId) -> f64 {
        self.demand_remaining.get(id.index()).copied().unwrap_or(0.0)
    }

    pub fn remaining_capacity(&self, idx: GroupIdx) -> f64 {
        self.group_remaining.get(idx.index()).copied().unwrap_or(0.0)
    }

    /// 需求 → 产线组 转移数量（两侧同时扣减）
    fn transfer(&mut self, id: DemandLineId, idx: GroupIdx, quantity: f64) {
        debug_assert!(quantity >= 0.0);
        self.demand_remaining[id.index()] -= quantity;
        self.group_remaining[idx.index()] -= quantity;
    }

    /// 全部需求行剩余量之和
    pub fn total_unallocated(&self) -> f64 {
        self.demand_remaining.iter().sum()
    }
}

/// 单阶段统计
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStats {
    pub phase: AllocationPhase,
    pub allocations: usize,
    pub units: f64,
}

/// 分配结果
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// 按产生顺序（阶段1 在前）
    pub allocations: Vec<Allocation>,
    pub state: AllocationState,
    pub phase_stats: Vec<PhaseStats>,
}

impl AllocationOutcome {
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().map(|a| a.quantity).sum()
    }
}

// ==========================================
// AllocationEngine - 分配引擎
// ==========================================
pub struct AllocationEngine {
    epsilon: f64,
}

/// 单次运行的只读上下文
struct AllocationContext<'a> {
    groups_by_id: HashMap<&'a str, &'a ProductionGroup>,
    index: &'a AffinityIndex,
}

impl AllocationEngine {
    /// # 参数
    /// - epsilon: 剩余量 ≤ epsilon 视为耗尽
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// 执行两阶段分配
    #[instrument(skip_all, fields(
        demand_lines = demand.len(),
        groups = groups.len(),
        epsilon = self.epsilon
    ))]
    pub fn allocate(
        &self,
        demand: &[DemandLine],
        groups: &[ProductionGroup],
        index: &AffinityIndex,
    ) -> AllocationOutcome {
        let ctx = AllocationContext {
            groups_by_id: groups.iter().map(|g| (g.group_id.as_str(), g)).collect(),
            index,
        };
        let mut state = AllocationState::new(demand, groups);
        let mut allocations = Vec::new();

        self.run_affinity_phase(&ctx, demand, &mut state, &mut allocations);
        let affinity_count = allocations.len();
        self.run_greedy_phase(&ctx, demand, groups, &mut state, &mut allocations);

        let phase_stats = vec![
            Self::stats_of(AllocationPhase::Affinity, &allocations[..affinity_count]),
            Self::stats_of(AllocationPhase::Greedy, &allocations[affinity_count..]),
        ];

        debug!(
            allocations = allocations.len(),
            affinity_allocations = affinity_count,
            unallocated = state.total_unallocated(),
            "两阶段分配完成"
        );

        AllocationOutcome {
            allocations,
            state,
            phase_stats,
        }
    }

    // ==========================================
    // 阶段1: 亲和优先
    // ==========================================
    fn run_affinity_phase(
        &self,
        ctx: &AllocationContext<'_>,
        demand: &[DemandLine],
        state: &mut AllocationState,
        allocations: &mut Vec<Allocation>,
    ) {
        let mut order: Vec<&DemandLine> = demand.iter().collect();
        order.sort_by(|a, b| by_quantity_desc(a.quantity, b.quantity, a, b));

        let mut matched_lines = 0usize;
        for line in order {
            if !line.is_allocatable() {
                continue;
            }

            let size = classify_size(line.attributes.size_for_lookup());
            let candidates = ctx.index.candidates(&line.style, &size);
            let before = allocations.len();

            for candidate in candidates {
                let Some(group) = ctx.groups_by_id.get(candidate.group_id.as_str()) else {
                    continue;
                };

                let remaining = state.remaining_demand(line.id);
                let capacity = state.remaining_capacity(group.idx);
                if remaining <= 0.0 || capacity <= 0.0 {
                    continue;
                }

                self.assign(
                    ctx,
                    line,
                    group,
                    remaining.min(capacity),
                    capacity,
                    AllocationPhase::Affinity,
                    state,
                    allocations,
                );

                if state.remaining_demand(line.id) <= self.epsilon {
                    break;
                }
            }

            if allocations.len() > before {
                matched_lines += 1;
            }
        }

        debug!(matched_lines, "阶段1 亲和分配完成");
    }

    // ==========================================
    // 阶段2: 贪心补位
    // ==========================================
    fn run_greedy_phase(
        &self,
        ctx: &AllocationContext<'_>,
        demand: &[DemandLine],
        groups: &[ProductionGroup],
        state: &mut AllocationState,
        allocations: &mut Vec<Allocation>,
    ) {
        let mut pending: Vec<&DemandLine> = demand
            .iter()
            .filter(|d| state.remaining_demand(d.id) > self.epsilon)
            .collect();
        pending.sort_by(|a, b| {
            by_quantity_desc(state.remaining_demand(a.id), state.remaining_demand(b.id), a, b)
        });

        let mut open: Vec<&ProductionGroup> = groups
            .iter()
            .filter(|g| state.remaining_capacity(g.idx) > self.epsilon)
            .collect();
        open.sort_by(|a, b| {
            state
                .remaining_capacity(b.idx)
                .total_cmp(&state.remaining_capacity(a.idx))
                .then_with(|| a.group_id.cmp(&b.group_id))
        });

        debug!(
            pending_lines = pending.len(),
            open_groups = open.len(),
            "阶段2 贪心补位开始"
        );

        let (mut d_idx, mut g_idx) = (0usize, 0usize);
        while d_idx < pending.len() && g_idx < open.len() {
            let line = pending[d_idx];
            let group = open[g_idx];

            let remaining = state.remaining_demand(line.id);
            let capacity = state.remaining_capacity(group.idx);
            if remaining <= 0.0 {
                d_idx += 1;
                continue;
            }
            if capacity <= 0.0 {
                g_idx += 1;
                continue;
            }

            self.assign(
                ctx,
                line,
                group,
                remaining.min(capacity),
                capacity,
                AllocationPhase::Greedy,
                state,
                allocations,
            );

            if state.remaining_demand(line.id) <= self.epsilon {
                d_idx += 1;
            }
            if state.remaining_capacity(group.idx) <= self.epsilon {
                g_idx += 1;
            }
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 记录一次分配并扣减状态
    #[allow(clippy::too_many_arguments)]
    fn assign(
        &self,
        ctx: &AllocationContext<'_>,
        line: &DemandLine,
        group: &ProductionGroup,
        quantity: f64,
        capacity_before: f64,
        phase: AllocationPhase,
        state: &mut AllocationState,
        allocations: &mut Vec<Allocation>,
    ) {
        let efficiency = ctx
            .index
            .group_style_efficiency(&group.group_id, &line.style)
            .unwrap_or(group.avg_efficiency);

        allocations.push(Allocation {
            seq_no: allocations.len() + 1,
            demand_id: line.id,
            group_idx: group.idx,
            group_id: group.group_id.clone(),
            style: line.style.clone(),
            attributes: line.attributes.clone(),
            quantity,
            efficiency,
            headcount: group.headcount,
            group_capacity_before: capacity_before,
            phase,
        });
        state.transfer(line.id, group.idx, quantity);
    }

    fn stats_of(phase: AllocationPhase, allocations: &[Allocation]) -> PhaseStats {
        PhaseStats {
            phase,
            allocations: allocations.len(),
            units: allocations.iter().map(|a| a.quantity).sum(),
        }
    }
}

/// 数量降序, 并列按原始行号升序
fn by_quantity_desc(qa: f64, qb: f64, a: &DemandLine, b: &DemandLine) -> Ordering {
    qb.total_cmp(&qa).then_with(|| a.row_index.cmp(&b.row_index))
}
