// ==========================================
// 缝制产线负荷排产系统 - 班次排程生成
// ==========================================
// 规则（周内零换款）:
// - 每个有分配的产线组, 任务队列 = 该组分配记录（按分配产生顺序）
// - 逐周（升序）: 队列为空 → 整周空闲; 否则取队首任务
//   本周数量 = min(任务剩余, 周产能), 平均摊入每个班次, 全周同一款式
// - 任务剩余 ≤ 阈值 → 下一周才切换到下个任务, 本周剩余产能闲置
// 输出排序: (周, 产线组, 班次)
// ==========================================

use crate::domain::demand::DemandAttributes;
use crate::domain::group::ProductionGroup;
use crate::domain::plan::{Allocation, ScheduleSlot};
use crate::domain::types::SlotAssignment;
use crate::engine::capacity_model::CapacityModel;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// 单个产线组的待排任务
#[derive(Debug, Clone)]
struct ScheduleTask {
    style: String,
    attributes: DemandAttributes,
    remaining: f64,
    efficiency: f64,
}

impl From<&Allocation> for ScheduleTask {
    fn from(a: &Allocation) -> Self {
        Self {
            style: a.style.clone(),
            attributes: a.attributes.clone(),
            remaining: a.quantity,
            efficiency: a.efficiency,
        }
    }
}

pub struct ScheduleGenerator {
    model: CapacityModel,
}

impl ScheduleGenerator {
    pub fn new(model: CapacityModel) -> Self {
        Self { model }
    }

    /// 生成班次排程
    ///
    /// # 参数
    /// - groups: 产线组（按产能顺序）
    /// - allocations: 分配记录（按产生顺序）
    /// - weeks: 升序周号
    #[instrument(skip_all, fields(
        groups = groups.len(),
        allocations = allocations.len(),
        weeks = weeks.len()
    ))]
    pub fn generate(
        &self,
        groups: &[ProductionGroup],
        allocations: &[Allocation],
        weeks: &[u32],
    ) -> Vec<ScheduleSlot> {
        let mut slots = Vec::new();

        for group in groups {
            let mut queue: VecDeque<ScheduleTask> = allocations
                .iter()
                .filter(|a| a.group_idx == group.idx)
                .map(ScheduleTask::from)
                .collect();
            if queue.is_empty() {
                continue;
            }

            for &week in weeks {
                let finished = match queue.front_mut() {
                    None => {
                        self.push_idle_week(&mut slots, group, week);
                        false
                    }
                    Some(task) => {
                        self.push_task_week(&mut slots, group, week, task);
                        task.remaining <= self.model.params().schedule_task_epsilon
                    }
                };
                if finished {
                    queue.pop_front();
                }
            }

            if !queue.is_empty() {
                debug!(
                    group_id = %group.group_id,
                    pending_tasks = queue.len(),
                    "计划期结束时仍有未排任务"
                );
            }
        }

        slots.sort_by(|a, b| {
            a.week
                .cmp(&b.week)
                .then_with(|| a.group_id.cmp(&b.group_id))
                .then_with(|| a.shift.cmp(&b.shift))
        });

        debug!(
            slots = slots.len(),
            idle_slots = slots.iter().filter(|s| s.is_idle()).count(),
            "班次排程生成完成"
        );

        slots
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn shifts_per_week(&self) -> u8 {
        u8::try_from(self.model.params().shifts_per_week()).unwrap_or(u8::MAX)
    }

    /// 整周排同一任务, 扣减任务剩余
    fn push_task_week(
        &self,
        slots: &mut Vec<ScheduleSlot>,
        group: &ProductionGroup,
        week: u32,
        task: &mut ScheduleTask,
    ) {
        let shifts = self.shifts_per_week();
        let shift_capacity = self.model.shift_capacity(group.headcount, task.efficiency);
        let weekly_capacity = shift_capacity * f64::from(shifts);
        let units_this_week = task.remaining.min(weekly_capacity);
        let units_per_shift = units_this_week / f64::from(shifts);

        for shift in 1..=shifts {
            slots.push(ScheduleSlot {
                week,
                group_id: group.group_id.clone(),
                shift,
                assignment: SlotAssignment::Style(task.style.clone()),
                attributes: task.attributes.clone(),
                quantity: units_per_shift,
                shift_capacity,
                headcount: group.headcount,
                efficiency: task.efficiency,
            });
        }

        task.remaining -= units_this_week;
    }

    /// 整周空闲（按组平均效率计产能）
    fn push_idle_week(&self, slots: &mut Vec<ScheduleSlot>, group: &ProductionGroup, week: u32) {
        let shift_capacity = self.model.shift_capacity(group.headcount, group.avg_efficiency);
        for shift in 1..=self.shifts_per_week() {
            slots.push(ScheduleSlot {
                week,
                group_id: group.group_id.clone(),
                shift,
                assignment: SlotAssignment::Idle,
                attributes: DemandAttributes::default(),
                quantity: 0.0,
                shift_capacity,
                headcount: group.headcount,
                efficiency: group.avg_efficiency,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningParams;
    use crate::domain::demand::DemandLineId;
    use crate::domain::group::GroupIdx;
    use crate::domain::types::AllocationPhase;

    fn group(idx: usize, id: &str) -> ProductionGroup {
        ProductionGroup {
            idx: GroupIdx(idx),
            group_id: id.to_string(),
            headcount: 38.0,
            avg_efficiency: 100.0,
            total_capacity: 0.0,
        }
    }

    fn alloc(group: &ProductionGroup, style: &str, qty: f64, eff: f64) -> Allocation {
        Allocation {
            seq_no: 1,
            demand_id: DemandLineId(0),
            group_idx: group.idx,
            group_id: group.group_id.clone(),
            style: style.to_string(),
            attributes: DemandAttributes::default(),
            quantity: qty,
            efficiency: eff,
            headcount: group.headcount,
            group_capacity_before: 0.0,
            phase: AllocationPhase::Greedy,
        }
    }

    fn generator() -> ScheduleGenerator {
        ScheduleGenerator::new(CapacityModel::new(PlanningParams::default()))
    }

    #[test]
    fn test_task_finishing_early_leaves_week_single_style() {
        let g = group(0, "G1");
        // 周产能 480 × 12 = 5760
        let allocations = vec![alloc(&g, "A", 1200.0, 100.0), alloc(&g, "B", 6000.0, 100.0)];
        let slots = generator().generate(&[g], &allocations, &[38, 39, 40, 41]);

        assert_eq!(slots.len(), 48);
        let styles_of = |week: u32| -> Vec<String> {
            slots
                .iter()
                .filter(|s| s.week == week)
                .map(|s| s.assignment.to_string())
                .collect()
        };
        assert!(styles_of(38).iter().all(|s| s == "A"));
        assert!(styles_of(39).iter().all(|s| s == "B"));
        assert!(styles_of(40).iter().all(|s| s == "B"));
        assert!(styles_of(41).iter().all(|s| s == "IDLE"));

        let week38: f64 = slots.iter().filter(|s| s.week == 38).map(|s| s.quantity).sum();
        assert!((week38 - 1200.0).abs() < 1e-6);
        let week40: f64 = slots.iter().filter(|s| s.week == 40).map(|s| s.quantity).sum();
        assert!((week40 - 240.0).abs() < 1e-6);
    }

    #[test]
    fn test_groups_without_allocations_are_omitted() {
        let g1 = group(0, "G1");
        let g2 = group(1, "G2");
        let allocations = vec![alloc(&g1, "A", 10.0, 100.0)];
        let slots = generator().generate(&[g1, g2], &allocations, &[1]);
        assert!(slots.iter().all(|s| s.group_id == "G1"));
        assert_eq!(slots.len(), 12);
    }

    #[test]
    fn test_slots_sorted_by_week_group_shift() {
        let g1 = group(0, "Z");
        let g2 = group(1, "A");
        let allocations = vec![alloc(&g1, "S", 10.0, 100.0), alloc(&g2, "T", 10.0, 100.0)];
        let slots = generator().generate(&[g1, g2], &allocations, &[5, 6]);

        let keys: Vec<(u32, String, u8)> = slots
            .iter()
            .map(|s| (s.week, s.group_id.clone(), s.shift))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(slots[0].group_id, "A");
        assert_eq!(slots[0].shift, 1);
    }

    #[test]
    fn test_task_efficiency_drives_shift_capacity() {
        let g = group(0, "G1");
        let allocations = vec![alloc(&g, "A", 100.0, 50.0)];
        let slots = generator().generate(&[g], &allocations, &[1, 2]);
        assert!((slots[0].shift_capacity - 240.0).abs() < 1e-9);
        assert_eq!(slots[0].efficiency, 50.0);
        // 空闲周按组平均效率
        let idle = slots.iter().find(|s| s.is_idle()).unwrap();
        assert!((idle.shift_capacity - 480.0).abs() < 1e-9);
        assert_eq!(idle.quantity, 0.0);
    }
}
