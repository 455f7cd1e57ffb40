// ==========================================
// ScheduleGenerator 集成测试
// ==========================================
// 测试目标: 周内零换款 / 空闲周 / 班次顺序
// ==========================================

mod helpers;

use helpers::test_data_builder::{DemandTableBuilder, GroupTableBuilder};
use line_loading_aps::config::PlanningParams;
use line_loading_aps::domain::plan::{PlanResult, ScheduleSlot};
use line_loading_aps::engine::PlanOrchestrator;
use line_loading_aps::SlotAssignment;
use std::collections::BTreeMap;

/// 4 周计划期, 三组, 多款式
fn four_week_result() -> PlanResult {
    let demand = DemandTableBuilder::new()
        .sized_line("A", "42", "4000", "202610")
        .sized_line("B", "45", "2500", "202611")
        .line("C", "900", "202612")
        .line("D", "60", "202613")
        .line("E", "7000", "202613")
        .build();
    let groups = GroupTableBuilder::new()
        .history("G01", "100", "38", "A", "R2", "2000")
        .history("G02", "80", "40", "B", "R3", "1200")
        .history("G02", "90", "40", "A", "R2", "800")
        .group("G03", "60", "20")
        .build();

    PlanOrchestrator::new(PlanningParams::default())
        .run(&demand, &groups)
        .expect("排产应成功")
}

fn slots_by_group_week(result: &PlanResult) -> BTreeMap<(String, u32), Vec<&ScheduleSlot>> {
    let mut map: BTreeMap<(String, u32), Vec<&ScheduleSlot>> = BTreeMap::new();
    for slot in &result.detailed_plan {
        map.entry((slot.group_id.clone(), slot.week)).or_default().push(slot);
    }
    map
}

#[test]
fn test_each_group_week_is_single_style() {
    println!("\n=== 测试：周内零换款 ===");

    let result = four_week_result();
    let cells = slots_by_group_week(&result);
    assert!(!cells.is_empty());

    for ((group, week), slots) in &cells {
        assert_eq!(slots.len(), 12, "{} 第 {} 周应有 12 个班次", group, week);

        let first = &slots[0].assignment;
        assert!(
            slots.iter().all(|s| &s.assignment == first),
            "{} 第 {} 周出现周内换款",
            group,
            week
        );

        if first.is_idle() {
            assert!(slots.iter().all(|s| s.quantity == 0.0), "空闲周数量应为 0");
        } else {
            let q = slots[0].quantity;
            assert!(slots.iter().all(|s| (s.quantity - q).abs() < 1e-9), "周内各班数量应均摊");
        }
    }
}

#[test]
fn test_shift_order_and_sorting() {
    let result = four_week_result();

    for ((_, _), slots) in slots_by_group_week(&result) {
        let shifts: Vec<u8> = slots.iter().map(|s| s.shift).collect();
        assert_eq!(shifts, (1..=12).collect::<Vec<u8>>());
    }

    let keys: Vec<(u32, &str, u8)> = result
        .detailed_plan
        .iter()
        .map(|s| (s.week, s.group_id.as_str(), s.shift))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "排程应按 (周, 产线组, 班次) 排序");
}

#[test]
fn test_scheduled_quantity_never_exceeds_allocation() {
    let result = four_week_result();

    for group in ["G01", "G02", "G03"] {
        let allocated: f64 = result
            .allocations
            .iter()
            .filter(|a| a.group_id == group)
            .map(|a| a.quantity)
            .sum();
        let scheduled: f64 = result
            .detailed_plan
            .iter()
            .filter(|s| s.group_id == group)
            .map(|s| s.quantity)
            .sum();
        assert!(
            scheduled <= allocated + 1e-6,
            "{} 排程量 {} 超过分配量 {}",
            group,
            scheduled,
            allocated
        );
    }
}

#[test]
fn test_short_horizon_leaves_later_tasks_unscheduled() {
    // 1 周计划期, 单组两款: 第一款占满本周, 第二款不进入排程
    let demand = DemandTableBuilder::new()
        .line("A", "100", "202620")
        .line("B", "90", "202620")
        .build();
    let groups = GroupTableBuilder::new().group("G01", "100", "38").build();

    let result = PlanOrchestrator::new(PlanningParams::default())
        .run(&demand, &groups)
        .unwrap();

    assert_eq!(result.allocations.len(), 2);
    assert_eq!(result.detailed_plan.len(), 12);
    assert!(result
        .detailed_plan
        .iter()
        .all(|s| s.assignment == SlotAssignment::Style("A".to_string())));
    let scheduled: f64 = result.detailed_plan.iter().map(|s| s.quantity).sum();
    assert!((scheduled - 100.0).abs() < 1e-6);
    // 分配层面两款都算作该组款式
    assert_eq!(result.kpi.changeovers, 1);
}

#[test]
fn test_idle_weeks_after_tasks_complete() {
    let demand = DemandTableBuilder::new()
        .line("A", "100", "202601")
        .line("B", "1", "202602")
        .line("C", "1", "202603")
        .build();
    let groups = GroupTableBuilder::new()
        .group("G01", "100", "38")
        .build();

    let result = PlanOrchestrator::new(PlanningParams::default())
        .run(&demand, &groups)
        .unwrap();

    // 三款各占一周
    let styles: Vec<String> = slots_by_group_week(&result)
        .values()
        .map(|slots| slots[0].assignment.to_string())
        .collect();
    assert_eq!(styles, vec!["A", "B", "C"]);

    let demand = DemandTableBuilder::new()
        .line("A", "100", "202601")
        .line("X", "0", "202602")
        .line("Y", "0", "202603")
        .build();
    let groups = GroupTableBuilder::new().group("G01", "80", "38").build();
    let result = PlanOrchestrator::new(PlanningParams::default())
        .run(&demand, &groups)
        .unwrap();

    let idle: Vec<&ScheduleSlot> = result.detailed_plan.iter().filter(|s| s.is_idle()).collect();
    assert_eq!(idle.len(), 24, "第 2、3 周应整周空闲");
    assert!(idle.iter().all(|s| s.week != 1));
    assert!(idle.iter().all(|s| s.efficiency == 80.0), "空闲周按组平均效率");
    assert!(idle.iter().all(|s| (s.shift_capacity - 480.0 * 0.8).abs() < 1e-9));
}
