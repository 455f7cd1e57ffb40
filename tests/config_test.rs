// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: config_kv 覆写排产参数, 快照与恢复
// ==========================================

mod helpers;

use helpers::test_data_builder::{DemandTableBuilder, GroupTableBuilder};
use line_loading_aps::api::{ApiError, PlanApi};
use line_loading_aps::config::{config_keys, ConfigManager, PlanningConfigReader, PlanningParams};
use std::sync::Arc;
use test_helpers::create_test_db;

#[test]
fn test_config_manager_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let params = manager.planning_params().expect("读取参数失败");
    assert_eq!(params, PlanningParams::default(), "空配置库应返回默认参数");
}

#[test]
fn test_overrides_change_capacity() {
    println!("\n=== 测试：配置覆写影响产能 ===");

    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    // 每天 1 班, 每周 5 天
    manager.set_global_config_value(config_keys::SHIFTS_PER_DAY, "1").unwrap();
    manager.set_global_config_value(config_keys::WORKING_DAYS_PER_WEEK, "5").unwrap();

    let params = manager.planning_params().unwrap();
    assert_eq!(params.shifts_per_week(), 5);

    let demand = DemandTableBuilder::new().line("A", "10000", "202601").build();
    let groups = GroupTableBuilder::new().group("G01", "100", "38").build();
    let result = PlanApi::new(Arc::new(manager)).generate_plan(&demand, &groups).unwrap();

    // 单周产能 = 480 × 5
    assert!((result.kpi.total_allocated - 2400.0).abs() < 1e-6);
    assert_eq!(result.detailed_plan.len(), 5, "每周应只有 5 个班次");
    assert_eq!(result.detailed_plan.last().unwrap().shift, 5);
}

#[test]
fn test_unparsable_value_falls_back_to_default() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_global_config_value(config_keys::SHIFT_HOURS, "eight").unwrap();

    let params = manager.planning_params().unwrap();
    assert_eq!(params.shift_hours, 7.5);
}

#[test]
fn test_invalid_value_rejected() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_global_config_value(config_keys::REFERENCE_HEADCOUNT, "-38").unwrap();

    assert!(manager.planning_params().is_err());

    let demand = DemandTableBuilder::new().line("A", "1", "202601").build();
    let groups = GroupTableBuilder::new().group("G01", "100", "38").build();
    let err = PlanApi::new(Arc::new(manager))
        .generate_plan(&demand, &groups)
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn test_snapshot_and_restore() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_global_config_value(config_keys::SHIFT_HOURS, "8").unwrap();

    let snapshot = manager.get_config_snapshot().unwrap();
    assert!(snapshot.contains("planning/shift_hours"));

    manager.set_global_config_value(config_keys::SHIFT_HOURS, "6").unwrap();
    assert_eq!(manager.planning_params().unwrap().shift_hours, 6.0);

    let restored = manager.restore_config_from_snapshot(&snapshot).unwrap();
    assert_eq!(restored, 1);
    assert_eq!(manager.planning_params().unwrap().shift_hours, 8.0);

    // 持久化: 新实例读到同一值
    drop(manager);
    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(
        reopened.get_global_config_value(config_keys::SHIFT_HOURS).unwrap(),
        Some("8".to_string())
    );
}
