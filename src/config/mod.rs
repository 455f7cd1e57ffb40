// ==========================================
// 缝制产线负荷排产系统 - 配置层
// ==========================================
// 职责: 排产参数管理, 支持 config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod planning_config_trait;
pub mod planning_params;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use planning_config_trait::{PlanningConfigReader, StaticConfig};
pub use planning_params::PlanningParams;
