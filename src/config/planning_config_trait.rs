// ==========================================
// 缝制产线负荷排产系统 - 排产配置读取 Trait
// ==========================================
// 职责: 定义排产所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::planning_params::PlanningParams;
use std::error::Error;

// ==========================================
// PlanningConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）/ StaticConfig（内存）
pub trait PlanningConfigReader: Send + Sync {
    /// 获取本次运行使用的排产参数
    ///
    /// # 返回
    /// - 已校验的 PlanningParams（缺省项取 Default）
    fn planning_params(&self) -> Result<PlanningParams, Box<dyn Error>>;
}

// ==========================================
// StaticConfig - 内存配置
// ==========================================
// 用途: 测试 / 无数据库场景
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    params: PlanningParams,
}

impl StaticConfig {
    pub fn new(params: PlanningParams) -> Self {
        Self { params }
    }
}

impl PlanningConfigReader for StaticConfig {
    fn planning_params(&self) -> Result<PlanningParams, Box<dyn Error>> {
        self.params
            .validate()
            .map_err(|(key, value)| format!("配置值非法: {}={}", key, value))?;
        Ok(self.params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_config_rejects_invalid() {
        let config = StaticConfig::new(PlanningParams {
            reference_headcount: -1.0,
            ..PlanningParams::default()
        });
        assert!(config.planning_params().is_err());
        assert!(StaticConfig::default().planning_params().is_ok());
    }
}
