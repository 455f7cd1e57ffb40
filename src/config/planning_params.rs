// ==========================================
// 缝制产线负荷排产系统 - 排产参数
// ==========================================
// 职责: 产能模型与分配引擎使用的全部常量
// 存储: config_kv 表可逐项覆写, 缺省取 Default
// ==========================================

use serde::{Deserialize, Serialize};

/// 排产参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningParams {
    /// 参考产量：100% 效率下参考人数一个班次的产量（件）
    pub reference_output_100_eff: f64,
    /// 参考人数
    pub reference_headcount: f64,
    /// 班次时长（小时）
    pub shift_hours: f64,
    /// 每天班次数
    pub shifts_per_day: u32,
    /// 每周工作天数
    pub working_days_per_week: u32,
    /// 分配引擎的终止阈值
    pub allocation_epsilon: f64,
    /// 排程任务完成阈值
    pub schedule_task_epsilon: f64,
}

impl Default for PlanningParams {
    fn default() -> Self {
        Self {
            reference_output_100_eff: 480.0,
            reference_headcount: 38.0,
            shift_hours: 7.5,
            shifts_per_day: 2,
            working_days_per_week: 6,
            allocation_epsilon: 0.01,
            schedule_task_epsilon: 0.1,
        }
    }
}

impl PlanningParams {
    /// 基准速率：100% 效率下每人每小时产量
    pub fn base_rate(&self) -> f64 {
        self.reference_output_100_eff / self.reference_headcount / self.shift_hours
    }

    /// 每周班次数（溢出时饱和, 由 validate 拦截）
    pub fn shifts_per_week(&self) -> u32 {
        self.shifts_per_day.saturating_mul(self.working_days_per_week)
    }

    /// 校验参数（全部为正数）
    ///
    /// # 返回
    /// - Err((字段名, 值)): 第一个不合法的字段
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        let positive = [
            ("reference_output_100_eff", self.reference_output_100_eff),
            ("reference_headcount", self.reference_headcount),
            ("shift_hours", self.shift_hours),
            ("allocation_epsilon", self.allocation_epsilon),
            ("schedule_task_epsilon", self.schedule_task_epsilon),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err((name, value.to_string()));
            }
        }
        if self.shifts_per_day == 0 {
            return Err(("shifts_per_day", "0".to_string()));
        }
        if self.working_days_per_week == 0 {
            return Err(("working_days_per_week", "0".to_string()));
        }
        match self.shifts_per_day.checked_mul(self.working_days_per_week) {
            Some(shifts) if shifts <= u32::from(u8::MAX) => {}
            _ => return Err(("shifts_per_day", self.shifts_per_day.to_string())),
        }
        Ok(())
    }
}
