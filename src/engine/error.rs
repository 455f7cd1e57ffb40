// ==========================================
// 缝制产线负荷排产系统 - 引擎层错误类型
// ==========================================
// 分类:
// - 校验错误: 缺少必需字段（指明表名与字段）
// - 计划期错误: 无有效周值
// - 内部错误: 其他意外失败（不透明, 携带诊断信息）
// 红线: 出错即中止, 不返回部分结果
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("表 '{table}' 缺少必需字段: {}", missing.join(", "))]
    Validation { table: String, missing: Vec<String> },

    #[error("无法确定计划期: 需求表中没有有效的周值")]
    Horizon,

    #[error("排产内部错误: {0}")]
    Internal(String),
}
