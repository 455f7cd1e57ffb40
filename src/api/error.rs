// ==========================================
// 缝制产线负荷排产系统 - API层错误类型
// ==========================================
// 职责: 汇总导入 / 引擎 / 配置 / 导出错误, 转换为面向用户的错误消息
// ==========================================

use crate::engine::error::PlanError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("输入校验失败: 表 '{table}' 缺少必需字段: {}", missing.join(", "))]
    ValidationError { table: String, missing: Vec<String> },

    #[error("计划期无效: {0}")]
    HorizonError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 配置 / 导出错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("结果导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 PlanError 转换
// ==========================================
impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::Validation { table, missing } => {
                ApiError::ValidationError { table, missing }
            }
            err @ PlanError::Horizon => ApiError::HorizonError(err.to_string()),
            PlanError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
