// ==========================================
// 缝制产线负荷排产系统 - API 层
// ==========================================
// 职责: 对外入口（排产调用 / 结果导出）, 统一错误类型
// ==========================================

pub mod error;
pub mod exporter;
pub mod plan_api;

pub use error::{ApiError, ApiResult};
pub use exporter::ResultExporter;
pub use plan_api::PlanApi;
