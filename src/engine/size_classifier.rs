// ==========================================
// 缝制产线负荷排产系统 - 尺码分档
// ==========================================
// 规则:
// - 41           → R1
// - 42 / 43 / 44 → R2
// - 45 / 46      → R3
// - 其他         → 原样透传（TRIM 后）
// 全函数: 任何输入都有结果, 不抛错
// ==========================================

use crate::domain::types::SizeClass;

/// 尺码分档
pub fn classify_size(raw: &str) -> SizeClass {
    let trimmed = raw.trim();
    let code = match trimmed.parse::<i64>() {
        Ok(41) => Some("R1"),
        Ok(42..=44) => Some("R2"),
        Ok(45 | 46) => Some("R3"),
        _ => None,
    };

    match code {
        Some(code) => SizeClass::Mapped(code.to_string()),
        None => SizeClass::Unmapped(trimmed.to_string()),
    }
}
