// ==========================================
// 缝制产线负荷排产系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值宽松转换 / 周号提取
// 红线: 数值转换失败降级为 0, 不中断运行
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 空白视为缺失
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 宽松数值转换：缺失 / 非数值 / 非有限值 → 0.0
    pub fn coerce_f64(&self, value: Option<&str>) -> f64 {
        value
            .map(|v| v.trim().replace(',', ""))
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// 从编码周值提取周号
    ///
    /// 规则: 去掉小数部分后取末两位, 解析为整数
    /// - "202538"   → Some(38)
    /// - "202538.0" → Some(38)
    /// - "7"        → Some(7)
    /// - "W-"       → None
    pub fn parse_week_num(&self, value: Option<&str>) -> Option<u32> {
        let raw = self.normalize_null(value)?;
        let integral = raw.split('.').next().unwrap_or("");
        let chars: Vec<char> = integral.chars().collect();
        let start = chars.len().saturating_sub(2);
        let tail: String = chars[start..].iter().collect();
        tail.parse::<u32>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(Some("NaN")), None);
        assert_eq!(cleaner.normalize_null(None), None);
        assert_eq!(cleaner.normalize_null(Some(" R2 ")), Some("R2".to_string()));
    }

    #[test]
    fn test_coerce_f64() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_f64(Some("1,421")), 1421.0);
        assert_eq!(cleaner.coerce_f64(Some("153.10")), 153.1);
        assert_eq!(cleaner.coerce_f64(Some("abc")), 0.0);
        assert_eq!(cleaner.coerce_f64(Some("inf")), 0.0);
        assert_eq!(cleaner.coerce_f64(None), 0.0);
    }

    #[test]
    fn test_parse_week_num() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_week_num(Some("202538")), Some(38));
        assert_eq!(cleaner.parse_week_num(Some("202538.0")), Some(38));
        assert_eq!(cleaner.parse_week_num(Some("202501")), Some(1));
        assert_eq!(cleaner.parse_week_num(Some("7")), Some(7));
        assert_eq!(cleaner.parse_week_num(Some("W-")), None);
        assert_eq!(cleaner.parse_week_num(Some("")), None);
        assert_eq!(cleaner.parse_week_num(None), None);
    }
}
