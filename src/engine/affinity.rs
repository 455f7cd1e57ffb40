// ==========================================
// 缝制产线负荷排产系统 - 亲和索引
// ==========================================
// 输入: 产线组历史绩效行（款式 / 尺码 / 产线组 / 产量 / 效率）
// 输出:
// 1) (款式, 尺码档) → 候选产线组列表, 按历史产量降序（并列保持发现顺序）
// 2) (产线组, 款式) → 历史平均效率
// 红线: 构建后只读
// ==========================================

use crate::domain::group::GroupPerformanceRecord;
use crate::domain::types::SizeClass;
use crate::engine::size_classifier::classify_size;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 候选产线组（一条历史记录一项）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffinityCandidate {
    pub group_id: String,
    pub output: f64,
    pub efficiency: f64,
}

/// 亲和索引（只读）
#[derive(Debug, Clone, Default)]
pub struct AffinityIndex {
    by_style_size: HashMap<(String, String), Vec<AffinityCandidate>>,
    group_style_efficiency: HashMap<(String, String), f64>,
}

impl AffinityIndex {
    /// (款式, 尺码档) 的候选列表; 为空时回退到 (款式, 无尺码)
    pub fn candidates(&self, style: &str, size: &SizeClass) -> &[AffinityCandidate] {
        let exact = self.lookup(style, size.key());
        if !exact.is_empty() || size.is_unsized() {
            return exact;
        }
        self.lookup(style, "")
    }

    fn lookup(&self, style: &str, size_key: &str) -> &[AffinityCandidate] {
        self.by_style_size
            .get(&(style.to_string(), size_key.to_string()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// (产线组, 款式) 的历史平均效率
    pub fn group_style_efficiency(&self, group_id: &str, style: &str) -> Option<f64> {
        self.group_style_efficiency
            .get(&(group_id.to_string(), style.to_string()))
            .copied()
    }

    /// (款式, 尺码档) 组合数
    pub fn entry_count(&self) -> usize {
        self.by_style_size.len()
    }

    /// (产线组, 款式) 组合数
    pub fn pairing_count(&self) -> usize {
        self.group_style_efficiency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_style_size.is_empty()
    }
}

pub struct AffinityIndexBuilder;

impl AffinityIndexBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建亲和索引
    ///
    /// 规则:
    /// - 款式或产线组为空的记录不参与
    /// - 历史尺码经尺码分档后作为键, 缺失尺码记为空键
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[GroupPerformanceRecord]) -> AffinityIndex {
        let mut by_style_size: HashMap<(String, String), Vec<AffinityCandidate>> = HashMap::new();
        let mut eff_samples: HashMap<(String, String), (f64, usize)> = HashMap::new();

        for record in records {
            let style = match record.history_style.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => continue,
            };
            if record.group_id.is_empty() {
                continue;
            }

            let size_key = record
                .history_size
                .as_deref()
                .map(|s| classify_size(s).key().to_string())
                .unwrap_or_default();

            by_style_size
                .entry((style.to_string(), size_key))
                .or_default()
                .push(AffinityCandidate {
                    group_id: record.group_id.clone(),
                    output: record.output,
                    efficiency: record.efficiency,
                });

            let sample = eff_samples
                .entry((record.group_id.clone(), style.to_string()))
                .or_insert((0.0, 0));
            sample.0 += record.efficiency;
            sample.1 += 1;
        }

        // 稳定排序: 并列保持发现顺序
        for candidates in by_style_size.values_mut() {
            candidates.sort_by(|a, b| b.output.total_cmp(&a.output));
        }

        let group_style_efficiency: HashMap<(String, String), f64> = eff_samples
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();

        debug!(
            style_size_entries = by_style_size.len(),
            group_style_pairs = group_style_efficiency.len(),
            "亲和索引构建完成"
        );

        AffinityIndex {
            by_style_size,
            group_style_efficiency,
        }
    }
}

impl Default for AffinityIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        group: &str,
        style: &str,
        size: Option<&str>,
        output: f64,
        eff: f64,
    ) -> GroupPerformanceRecord {
        GroupPerformanceRecord {
            row_index: 0,
            group_id: group.to_string(),
            efficiency: eff,
            headcount: 40.0,
            history_style: Some(style.to_string()),
            history_size: size.map(|s| s.to_string()),
            output,
        }
    }

    #[test]
    fn test_candidates_sorted_by_output_desc_stable() {
        let records = vec![
            record("H", "StyleY", Some("R2"), 900.0, 95.0),
            record("G", "StyleY", Some("R2"), 1500.0, 120.0),
            record("K", "StyleY", Some("R2"), 900.0, 80.0),
        ];
        let index = AffinityIndexBuilder::new().build(&records);

        let list = index.candidates("StyleY", &SizeClass::Mapped("R2".to_string()));
        let order: Vec<&str> = list.iter().map(|c| c.group_id.as_str()).collect();
        assert_eq!(order, vec!["G", "H", "K"]);
    }

    #[test]
    fn test_numeric_history_size_is_classified() {
        let records = vec![record("G", "StyleY", Some("43"), 100.0, 100.0)];
        let index = AffinityIndexBuilder::new().build(&records);
        assert_eq!(
            index
                .candidates("StyleY", &SizeClass::Mapped("R2".to_string()))
                .len(),
            1
        );
    }

    #[test]
    fn test_fallback_to_unsized_entry() {
        let records = vec![record("G", "StyleY", None, 100.0, 100.0)];
        let index = AffinityIndexBuilder::new().build(&records);

        let list = index.candidates("StyleY", &SizeClass::Mapped("R3".to_string()));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].group_id, "G");

        assert!(index
            .candidates("Other", &SizeClass::Mapped("R3".to_string()))
            .is_empty());
    }

    #[test]
    fn test_group_style_efficiency_mean() {
        let records = vec![
            record("G", "StyleY", Some("R2"), 100.0, 100.0),
            record("G", "StyleY", Some("R1"), 100.0, 80.0),
            record("H", "StyleY", Some("R2"), 100.0, 60.0),
        ];
        let index = AffinityIndexBuilder::new().build(&records);
        assert_eq!(index.group_style_efficiency("G", "StyleY"), Some(90.0));
        assert_eq!(index.group_style_efficiency("H", "StyleY"), Some(60.0));
        assert_eq!(index.group_style_efficiency("H", "StyleZ"), None);
        assert_eq!(index.pairing_count(), 2);
        assert_eq!(index.entry_count(), 2);
    }

    #[test]
    fn test_rows_without_style_are_ignored() {
        let mut r = record("G", "StyleY", None, 100.0, 100.0);
        r.history_style = None;
        let index = AffinityIndexBuilder::new().build(&[r]);
        assert!(index.is_empty());
    }
}
