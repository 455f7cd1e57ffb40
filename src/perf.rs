// ==========================================
// 缝制产线负荷排产系统 - 性能统计
// ==========================================
// PerfGuard: 作用域结束时输出 elapsed_ms（target = "perf"）
// 嵌套深度按线程统计; 超过慢操作阈值时升级为 warn
// ==========================================

use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// 慢操作阈值（毫秒）
///
/// - `LINE_LOADING_APS_SLOW_OP_MS=500` 覆盖默认值
/// - Debug 默认 200, Release 默认 1000
pub fn slow_op_threshold_ms() -> u64 {
    std::env::var("LINE_LOADING_APS_SLOW_OP_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 200 } else { 1000 })
}

/// 性能统计 Guard
///
/// 使用方式：
/// ```ignore
/// let _perf = line_loading_aps::perf::PerfGuard::new("plan_run");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
    items: Option<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            depth,
            items: None,
        }
    }

    /// 记录本次操作处理的条目数（随完成日志输出）
    pub fn record_items(&mut self, items: usize) {
        self.items = Some(items);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        let items = self.items.unwrap_or(0);

        if elapsed_ms >= slow_op_threshold_ms() {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                items,
                "slow op"
            );
        } else {
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                items,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
