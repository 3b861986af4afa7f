use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

/// 性能统计 Guard：记录计划阶段 elapsed_ms 与嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = raw_material_planner::perf::PerfGuard::new("bom_explosion");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let current = d.get();
            d.set(current.saturating_add(1));
            current
        });
        Self {
            op,
            start: Instant::now(),
            depth,
        }
    }

    /// 已耗时（毫秒）
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        tracing::info!(
            target: "perf",
            op = self.op,
            depth = self.depth,
            elapsed_ms,
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
