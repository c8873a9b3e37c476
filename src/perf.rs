use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static VISIT_COUNT: Cell<u64> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 安装性能统计开关（引擎耗时 + 遍历步数）
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `RAIL_TYCOON_PERF=1` 强制开启, `RAIL_TYCOON_PERF=0` 强制关闭
pub fn install() {
    let enabled = match std::env::var("RAIL_TYCOON_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };
    set_enabled(enabled);
}

pub fn set_enabled(enabled: bool) {
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 累加遍历步数（仅在某个 PerfGuard 存活期间计数）
#[inline]
pub fn record_visits(n: u64) {
    if !is_enabled() {
        return;
    }
    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if active {
        VISIT_COUNT.with(|c| c.set(c.get().saturating_add(n)));
    }
}

/// 性能统计 Guard：记录 elapsed_us + 遍历步数
///
/// 使用方式：
/// ```ignore
/// let _perf = rail_tycoon::perf::PerfGuard::new("verify_connectivity");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    visit_start: u64,
    enabled: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let enabled = is_enabled();
        if enabled {
            PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        }
        let visit_start = VISIT_COUNT.with(|c| c.get());
        Self {
            op,
            start: Instant::now(),
            visit_start,
            enabled,
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        let elapsed_us = self.start.elapsed().as_micros() as u64;
        let visited = VISIT_COUNT
            .with(|c| c.get())
            .saturating_sub(self.visit_start);

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_us,
            visited,
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(is_true("1"));
        assert!(is_true(" Yes "));
        assert!(!is_true("0"));
        assert!(!is_true("off"));
    }

    #[test]
    fn test_visits_counted_inside_guard() {
        set_enabled(true);
        let before = VISIT_COUNT.with(|c| c.get());
        {
            let _perf = PerfGuard::new("unit");
            record_visits(5);
            record_visits(2);
        }
        let after = VISIT_COUNT.with(|c| c.get());
        assert_eq!(after - before, 7);

        // guard 之外不计数
        record_visits(100);
        assert_eq!(VISIT_COUNT.with(|c| c.get()), after);
    }
}
