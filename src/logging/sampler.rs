// 日志采样
// 同一 tick 内重复的 (级别, 消息) 只放行一部分

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Instant;

use crate::logging::{Level, SamplingConfig};

const COUNTERS_PER_LEVEL: usize = 1024;

#[derive(Default)]
struct Counter {
    resets_at: AtomicI64,
    count: AtomicU64,
}

impl Counter {
    /// 计数并在 tick 过期时重置，返回本 tick 内的序号（从 1 开始）
    fn inc_check_reset(&self, now: i64, tick: i64) -> u64 {
        let resets_at = self.resets_at.load(Ordering::Acquire);
        if resets_at > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        self.count.store(1, Ordering::Release);
        let next = now + tick;
        if self
            .resets_at
            .compare_exchange(resets_at, next, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // 另一个线程已经重置
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        1
    }
}

/// 无锁采样器
pub struct Sampler {
    config: SamplingConfig,
    epoch: Instant,
    counters: Box<[Counter]>,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Self {
        let counters = (0..Level::ALL.len() * COUNTERS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect();

        Self {
            config,
            epoch: Instant::now(),
            counters,
        }
    }

    /// 是否放行这条记录
    pub fn sample(&self, level: Level, message: &str) -> bool {
        let now = i64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(i64::MAX);
        let tick = i64::try_from(self.config.tick.as_nanos()).unwrap_or(i64::MAX);

        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        let slot = (hasher.finish() % COUNTERS_PER_LEVEL as u64) as usize;

        let Some(counter) = self.counters.get(level.index() * COUNTERS_PER_LEVEL + slot) else {
            return true;
        };

        let n = counter.inc_check_reset(now, tick);
        if n <= self.config.initial {
            return true;
        }

        self.config.thereafter > 0 && (n - self.config.initial) % self.config.thereafter == 0
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler").field("config", &self.config).finish()
    }
}
