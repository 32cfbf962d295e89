//! 倒计时句柄
//!
//! 固定周期（1 秒）的可重置计时器。由会话控制器持有，
//! 每次重置剩余秒数时重新启动，`disarm` 或 drop 后不再产生 tick。

use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Countdown {
    /// 创建并立即启动
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_deadline: Some(now + period),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// 从 now 开始重新计时，丢弃未到期的部分周期
    pub fn rearm(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next_deadline = None;
    }

    /// 距离下一次 tick 的时间；未启动时返回 None
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// 返回到期的周期数，并把截止时间推进到下一个周期
    pub fn fire(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.next_deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }

        let overdue = now - deadline;
        let extra = (overdue.as_nanos() / self.period.as_nanos()) as u32;
        let elapsed = extra + 1;
        self.next_deadline = Some(deadline + self.period * elapsed);
        elapsed
    }
}
