//! 时钟抽象
//!
//! 所有业务时间戳都通过注入的 Clock 获取，测试可以替换为固定时钟。

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// epoch 秒（数据库列使用 i64 存储）
    fn timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// 系统时钟
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时钟，可手动推进
#[cfg(test)]
pub struct FixedClock(std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl FixedClock {
    pub fn at(datetime: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(datetime))
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut guard = self.0.lock().unwrap();
        *guard += duration;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advance() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = FixedClock::at(start);
        assert_eq!(clock.timestamp(), 1_700_000_000);

        clock.advance(chrono::Duration::seconds(60));
        assert_eq!(clock.timestamp(), 1_700_000_060);
    }
}
