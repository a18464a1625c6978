//! 시간 제한 캐시 셀
//!
//! 마지막으로 성공한 파싱 결과 하나를 보관합니다. 만료 판정은 단조 시계
//! (`tokio::time::Instant`)를 기준으로 하며, 보고용으로만 벽시계 시각을 함께 기록합니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::CacheError;

/// 캐시 상태 스냅샷
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub has_data: bool,
    pub is_fresh: bool,
    pub age_ms: Option<u64>,
    pub time_to_expiry_ms: Option<u64>,
    pub ttl_ms: u64,
    /// 마지막 갱신 시각 (UTC)
    pub captured_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    captured_at: Instant,
    captured_wall: DateTime<Utc>,
}

/// TTL 캐시 (스레드 안전하지 않음, 소유자가 동기화)
#[derive(Debug)]
pub struct TtlCache<T> {
    entry: Option<Entry<T>>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }

        Ok(Self { entry: None, ttl })
    }

    /// 신선한 값만 반환 (없음/만료는 구분하지 않음)
    pub fn read(&self) -> Option<&T> {
        if self.is_fresh() {
            self.entry.as_ref().map(|e| &e.value)
        } else {
            None
        }
    }

    /// 만료 여부와 관계없이 마지막 값 반환
    pub fn stale(&self) -> Option<&T> {
        self.entry.as_ref().map(|e| &e.value)
    }

    pub fn write(&mut self, value: T) {
        self.entry = Some(Entry {
            value,
            captured_at: Instant::now(),
            captured_wall: Utc::now(),
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_fresh(&self) -> bool {
        self.age().is_some_and(|age| age < self.ttl)
    }

    pub fn age(&self) -> Option<Duration> {
        self.entry.as_ref().map(|e| e.captured_at.elapsed())
    }

    pub fn time_to_expiry(&self) -> Option<Duration> {
        self.age().map(|age| self.ttl.saturating_sub(age))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            has_data: self.entry.is_some(),
            is_fresh: self.is_fresh(),
            age_ms: self.age().map(as_millis),
            time_to_expiry_ms: self.time_to_expiry().map(as_millis),
            ttl_ms: as_millis(self.ttl),
            captured_at: self.entry.as_ref().map(|e| e.captured_wall),
        }
    }
}

fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
