use serde::Deserialize;
use std::time::Duration;

use crate::lodestone::WORLD_STATUS_URL;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lodestone: Lodestone,
    #[serde(default)]
    pub cache: Cache,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lodestone {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cache {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// 갱신 실패 시 만료된 마지막 결과라도 반환할지 여부
    #[serde(default)]
    pub serve_stale_on_error: bool,
}

impl Default for Lodestone {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            serve_stale_on_error: false,
        }
    }
}

impl Lodestone {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Cache {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_url() -> String {
    WORLD_STATUS_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_ttl_secs() -> u64 {
    // Lodestone 상태 페이지는 몇 분 단위로만 바뀜
    5 * 60
}
