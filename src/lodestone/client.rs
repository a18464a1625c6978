//! Lodestone 월드 상태 페이지 클라이언트
//!
//! 서비스는 `PageFetcher`만 알고 있으므로 테스트에서는 메모리 구현으로 대체합니다.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Lodestone 월드 상태 페이지
pub const WORLD_STATUS_URL: &str = "https://na.finalfantasyxiv.com/lodestone/worldstatus/";

/// URL에서 페이지 본문을 가져오는 기능
pub trait PageFetcher: Send + Sync {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// reqwest 기반 HTTP 구현
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Lodestone returned {} for {}", status, url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
