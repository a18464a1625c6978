//! 월드 상태 조회 서비스
//!
//! 페이지 가져오기 → 파싱 → 캐시를 묶고, 대소문자를 무시하는 조회 API를 제공합니다.
//!
//! 캐시 미스가 동시에 여러 번 발생해도 실제 요청은 한 번만 나갑니다.
//! 갱신은 별도 태스크에서 실행되고, 진행 중인 갱신은 `in_flight`에 공유
//! future로 걸려 있어 그동안 들어온 호출은 모두 같은 결과(성공이든 실패든)를
//! 받습니다. 호출자가 기다리다 포기해도 태스크는 끝까지 돌아 캐시를 채웁니다.

use anyhow::Context;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use crate::error::{CacheError, StatusError};
use crate::lodestone::{parse_page, HttpFetcher, PageFetcher};
use crate::region::Region;
use crate::world::{normalize, RecordGroup, WorldRecord};

type Outcome = Result<Arc<[RecordGroup]>, StatusError>;
type InFlight = Shared<BoxFuture<'static, Outcome>>;

pub struct StatusService<F> {
    inner: Arc<Inner<F>>,
    serve_stale_on_error: bool,
}

struct Inner<F> {
    fetcher: F,
    url: String,
    cache: RwLock<TtlCache<Arc<[RecordGroup]>>>,
    in_flight: Mutex<Option<InFlight>>,
}

impl StatusService<HttpFetcher> {
    /// 설정에서 HTTP 클라이언트와 캐시 생성
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(config.lodestone.timeout(), &config.lodestone.user_agent)
            .context("could not create http client")?;

        let service = Self::new(fetcher, config.lodestone.url.clone(), config.cache.ttl())
            .context("invalid cache configuration")?
            .serve_stale_on_error(config.cache.serve_stale_on_error);

        Ok(service)
    }
}

impl<F: PageFetcher + 'static> StatusService<F> {
    pub fn new(fetcher: F, url: impl Into<String>, ttl: Duration) -> Result<Self, CacheError> {
        let inner = Inner {
            fetcher,
            url: url.into(),
            cache: RwLock::new(TtlCache::new(ttl)?),
            in_flight: Mutex::new(None),
        };

        Ok(Self {
            inner: Arc::new(inner),
            serve_stale_on_error: false,
        })
    }

    /// 갱신 실패 시 만료된 마지막 결과를 대신 반환
    pub fn serve_stale_on_error(mut self, enabled: bool) -> Self {
        self.serve_stale_on_error = enabled;
        self
    }

    /// 캐시가 유효하면 그대로, 아니면 새로 가져와서 반환
    ///
    /// 실패하면 캐시는 건드리지 않습니다. tokio 런타임 안에서 호출해야 합니다.
    pub async fn refresh(&self) -> Result<Arc<[RecordGroup]>, StatusError> {
        if let Some(groups) = self.inner.fresh() {
            tracing::debug!("world status cache hit");
            return Ok(groups);
        }

        let task = {
            let mut in_flight = self.inner.in_flight();

            // 락을 얻는 사이 다른 갱신이 끝났을 수 있음
            if let Some(groups) = self.inner.fresh() {
                tracing::debug!("world status refreshed by a concurrent caller");
                return Ok(groups);
            }

            match &*in_flight {
                Some(task) => {
                    tracing::debug!("joining in-flight world status refresh");
                    task.clone()
                }
                None => {
                    let task = Inner::spawn_refresh(Arc::clone(&self.inner));
                    *in_flight = Some(task.clone());
                    task
                }
            }
        };

        match task.await {
            Ok(groups) => Ok(groups),
            Err(e) => {
                if self.serve_stale_on_error {
                    if let Some(groups) = self.inner.stale() {
                        tracing::warn!("serving stale world status: {}", e);
                        return Ok(groups);
                    }
                }
                Err(e)
            }
        }
    }

    /// 월드 이름으로 조회 (대소문자/앞뒤 공백 무시)
    pub async fn find_world(&self, name: &str) -> Result<Option<WorldRecord>, StatusError> {
        let query = normalize(name);
        let groups = self.refresh().await?;

        Ok(groups
            .iter()
            .flat_map(|g| g.worlds())
            .find(|w| w.name().key() == query)
            .cloned())
    }

    /// 데이터센터 이름으로 조회
    pub async fn find_group(&self, name: &str) -> Result<Option<RecordGroup>, StatusError> {
        let query = normalize(name);
        let groups = self.refresh().await?;

        Ok(groups.iter().find(|g| g.name().key() == query).cloned())
    }

    pub async fn list_all(&self) -> Result<Arc<[RecordGroup]>, StatusError> {
        self.refresh().await
    }

    /// 모든 월드를 데이터센터 순서대로 펼침
    pub async fn list_flat(&self) -> Result<Vec<WorldRecord>, StatusError> {
        let groups = self.refresh().await?;
        Ok(groups.iter().flat_map(|g| g.worlds()).cloned().collect())
    }

    pub async fn list_by_region(&self, region: Region) -> Result<Vec<RecordGroup>, StatusError> {
        let groups = self.refresh().await?;
        Ok(groups.iter().filter(|g| g.region() == region).cloned().collect())
    }

    pub fn clear_cache(&self) {
        self.inner.cache_mut().invalidate();
        tracing::info!("world status cache cleared");
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache_ref().stats()
    }
}

impl<F: PageFetcher + 'static> Inner<F> {
    /// 가져오기 → 파싱 → 캐시 기록을 태스크로 실행
    ///
    /// 태스크가 끝나면 `in_flight`를 비우므로 이후 미스는 새 갱신을 시작합니다.
    fn spawn_refresh(inner: Arc<Self>) -> InFlight {
        let handle = tokio::task::spawn(async move {
            let outcome: Outcome = inner.fetch_and_parse().await.map(Arc::from);

            match &outcome {
                Ok(groups) => inner.cache_mut().write(Arc::clone(groups)),
                Err(e) => tracing::error!("world status refresh failed: {}", e),
            }
            *inner.in_flight() = None;

            outcome
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(StatusError::Task(e.to_string())))
        }
        .boxed()
        .shared()
    }

    async fn fetch_and_parse(&self) -> Result<Vec<RecordGroup>, StatusError> {
        tracing::info!("fetching world status from {}", self.url);
        let page = self.fetcher.fetch_text(&self.url).await?;
        let groups = parse_page(&page)?;

        tracing::info!(
            "loaded {} data centers, {} worlds",
            groups.len(),
            groups.iter().map(|g| g.worlds().len()).sum::<usize>()
        );
        Ok(groups)
    }

    fn fresh(&self) -> Option<Arc<[RecordGroup]>> {
        self.cache_ref().read().cloned()
    }

    fn stale(&self) -> Option<Arc<[RecordGroup]>> {
        self.cache_ref().stale().cloned()
    }

    fn in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_ref(&self) -> RwLockReadGuard<'_, TtlCache<Arc<[RecordGroup]>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_mut(&self) -> RwLockWriteGuard<'_, TtlCache<Arc<[RecordGroup]>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}
