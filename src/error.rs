//! 계층별 에러 타입
//!
//! 파서/캐시/전송 계층은 각자의 에러를 가지며, 서비스 경계에서는
//! `StatusError` 하나로 감싸서 원인 메시지를 보존합니다.

use thiserror::Error;

/// 이름 검증 실패 (해당 레코드만 건너뜀)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name contains disallowed characters: {0:?}")]
    InvalidCharacter(String),
}

/// 페이지 가져오기 실패
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Transport(e.to_string()),
        }
    }
}

/// 두 파싱 전략 모두 결과를 찾지 못함
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no data centers found in a {0}-byte page")]
    NoGroups(usize),
}

/// 캐시 생성 설정 오류 (시작 시점에 치명적)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache ttl must be positive")]
    InvalidTtl,
}

/// 서비스 경계 에러
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("could not fetch world status: {0}")]
    Fetch(#[source] FetchError),
    #[error("could not parse world status: {0}")]
    Parse(#[source] ParseError),
    /// 갱신 태스크가 결과 없이 끝남 (패닉 등)
    #[error("world status refresh task failed: {0}")]
    Task(String),
}

impl From<FetchError> for StatusError {
    fn from(e: FetchError) -> Self {
        StatusError::Fetch(e)
    }
}

impl From<ParseError> for StatusError {
    fn from(e: ParseError) -> Self {
        StatusError::Parse(e)
    }
}
