//! Lodestone 월드 상태 페이지 관련 모듈
//!
//! - `client`: 페이지 가져오기 (HTTP)
//! - `parser`: 파싱 전략 선택
//! - `structured`: 전용 마크업 기반 파서
//! - `heuristic`: 제목/목록 기반 대체 파서
//! - `dom`: html5ever DOM 헬퍼

pub mod client;
pub mod parser;
pub mod structured;
pub mod heuristic;
mod dom;

// 편의를 위한 re-export
pub use client::{HttpFetcher, PageFetcher, WORLD_STATUS_URL};
pub use parser::{parse_page, Strategy};
