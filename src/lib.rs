//! FFXIV 월드 상태 조회
//!
//! Lodestone 월드 상태 페이지를 가져와 데이터센터/월드 레코드로 변환하고,
//! TTL 캐시를 거쳐 조회 API로 제공합니다.

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod lodestone;
pub mod region;
pub mod service;
pub mod world;


pub use cache::{CacheStats, TtlCache};
pub use config::Config;
pub use error::{CacheError, FetchError, NameError, ParseError, StatusError};
pub use region::Region;
pub use service::StatusService;
pub use world::{Availability, Name, Population, RecordGroup, WorldRecord};
