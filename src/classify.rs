//! 월드 상태 라벨 분류
//!
//! Lodestone 페이지의 자유 형식 상태 문자열("Online", "Preferred+",
//! "Maintenance" 등)을 정규화된 상태/혼잡도 모델로 변환합니다.
//! 어떤 입력에도 실패하지 않습니다.

use crate::world::{Availability, Population};

/// 상태 라벨 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub availability: Availability,
    pub population: Population,
    /// 신규 캐릭터 생성 가능 여부 (Congested면 항상 false)
    pub character_creation_open: bool,
}

/// 상태 라벨 분류
///
/// 가용성은 "maintenance" → "offline" → 그 외(online) 순서로 판정하고,
/// 혼잡도는 가용성과 독립적으로 구체적인 토큰부터 검사합니다.
pub fn classify(label: &str) -> Classification {
    let text = label.trim().to_lowercase();

    let availability = if text.contains("maintenance") {
        Availability::Maintenance
    } else if text.contains("offline") {
        Availability::Offline
    } else {
        Availability::Online
    };

    let population = population_of(&text);

    Classification {
        availability,
        population,
        character_creation_open: population != Population::Congested,
    }
}

/// 캐릭터 생성 칸에 명시적인 "불가" 표시가 있는지 확인
pub fn creation_closed(label: &str) -> bool {
    let text = label.trim().to_lowercase();
    text.contains("unavailable") || text.contains("closed")
}

fn population_of(text: &str) -> Population {
    // "renewal" 같은 단어가 "new"로 잡히지 않도록 단어 단위로 비교
    let tokens: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric() && c != '+')
        .filter(|t| !t.is_empty())
        .collect();
    let has = |token: &str| tokens.iter().any(|t| *t == token);

    if has("preferred+") {
        Population::PreferredPlus
    } else if has("preferred") {
        Population::Preferred
    } else if has("congested") {
        Population::Congested
    } else if has("new") {
        Population::New
    } else {
        Population::Standard
    }
}
