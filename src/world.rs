//! 월드/데이터센터 레코드 타입
//!
//! 모든 레코드는 파서가 한 번의 파싱 과정에서 생성하며 이후 변경되지 않습니다.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::classify::Classification;
use crate::error::NameError;
use crate::region::{self, Region};

lazy_static! {
    /// 문자, 숫자, 공백, 하이픈, 아포스트로피만 허용
    static ref NAME_PATTERN: Regex = Regex::new(r"^[\p{L}\p{N} '’-]+$").unwrap();
}

/// 검증된 월드/데이터센터 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if !NAME_PATTERN.is_match(trimmed) {
            return Err(NameError::InvalidCharacter(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 대소문자를 무시하는 비교용 키
    pub fn key(&self) -> String {
        normalize(&self.0)
    }

    /// 사용자 입력과 대소문자/앞뒤 공백을 무시하고 비교
    pub fn matches(&self, query: &str) -> bool {
        self.key() == normalize(query)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 조회용 정규화 (trim + 소문자)
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// 월드 가용 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Online,
    Offline,
    #[serde(rename = "under-maintenance")]
    Maintenance,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Availability::Online => "Online",
            Availability::Offline => "Offline",
            Availability::Maintenance => "Maintenance",
        })
    }
}

/// 월드 혼잡도 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Population {
    Standard,
    Preferred,
    PreferredPlus,
    Congested,
    New,
    Unknown,
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Population::Standard => "Standard",
            Population::Preferred => "Preferred",
            Population::PreferredPlus => "Preferred+",
            Population::Congested => "Congested",
            Population::New => "New",
            Population::Unknown => "Unknown",
        })
    }
}

/// 월드 하나의 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldRecord {
    name: Name,
    availability: Availability,
    population: Population,
    character_creation_open: bool,
}

impl WorldRecord {
    /// `creation_closed`는 페이지에 생성 불가가 명시된 경우에만 true.
    /// Congested 월드는 표시와 관계없이 생성 불가로 기록됩니다.
    pub fn new(name: Name, status: Classification, creation_closed: bool) -> Self {
        Self {
            name,
            availability: status.availability,
            population: status.population,
            character_creation_open: status.character_creation_open && !creation_closed,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn population(&self) -> Population {
        self.population
    }

    pub fn character_creation_open(&self) -> bool {
        self.character_creation_open
    }
}

/// 데이터센터 (월드 묶음)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordGroup {
    name: Name,
    region: Region,
    worlds: Vec<WorldRecord>,
}

impl RecordGroup {
    /// 월드가 하나도 없으면 그룹을 만들지 않습니다.
    pub fn new(name: Name, worlds: Vec<WorldRecord>) -> Option<Self> {
        if worlds.is_empty() {
            return None;
        }

        let region = region::resolve(name.as_str());
        Some(Self {
            name,
            region,
            worlds,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn worlds(&self) -> &[WorldRecord] {
        &self.worlds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn name_validation() {
        assert_eq!(Name::new("  Adamantoise ").unwrap().as_str(), "Adamantoise");
        assert!(Name::new("Kujata's Rest").is_ok());
        assert!(Name::new("New-World 2").is_ok());
        assert_eq!(Name::new("   "), Err(NameError::Empty));
        assert!(matches!(
            Name::new("<script>"),
            Err(NameError::InvalidCharacter(_))
        ));
        assert!(Name::new("Gilgamesh;").is_err());
    }

    #[test]
    fn name_matching_ignores_case_and_padding() {
        let name = Name::new("Example").unwrap();
        for query in ["EXAMPLE", "example", "  Example  "] {
            assert!(name.matches(query), "{query:?}");
        }
        assert!(!name.matches("Exampl"));
    }

    #[test]
    fn congested_world_is_closed_even_without_marker() {
        let world = WorldRecord::new(Name::new("Gilgamesh").unwrap(), classify("Congested"), false);
        assert!(!world.character_creation_open());
    }

    #[test]
    fn explicit_marker_closes_creation() {
        let world = WorldRecord::new(Name::new("Siren").unwrap(), classify("Standard"), true);
        assert_eq!(world.population(), Population::Standard);
        assert!(!world.character_creation_open());
    }

    #[test]
    fn empty_group_is_dropped_and_region_resolved() {
        assert!(RecordGroup::new(Name::new("Aether").unwrap(), Vec::new()).is_none());

        let world = WorldRecord::new(Name::new("Omega").unwrap(), classify("Standard"), false);
        let group = RecordGroup::new(Name::new("Chaos").unwrap(), vec![world]).unwrap();
        assert_eq!(group.region(), Region::Europe);
        assert_eq!(group.worlds().len(), 1);
    }
}
