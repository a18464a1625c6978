//! 데이터센터 이름 → 리전 변환
//!
//! Lodestone의 데이터센터 목록은 패치마다 바뀌므로, 모르는 데이터센터도
//! 버리지 않고 기본 리전(NA)으로 처리합니다.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 지리적 리전
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    #[serde(rename = "na")]
    NorthAmerica,
    #[serde(rename = "eu")]
    Europe,
    #[serde(rename = "jp")]
    Japan,
    #[serde(rename = "oc")]
    Oceania,
}

impl Region {
    /// 목록에 없는 데이터센터에 적용되는 리전
    pub const DEFAULT: Region = Region::NorthAmerica;

    pub const ALL: [Region; 4] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Japan,
        Region::Oceania,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Region::NorthAmerica => "na",
            Region::Europe => "eu",
            Region::Japan => "jp",
            Region::Oceania => "oc",
        }
    }

    fn data_centers(self) -> &'static [&'static str] {
        match self {
            Region::NorthAmerica => &["Aether", "Crystal", "Dynamis", "Primal"],
            // Shadow는 2024년 이후 신규 DC
            Region::Europe => &["Chaos", "Light", "Shadow"],
            Region::Japan => &["Elemental", "Gaia", "Mana", "Meteor"],
            Region::Oceania => &["Materia"],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region: {0:?} (expected one of na, eu, jp, oc)")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "north-america" | "north america" | "northamerica" => Ok(Region::NorthAmerica),
            "eu" | "europe" => Ok(Region::Europe),
            "jp" | "japan" => Ok(Region::Japan),
            "oc" | "oce" | "oceania" => Ok(Region::Oceania),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

/// 데이터센터 이름에서 리전 추출
pub fn resolve(data_center: &str) -> Region {
    let s = data_center.trim();

    Region::ALL
        .into_iter()
        .find(|region| {
            region
                .data_centers()
                .iter()
                .any(|name| name.eq_ignore_ascii_case(s))
        })
        .unwrap_or(Region::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_data_centers() {
        assert_eq!(resolve("Aether"), Region::NorthAmerica);
        assert_eq!(resolve("light"), Region::Europe);
        assert_eq!(resolve("  MANA "), Region::Japan);
        assert_eq!(resolve("Materia"), Region::Oceania);
    }

    #[test]
    fn unknown_names_use_default() {
        assert_eq!(resolve("Brand New DC"), Region::DEFAULT);
        assert_eq!(resolve(""), Region::DEFAULT);
        // 부분 일치는 인정하지 않음
        assert_eq!(resolve("Chaos 2"), Region::DEFAULT);
    }

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("EU".parse::<Region>(), Ok(Region::Europe));
        assert_eq!("oceania".parse::<Region>(), Ok(Region::Oceania));
        assert!("mars".parse::<Region>().is_err());
        assert_eq!(Region::Japan.to_string(), "jp");
    }
}
