//! 페이지 → 데이터센터 목록
//!
//! 구조화 전략을 먼저 시도하고, 해당 마크업이 없거나 아무것도 찾지 못하면
//! 같은 DOM에 휴리스틱 전략을 적용합니다.

use crate::error::ParseError;
use crate::world::RecordGroup;

use super::{dom, heuristic, structured};

/// 구조화 전략 결과
#[derive(Debug)]
pub enum Strategy {
    Parsed(Vec<RecordGroup>),
    /// 전용 컨테이너가 하나도 없음 (실패가 아니라 전제 조건 불충족)
    NotApplicable,
}

pub fn parse_page(text: &str) -> Result<Vec<RecordGroup>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let dom = dom::parse_html(text);

    let groups = match structured::parse(&dom.document) {
        Strategy::Parsed(groups) if !groups.is_empty() => groups,
        Strategy::Parsed(_) => {
            tracing::warn!("structured markup yielded no data centers, falling back to headings");
            heuristic::parse(&dom.document)
        }
        Strategy::NotApplicable => {
            tracing::warn!("no data center containers found, falling back to headings");
            heuristic::parse(&dom.document)
        }
    };

    if groups.is_empty() {
        return Err(ParseError::NoGroups(text.len()));
    }

    tracing::debug!(
        "parsed {} data centers ({} worlds)",
        groups.len(),
        groups.iter().map(|g| g.worlds().len()).sum::<usize>()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_markup_wins() {
        let html = r#"
            <li class="world-dcgroup__item">
              <h2 class="world-dcgroup__header">Elemental</h2>
              <div class="world-list__item">
                <div class="world-list__world_name"><p>Tonberry</p></div>
                <div class="world-list__world_category"><p>Congested</p></div>
              </div>
            </li>
            <h2>Decoy</h2><ul><li>Fake Standard</li></ul>"#;

        let groups = parse_page(html).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name().as_str(), "Elemental");
    }

    #[test]
    fn falls_back_when_containers_are_missing() {
        let html = "<h2>Aether</h2><ul><li>Jenova Standard</li></ul>
                    <h2>Crystal</h2><ul><li>Zalera Preferred</li></ul>";

        let groups = parse_page(html).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.worlds().len() == 1));
    }

    #[test]
    fn falls_back_when_containers_are_empty() {
        let html = r#"<div class="world-dcgroup__item"></div>
                      <h2>Meteor</h2><ul><li>Belias Standard</li></ul>"#;

        let groups = parse_page(html).unwrap();
        assert_eq!(groups[0].name().as_str(), "Meteor");
    }

    #[test]
    fn nothing_found_is_an_error() {
        assert_eq!(
            parse_page("<html><body><p>Service unavailable</p></body></html>"),
            Err(ParseError::NoGroups(52))
        );
    }

    #[test]
    fn blank_document_is_empty() {
        assert_eq!(parse_page(""), Ok(Vec::new()));
        assert_eq!(parse_page("  \n "), Ok(Vec::new()));
    }
}
