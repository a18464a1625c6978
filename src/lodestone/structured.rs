//! 구조화 파싱 전략
//!
//! 현재 Lodestone 마크업 기준:
//!
//! ```html
//! <li class="world-dcgroup__item">
//!   <h2 class="world-dcgroup__header">Aether</h2>
//!   <div class="world-list__item">
//!     <div class="world-list__status_icon"><i data-tooltip="Online"></i></div>
//!     <div class="world-list__world_name"><p>Adamantoise</p></div>
//!     <div class="world-list__world_category"><p>Standard</p></div>
//!     <div class="world-list__create_character"><i data-tooltip="Creation of New Characters Available"></i></div>
//!   </div>
//! </li>
//! ```

use markup5ever_rcdom::Handle;
use std::collections::HashSet;

use super::dom::{find_attr, find_by_class, first_by_class, text_of};
use super::parser::Strategy;
use crate::classify::{classify, creation_closed};
use crate::world::{Name, RecordGroup, WorldRecord};

const GROUP: &str = "world-dcgroup__item";
const GROUP_HEADER: &str = "world-dcgroup__header";
const WORLD: &str = "world-list__item";
const WORLD_NAME: &str = "world-list__world_name";
const WORLD_STATUS: &str = "world-list__status_icon";
const WORLD_CATEGORY: &str = "world-list__world_category";
const WORLD_CREATE: &str = "world-list__create_character";

const TOOLTIP_ATTRS: [&str; 2] = ["data-tooltip", "title"];

pub fn parse(document: &Handle) -> Strategy {
    let containers = find_by_class(document, GROUP);
    if containers.is_empty() {
        return Strategy::NotApplicable;
    }

    let mut seen = HashSet::new();
    let mut groups = Vec::new();

    for container in &containers {
        let Some(header) = first_by_class(container, GROUP_HEADER) else {
            tracing::debug!("skipping data center container without header");
            continue;
        };

        let name = match Name::new(&text_of(&header)) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("skipping data center: {}", e);
                continue;
            }
        };

        if !seen.insert(name.key()) {
            tracing::debug!("skipping duplicate data center {}", name);
            continue;
        }

        let worlds: Vec<WorldRecord> = find_by_class(container, WORLD)
            .iter()
            .filter_map(parse_world)
            .collect();

        match RecordGroup::new(name, worlds) {
            Some(group) => groups.push(group),
            None => tracing::debug!("dropping data center without worlds"),
        }
    }

    Strategy::Parsed(groups)
}

fn parse_world(item: &Handle) -> Option<WorldRecord> {
    let name = first_by_class(item, WORLD_NAME).map(|node| text_of(&node))?;
    let name = match Name::new(&name) {
        Ok(name) => name,
        Err(e) => {
            tracing::debug!("skipping world: {}", e);
            return None;
        }
    };

    let status = first_by_class(item, WORLD_STATUS).map(|node| label_of(&node));
    let category = first_by_class(item, WORLD_CATEGORY).map(|node| text_of(&node));
    if status.is_none() && category.is_none() {
        tracing::debug!("skipping world {} without status", name);
        return None;
    }
    let closed = first_by_class(item, WORLD_CREATE)
        .map(|node| creation_closed(&label_of(&node)))
        .unwrap_or(false);

    Some(WorldRecord::new(
        name,
        classify(&format!(
            "{} {}",
            status.unwrap_or_default(),
            category.unwrap_or_default()
        )),
        closed,
    ))
}

/// 아이콘은 툴팁 속성, 그 외에는 텍스트
fn label_of(node: &Handle) -> String {
    find_attr(node, &TOOLTIP_ATTRS).unwrap_or_else(|| text_of(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lodestone::dom::parse_html;
    use crate::region::Region;
    use crate::world::{Availability, Population};

    fn world(name: &str, status: &str, category: &str, create: &str) -> String {
        format!(
            r#"<div class="world-list__item">
                 <div class="world-list__status_icon"><i class="world-ic__1" data-tooltip="{status}"></i></div>
                 <div class="world-list__world_name"><p>{name}</p></div>
                 <div class="world-list__world_category"><p>{category}</p></div>
                 <div class="world-list__create_character"><i data-tooltip="{create}"></i></div>
               </div>"#
        )
    }

    fn group(name: &str, worlds: &[String]) -> String {
        format!(
            r#"<li class="world-dcgroup__item"><h2 class="world-dcgroup__header">{name}</h2><ul>{}</ul></li>"#,
            worlds.join("")
        )
    }

    fn parsed(html: &str) -> Vec<RecordGroup> {
        match parse(&parse_html(html).document) {
            Strategy::Parsed(groups) => groups,
            Strategy::NotApplicable => panic!("expected structured markup"),
        }
    }

    const AVAILABLE: &str = "Creation of New Characters Available";
    const UNAVAILABLE: &str = "Creation of New Characters Unavailable";

    #[test]
    fn not_applicable_without_containers() {
        let dom = parse_html("<h2>Aether</h2><ul><li>Adamantoise Standard</li></ul>");
        assert!(matches!(parse(&dom.document), Strategy::NotApplicable));
    }

    #[test]
    fn reads_worlds_in_document_order() {
        let html = format!(
            "<ul>{}{}</ul>",
            group(
                "Aether",
                &[
                    world("Adamantoise", "Online", "Standard", AVAILABLE),
                    world("Gilgamesh", "Online", "Congested", UNAVAILABLE),
                ]
            ),
            group("Light", &[world("Zodiark", "Maintenance", "Preferred", AVAILABLE)]),
        );

        let groups = parsed(&html);
        assert_eq!(groups.len(), 2);

        let aether = &groups[0];
        assert_eq!(aether.name().as_str(), "Aether");
        assert_eq!(aether.region(), Region::NorthAmerica);
        let names: Vec<_> = aether.worlds().iter().map(|w| w.name().as_str()).collect();
        assert_eq!(names, ["Adamantoise", "Gilgamesh"]);
        assert_eq!(aether.worlds()[1].population(), Population::Congested);
        assert!(!aether.worlds()[1].character_creation_open());

        let zodiark = &groups[1].worlds()[0];
        assert_eq!(groups[1].region(), Region::Europe);
        assert_eq!(zodiark.availability(), Availability::Maintenance);
        assert_eq!(zodiark.population(), Population::Preferred);
        assert!(zodiark.character_creation_open());
    }

    #[test]
    fn explicit_creation_marker_is_honoured() {
        let html = group("Mana", &[world("Anima", "Online", "Standard", UNAVAILABLE)]);
        let groups = parsed(&html);
        assert!(!groups[0].worlds()[0].character_creation_open());
    }

    #[test]
    fn incomplete_entries_are_skipped_individually() {
        let html = format!(
            "<ul>{}{}{}{}</ul>",
            // 헤더 없음
            r#"<li class="world-dcgroup__item"><ul>"#.to_string()
                + &world("Lost", "Online", "Standard", AVAILABLE)
                + "</ul></li>",
            // 월드 없음
            group("Chaos", &[]),
            // 잘못된 이름은 해당 월드만 제외
            group(
                "Crystal",
                &[
                    world("Bad;Name", "Online", "Standard", AVAILABLE),
                    r#"<div class="world-list__item"><p>no name</p></div>"#.to_string(),
                    // 상태/혼잡도 필드가 모두 없음
                    r#"<div class="world-list__item"><div class="world-list__world_name"><p>Ghost</p></div></div>"#.to_string(),
                    world("Balmung", "Online", "Standard", AVAILABLE),
                ]
            ),
            group("Crystal", &[world("Coeurl", "Online", "New", AVAILABLE)]),
        );

        let groups = parsed(&html);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name().as_str(), "Crystal");
        assert_eq!(groups[0].worlds().len(), 1);
        assert_eq!(groups[0].worlds()[0].name().as_str(), "Balmung");
    }
}
