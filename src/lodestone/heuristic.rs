//! 휴리스틱 파싱 전략
//!
//! 구조화 마크업이 바뀌었을 때를 위한 대체 경로입니다. 제목 요소를 데이터센터
//! 이름으로, 뒤따르는 목록의 "월드이름 혼잡도" 형태 항목을 월드로 간주합니다.

use lazy_static::lazy_static;
use markup5ever_rcdom::Handle;
use regex::Regex;
use std::collections::HashSet;

use super::dom::{element_name, text_of};
use crate::classify::classify;
use crate::world::{Name, RecordGroup, WorldRecord};

lazy_static! {
    static ref WORLD_ROW: Regex = Regex::new(
        r"(?i)^([A-Za-z][A-Za-z ]*?)\s+(standard|preferred\+|preferred|congested|new)$"
    )
    .unwrap();
}

fn is_heading(node: &Handle) -> bool {
    matches!(element_name(node), Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
}

fn is_list(node: &Handle) -> bool {
    matches!(element_name(node), Some("ul" | "ol"))
}

pub fn parse(document: &Handle) -> Vec<RecordGroup> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();

    for (heading, list) in collect_headings(document) {
        let Ok(name) = Name::new(&text_of(&heading)) else {
            continue;
        };

        // 같은 이름은 처음 나온 제목만 사용 (목록이 없었더라도)
        if !seen.insert(name.key()) {
            tracing::debug!("skipping repeated heading {}", name);
            continue;
        }

        let Some(list) = list else {
            continue;
        };

        let worlds: Vec<WorldRecord> = list
            .children
            .borrow()
            .iter()
            .filter(|child| element_name(child) == Some("li"))
            .filter_map(parse_row)
            .collect();

        if let Some(group) = RecordGroup::new(name, worlds) {
            groups.push(group);
        }
    }

    groups
}

/// 문서 순서대로 (제목, 뒤따르는 첫 목록) 쌍 수집
///
/// 목록을 찾을 때 목록이 아닌 형제는 모두 건너뜁니다. 깊게 중첩된 문서에서도
/// 스택이 넘치지 않도록 (부모, 다음 자식 위치) 스택으로 순회합니다.
fn collect_headings(document: &Handle) -> Vec<(Handle, Option<Handle>)> {
    let mut out = Vec::new();
    let mut stack = vec![(document.clone(), 0)];

    while let Some((node, i)) = stack.pop() {
        let child = {
            let children = node.children.borrow();
            let Some(child) = children.get(i).cloned() else {
                continue;
            };

            if is_heading(&child) {
                let list = children[i + 1..].iter().find(|sibling| is_list(sibling)).cloned();
                out.push((child.clone(), list));
            }
            child
        };

        stack.push((node, i + 1));
        stack.push((child, 0));
    }

    out
}

fn parse_row(item: &Handle) -> Option<WorldRecord> {
    let text = text_of(item);
    let captures = WORLD_ROW.captures(&text)?;
    let name = Name::new(&captures[1]).ok()?;

    Some(WorldRecord::new(name, classify(&captures[2]), false))
}
