use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub fn parse_html(text: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(text)
}

/// 요소 태그 이름 (요소가 아니면 None)
pub fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub fn get_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    get_attr(node, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// 하위 노드를 문서 순서(전위)로 순회 (자기 자신 제외)
///
/// 재귀 대신 명시적 스택을 쓰므로 중첩 깊이에 제한이 없습니다.
pub struct Descendants {
    stack: Vec<Handle>,
}

impl Iterator for Descendants {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.borrow().iter().rev().cloned());
        Some(node)
    }
}

pub fn descendants(node: &Handle) -> Descendants {
    Descendants {
        stack: node.children.borrow().iter().rev().cloned().collect(),
    }
}

/// 문서 순서대로 class가 일치하는 하위 요소를 모두 찾기 (자기 자신 제외)
pub fn find_by_class(node: &Handle, class: &str) -> Vec<Handle> {
    descendants(node).filter(|n| has_class(n, class)).collect()
}

pub fn first_by_class(node: &Handle, class: &str) -> Option<Handle> {
    descendants(node).find(|n| has_class(n, class))
}

/// 자신 또는 하위 요소에서 처음 발견되는 속성 값
pub fn find_attr(node: &Handle, attr_names: &[&str]) -> Option<String> {
    std::iter::once(node.clone())
        .chain(descendants(node))
        .find_map(|n| attr_names.iter().find_map(|name| get_attr(&n, name)))
}

/// 하위 텍스트를 모두 이어 붙이고 공백을 하나로 정리 (script/style 제외)
pub fn text_of(node: &Handle) -> String {
    let mut raw = String::new();
    let mut stack = vec![node.clone()];

    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => {
                raw.push_str(&contents.borrow());
                raw.push(' ');
            }
            NodeData::Element { name, .. } if matches!(&*name.local, "script" | "style") => {}
            _ => stack.extend(node.children.borrow().iter().rev().cloned()),
        }
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_lookup_and_text() {
        let dom = parse_html(
            r#"<div class="a b"><p class="b">  Hello
               <span>world</span></p><script>ignored()</script></div>"#,
        );
        let found = find_by_class(&dom.document, "b");
        assert_eq!(found.len(), 2);
        assert_eq!(element_name(&found[0]), Some("div"));
        assert_eq!(text_of(&found[1]), "Hello world");
        assert_eq!(text_of(&found[0]), "Hello world");
    }

    #[test]
    fn attribute_search_descends() {
        let dom = parse_html(r#"<div class="icon"><i data-tooltip="Online"></i></div>"#);
        let icon = first_by_class(&dom.document, "icon").unwrap();
        assert_eq!(find_attr(&icon, &["data-tooltip", "title"]).as_deref(), Some("Online"));
        assert_eq!(find_attr(&icon, &["title"]), None);
    }

    #[test]
    fn deep_nesting_is_walked_without_recursion() {
        let depth = 10_000;
        let html = format!(
            r#"{}<span class="leaf" title="deep">bottom</span>{}"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let dom = parse_html(&html);

        let leaf = first_by_class(&dom.document, "leaf").unwrap();
        assert_eq!(text_of(&leaf), "bottom");
        assert_eq!(text_of(&dom.document), "bottom");
        assert_eq!(find_attr(&dom.document, &["title"]).as_deref(), Some("deep"));
        assert!(descendants(&dom.document).count() > depth);
    }
}
