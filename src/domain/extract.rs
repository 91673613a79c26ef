use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Tags whose subtrees are dropped before text extraction. Tracking and
/// analytics snippets in these commonly contain promo vocabulary.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Reduce raw HTML to lower-cased visible text with single-space
/// separators. Parsing is best-effort: html5ever never fails, malformed
/// input degrades to whatever structure is parseable.
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(doc.tree.root(), &mut raw);
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
                    continue;
                }
                collect_text(child, out);
            }
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            _ => {}
        }
    }
}
