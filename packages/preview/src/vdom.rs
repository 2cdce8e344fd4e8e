use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Virtual DOM node produced by a sandbox render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    /// Concatenated text of the direct text children
    pub fn text_content(&self) -> String {
        self.children()
            .iter()
            .filter_map(|child| match child {
                VNode::Text { content } => Some(content.as_str()),
                VNode::Element { .. } => None,
            })
            .collect()
    }

    /// First element with `tag`, depth first, including `self`
    pub fn find(&self, tag: &str) -> Option<&VNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(tag))
    }

    /// Serialize as markup, two-space indented
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, 0);
        out
    }

    fn write_markup(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            VNode::Text { content } => {
                let _ = writeln!(out, "{}{}", indent, escape_markup(content));
            }
            VNode::Element {
                tag,
                attributes,
                styles,
                children,
            } => {
                let _ = write!(out, "{}<{}", indent, tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape_markup(value));
                }
                if !styles.is_empty() {
                    let style = styles
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(out, " style=\"{}\"", escape_markup(&style));
                }

                if children.is_empty() {
                    out.push_str(" />\n");
                    return;
                }
                out.push_str(">\n");
                for child in children {
                    child.write_markup(out, depth + 1);
                }
                let _ = writeln!(out, "{}</{}>", indent, tag);
            }
        }
    }
}

fn escape_markup(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_depth_first() {
        let tree = VNode::element("svg")
            .with_child(VNode::element("defs").with_child(VNode::element("rect").with_attr("x", "1")))
            .with_child(VNode::element("rect").with_attr("x", "2"));

        assert_eq!(tree.find("rect").and_then(|n| n.attr("x")), Some("1"));
        assert!(tree.find("circle").is_none());
    }

    #[test]
    fn test_to_markup() {
        let tree = VNode::element("svg")
            .with_attr("width", "400")
            .with_style("transform", "scaleX(-1)")
            .with_child(VNode::element("title").with_child(VNode::text("a < b")))
            .with_child(VNode::element("rect").with_attr("x", "0"));

        assert_eq!(
            tree.to_markup(),
            "<svg width=\"400\" style=\"transform: scaleX(-1)\">\n  <title>\n    a &lt; b\n  </title>\n  <rect x=\"0\" />\n</svg>\n"
        );
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_string(&VNode::text("hi")).unwrap();
        assert_eq!(json, r#"{"type":"Text","content":"hi"}"#);
    }
}
