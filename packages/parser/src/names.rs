//! Name conversions between the two dialects.
//!
//! The AST always stores React spellings: camelCase props and PascalCase
//! component tags. Vue templates use kebab-case for both.

/// `primary-color` → `primaryColor`
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `primaryColor` → `primary-color`, `ContentLoader` → `content-loader`
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Canonical tag for a Vue template tag: hyphenated tags are components
pub fn vue_tag_to_canonical(tag: &str) -> String {
    if tag.contains('-') {
        let camel = kebab_to_camel(tag);
        let mut chars = camel.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => camel,
        }
    } else {
        tag.to_string()
    }
}

/// Tag as written in a Vue template
pub fn canonical_tag_to_vue(tag: &str) -> String {
    if tag.starts_with(|c: char| c.is_ascii_uppercase()) {
        camel_to_kebab(tag)
    } else {
        tag.to_string()
    }
}

/// Components start with an uppercase letter, everything else is an intrinsic element
pub fn is_component_tag(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_names() {
        assert_eq!(kebab_to_camel("primary-color"), "primaryColor");
        assert_eq!(camel_to_kebab("secondaryColor"), "secondary-color");
        assert_eq!(kebab_to_camel("width"), "width");
        assert_eq!(camel_to_kebab("viewBox"), "view-box");
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(vue_tag_to_canonical("content-loader"), "ContentLoader");
        assert_eq!(vue_tag_to_canonical("rect"), "rect");
        assert_eq!(canonical_tag_to_vue("ContentLoader"), "content-loader");
        assert_eq!(canonical_tag_to_vue("circle"), "circle");
    }
}
