//! Prints a [`LoaderDocument`] as source text in its dialect.
//!
//! Generation and translation both end here, so the two always agree on the
//! exact layout of a component.

use crate::context::CompilerContext;
use loaderkit_model::Framework;
use loaderkit_parser::names::{camel_to_kebab, canonical_tag_to_vue};
use loaderkit_parser::{AttrValue, Attribute, Element, ImportDecl, LoaderDocument};

const LOADER_BINDING: &str = "ContentLoader";

/// Print `document` in `document.dialect`
pub fn print(document: &LoaderDocument) -> String {
    let ctx = CompilerContext::new(document.dialect);

    if let Some(import) = &document.import {
        print_import(import, &ctx);
        ctx.add("\n");
    }

    match ctx.dialect {
        Framework::React => print_react_component(document, &ctx),
        Framework::Vue => print_vue_component(document, &ctx),
    }

    ctx.into_output()
}

/// Round to two decimals and print the shortest form (`6.4`, `30`, never `-0`)
pub fn format_number(value: f64) -> String {
    round_number(value).to_string()
}

/// Round to two decimals, normalising `-0`. Values too large for the scaled
/// intermediate to stay finite are left as they are.
pub fn round_number(value: f64) -> f64 {
    let scaled = value * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn print_import(import: &ImportDecl, ctx: &CompilerContext) {
    let binding = if import.named {
        format!("{{ {} }}", import.binding)
    } else {
        import.binding.clone()
    };
    ctx.add_line(&format!(
        "import {} from \"{}\"",
        binding,
        escape_js(&import.source)
    ));
}

fn print_react_component(document: &LoaderDocument, ctx: &CompilerContext) {
    ctx.add_line(&format!("const {} = () => (", document.component_name));
    ctx.indent();
    print_element(&document.root, ctx, true);
    ctx.dedent();
    ctx.add_line(")");
}

fn print_vue_component(document: &LoaderDocument, ctx: &CompilerContext) {
    let binding = document
        .import
        .as_ref()
        .map(|import| import.binding.as_str())
        .unwrap_or(LOADER_BINDING);

    ctx.add_line(&format!("const {} = {{", document.component_name));
    ctx.indent();
    ctx.add_line(&format!("components: {{ {} }},", binding));
    ctx.add_line("template: `");
    ctx.indent();
    print_element(&document.root, ctx, true);
    ctx.dedent();
    ctx.add_line("`");
    ctx.dedent();
    ctx.add_line("}");
}

/// The root element lists one attribute per line; primitives stay on one line
fn print_element(element: &Element, ctx: &CompilerContext, expanded: bool) {
    let tag = match ctx.dialect {
        Framework::React => element.tag.clone(),
        Framework::Vue => canonical_tag_to_vue(&element.tag),
    };

    if expanded && !element.attributes.is_empty() {
        ctx.add_line(&format!("<{}", tag));
        ctx.indent();
        for attr in &element.attributes {
            ctx.add_line(&print_attribute(attr, ctx.dialect));
        }
        ctx.dedent();

        if element.children.is_empty() {
            ctx.add_line("/>");
            return;
        }
        ctx.add_line(">");
    } else {
        let mut open = format!("<{}", tag);
        for attr in &element.attributes {
            open.push(' ');
            open.push_str(&print_attribute(attr, ctx.dialect));
        }

        if element.children.is_empty() {
            open.push_str(" />");
            ctx.add_line(&open);
            return;
        }
        open.push('>');
        ctx.add_line(&open);
    }

    ctx.indent();
    for child in &element.children {
        print_element(child, ctx, false);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
}

fn print_attribute(attr: &Attribute, dialect: Framework) -> String {
    match dialect {
        Framework::React => match &attr.value {
            AttrValue::Bool(true) => attr.name.clone(),
            AttrValue::Bool(false) => format!("{}={{false}}", attr.name),
            AttrValue::Number(n) => format!("{}={{{}}}", attr.name, format_number(*n)),
            AttrValue::Str(s) if needs_jsx_expression(s) => {
                format!("{}={{\"{}\"}}", attr.name, escape_js(s))
            }
            AttrValue::Str(s) => format!("{}=\"{}\"", attr.name, s),
        },
        Framework::Vue => {
            let name = camel_to_kebab(&attr.name);
            match &attr.value {
                AttrValue::Bool(b) => format!(":{}=\"{}\"", name, b),
                AttrValue::Number(n) => format!(":{}=\"{}\"", name, format_number(*n)),
                AttrValue::Str(s) => format!("{}=\"{}\"", name, escape_vue_attribute(s)),
            }
        }
    }
}

/// JSX attribute strings cannot escape, so anything awkward goes in `{"..."}`
fn needs_jsx_expression(value: &str) -> bool {
    value.contains(['"', '\\', '&', '\n', '\r', '\u{2028}', '\u{2029}'])
}

fn escape_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Markup attribute inside a template literal: entity-encode for the markup,
/// then escape for the literal
fn escape_vue_attribute(value: &str) -> String {
    let markup = value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;");

    let mut out = String::with_capacity(markup.len());
    for c in markup.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}
