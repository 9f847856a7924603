//! Overload signatures and the pieces shared with other declarations:
//! template headers and `requires` clauses.

use super::{Context, Style};
use crate::html::Element;
use crate::model::*;

/// Where the name in a signature points.
pub(super) enum NameLink {
    /// The function's own page (namespace listings).
    Page,
    /// This page: the function page itself, whose URL is `#`.
    Here,
    /// An anchor on this page, which the name also defines.
    Anchor(String),
}

/// `template <class T, class U>` as its own single-line block.
pub(super) fn template_header(params: &[String]) -> Option<Element> {
    if params.is_empty() {
        return None;
    }
    Some(
        Element::div("template")
            .single_line()
            .text(format!("template <{}>", params.join(", "))),
    )
}

/// A `requires` clause with one line per constraint expression.
pub(super) fn requires_clause(constraints: &[String]) -> Option<Element> {
    if constraints.is_empty() {
        return None;
    }
    let mut clause = Element::div("requires");
    clause.push(Element::text_span("requires-keyword", "requires"));
    for constraint in constraints {
        clause.push(
            Element::div("requires-constraint")
                .single_line()
                .text(constraint.as_str()),
        );
    }
    Some(clause)
}

/// One overload's signature line.
pub(super) fn overload_signature(
    cx: &mut Context<'_>,
    id: EntityId,
    function: &FunctionElement,
    overload: &FunctionOverload,
    style: Style,
    name_link: NameLink,
) -> Element {
    let mut sig = Element::div("function-signature").single_line();
    let has_return = overload.has_return();

    if style.is_long() {
        if let Some(template) = template_header(&overload.template_params) {
            sig.push(template);
        }
        if overload.is_static() {
            sig.push(Element::text_span("static", "static"));
            sig.push_text(" ");
        }
        if has_return {
            sig.push(Element::text_span("function-auto", "auto"));
            sig.push_text(" ");
        }
    }

    let name = function.header.name.as_str();
    sig.push(match name_link {
        NameLink::Page => cx.link(id, id, "function-name", name),
        NameLink::Here => Element::new("a")
            .class("function-name")
            .attr("href", "#")
            .text(name)
            .into(),
        NameLink::Anchor(anchor) => Element::new("a")
            .class("function-name")
            .attr("id", anchor.as_str())
            .attr("href", format!("#{anchor}"))
            .text(name)
            .into(),
    });

    if !style.is_long() {
        return sig;
    }

    parameters(cx, id, overload, &mut sig);
    if has_return {
        sig.push_text(" -> ");
        match &overload.return_type {
            Some(ty) => {
                let node = cx.type_ref(id, ty);
                sig.push(node);
            }
            None => sig.push_text("void"),
        }
    }
    if style == Style::LongWithConstraints {
        if let Some(clause) = requires_clause(&overload.constraints) {
            sig.push(clause);
        }
    }
    extras(overload, &mut sig);
    sig
}

fn parameters(cx: &mut Context<'_>, id: EntityId, overload: &FunctionOverload, sig: &mut Element) {
    sig.push_text("(");
    for (i, param) in overload.parameters.iter().enumerate() {
        if i > 0 {
            sig.push_text(", ");
        }
        let ty = cx.type_ref(id, &param.ty);
        sig.push(ty);
        if !param.name.is_empty() {
            sig.push_text(format!(" {}", param.name));
        }
        if let Some(default) = &param.default_value {
            sig.push_text(format!(" = {default}"));
        }
    }
    sig.push_text(")");

    if let Some(method) = &overload.method {
        if method.is_volatile {
            sig.push_text(" volatile");
        }
        let qualifier = method.qualifier.suffix();
        if !qualifier.is_empty() {
            sig.push_text(qualifier);
        }
    }
}

fn extras(overload: &FunctionOverload, sig: &mut Element) {
    if overload.is_deleted {
        sig.push(Element::div("deleted").text("deleted"));
    }
    if overload.method.as_ref().is_some_and(|m| m.is_virtual) {
        sig.push(Element::div("virtual").text("virtual"));
    }
}

/// The comment shown under an overload: its own, else the function's.
pub(super) fn overload_comment<'e>(
    function: &'e FunctionElement,
    overload: &'e FunctionOverload,
) -> Option<&'e str> {
    overload.comment().or_else(|| function.header.comment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::database::tests::db_from;
    use crate::links::Linker;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn signature(sightings: serde_json::Value, path: &str, style: Style) -> (String, usize) {
        let db = db_from(sightings);
        let options = Options::new("out");
        let mut cx = Context {
            linker: Linker::new(&db, &options),
            options: &options,
            diag: Default::default(),
        };
        let id = db.lookup(path).unwrap();
        let Entity::Function(function) = db.get(id) else {
            panic!("{path} is not a function");
        };
        let sig = overload_signature(
            &mut cx,
            id,
            function,
            &function.overloads[0],
            style,
            NameLink::Here,
        );
        (sig.to_html(), cx.diag.len())
    }

    #[test]
    fn long_signature_links_known_types() {
        let (html, warnings) = signature(
            json!([
                {"kind": "record", "namespace": [{"named": "n"}], "name": "T"},
                {"kind": "function", "namespace": [{"named": "n"}], "name": "f", "overloads": [{
                    "parameters": [
                        {"name": "t", "type": {"name": "const n::T&", "short_name": "const T&", "target": "n::T"}},
                        {"name": "x", "type": {"name": "int"}, "default_value": "0"}
                    ],
                    "return_type": {"name": "bool"}
                }]}
            ]),
            "n::f",
            Style::Long,
        );
        assert_eq!(
            html,
            "<div class=\"function-signature\"><span class=\"function-auto\">auto</span> \
             <a class=\"function-name\" href=\"#\">f</a>(<a class=\"type-name\" title=\"const n::T&amp;\" \
             href=\"/n/class.T.html\">const T&amp;</a> t, int x = 0) -&gt; bool</div>\n"
        );
        assert_eq!(warnings, 0);
    }

    #[test]
    fn hidden_parameter_type_is_plain_text_with_warning() {
        let (html, warnings) = signature(
            json!([
                {"kind": "record", "name": "H", "hidden": true},
                {"kind": "function", "name": "g", "overloads": [{
                    "parameters": [{"name": "h", "type": {"name": "H", "target": "H"}}]
                }]}
            ]),
            "g",
            Style::Long,
        );
        assert!(html.contains("(H h)"), "{html}");
        assert!(!html.contains("class.H.html"), "{html}");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn short_style_is_name_only() {
        let (html, _) = signature(
            json!([
                {"kind": "function", "name": "f", "overloads": [{
                    "parameters": [{"type": {"name": "int"}}],
                    "template_params": ["class T"]
                }]}
            ]),
            "f",
            Style::Short,
        );
        assert_eq!(
            html,
            "<div class=\"function-signature\"><a class=\"function-name\" href=\"#\">f</a></div>\n"
        );
    }

    #[test]
    fn method_decorations_and_constraints() {
        let (html, _) = signature(
            json!([
                {"kind": "record", "name": "R"},
                {"kind": "function", "records": ["R"], "name": "get", "overloads": [{
                    "template_params": ["class T"],
                    "constraints": ["std::integral<T>"],
                    "method": {"is_virtual": true, "is_volatile": true, "qualifier": "const_lvalue"},
                    "is_deleted": true
                }]}
            ]),
            "R::get",
            Style::LongWithConstraints,
        );
        assert!(html.contains("<div class=\"template\">template &lt;class T&gt;</div>"), "{html}");
        assert!(html.contains("() volatile const&amp; -&gt; void"), "{html}");
        assert!(html.contains("<span class=\"requires-keyword\">requires</span>"), "{html}");
        assert!(html.contains("std::integral&lt;T&gt;"), "{html}");
        assert!(html.contains("<div class=\"deleted\">deleted</div><div class=\"virtual\">virtual</div>"), "{html}");
    }

    #[test]
    fn constructors_have_no_return() {
        let (html, _) = signature(
            json!([
                {"kind": "record", "name": "R"},
                {"kind": "function", "records": ["R"], "name": "R", "overloads": [{
                    "method": {"special": "constructor"}
                }]}
            ]),
            "R::R",
            Style::Long,
        );
        assert!(!html.contains("auto"), "{html}");
        assert!(!html.contains("-&gt;"), "{html}");
    }
}
