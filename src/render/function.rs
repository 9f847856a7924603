//! Function pages and function listings on namespace and record pages.

use super::signature::{overload_comment, overload_signature, NameLink};
use super::{section_item, Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;

/// The page of a namespace-scope function: every overload in discovery
/// order, each followed by its comment.
pub(super) fn page(
    cx: &mut Context<'_>,
    id: EntityId,
    function: &FunctionElement,
) -> Result<Element, RenderError> {
    let mut overview = cx.overview(id, "Function");
    let mut set = Element::div("overload-set");
    if function.overloads.is_empty() {
        set.push(bare_name(cx, id, function, NameLink::Here)?);
    }
    for (i, overload) in function.overloads.iter().enumerate() {
        let mut block = Element::div("overload").attr("id", cx.linker.overload_anchor(id, i));
        block.push(overload_signature(
            cx,
            id,
            function,
            overload,
            Style::LongWithConstraints,
            NameLink::Here,
        ));
        block.push(cx.description(id, overload_comment(function, overload), Style::Long)?);
        set.push(block);
    }
    overview.push(set);
    Ok(Element::div("function").child(overview))
}

/// A function listed in its namespace, linking to its page.
///
/// [`Style::Short`] shows the name once; the long styles show every overload.
pub(super) fn reference(
    cx: &mut Context<'_>,
    id: EntityId,
    function: &FunctionElement,
    style: Style,
) -> Element {
    let unlisted = FunctionOverload::default();
    let overloads = match function.overloads.as_slice() {
        [] => std::slice::from_ref(&unlisted),
        overloads => overloads,
    };

    let mut set = Element::div("overload-set").class("item-name");
    for overload in overloads {
        let mut block = Element::div("overload");
        block.push(overload_signature(cx, id, function, overload, style, NameLink::Page));
        set.push(block);
        if style == Style::Short {
            break;
        }
    }

    let mut item = section_item();
    item.push(set);
    item.push(cx.listed_summary(id, function.summary_comment()));
    item
}

/// A method listed on its record's page: the overloads at `indices`, each
/// anchored and followed by its comment.
///
/// A function whose overloads fall into several sections is listed once per
/// section; only the first listing carries the function's own anchor.
pub(super) fn method_reference(
    cx: &mut Context<'_>,
    id: EntityId,
    function: &FunctionElement,
    indices: &[usize],
    first_listing: bool,
) -> Result<Element, RenderError> {
    let mut item = section_item();
    if first_listing {
        if let Some(anchor) = cx.linker.anchor_for(id) {
            item.set_attr("id", anchor);
        }
    }

    let mut set = Element::div("overload-set").class("item-name");
    if function.overloads.is_empty() {
        let anchor = cx.linker.overload_anchor(id, 0);
        set.push(bare_name(cx, id, function, NameLink::Anchor(anchor))?);
    }
    for &i in indices {
        let overload = &function.overloads[i];
        let anchor = cx.linker.overload_anchor(id, i);
        let mut block = Element::div("overload");
        block.push(overload_signature(
            cx,
            id,
            function,
            overload,
            Style::LongWithConstraints,
            NameLink::Anchor(anchor),
        ));
        block.push(cx.description(id, overload_comment(function, overload), Style::Long)?);
        set.push(block);
    }
    item.push(set);
    Ok(item)
}

/// A function seen without any signature: just its name and comment.
fn bare_name(
    cx: &mut Context<'_>,
    id: EntityId,
    function: &FunctionElement,
    name_link: NameLink,
) -> Result<Element, RenderError> {
    let mut block = Element::div("overload");
    block.push(overload_signature(
        cx,
        id,
        function,
        &FunctionOverload::default(),
        Style::Short,
        name_link,
    ));
    block.push(cx.description(id, function.header.comment(), Style::Long)?);
    Ok(block)
}

#[cfg(test)]
mod tests {
    use crate::config::Options;
    use crate::database::tests::db_from;
    use crate::links::Linker;
    use crate::render::render_page;
    use serde_json::json;

    #[test]
    fn overloads_keep_discovery_order_with_own_comments() {
        let db = db_from(json!([
            {"kind": "function", "namespace": [{"named": "N"}], "name": "f", "overloads": [
                {"parameters": [{"name": "a", "type": {"name": "i32"}}],
                 "return_type": {"name": "void"}, "comment": "Adds one value."}
            ]},
            {"kind": "function", "namespace": [{"named": "N"}], "name": "f", "overloads": [
                {"parameters": [{"name": "a", "type": {"name": "i32"}}, {"name": "b", "type": {"name": "i32"}}],
                 "return_type": {"name": "void"}}
            ]}
        ]));
        let options = Options::new("out");
        let id = db.lookup("N::f").unwrap();
        let page = render_page(Linker::new(&db, &options), &options, id)
            .page
            .unwrap()
            .unwrap();
        assert_eq!(page.path.to_string_lossy().replace('\\', "/"), "N/fn.f.html");

        let html = page.html;
        let first = html.find("(i32 a) -&gt; void").unwrap();
        let second = html.find("(i32 a, i32 b) -&gt; void").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("<p>Adds one value.</p>").count(), 1);
        assert!(html.find("<p>Adds one value.</p>").unwrap() < second);
        assert!(html.contains("id=\"overload.0\"") && html.contains("id=\"overload.1\""));
    }

    #[test]
    fn function_comment_fills_undocumented_overloads() {
        let db = db_from(json!([
            {"kind": "function", "name": "f", "comment": "Shared docs.", "overloads": [
                {"parameters": [{"type": {"name": "int"}}], "comment": "Int docs."},
                {"parameters": [{"type": {"name": "long"}}]}
            ]}
        ]));
        let options = Options::new("out");
        let id = db.lookup("f").unwrap();
        let html = render_page(Linker::new(&db, &options), &options, id)
            .page
            .unwrap()
            .unwrap()
            .html;
        assert!(html.contains("<p>Int docs.</p>"));
        assert_eq!(html.matches("<p>Shared docs.</p>").count(), 1);
    }

    #[test]
    fn function_without_overloads_shows_name_and_comment() {
        let db = db_from(json!([
            {"kind": "function", "namespace": [{"named": "N"}], "name": "reset", "comment": "Starts over."}
        ]));
        let options = Options::new("out");
        let id = db.lookup("N::reset").unwrap();
        let html = render_page(Linker::new(&db, &options), &options, id)
            .page
            .unwrap()
            .unwrap()
            .html;
        assert!(html.contains("<a class=\"function-name\" href=\"#\">reset</a>"));
        assert!(html.contains("<p>Starts over.</p>"));
    }
}
