//! Type alias pages.

use super::signature::{requires_clause, template_header};
use super::{Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;

pub(super) fn page(
    cx: &mut Context<'_>,
    id: EntityId,
    alias: &TypeAliasElement,
) -> Result<Element, RenderError> {
    let mut overview = cx.overview(id, "Type Alias");

    let mut sig = Element::div("alias-signature").single_line();
    if let Some(template) = template_header(&alias.template_params) {
        sig.push(template);
    }
    sig.push(Element::text_span("alias-using", "using"));
    sig.push_text(" ");
    sig.push(
        Element::new("a")
            .class("type-name")
            .attr("href", "#")
            .text(alias.header.name.as_str()),
    );
    sig.push_text(" = ");
    let target = cx.type_ref(id, &alias.target);
    sig.push(target);
    overview.push(sig);
    if let Some(clause) = requires_clause(&alias.constraints) {
        overview.push(clause);
    }
    overview.push(cx.description(id, alias.header.comment(), Style::Long)?);
    Ok(Element::div("alias").child(overview))
}
