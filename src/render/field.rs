//! Data members and namespace-scope variables. These have no page; each is
//! an anchored item on its owner's page.

use super::{section_item, section_list, Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;

/// Anchored items for the fields at `ids`, in the given order.
pub(super) fn listing(cx: &mut Context<'_>, ids: &[EntityId]) -> Result<Element, RenderError> {
    let db = cx.db();
    let mut list = section_list();
    for &id in ids {
        if let Entity::Field(field) = db.get(id) {
            list.push(reference(cx, id, field)?);
        }
    }
    Ok(list)
}

fn reference(
    cx: &mut Context<'_>,
    id: EntityId,
    field: &FieldElement,
) -> Result<Element, RenderError> {
    let anchor = cx.linker.anchor_for(id).unwrap_or_default();
    let mut name = Element::div("item-name").single_line();
    if field.is_static {
        name.push(Element::text_span("static", "static"));
        name.push_text(" ");
    }
    let ty = cx.type_ref(id, &field.ty);
    name.push(Element::span("field-type").child(ty));
    name.push_text(" ");
    name.push(
        Element::new("a")
            .class("field-name")
            .attr("href", format!("#{anchor}"))
            .text(field.header.name.as_str()),
    );

    let mut item = section_item().attr("id", anchor);
    item.push(name);
    item.push(cx.description(id, field.header.comment(), Style::Long)?);
    Ok(item)
}
