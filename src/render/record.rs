//! Record (class, struct, union) pages.

use super::signature::{requires_clause, template_header};
use super::{field, function, named_reference, section, section_list, visible, Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;
use std::collections::HashSet;

/// Sections listing a record's member functions, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodSection {
    Static,
    Constructor,
    Method,
    Conversion,
    Operator,
}

impl MethodSection {
    const ALL: [MethodSection; 5] = [
        MethodSection::Static,
        MethodSection::Constructor,
        MethodSection::Method,
        MethodSection::Conversion,
        MethodSection::Operator,
    ];

    fn of(function: &FunctionElement, overload: &FunctionOverload) -> Self {
        match overload.special() {
            Some(SpecialMember::Constructor) => MethodSection::Constructor,
            Some(SpecialMember::Conversion) => MethodSection::Conversion,
            _ if function.is_operator() => MethodSection::Operator,
            _ if overload.is_static() => MethodSection::Static,
            _ => MethodSection::Method,
        }
    }

    fn heading(self) -> (&'static str, &'static str) {
        match self {
            MethodSection::Static => ("static-methods", "Static Methods"),
            MethodSection::Constructor => ("constructors", "Constructors"),
            MethodSection::Method => ("methods", "Methods"),
            MethodSection::Conversion => ("conversions", "Conversions"),
            MethodSection::Operator => ("operators", "Operators"),
        }
    }
}

pub(super) fn page(
    cx: &mut Context<'_>,
    id: EntityId,
    record: &RecordElement,
) -> Result<Element, RenderError> {
    let db = cx.db();
    let label = match record.record_type {
        RecordType::Class => "Class",
        RecordType::Struct => "Struct",
        RecordType::Union => "Union",
    };

    let mut overview = cx.overview(id, label);
    let mut sig = Element::div("type-signature").single_line();
    if let Some(template) = template_header(&record.template_params) {
        sig.push(template);
    }
    sig.push(Element::text_span("record-type", record.record_type.as_str()));
    sig.push_text(" ");
    sig.push(
        Element::new("a")
            .class("type-name")
            .attr("href", "#")
            .text(record.header.display_name()),
    );
    if record.is_final {
        sig.push_text(" ");
        sig.push(Element::text_span("final", "final"));
    }
    overview.push(sig);
    if let Some(clause) = requires_clause(&record.constraints) {
        overview.push(clause);
    }
    overview.push(cx.description(id, record.header.comment(), Style::Long)?);

    let mut page = Element::div("type")
        .class(record.record_type.as_str())
        .child(overview);
    let members = &record.members;

    let mut nested = section_list();
    for member in visible(db, &members.records).chain(visible(db, &members.aliases)) {
        nested.push(named_reference(cx, member, "type-name"));
    }
    if !nested.children().is_empty() {
        page.push(section("nested", "Nested Types", nested));
    }

    let (static_fields, fields): (Vec<EntityId>, Vec<EntityId>) = visible(db, &members.fields)
        .partition(|member| matches!(db.get(*member), Entity::Field(f) if f.is_static));
    if !static_fields.is_empty() {
        page.push(section(
            "static-fields",
            "Static Data Members",
            field::listing(cx, &static_fields)?,
        ));
    }

    let functions: Vec<(EntityId, &FunctionElement)> = visible(db, &members.functions)
        .filter_map(|member| match db.get(member) {
            Entity::Function(f) => Some((member, f)),
            _ => None,
        })
        .collect();
    let mut anchored: HashSet<EntityId> = HashSet::new();
    for kind in MethodSection::ALL {
        let mut list = section_list();
        for (member, function) in &functions {
            let indices: Vec<usize> = function
                .overloads
                .iter()
                .enumerate()
                .filter(|(_, overload)| MethodSection::of(function, overload) == kind)
                .map(|(i, _)| i)
                .collect();
            // Known only by name: listed once, with the other methods.
            let unlisted = function.overloads.is_empty() && kind == MethodSection::Method;
            if indices.is_empty() && !unlisted {
                continue;
            }
            let first_listing = anchored.insert(*member);
            list.push(function::method_reference(
                cx,
                *member,
                function,
                &indices,
                first_listing,
            )?);
        }
        if !list.children().is_empty() {
            let (class, title) = kind.heading();
            page.push(section(class, title, list));
        }
    }

    if !fields.is_empty() {
        page.push(section("fields", "Data Members", field::listing(cx, &fields)?));
    }
    Ok(page)
}
