//! Concept pages.

use super::signature::{requires_clause, template_header};
use super::{Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;

pub(super) fn page(
    cx: &mut Context<'_>,
    id: EntityId,
    concept: &ConceptElement,
) -> Result<Element, RenderError> {
    let mut overview = cx.overview(id, "Concept");

    let mut sig = Element::div("concept-signature").single_line();
    if let Some(template) = template_header(&concept.template_params) {
        sig.push(template);
    }
    sig.push(Element::text_span("concept", "concept"));
    sig.push_text(" ");
    sig.push(
        Element::new("a")
            .class("concept-name")
            .attr("href", "#")
            .text(concept.header.name.as_str()),
    );
    overview.push(sig);
    if let Some(clause) = requires_clause(&concept.constraints) {
        overview.push(clause);
    }
    overview.push(cx.description(id, concept.header.comment(), Style::Long)?);
    Ok(Element::div("concept").child(overview))
}

#[cfg(test)]
mod tests {
    use crate::config::Options;
    use crate::database::tests::db_from;
    use crate::links::Linker;
    use crate::render::render_page;
    use serde_json::json;

    #[test]
    fn concept_page_shows_template_and_constraints() {
        let db = db_from(json!([
            {"kind": "concept", "namespace": [{"named": "n"}], "name": "Hashable",
             "template_params": ["class T"], "constraints": ["requires(T t) { t.hash(); }"],
             "comment": "Types with a `hash()` method."}
        ]));
        let options = Options::new("out");
        let id = db.lookup("n::Hashable").unwrap();
        let page = render_page(Linker::new(&db, &options), &options, id)
            .page
            .unwrap()
            .unwrap();
        assert_eq!(
            page.path.to_string_lossy().replace('\\', "/"),
            "n/concept.Hashable.html"
        );
        assert!(page.html.contains(
            "<div class=\"concept-signature\"><div class=\"template\">template &lt;class T&gt;</div>\
             <span class=\"concept\">concept</span> <a class=\"concept-name\" href=\"#\">Hashable</a></div>"
        ));
        assert!(page.html.contains("requires(T t) { t.hash(); }"));
        assert!(page.html.contains("<code>hash()</code>"));
    }
}
