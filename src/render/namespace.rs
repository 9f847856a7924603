//! Namespace pages, including the site root for the global namespace.

use super::{field, function, named_reference, section, section_list, visible, Context, Style};
use crate::error::RenderError;
use crate::html::Element;
use crate::model::*;

pub(super) fn page(
    cx: &mut Context<'_>,
    id: EntityId,
    namespace: &NamespaceElement,
) -> Result<Element, RenderError> {
    let db = cx.db();
    let label = if id == EntityId::GLOBAL { "Project" } else { "Namespace" };
    let mut overview = cx.overview(id, label);
    overview.push(cx.description(id, namespace.header.comment(), Style::Long)?);
    let mut page = Element::div("namespace").child(overview);
    let members = &namespace.members;

    let scopes = [
        (&members.namespaces, "namespaces", "Namespaces", "namespace-name"),
        (&members.records, "classes", "Classes", "type-name"),
        (&members.concepts, "concepts", "Concepts", "concept-name"),
    ];
    for (ids, class, title, name_class) in scopes {
        let mut list = section_list();
        for member in visible(db, ids) {
            list.push(named_reference(cx, member, name_class));
        }
        if !list.children().is_empty() {
            page.push(section(class, title, list));
        }
    }

    let functions: Vec<(EntityId, &FunctionElement)> = visible(db, &members.functions)
        .filter_map(|member| match db.get(member) {
            Entity::Function(f) => Some((member, f)),
            _ => None,
        })
        .collect();
    // Operators all share a handful of names, so their listing shows
    // every signature.
    for (operators, class, title, style) in [
        (false, "functions", "Functions", Style::Short),
        (true, "operators", "Operators", Style::Long),
    ] {
        let mut list = section_list();
        for (member, f) in functions.iter().filter(|(_, f)| f.is_operator() == operators) {
            list.push(function::reference(cx, *member, f, style));
        }
        if !list.children().is_empty() {
            page.push(section(class, title, list));
        }
    }

    let variables: Vec<EntityId> = visible(db, &members.fields).collect();
    if !variables.is_empty() {
        page.push(section("variables", "Variables", field::listing(cx, &variables)?));
    }

    let mut aliases = section_list();
    for member in visible(db, &members.aliases) {
        aliases.push(named_reference(cx, member, "type-name"));
    }
    if !aliases.children().is_empty() {
        page.push(section("aliases", "Type Aliases", aliases));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use crate::config::Options;
    use crate::database::tests::db_from;
    use crate::database::Database;
    use crate::links::Linker;
    use crate::model::EntityId;
    use crate::render::render_page;
    use serde_json::json;

    fn site() -> Database {
        db_from(json!([
            {"kind": "namespace", "name": "lib", "comment": "The library.\n\nMore detail."},
            {"kind": "alias", "namespace": [{"named": "lib"}], "name": "Size", "target": {"name": "unsigned long"}},
            {"kind": "function", "namespace": [{"named": "lib"}], "name": "operator==", "overloads": [
                {"parameters": [{"type": {"name": "A"}}, {"type": {"name": "A"}}], "return_type": {"name": "bool"}},
                {"parameters": [{"type": {"name": "B"}}, {"type": {"name": "B"}}], "return_type": {"name": "bool"}}
            ]},
            {"kind": "function", "namespace": [{"named": "lib"}], "name": "swap", "comment": "Swaps.\n\nDetails.",
             "overloads": [
                {"parameters": [{"type": {"name": "A&"}}, {"type": {"name": "A&"}}]},
                {"parameters": [{"type": {"name": "B&"}}, {"type": {"name": "B&"}}]}
            ]},
            {"kind": "field", "namespace": [{"named": "lib"}], "name": "version", "type": {"name": "int"}},
            {"kind": "concept", "namespace": [{"named": "lib"}], "name": "Hashable"},
            {"kind": "record", "namespace": [{"named": "lib"}], "name": "Map", "comment": "A map."},
            {"kind": "record", "namespace": [{"named": "lib"}], "name": "Detail", "hidden": true},
            {"kind": "namespace", "namespace": [{"named": "lib"}], "name": "io"},
            {"kind": "function", "namespace": [{"named": "lib"}, "anonymous"], "name": "helper"}
        ]))
    }

    fn page(db: &Database, id: EntityId) -> String {
        let options = Options::new("out");
        render_page(Linker::new(db, &options), &options, id)
            .page
            .unwrap()
            .unwrap()
            .html
    }

    #[test]
    fn sections_follow_fixed_order() {
        let db = site();
        let html = page(&db, db.lookup("lib").unwrap());
        let order = [
            ">Namespaces<",
            ">Classes<",
            ">Concepts<",
            ">Functions<",
            ">Operators<",
            ">Variables<",
            ">Type Aliases<",
        ];
        let positions: Vec<usize> = order.iter().map(|s| html.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn hidden_and_anonymous_members_are_not_listed() {
        let db = site();
        let html = page(&db, db.lookup("lib").unwrap());
        assert!(!html.contains("Detail"));
        assert!(!html.contains("helper"));
        assert!(!html.contains("(anonymous)"));
        assert_eq!(html.matches("class=\"section-item\"").count(), 7);
    }

    #[test]
    fn listings_use_summaries_and_styles() {
        let db = site();
        let html = page(&db, db.lookup("lib").unwrap());
        // Full description on the namespace itself, summaries for members.
        assert!(html.contains("<p>More detail.</p>"));
        assert!(html.contains("<p>Swaps.</p>"));
        assert!(!html.contains("<p>Details.</p>"));
        // Short style: one name, no parameters.
        assert_eq!(html.matches(">swap</a>").count(), 1);
        assert!(!html.contains("A&amp;"));
        // Long style for operators: every overload, linked to the page.
        assert_eq!(
            html.matches("href=\"/lib/fn.operator-3d-3d.html\">operator==</a>(").count(),
            2
        );
    }

    #[test]
    fn global_namespace_is_the_site_root() {
        let db = site();
        let options = Options::new("out");
        let rendered = render_page(Linker::new(&db, &options), &options, EntityId::GLOBAL);
        let page = rendered.page.unwrap().unwrap();
        assert_eq!(page.path.to_str(), Some("index.html"));
        assert!(page.html.contains("<title>Documentation</title>"));
        assert!(page.html.contains("<a class=\"namespace-name\" href=\"/lib/index.html\">lib</a>"));
    }
}
