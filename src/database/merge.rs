//! Merge repeated sightings of one declaration into its canonical entity.
//!
//! A header included by many translation units produces the same
//! declaration many times, and an overload set may be split across files.
//! Merging is structural: overloads are appended, `hidden` only ever turns
//! on, and the first non-empty comment wins.

use crate::error::DatabaseError;
use crate::model::*;

/// Fold `incoming` into `existing`. Both must share an identity.
///
/// Members of namespaces and records are not carried on the sighting; they
/// are unioned by identity as each child sighting is inserted.
pub fn merge_entity(existing: &mut Entity, incoming: Entity) -> Result<(), DatabaseError> {
    if existing.kind() != incoming.kind() {
        return Err(DatabaseError::KindConflict {
            name: existing.header().qualified_name(),
            existing: existing.kind(),
            incoming: incoming.kind(),
        });
    }
    merge_header(existing.header_mut(), incoming.header());

    match (existing, incoming) {
        (Entity::Function(existing), Entity::Function(incoming)) => {
            merge_overloads(existing, incoming.overloads);
        }
        (Entity::Record(existing), Entity::Record(incoming)) => {
            fill_if_empty(&mut existing.template_params, incoming.template_params);
            fill_if_empty(&mut existing.constraints, incoming.constraints);
            existing.is_final |= incoming.is_final;
        }
        (Entity::Concept(existing), Entity::Concept(incoming)) => {
            fill_if_empty(&mut existing.template_params, incoming.template_params);
            fill_if_empty(&mut existing.constraints, incoming.constraints);
        }
        (Entity::Alias(existing), Entity::Alias(incoming)) => {
            fill_if_empty(&mut existing.template_params, incoming.template_params);
            fill_if_empty(&mut existing.constraints, incoming.constraints);
        }
        // Namespaces and fields carry nothing beyond the header.
        _ => {}
    }
    Ok(())
}

fn merge_header(existing: &mut Header, incoming: &Header) {
    existing.hidden |= incoming.hidden;
    if existing.comment().is_none() && incoming.comment().is_some() {
        existing.comment.clone_from(&incoming.comment);
    }
    if existing.source.is_none() {
        existing.source.clone_from(&incoming.source);
    }
}

/// Append overloads whose signature is new; for a known signature only
/// adopt the incoming comment when the existing overload has none.
pub fn merge_overloads(function: &mut FunctionElement, incoming: Vec<FunctionOverload>) {
    for overload in incoming {
        let signature = overload.signature();
        match function
            .overloads
            .iter_mut()
            .find(|o| o.signature() == signature)
        {
            Some(existing) => {
                if existing.comment().is_none() && overload.comment().is_some() {
                    existing.comment = overload.comment;
                }
            }
            None => function.overloads.push(overload),
        }
    }
}

fn fill_if_empty(existing: &mut Vec<String>, incoming: Vec<String>) {
    if existing.is_empty() {
        *existing = incoming;
    }
}
