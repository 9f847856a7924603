//! Symbol database — an arena of every discovered declaration.
//!
//! Sightings are inserted one at a time; a sighting whose [`Identity`] is
//! already known is merged into the canonical entity (see [`merge`]).
//! After [`Database::finalize`] the database is read-only.

pub mod load;
pub mod merge;

use crate::error::DatabaseError;
use crate::model::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Database {
    entities: Vec<Entity>,
    index: HashMap<Identity, EntityId>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// An empty database holding only the global namespace.
    pub fn new() -> Self {
        let global = Entity::Namespace(NamespaceElement {
            header: Header::new("", NamespacePath::root()),
            members: Members::default(),
        });
        Self {
            entities: vec![global],
            index: HashMap::new(),
        }
    }

    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// All entities in discovery order, the global namespace first.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }

    pub fn find(&self, identity: &Identity) -> Option<EntityId> {
        self.index.get(identity).copied()
    }

    /// Insert one sighting, merging it into an existing entity with the same
    /// identity. Returns the canonical entity's id.
    pub fn insert(&mut self, mut entity: Entity) -> Result<EntityId, DatabaseError> {
        let parent = self.scope_of(&entity)?;
        if entity.in_anonymous_scope() {
            entity.header_mut().hidden = true;
        }
        entity.header_mut().parent = parent;

        let identity = entity.identity();
        if let Some(id) = self.find(&identity) {
            merge::merge_entity(&mut self.entities[id.index()], entity)?;
            return Ok(id);
        }

        if let Entity::Function(function) = &mut entity {
            // Collapse repeated signatures within a single sighting too.
            let overloads = std::mem::take(&mut function.overloads);
            merge::merge_overloads(function, overloads);
        }
        Ok(self.push(parent, identity, entity))
    }

    /// Insert every sighting in order.
    pub fn insert_all(
        &mut self,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<(), DatabaseError> {
        for entity in entities {
            self.insert(entity)?;
        }
        Ok(())
    }

    fn push(&mut self, parent: EntityId, identity: Identity, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        let kind = entity.kind();
        self.entities.push(entity);
        self.index.insert(identity, id);
        if let Some(members) = self.entities[parent.index()].members_mut() {
            members.push(kind, id);
        }
        id
    }

    /// Find (creating namespaces as needed) the scope `entity` is declared in.
    fn scope_of(&mut self, entity: &Entity) -> Result<EntityId, DatabaseError> {
        let header = entity.header();
        let mut scope = self.ensure_namespace(&header.namespace_path);

        for (depth, record) in header.record_path.iter().enumerate() {
            let identity = Identity {
                namespace_path: header.namespace_path.clone(),
                record_path: header.record_path[..depth].to_vec(),
                name: record.clone(),
                name_kind: NameKind::Type,
            };
            scope = match self.find(&identity) {
                Some(id) if self.get(id).kind() == EntityKind::Record => id,
                _ => {
                    return Err(DatabaseError::MissingRecord {
                        name: header.qualified_name(),
                        record: record.clone(),
                    })
                }
            };
        }

        if entity.kind() == EntityKind::Namespace && !header.record_path.is_empty() {
            return Err(DatabaseError::NamespaceInRecord {
                name: header.qualified_name(),
                record: header.record_path.join("::"),
            });
        }
        Ok(scope)
    }

    fn ensure_namespace(&mut self, path: &NamespacePath) -> EntityId {
        let mut current = EntityId::GLOBAL;
        for (depth, segment) in path.segments().iter().enumerate() {
            let name = match segment {
                Namespace::Global => continue,
                Namespace::Anonymous => String::new(),
                Namespace::Named(name) => name.clone(),
            };
            let outer = path.prefix(depth);
            let identity = Identity {
                namespace_path: outer.clone(),
                record_path: Vec::new(),
                name: name.clone(),
                name_kind: NameKind::Namespace,
            };
            current = match self.find(&identity) {
                Some(id) => id,
                None => {
                    let mut header = Header::new(name, outer);
                    header.parent = current;
                    let namespace = Entity::Namespace(NamespaceElement {
                        header,
                        members: Members::default(),
                    });
                    let hidden = namespace.in_anonymous_scope();
                    let id = self.push(current, identity, namespace);
                    self.entities[id.index()].header_mut().hidden = hidden;
                    id
                }
            };
        }
        current
    }

    /// Hide every entity matching `pred`. Must run before [`Database::finalize`]
    /// so the flag reaches descendants.
    pub fn hide_where(&mut self, mut pred: impl FnMut(&Entity) -> bool) {
        for entity in self.entities.iter_mut().skip(1) {
            if pred(entity) {
                entity.header_mut().hidden = true;
            }
        }
    }

    /// Propagate `hidden` from every scope to everything declared inside it.
    ///
    /// Parents are always allocated before their children, so one forward
    /// pass reaches every descendant.
    pub fn finalize(&mut self) {
        for i in 1..self.entities.len() {
            let parent = self.entities[i].header().parent;
            if self.entities[parent.index()].hidden() {
                self.entities[i].header_mut().hidden = true;
            }
        }
    }

    /// Enclosing scopes of `id`, outermost first, excluding the global
    /// namespace and `id` itself.
    pub fn ancestors(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut current = id;
        while current != EntityId::GLOBAL {
            current = self.get(current).header().parent;
            if current != EntityId::GLOBAL {
                chain.push(current);
            }
        }
        chain.reverse();
        chain
    }

    /// Owner of a member: the namespace or record it is declared in.
    pub fn parent(&self, id: EntityId) -> EntityId {
        self.get(id).header().parent
    }

    pub fn qualified_name(&self, id: EntityId) -> String {
        self.get(id).header().qualified_name()
    }

    /// Resolve a qualified path such as `a::b::Record::method`.
    ///
    /// Walks from the global scope, preferring namespaces, then records; the
    /// final segment may also name a function, concept, alias or field.
    /// An unnamed namespace is spelled `(anonymous)`.
    pub fn lookup(&self, path: &str) -> Option<EntityId> {
        let path = path.strip_prefix("::").unwrap_or(path);
        if path.is_empty() {
            return None;
        }
        let segments: Vec<&str> = path.split("::").collect();
        let mut current = EntityId::GLOBAL;
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            current = self.find_member(current, segment, last)?;
        }
        Some(current)
    }

    fn find_member(&self, scope: EntityId, name: &str, last: bool) -> Option<EntityId> {
        let members = self.get(scope).members()?;
        let scopes = [EntityKind::Namespace, EntityKind::Record];
        let leaves = [
            EntityKind::Function,
            EntityKind::Concept,
            EntityKind::Alias,
            EntityKind::Field,
        ];
        let kinds = scopes.iter().chain(leaves.iter().filter(|_| last));
        kinds
            .flat_map(|kind| members.bucket(*kind))
            .copied()
            .find(|id| !name.is_empty() && self.get(*id).header().display_name() == name)
    }
}
