//! Identity for things the engine looks up by id.

/// Something with a stable identifier.
///
/// Warehouses and catalog products implement this: two values with the same id
/// are the same stock location / product even if their quantities differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Index of the first entity whose id equals `id`.
pub fn position_of<E: Entity>(entities: &[E], id: &E::Id) -> Option<usize> {
    entities.iter().position(|e| e.id() == id)
}

/// First entity whose id equals `id`.
pub fn find_by_id<'a, E: Entity>(entities: &'a [E], id: &E::Id) -> Option<&'a E> {
    position_of(entities, id).map(|idx| &entities[idx])
}
