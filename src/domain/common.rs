//! Shared traits and id helpers for profile entities.

use uuid::Uuid;

/// Exposes the opaque identifier entities carry in the stored document.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Generates an id for a newly created entity.
///
/// Ids loaded from older documents (millisecond timestamps) are kept verbatim,
/// so callers must treat every id as an opaque string.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Sums the amounts of any iterator of amounted entities.
pub fn total<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.amount()).sum()
}
