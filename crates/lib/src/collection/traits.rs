//! Capability traits for collection values.
//!
//! These traits are the typed seams the collection dispatches through
//! instead of inspecting values at runtime:
//!
//! - [`Structured`]: the value can flatten itself into a plain entry
//!   mapping. Bulk operations such as merging and plain-map conversion
//!   depend only on this capability.
//! - [`Touchable`]: the value reacts to a notification broadcast from the
//!   owning collection. [`Collection::touch_each`](crate::Collection::touch_each)
//!   iterates the stored values and touches every one that implements it,
//!   silently skipping the rest.

use super::Items;

/// Capability for values that can convert themselves into a plain entry
/// mapping.
///
/// # Examples
///
/// ```
/// use satchel::{Collection, Structured};
///
/// let mut bag = Collection::new();
/// bag.set("name", "Alice");
///
/// let plain = bag.to_plain_map();
/// assert_eq!(plain.len(), 1);
/// ```
pub trait Structured {
    /// Converts the value into the plain entry mapping form
    fn to_plain_map(&self) -> Items;
}

impl Structured for Items {
    fn to_plain_map(&self) -> Items {
        self.clone()
    }
}

/// Capability for values that react to a collection-wide broadcast.
///
/// Implementors define what reacting means for their type; the collection
/// only guarantees that every touchable value receives exactly one `touch`
/// per broadcast and that results are discarded.
pub trait Touchable {
    /// Handles a notification broadcast by the owning collection
    fn touch(&mut self);
}
