//! The identity contract every declaration satisfies.

use std::fmt::Debug;
use std::hash::Hash;

/// An immutable description of one desired object.
///
/// The engine reads only the id and the kind; everything else is payload
/// interpreted by the [`Mapping`](crate::Mapping) registered for the kind.
/// A changed declaration is a new value carrying the same id.
pub trait Declaration {
    /// Identity, stable across passes for the same logical object.
    type Id: Clone + Eq + Hash + Debug;

    /// Discriminator selecting the mapping that governs the declaration.
    type Kind: Clone + Eq + Hash + Debug;

    /// Returns the identity of this declaration.
    fn id(&self) -> &Self::Id;

    /// Returns the kind of this declaration.
    fn kind(&self) -> Self::Kind;
}
