//! Per-kind handlers and their type-erased form.
//!
//! Each [`Mapping`] picks its own instance type. The engine stores instances
//! as `Box<dyn Any>` and only ever hands an instance back to the mapping that
//! produced it, so the downcast in [`ErasedMapping`] succeeds for any
//! registry built through [`DeclarationMapper`](crate::DeclarationMapper).

use crate::Declaration;
use std::any::Any;

/// Error returned by a mapping callback.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Handler for one declaration kind.
///
/// `C` is the caller's context, passed through untouched on every call.
/// A mapping must not call back into the [`DeclarationMapper`](crate::DeclarationMapper)
/// that invoked it.
pub trait Mapping<C, D: Declaration> {
    /// The live object realized for a declaration of this kind.
    type Mapped: 'static;

    /// The kind this mapping governs. Must be constant.
    fn kind(&self) -> D::Kind;

    /// Performs the side effect for a declaration entering the registry.
    fn create(&self, ctx: &mut C, dec: &D) -> Result<Self::Mapped, HandlerError>;

    /// Brings `mapped` in line with `dec`.
    ///
    /// `old` is the declaration `mapped` was last reconciled against. When the
    /// payloads are equal this should do nothing. Replacing the instance is
    /// done in place (`*mapped = ...`) after tearing down the old one.
    fn update(&self, ctx: &mut C, dec: &D, old: &D, mapped: &mut Self::Mapped) -> Result<(), HandlerError>;

    /// Releases the side effect. Called at most once per instance.
    fn destroyed(&self, ctx: &mut C, old: &D, mapped: Self::Mapped) -> Result<(), HandlerError>;
}

/// A stored instance, owned by the registry between passes.
pub(crate) type AnyMapped = Box<dyn Any>;

/// Failure of an erased dispatch.
pub(crate) enum DispatchError {
    Handler(HandlerError),
    Mismatch,
}

/// Object-safe view of a [`Mapping`] with its instance type erased.
pub(crate) trait ErasedMapping<C, D: Declaration> {
    fn kind(&self) -> D::Kind;

    fn create(&self, ctx: &mut C, dec: &D) -> Result<AnyMapped, HandlerError>;

    fn update(&self, ctx: &mut C, dec: &D, old: &D, mapped: &mut AnyMapped) -> Result<(), DispatchError>;

    fn destroyed(&self, ctx: &mut C, old: &D, mapped: AnyMapped) -> Result<(), DispatchError>;
}

impl<C, D, M> ErasedMapping<C, D> for M
where
    D: Declaration,
    M: Mapping<C, D>,
{
    fn kind(&self) -> D::Kind {
        <M as Mapping<C, D>>::kind(self)
    }

    fn create(&self, ctx: &mut C, dec: &D) -> Result<AnyMapped, HandlerError> {
        let mapped: AnyMapped = Box::new(<M as Mapping<C, D>>::create(self, ctx, dec)?);
        Ok(mapped)
    }

    fn update(&self, ctx: &mut C, dec: &D, old: &D, mapped: &mut AnyMapped) -> Result<(), DispatchError> {
        let mapped = mapped
            .downcast_mut::<M::Mapped>()
            .ok_or(DispatchError::Mismatch)?;
        <M as Mapping<C, D>>::update(self, ctx, dec, old, mapped).map_err(DispatchError::Handler)
    }

    fn destroyed(&self, ctx: &mut C, old: &D, mapped: AnyMapped) -> Result<(), DispatchError> {
        let mapped = mapped
            .downcast::<M::Mapped>()
            .map_err(|_| DispatchError::Mismatch)?;
        <M as Mapping<C, D>>::destroyed(self, ctx, old, *mapped).map_err(DispatchError::Handler)
    }
}
