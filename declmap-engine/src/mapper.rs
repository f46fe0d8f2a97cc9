//! The reconciliation engine.
//!
//! A [`DeclarationMapper`] owns one mapping per declaration kind and the
//! registry committed by the last pass. `reconcile` walks the new
//! declarations in order, creating, updating or retyping each id, then
//! sweeps ids that disappeared. `clear` tears everything down.

use crate::config::{ClearPolicy, DuplicateIdPolicy, MapperConfig};
use crate::mapping::{DispatchError, ErasedMapping};
use crate::registry::{Entry, Registry};
use crate::{
    ClearReport, Declaration, MapperError, MapperResult, Mapping, Operation, ReconcileReport,
};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Collects mappings and configuration for a [`DeclarationMapper`].
pub struct MapperBuilder<C, D: Declaration> {
    config: MapperConfig,
    mappings: Vec<Box<dyn ErasedMapping<C, D>>>,
}

impl<C, D: Declaration> Default for MapperBuilder<C, D> {
    fn default() -> Self {
        Self {
            config: MapperConfig::default(),
            mappings: Vec::new(),
        }
    }
}

impl<C, D: Declaration> MapperBuilder<C, D> {
    /// Creates a builder with no mappings and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a mapping. Kinds are checked for uniqueness in [`build`](Self::build).
    pub fn register<M>(mut self, mapping: M) -> Self
    where
        M: Mapping<C, D> + 'static,
    {
        self.mappings.push(Box::new(mapping));
        self
    }

    /// Builds the mapper.
    ///
    /// Fails with [`MapperError::DuplicateKind`] if two mappings govern the
    /// same kind.
    pub fn build(self) -> MapperResult<DeclarationMapper<C, D>> {
        let mut handlers = HashMap::with_capacity(self.mappings.len());
        for mapping in self.mappings {
            let kind = mapping.kind();
            if handlers.contains_key(&kind) {
                warn!("Duplicate mapping registered for kind {:?}", kind);
                return Err(MapperError::DuplicateKind {
                    kind: format!("{kind:?}"),
                });
            }
            handlers.insert(kind, mapping);
        }

        debug!("Built declaration mapper with {} mappings", handlers.len());
        Ok(DeclarationMapper {
            handlers,
            registry: Registry::new(),
            config: self.config,
        })
    }
}

/// Reconciles declaration lists against live mapped instances.
///
/// `C` is the caller's context type, `D` the declaration type. Handlers are
/// fixed at construction. Both `reconcile` and `clear` take `&mut self`, so
/// a mapping cannot re-enter the mapper that is calling it.
///
/// Dropping a mapper with live entries drops their instances without calling
/// `destroyed`; call [`clear`](Self::clear) first when teardown matters.
pub struct DeclarationMapper<C, D: Declaration> {
    handlers: HashMap<D::Kind, Box<dyn ErasedMapping<C, D>>>,
    registry: Registry<D>,
    config: MapperConfig,
}

impl<C, D: Declaration> DeclarationMapper<C, D> {
    /// Starts building a mapper.
    pub fn builder() -> MapperBuilder<C, D> {
        MapperBuilder::new()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Returns the committed registry.
    pub fn registry(&self) -> &Registry<D> {
        &self.registry
    }

    /// Number of live declarations.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if nothing is live.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns true if `id` is live.
    pub fn contains(&self, id: &D::Id) -> bool {
        self.registry.contains(id)
    }

    /// Gets the declaration last applied for `id`.
    pub fn declaration(&self, id: &D::Id) -> Option<&D> {
        self.registry.declaration(id)
    }

    /// Gets the mapped instance for `id` if it has type `M`.
    pub fn mapped<M: 'static>(&self, id: &D::Id) -> Option<&M> {
        self.registry.mapped(id)
    }

    /// Returns true if a mapping governs `kind`.
    pub fn handles(&self, kind: &D::Kind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Iterates the registered kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &D::Kind> {
        self.handlers.keys()
    }

    /// Reconciles the registry against `declarations`.
    ///
    /// Every declaration's kind is checked before any mapping runs; an
    /// unknown kind fails with [`MapperError::UnregisteredKind`] and leaves
    /// the registry untouched. Repeated ids follow
    /// [`MapperConfig::duplicate_ids`].
    ///
    /// If a mapping fails, the pass stops and the error is returned. No
    /// side effects are rolled back. The registry is committed to match
    /// what was actually applied: finished ids take their new entry, a
    /// failed update keeps the old entry, a failed create or teardown
    /// leaves the id absent, and prior entries not yet reached are kept.
    pub fn reconcile<I>(&mut self, ctx: &mut C, declarations: I) -> MapperResult<ReconcileReport>
    where
        I: IntoIterator<Item = D>,
    {
        let declarations = self.prepare(declarations)?;

        let mut prior = std::mem::take(&mut self.registry);
        let mut next = Registry::with_capacity(declarations.len());
        let mut report = ReconcileReport::default();

        let result = match self.classify(ctx, declarations, &mut prior, &mut next, &mut report) {
            Ok(()) => self.sweep(ctx, prior, &mut next, &mut report),
            Err(err) => {
                next.extend(prior.into_ordered());
                Err(err)
            }
        };

        report.live = next.len();
        self.registry = next;

        match result {
            Ok(()) => {
                debug!(
                    "Reconciled {} declarations (created={}, updated={}, retyped={}, destroyed={})",
                    report.live, report.created, report.updated, report.retyped, report.destroyed
                );
                Ok(report)
            }
            Err(err) => {
                warn!("Reconcile pass aborted: {}", err);
                Err(err)
            }
        }
    }

    /// Tears down every live instance and empties the registry.
    ///
    /// Under [`ClearPolicy::BestEffort`] every entry is attempted and the
    /// registry always ends empty; failures come back together as
    /// [`MapperError::ClearIncomplete`]. Under [`ClearPolicy::FailFast`] the
    /// first failure is returned and entries not yet reached stay live.
    pub fn clear(&mut self, ctx: &mut C) -> MapperResult<ClearReport> {
        let mut entries = std::mem::take(&mut self.registry).into_ordered();
        let mut report = ClearReport::default();

        match self.config.clear_policy {
            ClearPolicy::FailFast => {
                while let Some((id, entry)) = entries.next() {
                    if let Err(err) = self.destroy(ctx, &id, entry) {
                        warn!("Clear stopped at {:?}: {}", id, err);
                        self.registry.extend(entries);
                        return Err(err);
                    }
                    report.destroyed += 1;
                }
            }
            ClearPolicy::BestEffort => {
                let mut failures = Vec::new();
                for (id, entry) in entries {
                    match self.destroy(ctx, &id, entry) {
                        Ok(()) => report.destroyed += 1,
                        Err(err) => {
                            warn!("Teardown of {:?} failed during clear: {}", id, err);
                            failures.push(err);
                        }
                    }
                }
                if !failures.is_empty() {
                    return Err(MapperError::ClearIncomplete {
                        destroyed: report.destroyed,
                        failures,
                    });
                }
            }
        }

        debug!("Cleared {} declarations", report.destroyed);
        Ok(report)
    }

    /// Validates kinds and resolves repeated ids before any mapping runs.
    fn prepare<I>(&self, declarations: I) -> MapperResult<Vec<D>>
    where
        I: IntoIterator<Item = D>,
    {
        let declarations: Vec<D> = declarations.into_iter().collect();

        if let Some(dec) = declarations.iter().find(|dec| !self.handles(&dec.kind())) {
            let kind = dec.kind();
            warn!("No mapping for kind {:?} (declaration {:?})", kind, dec.id());
            return Err(MapperError::unregistered(&kind));
        }

        let mut last_index: HashMap<&D::Id, usize> = HashMap::with_capacity(declarations.len());
        for (index, dec) in declarations.iter().enumerate() {
            let repeated = last_index.insert(dec.id(), index).is_some();
            if repeated && self.config.duplicate_ids == DuplicateIdPolicy::Reject {
                warn!("Declaration {:?} listed more than once", dec.id());
                return Err(MapperError::DuplicateId {
                    id: format!("{:?}", dec.id()),
                });
            }
        }
        if last_index.len() == declarations.len() {
            return Ok(declarations);
        }

        let keep: Vec<bool> = declarations
            .iter()
            .enumerate()
            .map(|(index, dec)| last_index.get(dec.id()) == Some(&index))
            .collect();
        debug!(
            "Collapsed {} repeated declarations, last occurrence wins",
            declarations.len() - last_index.len()
        );

        Ok(declarations
            .into_iter()
            .zip(keep)
            .filter_map(|(dec, keep)| keep.then_some(dec))
            .collect())
    }

    /// Creates, updates or retypes each declaration against `prior`.
    fn classify(
        &self,
        ctx: &mut C,
        declarations: Vec<D>,
        prior: &mut Registry<D>,
        next: &mut Registry<D>,
        report: &mut ReconcileReport,
    ) -> MapperResult<()> {
        for dec in declarations {
            let id = dec.id().clone();
            let kind = dec.kind();
            let mapping = self.mapping(&kind)?;

            let Some(entry) = prior.remove(&id) else {
                trace!("Creating {:?} (kind={:?})", id, kind);
                let mapped = mapping
                    .create(ctx, &dec)
                    .map_err(|err| MapperError::handler(&id, &kind, Operation::Create, err))?;
                next.insert(id, dec, mapped);
                report.created += 1;
                continue;
            };

            let (old, mut mapped) = entry.into_parts();
            let old_kind = old.kind();

            if old_kind == kind {
                trace!("Updating {:?} (kind={:?})", id, kind);
                if let Err(err) = mapping.update(ctx, &dec, &old, &mut mapped) {
                    let err = dispatch_error(&id, &kind, Operation::Update, err);
                    next.insert(id, old, mapped);
                    return Err(err);
                }
                next.insert(id, dec, mapped);
                report.updated += 1;
            } else {
                debug!("Retyping {:?} from {:?} to {:?}", id, old_kind, kind);
                self.mapping(&old_kind)?
                    .destroyed(ctx, &old, mapped)
                    .map_err(|err| dispatch_error(&id, &old_kind, Operation::Destroy, err))?;
                let mapped = mapping
                    .create(ctx, &dec)
                    .map_err(|err| MapperError::handler(&id, &kind, Operation::Create, err))?;
                next.insert(id, dec, mapped);
                report.retyped += 1;
            }
        }
        Ok(())
    }

    /// Destroys every prior entry that was not carried into `next`.
    fn sweep(
        &self,
        ctx: &mut C,
        prior: Registry<D>,
        next: &mut Registry<D>,
        report: &mut ReconcileReport,
    ) -> MapperResult<()> {
        let mut stale = prior.into_ordered();
        while let Some((id, entry)) = stale.next() {
            trace!("Sweeping {:?}", id);
            if let Err(err) = self.destroy(ctx, &id, entry) {
                next.extend(stale);
                return Err(err);
            }
            report.destroyed += 1;
        }
        Ok(())
    }

    fn destroy(&self, ctx: &mut C, id: &D::Id, entry: Entry<D>) -> MapperResult<()> {
        let (old, mapped) = entry.into_parts();
        let kind = old.kind();
        // Stored kinds were created through a registered mapping, and the
        // mapping set never changes after build.
        self.mapping(&kind)?
            .destroyed(ctx, &old, mapped)
            .map_err(|err| dispatch_error(id, &kind, Operation::Destroy, err))
    }

    fn mapping(&self, kind: &D::Kind) -> MapperResult<&dyn ErasedMapping<C, D>> {
        self.handlers
            .get(kind)
            .map(|mapping| mapping.as_ref())
            .ok_or_else(|| MapperError::unregistered(kind))
    }
}

impl<C, D: Declaration> fmt::Debug for DeclarationMapper<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationMapper")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

impl<C, D: Declaration> Drop for DeclarationMapper<C, D> {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            warn!(
                "Dropping declaration mapper with {} live instances that were never destroyed",
                self.registry.len()
            );
        }
    }
}

fn dispatch_error(
    id: &impl fmt::Debug,
    kind: &impl fmt::Debug,
    op: Operation,
    err: DispatchError,
) -> MapperError {
    match err {
        DispatchError::Handler(source) => MapperError::handler(id, kind, op, source),
        DispatchError::Mismatch => MapperError::mismatch(id, kind),
    }
}
