//! Shared test fixtures: a small declaration type, a journaling context and
//! a mapping that records every call it receives.

#![allow(dead_code)]

use declmap_engine::{Declaration, DeclarationMapper, HandlerError, MapperConfig, Mapping};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

/// Routes engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Declaration used across the engine tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub kind: &'static str,
    pub value: i64,
}

impl Declaration for Item {
    type Id = u32;
    type Kind = &'static str;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn kind(&self) -> &'static str {
        self.kind
    }
}

pub fn item(id: u32, kind: &'static str, value: i64) -> Item {
    Item { id, kind, value }
}

/// What a mapping was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Create { id: u32, kind: &'static str, serial: u64 },
    Update { id: u32, kind: &'static str, serial: u64 },
    Destroy { id: u32, kind: &'static str, serial: u64 },
}

impl Call {
    pub fn id(&self) -> u32 {
        match *self {
            Call::Create { id, .. } | Call::Update { id, .. } | Call::Destroy { id, .. } => id,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Call::Create { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Call::Update { .. })
    }

    pub fn is_destroy(&self) -> bool {
        matches!(self, Call::Destroy { .. })
    }
}

/// Which callback to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fail {
    Create(u32),
    Update(u32),
    Destroy(u32),
}

/// Context handed to every mapping call.
#[derive(Debug, Default)]
pub struct Journal {
    pub calls: Vec<Call>,
    pub failures: HashSet<Fail>,
    next_serial: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, fail: Fail) {
        self.failures.insert(fail);
    }

    pub fn heal(&mut self) {
        self.failures.clear();
    }

    pub fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn check(&self, fail: Fail) -> Result<(), HandlerError> {
        if self.failures.contains(&fail) {
            return Err(format!("injected failure: {fail:?}").into());
        }
        Ok(())
    }

    fn serial(&mut self) -> u64 {
        self.next_serial += 1;
        self.next_serial
    }
}

/// The live object behind an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub serial: u64,
    pub value: i64,
}

/// Records calls into the [`Journal`].
///
/// Updates with an unchanged value are no-ops. Changed values are applied
/// in place, or by swapping in a fresh instance when `replace` is set.
pub struct Recorder {
    pub kind: &'static str,
    pub replace: bool,
}

impl Recorder {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            replace: false,
        }
    }

    pub fn replacing(kind: &'static str) -> Self {
        Self {
            kind,
            replace: true,
        }
    }
}

impl Mapping<Journal, Item> for Recorder {
    type Mapped = Instance;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn create(&self, ctx: &mut Journal, dec: &Item) -> Result<Instance, HandlerError> {
        ctx.check(Fail::Create(dec.id))?;
        let serial = ctx.serial();
        ctx.calls.push(Call::Create {
            id: dec.id,
            kind: self.kind,
            serial,
        });
        Ok(Instance {
            serial,
            value: dec.value,
        })
    }

    fn update(
        &self,
        ctx: &mut Journal,
        dec: &Item,
        old: &Item,
        mapped: &mut Instance,
    ) -> Result<(), HandlerError> {
        ctx.check(Fail::Update(dec.id))?;
        ctx.calls.push(Call::Update {
            id: dec.id,
            kind: self.kind,
            serial: mapped.serial,
        });
        if dec.value == old.value {
            return Ok(());
        }
        if self.replace {
            *mapped = Instance {
                serial: ctx.serial(),
                value: dec.value,
            };
        } else {
            mapped.value = dec.value;
        }
        Ok(())
    }

    fn destroyed(&self, ctx: &mut Journal, old: &Item, mapped: Instance) -> Result<(), HandlerError> {
        ctx.check(Fail::Destroy(old.id))?;
        ctx.calls.push(Call::Destroy {
            id: old.id,
            kind: self.kind,
            serial: mapped.serial,
        });
        Ok(())
    }
}

/// Mapper with recorders for kinds `a` and `b`.
pub fn mapper() -> DeclarationMapper<Journal, Item> {
    mapper_with(MapperConfig::default())
}

pub fn mapper_with(config: MapperConfig) -> DeclarationMapper<Journal, Item> {
    init_tracing();
    DeclarationMapper::builder()
        .config(config)
        .register(Recorder::new("a"))
        .register(Recorder::new("b"))
        .build()
        .unwrap()
}

/// Live ids in registry order.
pub fn live_ids(mapper: &DeclarationMapper<Journal, Item>) -> Vec<u32> {
    mapper.registry().ids().copied().collect()
}
