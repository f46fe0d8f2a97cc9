//! Declaration reconciliation engine for DeclMap.
//!
//! Keeps a set of live, side-effecting objects ("mapped instances") in step
//! with a list of immutable declarations describing the desired state.
//! Each pass classifies every declaration against the previous pass by id:
//!
//! - new id → the kind's [`Mapping`] creates an instance
//! - same id, same kind → the mapping updates the instance
//! - same id, different kind → the old mapping destroys, the new one creates
//! - id gone → the mapping destroys the instance
//!
//! # Components
//!
//! - [`Declaration`] — identity and kind of a caller-defined declaration
//! - [`Mapping`] — per-kind handler that creates, updates and destroys instances
//! - [`Registry`] — the committed `(declaration, instance)` pairs, keyed by id
//! - [`DeclarationMapper`] — the engine; owns the handlers and the registry
//! - [`MapperConfig`] — duplicate-id and clear policies
//!
//! # Example
//!
//! ```
//! use declmap_engine::{Declaration, DeclarationMapper, HandlerError, Mapping};
//!
//! struct Label {
//!     id: u32,
//!     text: String,
//! }
//!
//! impl Declaration for Label {
//!     type Id = u32;
//!     type Kind = &'static str;
//!
//!     fn id(&self) -> &u32 {
//!         &self.id
//!     }
//!
//!     fn kind(&self) -> &'static str {
//!         "label"
//!     }
//! }
//!
//! struct LabelMapping;
//!
//! impl Mapping<Vec<String>, Label> for LabelMapping {
//!     type Mapped = String;
//!
//!     fn kind(&self) -> &'static str {
//!         "label"
//!     }
//!
//!     fn create(&self, out: &mut Vec<String>, dec: &Label) -> Result<String, HandlerError> {
//!         out.push(format!("show {}", dec.text));
//!         Ok(dec.text.clone())
//!     }
//!
//!     fn update(
//!         &self,
//!         out: &mut Vec<String>,
//!         dec: &Label,
//!         _old: &Label,
//!         shown: &mut String,
//!     ) -> Result<(), HandlerError> {
//!         if *shown != dec.text {
//!             out.push(format!("relabel {} -> {}", shown, dec.text));
//!             *shown = dec.text.clone();
//!         }
//!         Ok(())
//!     }
//!
//!     fn destroyed(
//!         &self,
//!         out: &mut Vec<String>,
//!         _old: &Label,
//!         shown: String,
//!     ) -> Result<(), HandlerError> {
//!         out.push(format!("hide {shown}"));
//!         Ok(())
//!     }
//! }
//!
//! let mut mapper: DeclarationMapper<Vec<String>, Label> = DeclarationMapper::builder()
//!     .register(LabelMapping)
//!     .build()
//!     .unwrap();
//! let mut out = Vec::new();
//!
//! mapper.reconcile(&mut out, vec![Label { id: 1, text: "hello".into() }]).unwrap();
//! mapper.reconcile(&mut out, vec![Label { id: 1, text: "world".into() }]).unwrap();
//! mapper.clear(&mut out).unwrap();
//!
//! assert_eq!(out, ["show hello", "relabel hello -> world", "hide world"]);
//! ```

mod config;
mod declaration;
mod error;
mod mapper;
mod mapping;
pub mod registry;
mod report;

pub use config::{ClearPolicy, DuplicateIdPolicy, MapperConfig};
pub use declaration::Declaration;
pub use error::{MapperError, MapperResult, Operation};
pub use mapper::{DeclarationMapper, MapperBuilder};
pub use mapping::{HandlerError, Mapping};
pub use registry::{Entry, Registry};
pub use report::{ClearReport, ReconcileReport};
