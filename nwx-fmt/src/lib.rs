//! # NWX Formatter
//!
//! Metadata resolution and legacy wire-document assembly.
//!
//! - [`resolve`]: hierarchy and locale-name resolution against vocabulary snapshots
//! - [`format`]: pure field formatters and their lookup tables
//! - [`assemble`]: per-item document assembly, rewrite chains and service fan-out
//! - [`dispatch`]: sequence numbering and XML serialization
//!
//! ```no_run
//! use nwx_common::{ContentItem, FormatterConfig, InMemoryRepository, VocabularySet};
//! use nwx_fmt::{Assembler, Dispatcher, InMemorySequenceStore};
//!
//! # fn main() -> nwx_common::Result<()> {
//! let config = FormatterConfig::load(None)?;
//! let dispatcher = Dispatcher::new(InMemorySequenceStore::new(config.sequence)?);
//! let assembler = Assembler::new(config)?;
//!
//! let item = ContentItem::from_json(r#"{"guid": "story-1", "type": "text"}"#)?;
//! let assembly = assembler.assemble(&item, &VocabularySet::new(), &InMemoryRepository::new())?;
//! for message in dispatcher.dispatch_all("globe", &assembly.documents)? {
//!     println!("{}", message.payload);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod dispatch;
pub mod document;
pub mod format;
pub mod resolve;

pub use assemble::{Assembler, Assembly};
pub use dispatch::{Dispatcher, InMemorySequenceStore, SequenceStore, WireMessage};
pub use document::{FieldSet, FieldValue, OutputDocument};
pub use resolve::HierarchyResolver;
