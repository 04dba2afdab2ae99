//! Output dispatcher
//!
//! Numbers assembled documents per subscriber and renders them to the XML
//! wire syntax. Each fan-out copy takes its own sequence number.

pub mod sequence;
pub mod xml;

pub use sequence::{InMemorySequenceStore, SequenceStore};

use crate::document::OutputDocument;
use nwx_common::Result;
use tracing::info;

/// One numbered, serialized document bound for a subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    pub subscriber: String,
    pub sequence: u64,
    pub document: OutputDocument,
    /// XML text
    pub payload: String,
}

/// Sequences and serializes documents
pub struct Dispatcher<S> {
    sequences: S,
}

impl<S: SequenceStore> Dispatcher<S> {
    pub fn new(sequences: S) -> Self {
        Self { sequences }
    }

    pub fn sequences(&self) -> &S {
        &self.sequences
    }

    /// Number `document` for `subscriber` and render it
    pub fn dispatch(&self, subscriber: &str, document: &OutputDocument) -> Result<WireMessage> {
        let sequence = self.sequences.next(subscriber)?;
        let mut document = document.clone();
        document.root.set("PublishID", sequence.to_string());
        let payload = xml::to_xml(&document)?;

        info!(
            "Dispatching '{}' #{} to {} ({} bytes)",
            document.field("FileName").unwrap_or_default(),
            sequence,
            subscriber,
            payload.len()
        );
        Ok(WireMessage {
            subscriber: subscriber.to_string(),
            sequence,
            document,
            payload,
        })
    }

    /// Dispatch every document, in order
    pub fn dispatch_all(&self, subscriber: &str, documents: &[OutputDocument]) -> Result<Vec<WireMessage>> {
        documents
            .iter()
            .map(|document| self.dispatch(subscriber, document))
            .collect()
    }
}
