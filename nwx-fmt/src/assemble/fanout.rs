//! Per-service fan-out
//!
//! Two or more distribution services produce one document each; the copies
//! differ only in routing code. `Services` and `Note` both name every
//! service on each copy.

use crate::document::{FieldSet, OutputDocument};

/// Joins service names in `Note`
pub const NOTE_SEPARATOR: &str = ",";

/// Distribution service attached to an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Routing (PSC) code
    pub code: String,
    pub name: String,
}

/// Wrap the content block in one document per routing target
pub fn fan_out(content: FieldSet, services: &[Service], default_code: &str) -> Vec<OutputDocument> {
    match services {
        [] => vec![document(content, "", default_code, None)],
        [only] => vec![document(content, &only.name, &only.code, None)],
        many => {
            let note = many
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(NOTE_SEPARATOR);
            many.iter()
                .map(|s| document(content.clone(), &note, &s.code, Some(&note)))
                .collect()
        }
    }
}

fn document(content: FieldSet, services: &str, code: &str, note: Option<&str>) -> OutputDocument {
    let mut root = FieldSet::new();
    // assigned at dispatch
    root.push("PublishID", "");
    root.push("Services", services);
    root.push("PscCodes", code);
    if let Some(note) = note {
        root.push("Note", note);
    }
    OutputDocument { root, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> FieldSet {
        let mut set = FieldSet::new();
        set.push("ContentType", "Text");
        set
    }

    fn service(code: &str, name: &str) -> Service {
        Service {
            code: code.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_no_service_uses_default_code() {
        let docs = fan_out(content(), &[], "GENERAL");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].root_field("PscCodes"), Some("GENERAL"));
        assert_eq!(docs[0].root_field("Note"), None);
    }

    #[test]
    fn test_single_service_has_no_note() {
        let docs = fan_out(content(), &[service("NAT", "National")], "GENERAL");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].root_field("Services"), Some("National"));
        assert_eq!(docs[0].root_field("PscCodes"), Some("NAT"));
        assert!(!docs[0].root.contains("Note"));
    }

    #[test]
    fn test_multiple_services_fan_out() {
        let services = [service("NAT", "National"), service("INT", "International")];
        let docs = fan_out(content(), &services, "GENERAL");

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].root_field("PscCodes"), Some("NAT"));
        assert_eq!(docs[1].root_field("PscCodes"), Some("INT"));
        for doc in &docs {
            assert_eq!(doc.root_field("Note"), Some("National,International"));
            assert_eq!(doc.root_field("Services"), Some("National,International"));
            assert_eq!(doc.content, content());
        }
        assert_eq!(
            docs[0].root.names(),
            vec!["PublishID", "Services", "PscCodes", "Note"]
        );
    }
}
