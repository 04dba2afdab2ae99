//! Assembled wire document
//!
//! Field order is significant: fields serialize in insertion order.

/// Value of a named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Block(FieldSet),
}

/// One named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// Ordered list of named fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        });
    }

    /// Append a nested block
    pub fn push_block(&mut self, name: impl Into<String>, block: FieldSet) {
        self.fields.push(Field {
            name: name.into(),
            value: FieldValue::Block(block),
        });
    }

    /// Replace the value of an existing text field, or append it
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = FieldValue::Text(value.into());
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Text of field `name`; None when absent or a block
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(s) => Some(s),
            FieldValue::Block(_) => None,
        }
    }

    pub fn block(&self, name: &str) -> Option<&FieldSet> {
        match self.get(name)? {
            FieldValue::Block(b) => Some(b),
            FieldValue::Text(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Root fields plus the content item block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    pub root: FieldSet,
    pub content: FieldSet,
}

impl OutputDocument {
    /// Content field text, shorthand for tests and dispatch logging
    pub fn field(&self, name: &str) -> Option<&str> {
        self.content.text(name)
    }

    pub fn root_field(&self, name: &str) -> Option<&str> {
        self.root.text(name)
    }
}
