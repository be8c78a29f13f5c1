//! Schema description source

/// Supplies the textual schema that grounds every prompt
pub trait SchemaProvider: Send + Sync {
    /// Prompt-ready description of tables, columns, and keys
    fn schema_description(&self) -> String;
}

/// Fixed schema text
#[derive(Debug, Clone, Default)]
pub struct StaticSchema(String);

impl StaticSchema {
    /// Wrap a pre-rendered description
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

impl SchemaProvider for StaticSchema {
    fn schema_description(&self) -> String {
        self.0.clone()
    }
}
