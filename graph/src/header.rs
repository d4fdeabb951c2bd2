//! File header metadata of a model snapshot.

/// Header fields the rules can be conditioned on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// FILE_DESCRIPTION entries, e.g. `ViewDefinition [CoordinationView]`.
    pub description: Vec<String>,
    /// FILE_SCHEMA identifiers, e.g. `IFC2X3`.
    pub schema_identifiers: Vec<String>,
}

impl FileHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, entry: impl Into<String>) -> Self {
        self.description.push(entry.into());
        self
    }

    pub fn with_schema(mut self, identifier: impl Into<String>) -> Self {
        self.schema_identifiers.push(identifier.into());
        self
    }

    /// First schema identifier, if any.
    pub fn schema(&self) -> Option<&str> {
        self.schema_identifiers.first().map(String::as_str)
    }

    /// Model view definition named by the first description entry.
    ///
    /// `ViewDefinition [CoordinationView]` yields `CoordinationView`.
    /// Anything not of the form `<keyword> [<name>]` yields None.
    pub fn model_view_definition(&self) -> Option<&str> {
        let entry = self.description.first()?;
        let (_, bracketed) = entry.split_once(' ')?;
        bracketed.strip_prefix('[')?.strip_suffix(']')
    }
}
