use std::fmt;

/// Routing key for cross-panel events. Each on-screen text field owns
/// exactly one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Source,
    Target,
    Comment,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Source => "source",
            FieldId::Target => "target",
            FieldId::Comment => "comment",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
