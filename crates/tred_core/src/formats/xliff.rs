use crate::model::TranslationUnit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XliffNote {
    pub from: Option<String>,
    pub text: String,
}

/// An XLIFF `<trans-unit>`. XLIFF has no source-location comment, so only
/// the notes surface in the comment panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XliffUnit {
    pub source: String,
    pub target: String,
    notes: Vec<XliffNote>,
}

impl XliffUnit {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, from: Option<&str>, text: &str) -> Self {
        self.notes.push(XliffNote {
            from: from.map(ToString::to_string),
            text: text.to_string(),
        });
        self
    }

    pub fn notes(&self) -> &[XliffNote] {
        &self.notes
    }

    /// The panel edits every note as one joined text, developer notes
    /// included, so the edited text becomes the unit's only note.
    pub fn set_translator_comment(&mut self, comment: &str) {
        self.notes.clear();
        if !comment.is_empty() {
            self.notes.push(XliffNote {
                from: Some("translator".to_string()),
                text: comment.to_string(),
            });
        }
    }
}

impl TranslationUnit for XliffUnit {
    fn translator_comment(&self) -> String {
        self.notes
            .iter()
            .map(|note| note.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_xlf_001_notes_join_and_no_location() {
        let unit = XliffUnit::new("File", "Fichier")
            .with_note(Some("developer"), "menu title")
            .with_note(None, "keep short");
        assert_eq!(unit.translator_comment(), "menu title\nkeep short");
        assert_eq!(unit.location_comment(), "");
    }

    #[test]
    fn t_xlf_002_set_comment_replaces_notes() {
        let mut unit = XliffUnit::new("a", "b").with_note(None, "x");
        unit.set_translator_comment("reviewed");
        assert_eq!(unit.notes().len(), 1);
        assert_eq!(unit.notes()[0].from.as_deref(), Some("translator"));
        unit.set_translator_comment("");
        assert!(unit.notes().is_empty());
    }

    #[test]
    fn t_xlf_003_edited_notes_read_back_unchanged() {
        let mut unit = XliffUnit::new("a", "b")
            .with_note(Some("developer"), "menu title")
            .with_note(None, "keep short");
        let edited = format!("{}\nchecked\n", unit.translator_comment());
        unit.set_translator_comment(&edited);
        assert_eq!(unit.translator_comment(), edited);
        assert_eq!(unit.notes().len(), 1);
    }
}
