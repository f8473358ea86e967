use crate::model::TranslationUnit;

const SOURCE_MARKER: &str = "#:";
const EXTRACTED_MARKER: &str = "#.";
const FLAG_MARKER: &str = "#,";
const PREVIOUS_MARKER: &str = "#|";

/// A gettext catalog entry with the comment lines that precede it.
///
/// Source comments are kept as raw `#: ` lines, newline included, the way
/// they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoUnit {
    pub msgid: String,
    pub msgstr: String,
    translator_notes: Vec<String>,
    source_comments: Vec<String>,
}

impl PoUnit {
    pub fn new(msgid: &str, msgstr: &str) -> Self {
        Self {
            msgid: msgid.to_string(),
            msgstr: msgstr.to_string(),
            ..Self::default()
        }
    }

    pub fn from_comment_lines(msgid: &str, msgstr: &str, lines: &[&str]) -> Self {
        let mut unit = Self::new(msgid, msgstr);
        for line in lines {
            unit.push_comment_line(line);
        }
        unit
    }

    pub fn with_translator_note(mut self, note: &str) -> Self {
        self.translator_notes.push(note.to_string());
        self
    }

    pub fn with_source_comment(mut self, reference: &str) -> Self {
        self.source_comments.push(format!("{SOURCE_MARKER} {reference}\n"));
        self
    }

    /// Classifies one `#` comment line. Extracted, flag and previous-msgid
    /// comments carry no translator text and are dropped.
    pub fn push_comment_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with(SOURCE_MARKER) {
            self.source_comments.push(format!("{line}\n"));
            return;
        }
        if [EXTRACTED_MARKER, FLAG_MARKER, PREVIOUS_MARKER]
            .iter()
            .any(|marker| line.starts_with(marker))
        {
            return;
        }
        if let Some(rest) = line.strip_prefix('#') {
            let note = rest.strip_prefix(' ').unwrap_or(rest);
            self.translator_notes.push(note.to_string());
        }
    }

    /// One note per `\n`-separated line, so a trailing newline survives as an
    /// empty last note. The empty comment clears every note.
    pub fn set_translator_comment(&mut self, comment: &str) {
        self.translator_notes = if comment.is_empty() {
            Vec::new()
        } else {
            comment.split('\n').map(ToString::to_string).collect()
        };
    }
}

impl TranslationUnit for PoUnit {
    fn translator_comment(&self) -> String {
        self.translator_notes.join("\n")
    }

    fn location_comment(&self) -> String {
        self.source_comments
            .iter()
            .map(|comment| comment.chars().skip(3).collect::<String>())
            .collect()
    }
}
