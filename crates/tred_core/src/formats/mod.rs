pub mod po;
pub mod xliff;

use crate::model::TranslationUnit;
use po::PoUnit;
use xliff::XliffUnit;

/// Units of every supported format, as stored by a host catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyUnit {
    Po(PoUnit),
    Xliff(XliffUnit),
}

impl AnyUnit {
    pub fn source_text(&self) -> &str {
        match self {
            AnyUnit::Po(unit) => &unit.msgid,
            AnyUnit::Xliff(unit) => &unit.source,
        }
    }

    pub fn target_text(&self) -> &str {
        match self {
            AnyUnit::Po(unit) => &unit.msgstr,
            AnyUnit::Xliff(unit) => &unit.target,
        }
    }

    pub fn set_source_text(&mut self, text: &str) {
        match self {
            AnyUnit::Po(unit) => unit.msgid = text.to_string(),
            AnyUnit::Xliff(unit) => unit.source = text.to_string(),
        }
    }

    pub fn set_target_text(&mut self, text: &str) {
        match self {
            AnyUnit::Po(unit) => unit.msgstr = text.to_string(),
            AnyUnit::Xliff(unit) => unit.target = text.to_string(),
        }
    }

    pub fn set_translator_comment(&mut self, comment: &str) {
        match self {
            AnyUnit::Po(unit) => unit.set_translator_comment(comment),
            AnyUnit::Xliff(unit) => unit.set_translator_comment(comment),
        }
    }
}

impl TranslationUnit for AnyUnit {
    fn translator_comment(&self) -> String {
        match self {
            AnyUnit::Po(unit) => unit.translator_comment(),
            AnyUnit::Xliff(unit) => unit.translator_comment(),
        }
    }

    fn location_comment(&self) -> String {
        match self {
            AnyUnit::Po(unit) => unit.location_comment(),
            AnyUnit::Xliff(unit) => unit.location_comment(),
        }
    }
}

impl From<PoUnit> for AnyUnit {
    fn from(unit: PoUnit) -> Self {
        AnyUnit::Po(unit)
    }
}

impl From<XliffUnit> for AnyUnit {
    fn from(unit: XliffUnit) -> Self {
        AnyUnit::Xliff(unit)
    }
}
