use std::cell::RefCell;
use std::rc::Rc;

/// Comment accessors every supported file format provides.
///
/// A format without a location concept keeps the default, which the
/// comment panel treats the same as "no location comment".
pub trait TranslationUnit {
    fn translator_comment(&self) -> String;

    fn location_comment(&self) -> String {
        String::new()
    }
}

/// Transient handle to the unit currently active in the host document.
pub type UnitRef = Rc<dyn TranslationUnit>;

impl<T: TranslationUnit> TranslationUnit for RefCell<T> {
    fn translator_comment(&self) -> String {
        self.borrow().translator_comment()
    }

    fn location_comment(&self) -> String {
        self.borrow().location_comment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl TranslationUnit for Bare {
        fn translator_comment(&self) -> String {
            "note".to_string()
        }
    }

    #[test]
    fn t_unit_001_location_defaults_to_empty() {
        let unit: UnitRef = Rc::new(Bare);
        assert_eq!(unit.translator_comment(), "note");
        assert_eq!(unit.location_comment(), "");
    }

    #[test]
    fn t_unit_002_refcell_handle_sees_later_writes() {
        struct Note(String);
        impl TranslationUnit for Note {
            fn translator_comment(&self) -> String {
                self.0.clone()
            }
        }

        let shared = Rc::new(RefCell::new(Note("a".to_string())));
        let unit: UnitRef = shared.clone();
        shared.borrow_mut().0 = "b".to_string();
        assert_eq!(unit.translator_comment(), "b");
    }
}
