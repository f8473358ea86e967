use crate::event::SearchMatch;
use crate::field::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Field(FieldId),
    All,
}

impl SearchScope {
    fn includes(self, field: FieldId) -> bool {
        match self {
            SearchScope::Field(only) => only == field,
            SearchScope::All => true,
        }
    }
}

/// Next occurrence of `query` in `fields`, in field order, starting after
/// `after` (a field and the char offset where the previous match began).
/// Positions and lengths are in chars.
pub fn find_next(
    fields: &[(FieldId, &str)],
    query: &str,
    scope: SearchScope,
    after: Option<(FieldId, usize)>,
) -> Option<SearchMatch> {
    if query.is_empty() {
        return None;
    }
    let length = query.chars().count();
    let start_index = after
        .and_then(|(field, _)| fields.iter().position(|(f, _)| *f == field))
        .unwrap_or(0);

    fields
        .iter()
        .enumerate()
        .skip(start_index)
        .filter(|(_, (field, _))| scope.includes(*field))
        .find_map(|(index, (field, text))| {
            let from_char = match after {
                Some((prev, position)) if index == start_index && prev == *field => position + 1,
                _ => 0,
            };
            let from_byte = text
                .char_indices()
                .nth(from_char)
                .map(|(byte, _)| byte)
                .or((from_char == text.chars().count()).then_some(text.len()))?;
            let hit = text[from_byte..].find(query)? + from_byte;
            Some(SearchMatch::at(*field, text[..hit].chars().count(), length))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_srch_001_find_across_fields() {
        let fields = [
            (FieldId::Source, "Hello World"),
            (FieldId::Target, "こんにちは世界"),
            (FieldId::Comment, "say hello to the world"),
        ];

        let first = find_next(&fields, "World", SearchScope::All, None).expect("first");
        assert_eq!(first, SearchMatch::at(FieldId::Source, 6, 5));

        let next = find_next(&fields, "world", SearchScope::All, Some((FieldId::Source, 6)))
            .expect("next");
        assert_eq!(next, SearchMatch::at(FieldId::Comment, 17, 5));

        let target = find_next(&fields, "世界", SearchScope::Field(FieldId::Target), None)
            .expect("target");
        assert_eq!(target, SearchMatch::at(FieldId::Target, 5, 2));
    }

    #[test]
    fn t_srch_002_no_more_matches() {
        let fields = [(FieldId::Comment, "abab")];
        let first = find_next(&fields, "ab", SearchScope::All, None).expect("first");
        let second =
            find_next(&fields, "ab", SearchScope::All, Some((FieldId::Comment, 0))).expect("second");
        assert_eq!(second.position, Some(2));
        assert_eq!(
            find_next(&fields, "ab", SearchScope::All, Some((FieldId::Comment, 2))),
            None
        );
        assert_eq!(first.position, Some(0));
        assert_eq!(find_next(&fields, "", SearchScope::All, None), None);
    }
}
