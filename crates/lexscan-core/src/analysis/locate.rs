//! Locating a JSON object inside free-form model output.
//!
//! Models often wrap the requested JSON in prose or code fences. The
//! balanced scan below finds every `{ ... }` span whose braces match,
//! ignoring braces inside JSON strings, so stray braces in surrounding
//! prose do not corrupt the slice.

/// Balanced `{ ... }` spans, one per opening brace that has a match, in
/// order of the opening brace. Nested objects are yielded too, after the
/// span that contains them starts.
pub fn object_candidates(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_end(text, start).map(|end| &text[start..=end]))
}

/// First balanced span that is a syntactically valid JSON object carrying
/// at least one of `keys` at its top level. Empty `keys` accepts any object.
pub fn locate_json_object<'t>(text: &'t str, keys: &[&str]) -> Option<&'t str> {
    object_candidates(text).find(|candidate| has_any_key(candidate, keys))
}

/// Whether `candidate` parses as a JSON object with one of `keys` at its
/// top level (or any object, when `keys` is empty).
pub fn has_any_key(candidate: &str, keys: &[&str]) -> bool {
    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(serde_json::Value::Object(object)) => {
            keys.is_empty() || keys.iter().any(|k| object.contains_key(*k))
        }
        _ => false,
    }
}

/// Slice from the first `{` to the last `}`.
///
/// Breaks when the prose after the JSON contains a `}` or the prose before
/// it contains a `{`. Kept as a last resort behind [`locate_json_object`].
pub fn first_last_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Byte index of the `}` closing the `{` at `start`.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // Braces, quotes and backslashes are ASCII, so byte scanning is UTF-8 safe.
    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_{}\"]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    fn json_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-z_]{1,8}", json_value(), 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
    }

    proptest! {
        /// Property: an object wrapped in brace-free prose is recovered verbatim
        #[test]
        fn object_in_prose_is_recovered(
            obj in json_object(),
            pretty in any::<bool>(),
            before in "[^{}]{0,40}",
            after in "[^{}]{0,40}",
        ) {
            let json = if pretty {
                serde_json::to_string_pretty(&obj).unwrap()
            } else {
                serde_json::to_string(&obj).unwrap()
            };
            let reply = format!("{before}{json}{after}");
            prop_assert_eq!(locate_json_object(&reply, &[]), Some(json.as_str()));
        }

        /// Property: text without an opening brace never yields an object
        #[test]
        fn no_brace_no_object(text in "[^{]{0,200}") {
            prop_assert_eq!(locate_json_object(&text, &[]), None);
            prop_assert_eq!(first_last_slice(&text), None);
        }

        /// Property: scanning never panics on arbitrary input
        #[test]
        fn scanning_never_panics(text in ".{0,200}") {
            let _ = object_candidates(&text).count();
            let _ = first_last_slice(&text);
        }
    }
}
