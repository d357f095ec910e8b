//! Reusable merge operations over JWCC trees.

use std::collections::HashSet;

use crate::jwcc::{Array, Comments, Member, Object, Scalar, Value};

const PROVENANCE_PREFIX: &str = "from `";

/// The provenance comment recorded on nodes contributed by `path`.
pub fn provenance_line(path: &str) -> String {
    format!("from `{path}`")
}

/// Whether a node already carries a provenance line. Attributed nodes are
/// never re-attributed.
pub fn has_provenance(comments: &Comments) -> bool {
    comments
        .before
        .iter()
        .any(|line| line.starts_with(PROVENANCE_PREFIX))
}

/// Prepend a provenance line unless the node already carries one.
pub fn attribute(comments: &mut Comments, path: &str) {
    if !has_provenance(comments) {
        comments.before.insert(0, provenance_line(path));
    }
}

/// Union of two arrays, deduplicated by canonical text.
///
/// The result starts with all of `a` in original order, followed by each
/// value of `b` whose canonical text does not already occur in `a` (or
/// earlier in `b`). Neither input is mutated.
pub fn merge_arrays_with_dedup(a: &Array, b: &Array) -> Array {
    let mut merged = a.clone();
    let mut seen: HashSet<String> = a.values.iter().map(Value::canonical_text).collect();
    for value in &b.values {
        if seen.insert(value.canonical_text()) {
            merged.values.push(value.clone());
        }
    }
    merged
}

/// Fold `incoming` into `target`, key by key.
///
/// New keys are appended with a provenance line for `provenance_path`.
/// Shared keys merge by shape: objects recurse, arrays dedup-union, and
/// anything else keeps the target value.
pub fn merge_objects_by_key(target: &mut Object, incoming: &Object, provenance_path: &str) {
    for member in &incoming.members {
        let key = member.key.text().into_owned();
        match target.find_mut(&key) {
            None => {
                let mut added = member.clone();
                attribute(&mut added.comments, provenance_path);
                target.members.push(added);
            }
            Some(existing) => match (&mut existing.value, &member.value) {
                (Value::Object(tgt), Value::Object(inc)) => {
                    merge_objects_by_key(tgt, inc, provenance_path);
                }
                (Value::Array(tgt), Value::Array(inc)) => {
                    let merged = merge_arrays_with_dedup(tgt, inc);
                    *tgt = merged;
                }
                // Scalar clash or type mismatch: the target wins.
                _ => {}
            },
        }
    }
}

/// A copy of `obj[key]` when present and object-shaped, otherwise a fresh
/// empty object. Does not mutate `obj`.
pub fn existing_or_new_object(obj: &Object, key: &str) -> Object {
    match obj.get(key) {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Object::new(),
    }
}

/// A copy of `obj[key]` when present and array-shaped, otherwise a fresh
/// empty array. Does not mutate `obj`.
pub fn existing_or_new_array(obj: &Object, key: &str) -> Array {
    match obj.get(key) {
        Some(Value::Array(existing)) => existing.clone(),
        _ => Array::new(),
    }
}

/// Replace the value of `key`, or append a new member for it.
///
/// A newly created member is attributed to `provenance` when given;
/// replacing an existing member leaves its trivia untouched.
pub fn upsert_member(obj: &mut Object, key: &str, value: Value, provenance: Option<&str>) {
    match obj.find_mut(key) {
        Some(member) => member.value = value,
        None => {
            let mut member = Member::new(Scalar::string(key), value);
            if let Some(path) = provenance {
                member.comments.before.push(provenance_line(path));
            }
            obj.members.push(member);
        }
    }
}
