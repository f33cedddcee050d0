//! Test helper: run rendered output against an empty root object.
//!
//! Understands exactly the statements `Scope::render` emits for plain data:
//! `root.a.b || (root.a.b = {});` and `root.a.b = <literal>;`, where the
//! literal is JSON or `undefined`. Accessing a member of a missing object
//! panics the way the script would throw.

#![allow(dead_code)]

use serde_json::{Map, Value as Json};

/// Execute `script` and return the resulting root object.
pub fn execute(script: &str) -> Json {
    let mut root = Json::Object(Map::new());

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with("//")
            || line == "(function (root) {"
            || line == "}(this));"
        {
            continue;
        }

        let stmt = line
            .strip_suffix(';')
            .unwrap_or_else(|| panic!("statement without `;`: {}", line));
        let (target, rest) = stmt
            .split_once(' ')
            .unwrap_or_else(|| panic!("unexpected statement: {}", stmt));
        let path = target
            .strip_prefix("root.")
            .unwrap_or_else(|| panic!("target not on root: {}", target));

        if rest.starts_with("|| (") {
            ensure(&mut root, path);
        } else if let Some(literal) = rest.strip_prefix("= ") {
            let value = if literal == "undefined" {
                Json::Null
            } else {
                serde_json::from_str(literal)
                    .unwrap_or_else(|e| panic!("not a data literal `{}`: {}", literal, e))
            };
            assign(&mut root, path, value);
        } else {
            panic!("unexpected statement: {}", stmt);
        }
    }

    root
}

/// Look up `path` in an executed root object.
pub fn lookup<'a>(root: &'a Json, path: &str) -> Option<&'a Json> {
    path.split('.')
        .try_fold(root, |current, segment| current.get(segment))
}

fn parent_object<'a>(root: &'a mut Json, parents: &[&str]) -> &'a mut Map<String, Json> {
    let mut current = root;
    for segment in parents {
        current = current
            .as_object_mut()
            .and_then(|map| map.get_mut(*segment))
            .unwrap_or_else(|| panic!("TypeError: `{}` is undefined", segment));
    }
    current
        .as_object_mut()
        .unwrap_or_else(|| panic!("TypeError: `{}` is not an object", parents.join(".")))
}

fn ensure(root: &mut Json, path: &str) {
    let segments: Vec<&str> = path.split('.').collect();
    let (leaf, parents) = segments.split_last().expect("non-empty path");
    let object = parent_object(root, parents);
    if !object.get(*leaf).map(is_truthy).unwrap_or(false) {
        object.insert(leaf.to_string(), Json::Object(Map::new()));
    }
}

fn assign(root: &mut Json, path: &str, value: Json) {
    let segments: Vec<&str> = path.split('.').collect();
    let (leaf, parents) = segments.split_last().expect("non-empty path");
    parent_object(root, parents).insert(leaf.to_string(), value);
}

fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}
