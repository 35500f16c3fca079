use reqwest::Method;
use serde_json::{Value, json};
use wikibase_rest::{EditOptions, payload};

fn assert_patch_reproduces(old: Value, new: Value) {
    let built = payload::build(&Method::PATCH, None, Some(&new), Some(&old), &EditOptions::new());
    let patch = built.patch().expect("patch body");

    let mut doc = old.clone();
    json_patch::patch(&mut doc, &patch.0).unwrap();
    assert_eq!(doc, new, "patch {patch:?} does not turn {old} into {new}");
}

#[test]
fn test_scalar_and_type_changes() {
    assert_patch_reproduces(json!({"a": 1}), json!({"a": 2}));
    assert_patch_reproduces(json!({"a": 1}), json!({"a": "one"}));
    assert_patch_reproduces(json!({"a": null}), json!({"a": [1, 2]}));
    assert_patch_reproduces(json!({"a": {"b": 1}}), json!({"a": true}));
}

#[test]
fn test_root_replacement() {
    assert_patch_reproduces(json!({"a": 1}), json!([1, 2, 3]));
    assert_patch_reproduces(json!("x"), json!({"x": "y"}));
}

#[test]
fn test_nested_objects() {
    assert_patch_reproduces(
        json!({"labels": {"en": "cat", "fr": "chat"}, "descriptions": {}}),
        json!({"labels": {"en": "house cat", "de": "Katze"}, "descriptions": {"en": "pet"}}),
    );
}

#[test]
fn test_array_growth_and_shrink() {
    assert_patch_reproduces(json!({"en": ["a"]}), json!({"en": ["a", "b", "c"]}));
    assert_patch_reproduces(json!({"en": ["a", "b", "c"]}), json!({"en": ["c"]}));
    assert_patch_reproduces(json!({"en": ["a", "b"]}), json!({"en": ["b", "a"]}));
    assert_patch_reproduces(json!([]), json!([{"x": [1, {"y": 2}]}]));
}

#[test]
fn test_keys_needing_pointer_escapes() {
    assert_patch_reproduces(
        json!({"a/b": 1, "c~d": 2}),
        json!({"a/b": 3, "e~f/g": 4}),
    );
}

#[test]
fn test_statement_edit() {
    let old = json!({
        "statements": {
            "P31": [{
                "id": "Q1$a",
                "rank": "normal",
                "property": {"id": "P31", "data_type": "wikibase-item"},
                "value": {"type": "value", "content": "Q5"},
                "qualifiers": [],
                "references": [],
            }],
        },
    });
    let mut new = old.clone();
    new["statements"]["P31"][0]["rank"] = json!("preferred");
    new["statements"]["P31"][0]["value"] = json!({"type": "novalue"});
    new["statements"]["P569"] = json!([{
        "rank": "normal",
        "property": {"id": "P569", "data_type": "time"},
        "value": {"type": "somevalue"},
        "qualifiers": [],
        "references": [],
    }]);
    assert_patch_reproduces(old, new);
}
