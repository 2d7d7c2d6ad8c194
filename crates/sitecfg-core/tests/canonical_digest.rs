//! Digest stability properties for configuration documents.
//!
//! A preview server decides whether a reload changed anything by comparing
//! digests, so the digest must depend on document content only: not on key
//! order, not on formatting.

use proptest::prelude::*;
use sitecfg_core::{sha256_digest, CanonicalBytes};

fn digest_of(value: &serde_json::Value) -> String {
    let cb = CanonicalBytes::new(value).expect("canonicalization should succeed");
    sha256_digest(&cb).to_hex()
}

#[test]
fn test_pretty_and_compact_documents_share_a_digest() {
    let compact = r#"{"title":"Allure C++","sidebar":[{"label":"Guides","items":[]}]}"#;
    let pretty = r#"
{
    "sidebar": [
        { "items": [], "label": "Guides" }
    ],
    "title": "Allure C++"
}"#;
    let a: serde_json::Value = serde_json::from_str(compact).unwrap();
    let b: serde_json::Value = serde_json::from_str(pretty).unwrap();
    assert_eq!(digest_of(&a), digest_of(&b));
}

#[test]
fn test_array_reorder_changes_digest() {
    let a = serde_json::json!({"sections": ["charts", "report"]});
    let b = serde_json::json!({"sections": ["report", "charts"]});
    assert_ne!(digest_of(&a), digest_of(&b));
}

proptest! {
    #[test]
    fn prop_insertion_order_does_not_change_digest(
        entries in proptest::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..8)
    ) {
        let mut forward = serde_json::Map::new();
        for (k, v) in entries.iter() {
            forward.insert(k.clone(), serde_json::Value::String(v.clone()));
        }
        let mut backward = serde_json::Map::new();
        for (k, v) in entries.iter().rev() {
            backward.insert(k.clone(), serde_json::Value::String(v.clone()));
        }
        prop_assert_eq!(
            digest_of(&serde_json::Value::Object(forward)),
            digest_of(&serde_json::Value::Object(backward))
        );
    }

    #[test]
    fn prop_canonical_bytes_reparse_to_same_value(
        labels in proptest::collection::vec("[a-zA-Z ]{1,16}", 0..6)
    ) {
        let value = serde_json::json!({ "labels": labels });
        let cb = CanonicalBytes::new(&value).unwrap();
        let reparsed: serde_json::Value = serde_json::from_slice(cb.as_bytes()).unwrap();
        prop_assert_eq!(reparsed, value);
    }
}
