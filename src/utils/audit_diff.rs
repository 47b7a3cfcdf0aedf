use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

const IGNORED_FIELDS: &[&str] = &["created_at", "updated_at"];

/// Field-level diff between two JSON snapshots of an entity.
///
/// Either side may be absent (create / delete), in which case every field
/// of the other side is reported. The result maps each changed field to
/// `{ "from": .., "to": .. }`.
pub fn diff_fields(before: Option<&Value>, after: Option<&Value>) -> Map<String, Value> {
    let empty = Map::new();
    let before = before.and_then(Value::as_object).unwrap_or(&empty);
    let after = after.and_then(Value::as_object).unwrap_or(&empty);

    let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    let mut changes = Map::new();
    for key in keys {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let from = before.get(key).unwrap_or(&Value::Null);
        let to = after.get(key).unwrap_or(&Value::Null);
        if from != to {
            changes.insert(key.clone(), json!({ "from": from, "to": to }));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_only_changed_fields() {
        let before = json!({"name": "standard", "price_lak": 50000, "is_active": true, "updated_at": "a"});
        let after = json!({"name": "standard", "price_lak": 75000, "is_active": true, "updated_at": "b"});

        let changes = diff_fields(Some(&before), Some(&after));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["price_lak"], json!({"from": 50000, "to": 75000}));
    }

    #[test]
    fn test_diff_on_create_and_delete() {
        let row = json!({"code": "HALF50", "max_uses": null, "created_at": "x"});

        let created = diff_fields(None, Some(&row));
        assert_eq!(created.len(), 1);
        assert_eq!(created["code"], json!({"from": null, "to": "HALF50"}));

        let deleted = diff_fields(Some(&row), None);
        assert_eq!(deleted["code"], json!({"from": "HALF50", "to": null}));
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let row = json!({"code": "HALF50"});
        assert!(diff_fields(Some(&row), Some(&row)).is_empty());
    }
}
