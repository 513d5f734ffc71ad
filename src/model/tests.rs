//! Model materialization tests

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(model: &Model) -> &Record {
    model.as_record().unwrap()
}

fn validation_parts(err: Error) -> (String, String, String, String) {
    match err {
        Error::Validation {
            context,
            field,
            expected,
            received,
        } => (context, field, expected, received),
        other => panic!("expected validation error, got: {other}"),
    }
}

#[test]
fn test_scalar_passthrough() {
    let materializer = Materializer::new();

    let model = materializer.materialize(&json!(5), "Count").unwrap();
    assert_eq!(model, Model::Scalar(json!(5)));
    assert!(materializer.cache().is_empty());
}

#[test]
fn test_same_field_set_yields_same_type() {
    let materializer = Materializer::new();

    let first = materializer
        .materialize(&json!({"id": 1, "kind": "note"}), "Moment")
        .unwrap();
    let second = materializer
        .materialize(&json!({"kind": "highlight", "id": 2}), "Moment")
        .unwrap();

    assert!(record(&first).same_type(record(&second)));
    assert_eq!(record(&first).type_name(), "Moment");
    assert_eq!(materializer.cache().len(), 1);
}

#[test]
fn test_uniform_list_shares_singular_type() {
    let materializer = Materializer::new();
    let value = json!([
        {"text": "In the beginning"},
        {"text": "And the earth"},
        {"text": "And God said"}
    ]);

    let model = materializer.materialize(&value, "Verses").unwrap();
    let items = model.as_list().unwrap();

    assert_eq!(items.len(), 3);
    let first = record(&items[0]);
    assert_eq!(first.type_name(), "Verse");
    assert_eq!(first.record_type().context(), "Verse");
    for item in items {
        assert!(record(item).same_type(first));
    }
}

#[test]
fn test_idempotence() {
    let materializer = Materializer::new();
    let value = json!({
        "id": 42,
        "user": {"id": 7, "name": "ruth"},
        "references": [{"human": "Ruth 1:16", "usfm": ["RUT.1.16"]}]
    });

    let first = materializer.materialize(&value, "Moment").unwrap();
    let second = materializer.materialize(&value, "Moment").unwrap();

    assert_eq!(first, second);
    assert!(record(&first).same_type(record(&second)));
    assert!(record(&first["user"]).same_type(record(&second["user"])));
}

#[test]
fn test_round_trip() {
    let materializer = Materializer::new();
    let value = json!({
        "id": 1,
        "title": "Highlight",
        "note": null,
        "color": "fffe00",
        "created_dt": "2024-01-15T10:30:00Z",
        "user": {"id": 7, "name": "ruth", "avatar": {"url": "https://example.com/a.png"}},
        "references": [
            {"human": "John 3:16", "usfm": ["JHN.3.16"], "version_id": 1},
            {"human": "John 3:17", "usfm": ["JHN.3.17"], "version_id": 1}
        ],
        "tags": [],
        "score": 1.5,
        "public": true
    });

    let model = materializer.materialize(&value, "Moment").unwrap();

    assert_eq!(model.to_value(), value);
    let decoded: serde_json::Value = serde_json::from_str(&model.to_json()).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(serde_json::to_value(&model).unwrap(), value);
}

#[test]
fn test_votd_missing_required_field() {
    let materializer = Materializer::new();

    materializer
        .materialize(
            &json!({"day": 1, "usfm": ["JHN.3.16"], "image_id": null}),
            "Votd",
        )
        .unwrap();

    let err = materializer
        .materialize(&json!({"day": 5}), "Votd")
        .unwrap_err();
    let (context, field, expected, received) = validation_parts(err);

    assert_eq!(context, "Votd");
    assert_eq!(field, "usfm");
    assert_eq!(expected, "list<string>");
    assert_eq!(received, "missing");
}

#[test]
fn test_optional_field_may_be_absent_from_subset() {
    let materializer = Materializer::new();

    materializer
        .materialize(&json!({"day": 1, "usfm": ["JHN.3.16"], "image_id": null}), "Votd")
        .unwrap();
    let model = materializer
        .materialize(&json!({"day": 2, "usfm": ["GEN.1.1"]}), "Votd")
        .unwrap();

    assert_eq!(record(&model).type_name(), "Votd");
    assert!(!record(&model).contains("image_id"));
    assert_eq!(materializer.cache().len(), 1);
}

#[test]
fn test_item_id_widening() {
    let materializer = Materializer::new();

    let model = materializer
        .materialize(&json!([{"id": 1}, {"id": "abc"}]), "Items")
        .unwrap();
    let items = model.as_list().unwrap();

    assert!(record(&items[0]).same_type(record(&items[1])));
    let item_type = materializer.cache().get("Item").unwrap();
    assert!(item_type.field("id").unwrap().descriptor.is_any());
    assert_eq!(items[0]["id"].as_i64(), Some(1));
    assert_eq!(items[1]["id"].as_str(), Some("abc"));
}

#[test]
fn test_item_elements_materialize_individually() {
    let materializer = Materializer::new();

    let first = materializer.materialize(&json!({"id": 1}), "Item").unwrap();
    let second = materializer.materialize(&json!({"id": "abc"}), "Item").unwrap();

    assert!(record(&first).same_type(record(&second)));
    assert_eq!(second["id"].as_str(), Some("abc"));
}

#[test]
fn test_nested_recursion() {
    let materializer = Materializer::new();
    let value = json!({"results": [{"verses": [{"text": "a"}]}]});

    let root = materializer.materialize(&value, "Response").unwrap();

    assert_eq!(root["results"][0]["verses"][0]["text"].as_str(), Some("a"));
    assert_eq!(record(&root).type_name(), "Response");
    assert_eq!(record(&root["results"][0]).type_name(), "Result");
    assert_eq!(record(&root["results"][0]["verses"][0]).type_name(), "Verse");
    assert_eq!(materializer.cache().len(), 3);
}

#[test]
fn test_cache_reuse_across_calls() {
    let materializer = Materializer::new();

    let first = materializer
        .materialize(&json!({"id": 1, "kind_id": "note.v1"}), "Moment")
        .unwrap();
    let second = materializer
        .materialize(&json!({"id": 2, "kind_id": "highlight.v1"}), "Moment")
        .unwrap();

    assert!(RecordType::same(
        record(&first).record_type(),
        record(&second).record_type()
    ));
    assert_eq!(materializer.cache().definitions("Moment").len(), 1);
}

#[test]
fn test_different_field_set_creates_distinct_type() {
    let materializer = Materializer::new();

    let note = materializer
        .materialize(&json!({"id": 1, "content": "a"}), "Moment")
        .unwrap();
    let highlight = materializer
        .materialize(&json!({"id": 2, "color": "fffe00"}), "Moment")
        .unwrap();
    let wider = materializer
        .materialize(&json!({"id": 3, "content": "b", "color": "ff0000"}), "Moment")
        .unwrap();

    assert_eq!(record(&note).type_name(), "Moment");
    assert_eq!(record(&highlight).type_name(), "Moment2");
    assert_eq!(record(&wider).type_name(), "Moment3");
    assert!(!record(&note).same_type(record(&highlight)));

    // The original definitions are untouched
    let definitions = materializer.cache().definitions("Moment");
    assert_eq!(definitions.len(), 3);
    assert_eq!(definitions[0].signature().len(), 2);
}

#[test]
fn test_contexts_are_independent() {
    let materializer = Materializer::new();

    let moment = materializer.materialize(&json!({"id": 1}), "Moment").unwrap();
    let badge = materializer.materialize(&json!({"id": 1}), "Badge").unwrap();

    assert!(!record(&moment).same_type(record(&badge)));
    assert_eq!(record(&badge).type_name(), "Badge");
}

#[test]
fn test_structural_mismatch_fails() {
    let materializer = Materializer::new();

    materializer
        .materialize(&json!({"user": {"name": "ruth"}}), "Moment")
        .unwrap();
    let err = materializer
        .materialize(&json!({"user": "ruth"}), "Moment")
        .unwrap_err();
    let (context, field, expected, received) = validation_parts(err);

    assert_eq!(context, "Moment");
    assert_eq!(field, "user");
    assert_eq!(expected, "User");
    assert_eq!(received, "string");
}

#[test]
fn test_list_where_scalar_declared_fails() {
    let materializer = Materializer::new();

    materializer.materialize(&json!({"usfm": "JHN.3.16"}), "Votd").unwrap();
    let err = materializer
        .materialize(&json!({"usfm": ["JHN.3.16"]}), "Votd")
        .unwrap_err();

    let (_, field, expected, received) = validation_parts(err);
    assert_eq!(field, "usfm");
    assert_eq!(expected, "string");
    assert_eq!(received, "list");
}

#[test]
fn test_null_in_declared_field_is_accepted() {
    let materializer = Materializer::new();

    let first = materializer
        .materialize(
            &json!({"day": 1, "usfm": ["JHN.3.16"], "image_id": "abc"}),
            "Votd",
        )
        .unwrap();
    let second = materializer
        .materialize(
            &json!({"day": 2, "usfm": ["GEN.1.1"], "image_id": null}),
            "Votd",
        )
        .unwrap();

    assert!(record(&first).same_type(record(&second)));
    assert!(second["image_id"].is_null());
    assert_eq!(materializer.cache().len(), 1);

    let err = materializer
        .materialize(&json!({"day": 5, "image_id": "x"}), "Votd")
        .unwrap_err();
    let (context, field, _, received) = validation_parts(err);
    assert_eq!(context, "Votd");
    assert_eq!(field, "usfm");
    assert_eq!(received, "missing");
}

#[test]
fn test_failed_validation_keeps_definition() {
    let materializer = Materializer::new();

    materializer
        .materialize(&json!({"day": 1, "usfm": ["JHN.3.16"]}), "Votd")
        .unwrap();
    assert!(materializer.materialize(&json!({"day": 5}), "Votd").is_err());

    assert_eq!(materializer.cache().len(), 1);
    let votd = materializer.cache().get("Votd").unwrap();
    assert!(votd.has_field("usfm"));
}

#[test]
fn test_scalar_kind_mismatch_is_coerced() {
    let materializer = Materializer::new();

    materializer.materialize(&json!({"version_id": 1}), "Verse").unwrap();
    let model = materializer
        .materialize(&json!({"version_id": "1"}), "Verse")
        .unwrap();

    assert_eq!(model["version_id"].as_str(), Some("1"));
}

#[test]
fn test_list_with_differing_shapes_merges_optional_fields() {
    let materializer = Materializer::new();
    let value = json!([
        {"id": 1, "note": "a"},
        {"id": 2}
    ]);

    let model = materializer.materialize(&value, "Moments").unwrap();
    let items = model.as_list().unwrap();

    assert!(record(&items[0]).same_type(record(&items[1])));
    assert!(!record(&items[1]).contains("note"));
    assert_eq!(items[1].to_value(), json!({"id": 2}));
    assert!(items[1]["note"].is_null());
}

#[test]
fn test_mixed_list_materializes_elements_individually() {
    let materializer = Materializer::new();

    let model = materializer
        .materialize(&json!([1, {"a": 1}, "x"]), "Values")
        .unwrap();

    assert_eq!(model[0], Model::Scalar(json!(1)));
    assert_eq!(record(&model[1]).type_name(), "Value");
    assert_eq!(model[2].as_str(), Some("x"));
}

#[test]
fn test_parent_and_child_share_context() {
    let materializer = Materializer::new();
    let value = json!({"node": {"node": {"value": 1}}});

    let root = materializer.materialize(&value, "Node").unwrap();

    assert_eq!(root["node"]["node"]["value"].as_i64(), Some(1));
    assert!(record(&root).same_type(record(&root["node"])));
    assert!(!record(&root).same_type(record(&root["node"]["node"])));
    assert_eq!(materializer.cache().definitions("Node").len(), 2);
}

#[test]
fn test_concurrent_materialization() {
    let materializer = Materializer::new();
    let value = json!({"id": 1, "user": {"id": 2}, "references": [{"usfm": ["JHN.3.16"]}]});

    let models: Vec<Model> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| materializer.materialize(&value, "Moment").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = record(&models[0]);
    for model in &models {
        assert!(record(model).same_type(first));
    }
    assert_eq!(materializer.cache().definitions("Moment").len(), 1);
    assert_eq!(materializer.cache().len(), 3);
}

#[test]
fn test_export_include_exclude() {
    let materializer = Materializer::new();
    let model = materializer
        .materialize(&json!({"id": 1, "title": "a", "note": "b"}), "Moment")
        .unwrap();

    let included = model.to_value_with(&ExportOptions::new().include(["id", "title"]));
    assert_eq!(included, json!({"id": 1, "title": "a"}));

    let excluded = model.to_value_with(&ExportOptions::new().exclude(["note"]));
    assert_eq!(excluded, json!({"id": 1, "title": "a"}));

    let both = model.to_value_with(&ExportOptions::new().include(["id", "note"]).exclude(["note"]));
    assert_eq!(both, json!({"id": 1}));
}

#[test]
fn test_export_applies_to_list_elements() {
    let materializer = Materializer::new();
    let model = materializer
        .materialize(&json!([{"id": 1, "note": "a"}, {"id": 2, "note": "b"}]), "Moments")
        .unwrap();

    let exported = model.to_value_with(&ExportOptions::new().exclude(["note"]));
    assert_eq!(exported, json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn test_export_filters_only_top_level() {
    let materializer = Materializer::new();
    let model = materializer
        .materialize(&json!({"id": 1, "user": {"id": 2, "name": "ruth"}}), "Moment")
        .unwrap();

    let exported = model.to_value_with(&ExportOptions::new().exclude(["name"]));
    assert_eq!(exported, json!({"id": 1, "user": {"id": 2, "name": "ruth"}}));
}

#[test]
fn test_accessors() {
    let materializer = Materializer::new();
    let model = materializer
        .materialize(
            &json!({
                "id": 12,
                "score": 2.5,
                "public": false,
                "created_dt": "2024-01-15T10:30:00Z",
                "updated_dt": "2024-01-15 10:30:00",
                "title": "Grace"
            }),
            "Moment",
        )
        .unwrap();

    assert_eq!(model["id"].as_i64(), Some(12));
    assert_eq!(model["id"].as_u64(), Some(12));
    assert_eq!(model["score"].as_f64(), Some(2.5));
    assert_eq!(model["public"].as_bool(), Some(false));
    assert_eq!(model["title"].as_str(), Some("Grace"));
    assert_eq!(
        model["created_dt"].as_datetime().unwrap().to_rfc3339(),
        "2024-01-15T10:30:00+00:00"
    );
    assert_eq!(
        model["updated_dt"].as_datetime(),
        model["created_dt"].as_datetime()
    );
    assert!(model["title"].as_datetime().is_none());
    assert!(model["missing"].is_null());
    assert!(model.get("missing").is_none());
    assert_eq!(model.len(), 6);
}

#[test]
fn test_record_debug_uses_type_name() {
    let materializer = Materializer::new();
    let model = materializer.materialize(&json!({"id": 1}), "Badge").unwrap();

    let debug = format!("{:?}", record(&model));
    assert!(debug.starts_with("Badge {"));
    assert!(debug.contains("id"));
}

#[test]
fn test_to_json_pretty() {
    let materializer = Materializer::new();
    let model = materializer.materialize(&json!({"id": 1}), "Badge").unwrap();

    assert_eq!(model.to_json(), r#"{"id":1}"#);
    assert_eq!(record(&model).to_json_pretty(), "{\n  \"id\": 1\n}");
}

#[test]
fn test_cache_clear_and_detached() {
    let materializer = Materializer::new();
    let model = materializer.materialize(&json!({"id": 1}), "Badge").unwrap();

    let detached = materializer.detached();
    assert!(detached.cache().is_empty());

    materializer.cache().clear();
    assert!(materializer.cache().is_empty());
    assert_eq!(record(&model).type_name(), "Badge");
}

#[test]
fn test_infer_does_not_touch_cache() {
    let materializer = Materializer::new();

    let descriptor = materializer.infer(&json!({"id": 1}), "Badge");
    assert!(descriptor.as_record().is_some());
    assert!(materializer.cache().is_empty());
}

#[test]
#[tracing_test::traced_test]
fn test_type_creation_is_logged() {
    let materializer = Materializer::new();
    materializer.materialize(&json!({"id": 1}), "Badge").unwrap();

    assert!(logs_contain("Created record type"));
}

#[test]
#[tracing_test::traced_test]
fn test_scalar_coercion_is_logged() {
    let materializer = Materializer::new();
    materializer.materialize(&json!({"id": 1}), "Badge").unwrap();
    materializer.materialize(&json!({"id": "1"}), "Badge").unwrap();

    assert!(logs_contain("Coercing scalar of a different kind"));
}
