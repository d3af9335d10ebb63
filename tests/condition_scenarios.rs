use pathcond::{BoolFunction, Condition, ConditionFactory, Error, Function};
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn library() -> Vec<Value> {
    vec![
        json!({ "title": "T", "pages": 120, "author": { "name": "Ann", "tags": ["a", "b"] } }),
        json!({ "title": "X", "pages": 480, "author": { "name": "X", "tags": [] } }),
        json!({ "title": "Y", "pages": 300, "author": { "name": "Bo", "tags": ["c"] } }),
        json!({ "title": "Z", "pages": 0, "author": { "name": null, "tags": ["a", "a", "d"] } }),
    ]
}

#[test]
fn scenario_unpack_versus_direct() {
    init_tracing();
    let factory = ConditionFactory::new();
    let book = json!({ "title": "T", "author": { "tags": ["a", "b"] } });

    let any_of = factory
        .property_has_any_of_values(vec![json!("b"), json!("c")], &["author", "tags"])
        .unwrap();
    assert!(any_of.apply(&book).unwrap());

    let whole_array = factory.property_has_value("a", &["author", "tags"]).unwrap();
    assert!(!whole_array.apply(&book).unwrap());
}

#[test]
fn scenario_properties_equal_across_paths() {
    let factory = ConditionFactory::new();
    let book = json!({ "title": "X", "author": { "name": "X" } });
    let equal = factory.properties_equal(&["author", "name"], &["title"]).unwrap();
    assert!(equal.apply(&book).unwrap());

    let other = json!({ "title": "Y", "author": { "name": "X" } });
    assert!(!equal.apply(&other).unwrap());
    let not_equal = factory.properties_not_equal(&["author", "name"], &["title"]).unwrap();
    assert!(not_equal.apply(&other).unwrap());
}

#[test]
fn size_predicate_for_zero_one_and_many() {
    let factory = ConditionFactory::new();
    let cases = [(json!([]), 0), (json!(["a"]), 1), (json!(["a", "b", "c", "d"]), 4)];
    for (tags, expected) in cases {
        let entity = json!({ "tags": tags });
        for n in [0, 1, 4] {
            let tree = factory.property_has_size(n, &["tags"]).unwrap();
            assert_eq!(tree.apply(&entity).unwrap(), n == expected, "size {n} of {entity}");
        }
    }
}

#[test]
fn all_values_present_lets_one_element_satisfy_repeated_values() {
    let factory = ConditionFactory::new();
    let entity = json!({ "author": { "tags": ["a", "b"] } });
    let check = |values: Vec<Value>| {
        factory
            .all_values_present_in_member_list_properties(values, &["author", "tags"])
            .unwrap()
            .apply(&entity)
            .unwrap()
    };
    assert!(check(vec![json!("a"), json!("b")]));
    assert!(check(vec![json!("a"), json!("a")]));
    assert!(check(vec![json!("b")]));
    assert!(!check(vec![json!("a"), json!("c")]));
}

#[test]
fn all_values_present_over_nested_relations() {
    let factory = ConditionFactory::new();
    let publisher = json!({
        "books": [
            { "tags": ["a"] },
            { "tags": ["b", "c"] }
        ]
    });
    let tree = factory
        .all_values_present_in_member_list_properties(vec![json!("a"), json!("c")], &["books", "tags"])
        .unwrap();
    assert!(tree.apply(&publisher).unwrap());
}

#[test]
fn all_values_present_scales_with_many_values_over_long_lists() {
    let factory = ConditionFactory::new();
    let tags: Vec<Value> = (0..10).map(|i| json!(format!("t{i}"))).collect();
    let entity = json!({ "tags": tags });
    let wanted = |names: &[&str]| -> Vec<Value> { names.iter().map(|name| json!(name)).collect() };

    let present = wanted(&["t0", "t1", "t2", "t3", "t4", "t5"]);
    let absent = wanted(&["t0", "t1", "t2", "t3", "t4", "t5", "t10"]);

    let tree = factory
        .all_values_present_in_member_list_properties(present.clone(), &["tags"])
        .unwrap();
    assert!(tree.apply(&entity).unwrap());
    let tree = factory
        .all_values_present_in_member_list_properties(absent.clone(), &["tags"])
        .unwrap();
    assert!(!tree.apply(&entity).unwrap());

    let condition = Condition::ArrayContainsAllValues;
    let tree = condition.transform(Some(&["tags"][..]), &Value::Array(present)).unwrap();
    assert!(tree.apply(&entity).unwrap());
    let tree = condition.transform(Some(&["tags"][..]), &Value::Array(absent)).unwrap();
    assert!(!tree.apply(&entity).unwrap());
}

fn every_predicate(factory: &ConditionFactory) -> Vec<(BoolFunction, BoolFunction)> {
    let tags = ["author", "tags"];
    let name = ["author", "name"];
    vec![
        (
            factory.property_has_value("T", &["title"]).unwrap(),
            factory.property_has_not_value("T", &["title"]).unwrap(),
        ),
        (
            factory.property_has_any_of_values(vec![json!("a"), json!("c")], &tags).unwrap(),
            factory.property_has_not_any_of_values(vec![json!("a"), json!("c")], &tags).unwrap(),
        ),
        (
            factory.property_has_size(2, &tags).unwrap(),
            factory.property_has_not_size(2, &tags).unwrap(),
        ),
        (
            factory.property_between_values_inclusive(100, 300, &["pages"]).unwrap(),
            factory.property_not_between_values_inclusive(100, 300, &["pages"]).unwrap(),
        ),
        (
            factory.property_is_null(&name).unwrap(),
            factory.property_is_not_null(&name).unwrap(),
        ),
        (
            factory.property_has_string_as_member("a", &tags).unwrap(),
            factory.property_has_not_string_as_member("a", &tags).unwrap(),
        ),
        (
            factory.property_has_string_containing_case_insensitive_value("A", &tags).unwrap(),
            factory.property_has_not_string_containing_case_insensitive_value("A", &tags).unwrap(),
        ),
        (
            factory.properties_equal(&name, &["title"]).unwrap(),
            factory.properties_not_equal(&name, &["title"]).unwrap(),
        ),
        (
            factory.property_starts_with_case_insensitive("t", &["title"]).unwrap(),
            factory.property_not_starts_with_case_insensitive("t", &["title"]).unwrap(),
        ),
        (
            factory.property_ends_with_case_insensitive("y", &["title"]).unwrap(),
            factory.property_not_ends_with_case_insensitive("y", &["title"]).unwrap(),
        ),
        (
            factory.value_greater_than(300, &["pages"]).unwrap(),
            factory.not(factory.value_greater_than(300, &["pages"]).unwrap()),
        ),
        (
            factory
                .all_values_present_in_member_list_properties(vec![json!("a"), json!("d")], &tags)
                .unwrap(),
            factory.not(
                factory
                    .all_values_present_in_member_list_properties(vec![json!("a"), json!("d")], &tags)
                    .unwrap(),
            ),
        ),
    ]
}

#[test]
fn negation_law_holds_for_every_predicate() {
    let factory = ConditionFactory::new();
    for (positive, negative) in every_predicate(&factory) {
        for book in library() {
            let p = positive.apply(&book).unwrap();
            let n = negative.apply(&book).unwrap();
            assert_eq!(n, !p, "{positive:?} on {book}");
        }
    }
}

#[test]
fn negation_of_unpacked_match_is_not_exists() {
    let factory = ConditionFactory::new();
    let book = json!({ "author": { "tags": ["a", "b"] } });
    let has_not_a = factory.property_has_not_any_of_values(vec![json!("a")], &["author", "tags"]).unwrap();
    // "b" is not "a", but the negation must still fail because "a" is present
    assert!(!has_not_a.apply(&book).unwrap());
}

#[test]
fn composed_conditions() {
    let factory = ConditionFactory::new();
    let tree = factory
        .all_conditions_apply(vec![
            factory.property_has_any_of_values(vec![json!("a")], &["author", "tags"]).unwrap(),
            factory
                .any_condition_applies(vec![
                    factory.value_smaller_than(200, &["pages"]).unwrap(),
                    factory.property_is_null(&["author", "name"]).unwrap(),
                ])
                .unwrap(),
        ])
        .unwrap();
    let books = library();
    let titles: Vec<&str> = books
        .iter()
        .filter(|book| tree.apply(book).unwrap())
        .filter_map(|book| book["title"].as_str())
        .collect();
    assert_eq!(titles, ["Z"]);
}

#[test]
fn conditions_from_operator_tokens() {
    let book = &library()[0];
    let condition: Condition = "STARTS_WITH_CASE_INSENSITIVE".parse().unwrap();
    let tree = condition.transform(Some(&["author", "name"][..]), &json!("aN")).unwrap();
    assert!(tree.apply(book).unwrap());

    let err = condition.transform(Some(&["author", "name"][..]), &json!(42)).unwrap_err();
    assert!(matches!(err, Error::ValueValidation { .. }));
}

#[test]
fn missing_attribute_surfaces_as_resolution_failure() {
    let factory = ConditionFactory::new();
    let tree = factory.property_has_value("x", &["author", "email"]).unwrap();
    let err = tree.apply(&library()[0]).unwrap_err();
    assert!(matches!(err, Error::PathResolution { .. }));
    let negated = factory.property_has_not_value("x", &["author", "email"]).unwrap();
    assert!(negated.apply(&library()[0]).is_err());
}

#[test]
fn trees_evaluate_concurrently() {
    let factory = ConditionFactory::new();
    let tree: Arc<BoolFunction> = Arc::new(
        factory
            .all_values_present_in_member_list_properties(vec![json!("a"), json!("b")], &["author", "tags"])
            .unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || library().iter().filter(|book| tree.apply(book).unwrap()).count())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
