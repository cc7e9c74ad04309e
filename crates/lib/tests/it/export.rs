//! Export and import integration tests

use aliasdict::{
    AliasDict, Key,
    export::{ExportError, ExportFilter, ExportFormat, FilterOptions, export, import},
};
use serde_json::{Value, json};

use crate::helpers::{dict_from, dict_on, new_dict};

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("Export should be valid JSON")
}

fn sample() -> AliasDict<Value> {
    let mut x = dict_from([
        (Key::from(0), json!(1)),
        (Key::from(1), json!(3)),
        (Key::from("a"), json!(4)),
        (Key::from("what?"), json!(5)),
    ]);
    x.add_alias("a", "alpha").unwrap();
    x.set_direct("note", json!("kept"));
    x
}

#[test]
fn test_round_trip_rebuilds_an_equal_dict() {
    let x = sample();
    let text = x.to_json(ExportFormat::Full, &ExportFilter::All).unwrap();
    let y: AliasDict<Value> = import(&text).unwrap();

    assert_eq!(x, y);
    assert_eq!(y["alpha"], json!(4));
    assert_eq!(y["what_"], json!(5));
    assert_eq!(y["_False"], json!(1));
    assert_eq!(y.get_direct("note").unwrap(), &json!("kept"));
}

#[test]
fn test_changed_copy_is_not_equal() {
    let x = sample();
    let text = x.to_json(ExportFormat::Full, &ExportFilter::All).unwrap();
    let mut y: AliasDict<Value> = import(&text).unwrap();
    y.set("b", json!(6)).unwrap();
    assert_ne!(x, y);
}

#[test]
fn test_round_trip_keeps_key_types() {
    let mut x = new_dict::<i32>();
    x.set(2.5, 1).unwrap();
    x.set(Key::tuple([Key::from(1), Key::from("x")]), 2).unwrap();
    assert!(x.set("2.5", 3).unwrap_err().is_conflict());

    let text = export(&x, ExportFormat::Full, &ExportFilter::All).unwrap();
    let y: AliasDict<i32> = import(&text).unwrap();
    assert_eq!(y.keys().collect::<Vec<_>>(), x.keys().collect::<Vec<_>>());
    assert_eq!(y[2.5], 1);
    assert_eq!(y["_1___x__"], 2);
}

#[test]
fn test_round_trip_after_a_derived_alias_moves() {
    let mut x = new_dict::<i32>();
    x.set("a b", 1).unwrap();
    x.set("x", 2).unwrap();
    x.delete_alias("a_b").unwrap();
    x.add_alias("x", "a_b").unwrap();

    let text = export(&x, ExportFormat::Full, &ExportFilter::All).unwrap();
    let y: AliasDict<i32> = import(&text).unwrap();

    assert_eq!(x, y);
    assert_eq!(y["a_b"], 2);
    assert_eq!(y.canonical_key("a_b").unwrap(), &Key::from("x"));
    assert_eq!(y.aliases_of("a b").unwrap(), x.aliases_of("a b").unwrap());
    assert_eq!(y.aliases_of("x").unwrap(), x.aliases_of("x").unwrap());
}

#[test]
fn test_round_trip_keeps_deleted_derived_aliases_deleted() {
    let mut x = new_dict::<i32>();
    x.set(1, 10).unwrap();
    x.delete_alias("_True").unwrap();
    x.add_alias(1, "one").unwrap();

    let text = export(&x, ExportFormat::Full, &ExportFilter::All).unwrap();
    let y: AliasDict<i32> = import(&text).unwrap();

    assert_eq!(x, y);
    assert_eq!(y.aliases_of(1).unwrap(), x.aliases_of(1).unwrap());
    assert!(y.canonical_key("_True").is_err());
    assert_eq!(y["one"], 10);
}

#[test]
fn test_filters_apply_to_direct_attributes() {
    let mut x = sample();
    x.set_direct("store", json!("memory"));

    let text = x
        .to_json(ExportFormat::Full, &ExportFilter::ignore("store"))
        .unwrap();
    assert_eq!(parse(&text)["direct"], json!({"note": "kept"}));

    let y: AliasDict<Value> = import(&text).unwrap();
    assert!(!y.is_direct("store"));
    assert_eq!(y.get_direct("note").unwrap(), &json!("kept"));
    assert_eq!(y.len(), x.len());
}

#[test]
fn test_data_only_is_a_plain_object() {
    let text = sample()
        .to_json(ExportFormat::DataOnly, &ExportFilter::All)
        .unwrap();
    assert_eq!(
        parse(&text),
        json!({"0": 1, "1": 3, "a": 4, "what?": 5})
    );

    let back: AliasDict<Value> = import(&text).unwrap();
    assert_eq!(back["what_"], json!(5));
    // text keys come back as text; 0 only reaches "0" through the read fallback
    assert!(back.canonical_key(0).is_err());
    assert_eq!(back.canonical_key("_0").unwrap(), &Key::from("0"));
    assert_eq!(back[0], json!(1));
}

#[test]
fn test_filters_select_items() {
    let x = sample();
    let keys = |filter: ExportFilter| -> Vec<String> {
        let text = x.to_json(ExportFormat::DataOnly, &filter).unwrap();
        parse(&text)
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default()
    };

    let mut all = keys(ExportFilter::All);
    all.sort();
    assert_eq!(all, vec!["0", "1", "a", "what?"]);

    let mut ignored = keys(ExportFilter::ignore(["alpha", "_True"]));
    ignored.sort();
    assert_eq!(ignored, vec!["0", "what?"]);

    let exclude = FilterOptions::default().exclude(["alpha", "what?"]);
    let mut excluded = keys(ExportFilter::try_from(exclude).unwrap());
    excluded.sort();
    assert_eq!(excluded, vec!["0", "1"]);

    let mut only = keys(ExportFilter::only(["what_", "missing"]));
    only.sort();
    assert_eq!(only, vec!["what?"]);
}

#[test]
fn test_filter_options_are_exclusive() {
    let options = FilterOptions {
        ignore: Some(vec![Key::from("a")]),
        exclude: Some(vec![Key::from("b")]),
        only: Some(vec![Key::from("c")]),
    };
    let err = ExportFilter::try_from(options).unwrap_err();
    assert!(matches!(
        err,
        aliasdict::Error::Export(ExportError::InvalidFilterCombination { ref options })
            if options == &["ignore", "exclude", "only"]
    ));
}

#[test]
fn test_recorded_mode_is_used_on_import() {
    let scope = aliasdict::ExpansionScope::new();
    let mut x = dict_on::<i32>(&scope);
    {
        let _plain = scope.enter(false);
        x.set("a b", 1).unwrap();
        let text = x.to_json(ExportFormat::Full, &ExportFilter::All).unwrap();
        assert_eq!(parse(&text)["expand"], json!(false));

        let y: AliasDict<i32> = import(&text).unwrap();
        assert!(y.get("a_b").is_err());
    }
    assert!(scope.is_enabled());
}

#[test]
fn test_import_rejects_unknown_versions_and_bad_input() {
    let err = import::<i32>(r#"{"_v": "next", "expand": true, "data": []}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported export version \"next\"; only version 0 is supported"
    );

    let err = import::<i32>("not json").unwrap_err();
    assert!(err.is_serialization_error());
    assert_eq!(err.module(), "export");
}
