use aliasdict::{AliasDict, Key, MemberAccess};
use serde_json::json;

use crate::helpers::{dict_from, new_dict};

#[test]
fn test_creation_from_pairs() {
    let dict: AliasDict<serde_json::Value> =
        dict_from([("total", json!(6)), ("usergroup", json!("Knights of Ni"))]);

    assert_eq!(dict.get_member("total").unwrap(), 6);
    assert_eq!(dict.get("total").unwrap(), 6);
    assert_eq!(dict.get_member("usergroup").unwrap(), "Knights of Ni");
    assert_eq!(dict.get("usergroup").unwrap(), "Knights of Ni");
}

#[test]
fn test_creation_with_from_pairs_uses_insertion_order() {
    let dict: AliasDict<&str> =
        AliasDict::from_pairs([("created", "today"), ("review", "tomorrow")]).unwrap();
    assert_eq!(
        dict.iter().collect::<Vec<_>>(),
        vec![
            (&Key::from("created"), &"today"),
            (&Key::from("review"), &"tomorrow")
        ]
    );
}

#[test]
fn test_creation_from_keys() {
    let keys = vec![Key::from("a"), Key::from(1), Key::from("what?")];
    let dict = AliasDict::from_keys(keys, "val").unwrap();

    assert_eq!(dict.get_member("a").unwrap(), &"val");
    assert_eq!(dict.get_member("_1").unwrap(), &"val");
    assert_eq!(dict.get_member("what_").unwrap(), &"val");
    assert_eq!(dict.len(), 3);
}

#[test]
fn test_creation_from_pairs_reports_conflicts() {
    let result: aliasdict::Result<AliasDict<&str>> =
        AliasDict::from_pairs([(Key::from(1), "First Entry"), (Key::from("1"), "space")]);
    let err = result.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        err.to_string(),
        "Alias '_1' is already bound to 1, cannot bind it to '1'"
    );
}

#[test]
fn test_missing_keys_raise_the_matching_errors() {
    let dict = new_dict::<i32>();
    let member = dict.get_member("a").unwrap_err();
    let item = dict.get("a").unwrap_err();

    assert_eq!(member.to_string(), "No member named 'a'");
    assert_eq!(item.to_string(), "Key not found: 'a'");
    assert!(member.is_not_found() && item.is_not_found());
}

#[test]
fn test_default_is_empty() {
    let dict: AliasDict = AliasDict::default();
    assert!(dict.is_empty());
    assert_eq!(dict.to_string(), "AliasDict");
}
