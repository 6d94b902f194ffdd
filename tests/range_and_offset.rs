use madcmd::MadError;
use madcmd::command::{format_offset, format_range, format_range_value};
use madcmd::value::Range;
use serde_json::json;

#[test]
fn single_element_range() {
    assert_eq!(format_range(Some(&Range::from("IP5"))), "range=IP5,");
    assert_eq!(format_range_value(&json!("IP5")).unwrap(), "range=IP5,");
}

#[test]
fn pair_range() {
    assert_eq!(format_range(Some(&Range::from(("IP1", "IP2")))), "range=IP1/IP2,");
    assert_eq!(format_range_value(&json!(["IP1", "IP2"])).unwrap(), "range=IP1/IP2,");
}

#[test]
fn mapping_range() {
    assert_eq!(format_range_value(&json!({"first": "A", "last": "B"})).unwrap(), "range=A/B,");
}

#[test]
fn no_range_is_empty() {
    assert_eq!(format_range(None), "");
    for absent in [json!(null), json!(""), json!([]), json!({})] {
        assert_eq!(format_range_value(&absent).unwrap(), "");
    }
}

#[test]
fn other_shapes_are_invalid_range_format() {
    for bad in [json!(5), json!(true), json!(["IP1"]), json!(["IP1", "IP2", "IP3"]), json!([1, 2]), json!({"first": "A"})] {
        let err = format_range_value(&bad).unwrap_err();
        assert!(matches!(err, MadError::InvalidRange(_)), "{bad} should be rejected");
        assert!(format!("{err}").contains("invalid range format"));
    }
}

#[test]
fn offset_fragment_is_quoted() {
    assert_eq!(format_offset(Some("MQ.12R5")), "offsetelem=\"MQ.12R5\",");
    assert_eq!(format_offset(Some("")), "");
    assert_eq!(format_offset(None), "");
}
