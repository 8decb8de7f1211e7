mod common;

use common::{attrs, CastSchema};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shapeshift::{Cast, Transformer};

fn transformer() -> Transformer<CastSchema> {
    Transformer::new(attrs(json!({"foo": "1234", "bar": null, "buzz": "1.2"})))
}

#[test]
fn test_returns_attributes_with_casting() {
    let t = transformer();
    assert_eq!(t.get("foo"), json!(1234));
    assert_eq!(t.get("bar"), Value::Null);
    assert_eq!(t.get("baz"), Value::Null);
    assert_eq!(t.get("buzz"), json!("1.2"));
}

#[test]
fn test_all_values_are_cast() {
    assert_eq!(
        Value::Object(transformer().all()),
        json!({"foo": 1234, "bar": null, "buzz": "1.2"})
    );
}

#[test]
fn test_raw_source_is_untouched() {
    let t = transformer();
    assert_eq!(t.raw("foo"), json!("1234"));
    assert_eq!(t.source()["foo"], json!("1234"));
}

#[test]
fn test_casts_are_recomputed_per_read() {
    let t = transformer();
    assert_eq!(t.get("foo"), t.get("foo"));
    assert_eq!(t.raw("foo"), json!("1234"));
}

#[test]
fn test_json_and_float_casts() {
    let t = Transformer::<CastSchema>::new(attrs(json!({
        "bar": "{\"nested\": [1, 2]}",
        "baz": "2.50",
    })));
    assert_eq!(t.get("bar"), json!({"nested": [1, 2]}));
    assert_eq!(t.get("baz"), json!(2.5));
}

#[test]
fn test_malformed_input_is_coerced() {
    let t = Transformer::<CastSchema>::new(attrs(json!({
        "foo": "twelve",
        "bar": "{oops",
        "baz": true,
    })));
    assert_eq!(t.get("foo"), json!(0));
    assert_eq!(t.get("bar"), Value::Null);
    assert_eq!(t.get("baz"), json!(1.0));
}

#[test]
fn test_cast_tags_parse_from_strings() {
    assert_eq!("Integer".parse::<Cast>().unwrap(), Cast::Int);
    assert_eq!("unknown".parse::<Cast>().unwrap(), Cast::Unrecognized);
}
