use chrono::{FixedOffset, TimeZone};
use typebridge_core::{
    render_host, to_host, to_host_as, Data, Date, Dictionary, ExceptionMode, HostObject,
    HostValue, Kind, Number, TranscodeError, Type, TypeConversion, HOST_ERROR_MESSAGE,
};

/// Helper: convert with internal errors and expect success.
fn outbound(value: &Type) -> HostValue {
    to_host(value, ExceptionMode::Internal).expect("conversion failed")
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn outbound_null() {
    assert_eq!(outbound(&Type::Null), HostValue::Null);
}

#[test]
fn outbound_boolean_subtype() {
    assert_eq!(outbound(&Type::from(true)), HostValue::Boolean(true));
}

#[test]
fn outbound_integer_widens_to_double() {
    assert_eq!(outbound(&Type::from(42i64)), HostValue::Number(42.0));
    assert_eq!(outbound(&Type::from(-7i64)), HostValue::Number(-7.0));
}

#[test]
fn outbound_float() {
    assert_eq!(outbound(&Type::from(3.25)), HostValue::Number(3.25));
}

#[test]
fn outbound_string() {
    assert_eq!(outbound(&Type::from("line1\nline2")), HostValue::from("line1\nline2"));
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn outbound_date_epoch_millis() {
    let date = Date::from_millis(1_700_000_000_000.0).unwrap();
    assert_eq!(outbound(&Type::Date(date)), HostValue::Date(1_700_000_000_000.0));
}

#[test]
fn outbound_date_with_offset_normalizes_to_utc_instant() {
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let local = offset.with_ymd_and_hms(1970, 1, 1, 5, 30, 0).unwrap();
    assert_eq!(outbound(&Type::Date(Date::new(local))), HostValue::Date(0.0));
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn outbound_array_in_index_order() {
    let value = Type::Array(vec![Type::from("a"), Type::from(1i64), Type::Null]);
    assert_eq!(
        outbound(&value),
        HostValue::Array(vec![HostValue::from("a"), HostValue::Number(1.0), HostValue::Null])
    );
}

#[test]
fn outbound_dictionary_preserves_insertion_order() {
    let mut dictionary = Dictionary::new();
    dictionary.set("x", 1i64);
    dictionary.set("y", 2i64);
    dictionary.set("z", 3i64);
    let object = to_host_as::<HostObject>(&Type::Dictionary(dictionary), ExceptionMode::Internal)
        .unwrap();
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["x", "y", "z"]);
}

#[test]
fn outbound_non_string_keys_are_coerced() {
    let mut dictionary = Dictionary::new();
    dictionary.set(1i64, "one");
    dictionary.set(2.5, "two and a half");
    dictionary.set(true, "yes");
    dictionary.set(Type::Null, "nothing");
    let host = outbound(&Type::Dictionary(dictionary));
    assert_eq!(
        render_host(&host),
        r#"{"1":"one","2.5":"two and a half","true":"yes","null":"nothing"}"#
    );
}

#[test]
fn outbound_colliding_keys_keep_first_position_last_value() {
    let mut dictionary = Dictionary::new();
    dictionary.set(1i64, "integer");
    dictionary.set("other", 0i64);
    dictionary.set("1", "string");
    let host = outbound(&Type::Dictionary(dictionary));
    assert_eq!(render_host(&host), r#"{"1":"string","other":0}"#);
}

#[test]
fn outbound_nested_structure() {
    let mut inner = Dictionary::new();
    inner.set("ok", true);
    let mut outer = Dictionary::new();
    outer.set("list", vec![Type::from(1i64), Type::Dictionary(inner)]);
    let host = outbound(&Type::Dictionary(outer));
    assert_eq!(render_host(&host), r#"{"list":[1,{"ok":true}]}"#);
}

// ============================================================================
// Unsupported kinds
// ============================================================================

#[test]
fn outbound_data_fails_internal_mode() {
    let err = to_host(&Type::Data(Data::from(vec![0xde, 0xad])), ExceptionMode::Internal)
        .unwrap_err();
    assert_eq!(
        err,
        TranscodeError::TypeConversion(TypeConversion::UnsupportedInternal(Kind::Data))
    );
}

#[test]
fn outbound_data_fails_host_mode() {
    let err = to_host(&Type::Data(Data::default()), ExceptionMode::HostNative).unwrap_err();
    assert!(err.is_host());
    assert_eq!(err.to_string(), HOST_ERROR_MESSAGE);
    assert_eq!(err.condition(), &TypeConversion::UnsupportedInternal(Kind::Data));
}

#[test]
fn outbound_data_nested_in_dictionary_value_fails() {
    let mut dictionary = Dictionary::new();
    dictionary.set("fine", 1i64);
    dictionary.set("blob", Data::from(vec![1u8]));
    assert!(to_host(&Type::Dictionary(dictionary), ExceptionMode::Internal).is_err());
}

#[test]
fn outbound_data_as_dictionary_key_fails() {
    let mut dictionary = Dictionary::new();
    dictionary.set(Data::from(vec![1u8]), "value");
    let err = to_host(&Type::Dictionary(dictionary), ExceptionMode::HostNative).unwrap_err();
    assert_eq!(err.condition(), &TypeConversion::UnsupportedInternal(Kind::Data));
}

#[test]
fn outbound_data_in_array_fails_both_modes() {
    let value = Type::Array(vec![Type::Null, Type::Data(Data::default())]);
    let internal = to_host(&value, ExceptionMode::Internal).unwrap_err();
    let host = to_host(&value, ExceptionMode::HostNative).unwrap_err();
    assert_eq!(internal.condition(), host.condition());
    assert!(!internal.is_host());
    assert!(host.is_host());
}

// ============================================================================
// Typed entry point
// ============================================================================

#[test]
fn outbound_as_matching_type() {
    let n: f64 = to_host_as(&Type::Number(Number::Integer(9)), ExceptionMode::Internal).unwrap();
    assert_eq!(n, 9.0);
    let b: bool = to_host_as(&Type::from(false), ExceptionMode::Internal).unwrap();
    assert!(!b);
}

#[test]
fn outbound_as_mismatched_type_fails() {
    let err = to_host_as::<String>(&Type::from(1i64), ExceptionMode::Internal).unwrap_err();
    assert_eq!(
        err.condition(),
        &TypeConversion::Mismatch {
            expected: "string",
            found: "number"
        }
    );
}
