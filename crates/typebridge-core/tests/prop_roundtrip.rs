/// Property-based roundtrip tests.
///
/// Uses `proptest` to generate random internal value trees (without `data`) and random host
/// value trees, then checks the conversion laws:
///
/// - internal → host → internal returns the original, except integral floats come back as
///   integers
/// - host → internal succeeds for every supported host kind
/// - dictionary key order survives the trip to host objects
/// - any tree containing `data` fails outbound under both exception modes
///
/// Integers are kept within ±2^53 so that widening to a double is exact.
use proptest::prelude::*;
use typebridge_core::{
    to_host, to_internal, Data, Date, Dictionary, ExceptionMode, HostObject, HostValue, Number,
    Type,
};

// ============================================================================
// Strategies
// ============================================================================

const SAFE_INTEGER: i64 = 9_007_199_254_740_991;

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap()
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        Just(String::new()),
        Just("caf\u{e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
        Just("line1\nline2".to_string()),
    ]
}

/// Floats with a fractional part, so they keep their subtype through a roundtrip.
fn arb_fractional() -> impl Strategy<Value = f64> {
    (-1_000_000_000i64..1_000_000_000i64, 1u32..5u32).prop_filter_map(
        "must have a fractional part",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            (f.fract() != 0.0).then_some(f)
        },
    )
}

fn arb_date() -> impl Strategy<Value = Date> {
    (-8_640_000_000_000_000i64..8_640_000_000_000_000i64)
        .prop_filter_map("date in range", |ms| Date::from_millis(ms as f64))
}

fn arb_internal_leaf() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Null),
        any::<bool>().prop_map(Type::from),
        (-SAFE_INTEGER..=SAFE_INTEGER).prop_map(Type::from),
        arb_fractional().prop_map(Type::from),
        arb_string().prop_map(Type::from),
        arb_date().prop_map(Type::from),
    ]
}

fn arb_internal() -> impl Strategy<Value = Type> {
    arb_internal_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Type::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|entries| {
                Type::Dictionary(entries.into_iter().collect::<Dictionary>())
            }),
        ]
    })
}

fn arb_host_leaf() -> impl Strategy<Value = HostValue> {
    prop_oneof![
        Just(HostValue::Undefined),
        Just(HostValue::Null),
        any::<bool>().prop_map(HostValue::Boolean),
        (-SAFE_INTEGER..=SAFE_INTEGER).prop_map(|n| HostValue::Number(n as f64)),
        arb_fractional().prop_map(HostValue::Number),
        arb_string().prop_map(HostValue::String),
        (-1_000_000_000_000i64..4_000_000_000_000i64).prop_map(|ms| HostValue::Date(ms as f64)),
    ]
}

fn arb_host() -> impl Strategy<Value = HostValue> {
    arb_host_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(HostValue::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|entries| HostValue::Object(entries.into_iter().collect::<HostObject>())),
        ]
    })
}

/// Replace every integral float by the integer a roundtrip would produce.
fn normalize(value: Type) -> Type {
    match value {
        Type::Number(Number::Float(f)) => Type::Number(Number::infer(f)),
        Type::Array(items) => Type::Array(items.into_iter().map(normalize).collect()),
        Type::Dictionary(dictionary) => Type::Dictionary(
            dictionary
                .into_iter()
                .map(|(k, v)| (normalize(k), normalize(v)))
                .collect(),
        ),
        other => other,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn internal_roundtrip(value in arb_internal()) {
        let host = to_host(&value, ExceptionMode::Internal).unwrap();
        let back = to_internal(&host, ExceptionMode::Internal).unwrap();
        prop_assert_eq!(back, Some(normalize(value)));
    }

    #[test]
    fn host_conversion_never_fails_for_supported_kinds(value in arb_host()) {
        let converted = to_internal(&value, ExceptionMode::Internal);
        prop_assert!(converted.is_ok());
        prop_assert_eq!(converted.unwrap().is_none(), value.is_undefined());
    }

    #[test]
    fn host_to_internal_is_stable_after_one_trip(value in arb_host()) {
        // host → internal → host → internal reaches a fixed point after the first trip.
        if let Some(first) = to_internal(&value, ExceptionMode::Internal).unwrap() {
            let host = to_host(&first, ExceptionMode::Internal).unwrap();
            let second = to_internal(&host, ExceptionMode::Internal).unwrap();
            prop_assert_eq!(second, Some(first));
        }
    }

    #[test]
    fn dictionary_key_order_survives(keys in prop::collection::vec(arb_key(), 0..10)) {
        let dictionary: Dictionary = keys.iter().map(|k| (k.as_str(), Type::Null)).collect();
        let expected: Vec<String> = dictionary
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        match to_host(&Type::Dictionary(dictionary), ExceptionMode::Internal).unwrap() {
            HostValue::Object(object) => {
                let actual: Vec<String> = object.keys().map(str::to_string).collect();
                prop_assert_eq!(actual, expected);
            }
            other => prop_assert!(false, "expected object, got {:?}", other),
        }
    }

    #[test]
    fn data_anywhere_fails_in_both_modes(
        value in arb_internal(),
        bytes in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let tree = Type::Array(vec![value, Type::Data(Data::from(bytes))]);
        let internal = to_host(&tree, ExceptionMode::Internal).unwrap_err();
        let host = to_host(&tree, ExceptionMode::HostNative).unwrap_err();
        prop_assert_eq!(internal.condition(), host.condition());
        prop_assert!(!internal.is_host());
        prop_assert!(host.is_host());
    }
}
