//! Property-based tests for parsing, rendering and ordering laws.

use proptest::prelude::*;
use std::cmp::Ordering;
use tokio_mediatype::{MainType, MediaType, Parameter};

fn arb_token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,12}"
}

fn arb_main_type() -> impl Strategy<Value = MainType> {
    prop_oneof![
        Just(MainType::Application),
        Just(MainType::Audio),
        Just(MainType::Font),
        Just(MainType::Text),
        Just(MainType::Video),
        "[a-wyz][a-z0-9]{0,8}".prop_map(|s| MainType::classify(&s)),
        "[xX]-[a-z0-9]{1,8}".prop_map(|s| MainType::classify(&s)),
    ]
}

fn arb_subtype() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9.+_-]{0,15}"
}

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_token(),
        any::<String>(),
        "[ -~]{0,20}",
        prop::collection::vec(any::<char>(), 0..10).prop_map(|c| c.into_iter().collect::<String>()),
    ]
}

fn arb_parameters() -> impl Strategy<Value = Vec<Parameter>> {
    prop::collection::vec((arb_token(), arb_value()), 0..5).prop_map(|pairs| {
        let mut seen: Vec<String> = Vec::new();
        pairs
            .into_iter()
            .filter(|(name, _)| {
                let lower = name.to_ascii_lowercase();
                if seen.contains(&lower) {
                    false
                } else {
                    seen.push(lower);
                    true
                }
            })
            .map(|(name, value)| Parameter::new(name, value))
            .collect()
    })
}

fn arb_media_type() -> impl Strategy<Value = MediaType> {
    (arb_main_type(), arb_subtype(), arb_parameters())
        .prop_map(|(main_type, subtype, params)| MediaType::with_parameters(main_type, subtype, params))
}

proptest! {
    #[test]
    fn prop_description_round_trip(media_type in arb_media_type()) {
        let parsed = MediaType::parse(media_type.description());
        prop_assert_eq!(parsed.as_ref(), Some(&media_type));
        prop_assert_eq!(parsed.map(|m| m.description().to_string()), Some(media_type.description().to_string()));
    }

    #[test]
    fn prop_parameter_value_round_trip(name in arb_token(), value in arb_value()) {
        let parameter = Parameter::new(name, value.clone());
        let parsed = Parameter::parse(parameter.description());
        prop_assert_eq!(parsed.map(|p| p.value().to_string()), Some(value));
    }

    #[test]
    fn prop_classify_is_total_and_stable(raw in any::<String>()) {
        let classified = MainType::classify(&raw);
        prop_assert_eq!(MainType::classify(&classified.to_string()), classified);
    }

    #[test]
    fn prop_parse_never_panics(raw in any::<String>()) {
        let _ = MediaType::parse(&raw);
    }

    #[test]
    fn prop_ordering_is_consistent(a in arb_media_type(), b in arb_media_type()) {
        let ab = a.cmp(&b);
        let ba = b.cmp(&a);
        prop_assert_eq!(ab, ba.reverse());
        prop_assert!(!(a < b && b < a));
        prop_assert_eq!(ab == Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn prop_equal_ignores_case(media_type in arb_media_type()) {
        // uppercasing would turn `\x0a` into the identity escape `\X`
        prop_assume!(!media_type.description().contains('\\'));
        let shouted = MediaType::parse(&media_type.description().to_ascii_uppercase());
        if let Some(shouted) = shouted {
            prop_assert_eq!(shouted.cmp(&media_type), Ordering::Equal);
        }
    }

    #[test]
    fn prop_set_then_get(mut media_type in arb_media_type(), name in arb_token(), value in arb_value()) {
        media_type.set_parameter(&name.to_ascii_uppercase(), value.clone());
        prop_assert_eq!(media_type.parameter_value(&name.to_ascii_lowercase()), Some(value.as_str()));
        let reparsed = MediaType::parse(media_type.description());
        prop_assert_eq!(reparsed.as_ref(), Some(&media_type));

        media_type.remove_parameter(&name);
        prop_assert_eq!(media_type.parameter_value(&name), None);
    }
}
