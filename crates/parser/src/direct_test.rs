//! Direct encode path tests
//!
//! The direct path must produce the same bytes as parsing into a record and
//! encoding it, for complete trees, bare trees and trees with bad variants.

use econfeed_protocol::{Encode, Message, decode_message, verify};

use crate::direct::{
    encode_calendar_event, encode_economic_event, encode_macro_calendar_event,
    encode_macro_headline_event, encode_reference_data,
};
use crate::dispatch::{encode_element, parse_message};
use crate::error::ParseError;
use crate::fixtures::*;
use crate::names;
use crate::node::ElementNode;
use crate::records::{
    parse_calendar_event, parse_economic_event, parse_macro_calendar_event,
    parse_macro_headline_event, parse_reference_data,
};

/// Trees covering every record kind, full and bare
fn trees() -> Vec<ElementNode> {
    vec![
        economic_event(),
        identified(names::HEADLINE_ECONOMIC_EVENT),
        calendar_event(),
        identified(names::HEADLINE_CALENDAR_EVENT),
        reference_data(),
        identified(names::MACRO_REFERENCE_DATA),
        macro_headline_event(),
        ElementNode::sequence(names::MACRO_HEADLINE_EVENT),
        macro_calendar_event(),
        identified(names::MACRO_CALENDAR_EVENT),
        identified(names::HEADLINE_ECONOMIC_EVENT)
            .with(ElementNode::choice(names::VALUE, ElementNode::text("RANGE", "x")))
            .with(ElementNode::text(names::ECO_RELEASE_DT, "not a choice")),
    ]
}

#[test]
fn test_direct_matches_model_path_for_every_kind() {
    for tree in trees() {
        let direct = encode_element(&tree, 12).unwrap();
        let via_model = parse_message(&tree, 12).unwrap().encode();
        assert_eq!(direct, via_model, "paths differ for {tree:?}");
    }
}

#[test]
fn test_direct_buffers_verify_and_decode() {
    for tree in trees() {
        let direct = encode_element(&tree, 12).unwrap();
        assert!(verify(&direct).is_ok());
        assert_eq!(decode_message(&direct).unwrap(), parse_message(&tree, 12).unwrap());
    }
}

#[test]
fn test_per_kind_entry_points() {
    let tree = economic_event();
    assert_eq!(
        encode_economic_event(&&tree).unwrap(),
        parse_economic_event(&&tree).unwrap().encode()
    );

    let tree = calendar_event();
    assert_eq!(
        encode_calendar_event(&&tree).unwrap(),
        parse_calendar_event(&&tree).unwrap().encode()
    );

    let tree = reference_data();
    assert_eq!(
        encode_reference_data(&&tree, 3).unwrap(),
        parse_reference_data(&&tree, 3).unwrap().encode()
    );

    let tree = macro_headline_event();
    assert_eq!(
        encode_macro_headline_event(&&tree, 4),
        parse_macro_headline_event(&&tree, 4).encode()
    );

    let tree = macro_calendar_event();
    assert_eq!(
        encode_macro_calendar_event(&&tree, 5).unwrap(),
        parse_macro_calendar_event(&&tree, 5).unwrap().encode()
    );
}

#[test]
fn test_direct_economic_event_decodes_values() {
    let buffer = encode_economic_event(&&economic_event()).unwrap();
    let Message::Economic(event) = decode_message(&buffer).unwrap() else {
        panic!("expected an economic event");
    };

    assert_eq!(event.value.count, 1);
    assert_eq!(event.value.value, -1.52);
    assert_eq!(event.prior_value.count, 5);
    assert_eq!(event.base.release.start.micros, RELEASE_MICROS);
    assert_eq!(event.prior_event_id, 41);
}

#[test]
fn test_direct_missing_identifier_fails() {
    let tree = ElementNode::sequence(names::HEADLINE_CALENDAR_EVENT)
        .with(ElementNode::text(names::ID_BB_GLOBAL, GLOBAL_ID));

    let err = encode_calendar_event(&&tree).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingField {
            field: "PARSEKYABLE_DES",
            ..
        }
    ));
}
