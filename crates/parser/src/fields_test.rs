//! Field rule tests
//!
//! Anomaly notes for unrecognized variants and the scalar fallbacks.

use econfeed_protocol::{Measurement, TimeInterval};

use crate::fields::{
    Anomaly, ParseNotes, float, float_prefix, id, int_from_text, int_prefix, interval,
    measurement, text,
};
use crate::fixtures::*;
use crate::names;
use crate::node::ElementNode;

// ============================================================================
// Anomalies
// ============================================================================

#[test]
fn test_unknown_measurement_variant_noted() {
    let node = ElementNode::sequence("E")
        .with(ElementNode::choice(names::VALUE, ElementNode::text("RANGE", "1-2")));
    let mut notes = ParseNotes::new();

    let m = measurement(&&node, names::VALUE, &mut notes);

    assert_eq!(m, Measurement::ABSENT);
    assert_eq!(
        notes.anomalies(),
        &[Anomaly {
            field: "VALUE",
            found: "RANGE".into(),
        }]
    );
}

#[test]
fn test_unknown_time_variant_noted() {
    let node = ElementNode::sequence("E").with(ElementNode::choice(
        names::ECO_RELEASE_DT,
        ElementNode::text("QUARTER", "Q3"),
    ));
    let mut notes = ParseNotes::new();

    let release = interval(&&node, names::ECO_RELEASE_DT, &mut notes);

    assert_eq!(release, TimeInterval::default());
    assert_eq!(notes.anomalies().len(), 1);
    assert_eq!(
        notes.anomalies()[0].to_string(),
        "unrecognized variant 'QUARTER' in ECO_RELEASE_DT, using defaults"
    );
}

#[test]
fn test_scalar_where_choice_expected_noted() {
    let node = ElementNode::sequence("E").with(ElementNode::text(names::VALUE, "1.5"));
    let mut notes = ParseNotes::new();

    let m = measurement(&&node, names::VALUE, &mut notes);

    assert!(m.is_absent());
    assert_eq!(notes.anomalies()[0].found, "<not a choice>");
}

#[test]
fn test_absent_fields_note_nothing() {
    let node = ElementNode::sequence("E");
    let mut notes = ParseNotes::new();

    assert!(measurement(&&node, names::VALUE, &mut notes).is_absent());
    assert_eq!(interval(&&node, names::ECO_RELEASE_DT, &mut notes), TimeInterval::default());
    assert!(notes.is_empty());
}

#[test]
fn test_known_variants_note_nothing() {
    let node = ElementNode::sequence("E")
        .with(single(names::VALUE, "-1.52"))
        .with(distribution(names::PRIOR_VALUE))
        .with(datetime_choice(names::ECO_RELEASE_DT, release_datetime()));
    let mut notes = ParseNotes::new();

    measurement(&&node, names::VALUE, &mut notes);
    measurement(&&node, names::PRIOR_VALUE, &mut notes);
    interval(&&node, names::ECO_RELEASE_DT, &mut notes);
    assert!(notes.is_empty());
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_text_absent_is_empty() {
    let node = ElementNode::sequence("E");
    assert_eq!(text(&&node, names::DESCRIPTION), "");
}

#[test]
fn test_text_renders_numbers() {
    let node = ElementNode::sequence("E").with(ElementNode::int(names::OBSERVATION_PERIOD, 2025));
    assert_eq!(text(&&node, names::OBSERVATION_PERIOD), "2025");
}

#[test]
fn test_id_from_text_and_int() {
    let node = ElementNode::sequence("E")
        .with(ElementNode::text("A", " 17 "))
        .with(ElementNode::int("B", 18))
        .with(ElementNode::text("C", "x"));

    assert_eq!(id(&&node, "A"), 17);
    assert_eq!(id(&&node, "B"), 18);
    assert_eq!(id(&&node, "C"), 0);
    assert_eq!(id(&&node, "D"), 0);
}

#[test]
fn test_float_fallbacks() {
    let node = ElementNode::sequence("E")
        .with(ElementNode::text("A", "87.5"))
        .with(ElementNode::float("B", -0.25))
        .with(ElementNode::text("C", "high"));

    assert_eq!(float(&&node, "A"), 87.5);
    assert_eq!(float(&&node, "B"), -0.25);
    assert!(float(&&node, "C").is_nan());
    assert!(float(&&node, "D").is_nan());
}

#[test]
fn test_int_from_text_fallbacks() {
    assert_eq!(int_from_text(&&ElementNode::text("N", "5")), 5);
    assert_eq!(int_from_text(&&ElementNode::text("N", "5.9")), 5);
    assert_eq!(int_from_text(&&ElementNode::text("N", "NaN")), 0);
    assert_eq!(int_from_text(&&ElementNode::text("N", "")), 0);
    assert_eq!(int_from_text(&&ElementNode::null("N")), 0);
}

#[test]
fn test_float_reads_numeric_prefix() {
    assert_eq!(float_prefix("1.5abc"), Some(1.5));
    assert_eq!(float_prefix("  -2.25 %"), Some(-2.25));
    assert_eq!(float_prefix(".5"), Some(0.5));
    assert_eq!(float_prefix("7."), Some(7.0));
    assert_eq!(float_prefix("3e2x"), Some(300.0));
    assert_eq!(float_prefix("3e"), Some(3.0));
    assert_eq!(float_prefix("4E-1"), Some(0.4));
    assert_eq!(float_prefix("-inf"), Some(f64::NEG_INFINITY));
    assert!(float_prefix("NaN").is_some_and(f64::is_nan));

    assert_eq!(float_prefix("."), None);
    assert_eq!(float_prefix("-"), None);
    assert_eq!(float_prefix("abc1"), None);
    assert_eq!(float_prefix("1e999"), None);
    assert_eq!(float_prefix("é"), None);
}

#[test]
fn test_int_reads_numeric_prefix() {
    assert_eq!(int_prefix("42 units"), Some(42));
    assert_eq!(int_prefix(" +7"), Some(7));
    assert_eq!(int_prefix("-3.9"), Some(-3));
    assert_eq!(int_prefix("1e3"), Some(1));
    assert_eq!(int_prefix("x1"), None);
    assert_eq!(int_prefix("99999999999"), None);
}

#[test]
fn test_float_field_with_trailing_text() {
    let node = ElementNode::sequence("E").with(ElementNode::text("A", "1.5abc"));
    assert_eq!(float(&&node, "A"), 1.5);
    assert_eq!(int_from_text(&&ElementNode::text("N", "5 releases")), 5);
}
