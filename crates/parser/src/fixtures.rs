//! Element trees shared by the parser tests

use chrono::NaiveDate;

use crate::element::Datetime;
use crate::names;
use crate::node::ElementNode;

pub const GLOBAL_ID: &str = "BBG002SBQ4Q1";
pub const SHORT_ID: &str = "CPI YOY Index";

/// 2025-10-07T12:30:00 as wall-clock microseconds
pub const RELEASE_MICROS: u64 = 1_759_840_200_000_000;

/// 2025-10-07T00:00:00 as wall-clock microseconds
pub const RELEASE_DATE_MICROS: u64 = 1_759_795_200_000_000;

pub fn release_datetime() -> Datetime {
    let wall = NaiveDate::from_ymd_opt(2025, 10, 7)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    Datetime::new(wall, 0)
}

pub fn datetime_choice(name: &str, dt: Datetime) -> ElementNode {
    ElementNode::choice(name, ElementNode::datetime(names::DATETIME, dt))
}

pub fn range_choice(name: &str, start: Datetime, end: Datetime) -> ElementNode {
    ElementNode::choice(
        name,
        ElementNode::sequence(names::DATARANGE)
            .with(ElementNode::datetime(names::START, start))
            .with(ElementNode::datetime(names::END, end)),
    )
}

pub fn single(name: &str, value: &str) -> ElementNode {
    ElementNode::choice(name, ElementNode::text(names::SINGLE, value))
}

/// number=5, average=2.1, low=1.0, high=3.0, median=2.0, standard_deviation=0.5
pub fn distribution(name: &str) -> ElementNode {
    ElementNode::choice(
        name,
        ElementNode::sequence(names::DISTRIBUTION)
            .with(ElementNode::text(names::NUMBER, "5"))
            .with(ElementNode::text(names::AVERAGE, "2.1"))
            .with(ElementNode::text(names::LOW, "1.0"))
            .with(ElementNode::text(names::HIGH, "3.0"))
            .with(ElementNode::text(names::MEDIAN, "2.0"))
            .with(ElementNode::text(names::STANDARD_DEVIATION, "0.5")),
    )
}

/// Record element carrying only its required identifiers
pub fn identified(record: &str) -> ElementNode {
    ElementNode::sequence(record)
        .with(ElementNode::text(names::ID_BB_GLOBAL, GLOBAL_ID))
        .with(ElementNode::text(names::PARSEKYABLE_DES, SHORT_ID))
}

fn headline_fields(node: ElementNode) -> ElementNode {
    node.with(ElementNode::text(names::DESCRIPTION, "US CPI Urban Consumers YoY NSA"))
        .with(ElementNode::text(names::EVENT_TYPE, "ACTUAL"))
        .with(ElementNode::text(names::EVENT_SUBTYPE, "NEW"))
        .with(ElementNode::int(names::EVENT_ID, 42))
        .with(ElementNode::text(names::OBSERVATION_PERIOD, "Sep"))
        .with(datetime_choice(names::ECO_RELEASE_DT, release_datetime()))
}

fn revision_group() -> ElementNode {
    ElementNode::sequence(names::REVISION_METADATA)
        .with(ElementNode::int(names::PRIOR_EVENT_ID, 41))
        .with(ElementNode::text(names::PRIOR_OBSERVATION_PERIOD, "Aug"))
        .with(datetime_choice(names::PRIOR_ECO_RELEASE_DT, release_datetime()))
}

pub fn economic_event() -> ElementNode {
    headline_fields(identified(names::HEADLINE_ECONOMIC_EVENT))
        .with(single(names::VALUE, "-1.52"))
        .with(distribution(names::PRIOR_VALUE))
        .with(revision_group())
}

pub fn calendar_event() -> ElementNode {
    headline_fields(identified(names::HEADLINE_CALENDAR_EVENT))
        .with(ElementNode::text(names::RELEASE_STATUS, "RELEASED"))
}

pub fn reference_data() -> ElementNode {
    identified(names::MACRO_REFERENCE_DATA)
        .with(ElementNode::text(names::DESCRIPTION, "US CPI Urban Consumers YoY NSA"))
        .with(ElementNode::text(names::INDX_FREQ, "Monthly"))
        .with(ElementNode::text(names::INDX_UNITS, "Percent"))
        .with(ElementNode::text(names::COUNTRY_ISO, "US"))
        .with(ElementNode::text(names::INDX_SOURCE, "BLS"))
        .with(ElementNode::text(names::SEASONALITY_AND_TRANSFORMATION, "NSA YoY"))
}

pub fn macro_headline_event() -> ElementNode {
    ElementNode::sequence(names::MACRO_HEADLINE_EVENT)
        .with(ElementNode::text(names::EVENT_TYPE, "REVISION"))
        .with(ElementNode::text(names::EVENT_SUBTYPE, "UPDATE"))
        .with(ElementNode::int(names::EVENT_ID, 7))
        .with(ElementNode::text(names::OBSERVATION_PERIOD, "Q3"))
        .with(datetime_choice(names::ECO_RELEASE_DT, release_datetime()))
        .with(revision_group())
        .with(distribution(names::VALUE))
}

pub fn macro_calendar_event() -> ElementNode {
    identified(names::MACRO_CALENDAR_EVENT)
        .with(ElementNode::text(names::EVENT_TYPE, "CALENDAR"))
        .with(ElementNode::text(names::EVENT_SUBTYPE, "INITPAINT"))
        .with(ElementNode::text(names::DESCRIPTION, "GDP"))
        .with(ElementNode::int(names::EVENT_ID, 9))
        .with(ElementNode::text(names::OBSERVATION_PERIOD, "Q3"))
        .with(datetime_choice(names::ECO_RELEASE_DT, release_datetime()))
        .with(ElementNode::text(names::RELEASE_STATUS, "SCHEDULED"))
        .with(ElementNode::text(names::RELEVANCE_VALUE, "87.5"))
}
