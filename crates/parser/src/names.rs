//! Field and variant names used by the upstream feed

// Record element names
pub const HEADLINE_ECONOMIC_EVENT: &str = "HeadlineEconomicEvent";
pub const HEADLINE_CALENDAR_EVENT: &str = "HeadlineCalendarEvent";
pub const MACRO_REFERENCE_DATA: &str = "MacroReferenceData";
pub const MACRO_HEADLINE_EVENT: &str = "MacroHeadlineEvent";
pub const MACRO_CALENDAR_EVENT: &str = "MacroCalendarEvent";

// Time choice variants
pub const DATETIME: &str = "DATETIME";
pub const DATE: &str = "DATE";
pub const DATARANGE: &str = "DATARANGE";
pub const START: &str = "START";
pub const END: &str = "END";

// Value choice variants
pub const SINGLE: &str = "SINGLE";
pub const DISTRIBUTION: &str = "DISTRIBUTION";
pub const NUMBER: &str = "NUMBER";
pub const AVERAGE: &str = "AVERAGE";
pub const LOW: &str = "LOW";
pub const HIGH: &str = "HIGH";
pub const MEDIAN: &str = "MEDIAN";
pub const STANDARD_DEVIATION: &str = "STANDARD_DEVIATION";

// Headline fields
pub const ID_BB_GLOBAL: &str = "ID_BB_GLOBAL";
pub const PARSEKYABLE_DES: &str = "PARSEKYABLE_DES";
pub const DESCRIPTION: &str = "DESCRIPTION";
pub const EVENT_TYPE: &str = "EVENT_TYPE";
pub const EVENT_SUBTYPE: &str = "EVENT_SUBTYPE";
pub const EVENT_ID: &str = "EVENT_ID";
pub const OBSERVATION_PERIOD: &str = "OBSERVATION_PERIOD";
pub const ECO_RELEASE_DT: &str = "ECO_RELEASE_DT";
pub const VALUE: &str = "VALUE";
pub const PRIOR_VALUE: &str = "PRIOR_VALUE";
pub const REVISION_METADATA: &str = "REVISION_METADATA";
pub const PRIOR_EVENT_ID: &str = "PRIOR_EVENT_ID";
pub const PRIOR_OBSERVATION_PERIOD: &str = "PRIOR_OBSERVATION_PERIOD";
pub const PRIOR_ECO_RELEASE_DT: &str = "PRIOR_ECO_RELEASE_DT";
pub const RELEASE_STATUS: &str = "RELEASE_STATUS";

// Reference data fields
pub const INDX_FREQ: &str = "INDX_FREQ";
pub const INDX_UNITS: &str = "INDX_UNITS";
pub const COUNTRY_ISO: &str = "COUNTRY_ISO";
pub const INDX_SOURCE: &str = "INDX_SOURCE";
pub const SEASONALITY_AND_TRANSFORMATION: &str = "SEASONALITY_AND_TRANSFORMATION";
pub const RELEVANCE_VALUE: &str = "RELEVANCE_VALUE";
