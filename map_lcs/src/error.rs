use core::fmt;
use thiserror::Error;

/// A conditional-mandatory or range rule an aggregate can violate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationRule {
    MissingTargetIdentity,
    AmbiguousTargetIdentity,
    MissingLocationType,
    MissingLcsClientId,
    MissingDeferredEventType,
    MissingLcsReferenceNumber,
    MissingAreaEventInfo,
    UnexpectedAreaEventInfo,
    EmptyAreaDefinition,
    IntervalTimeWithoutMultipleOccurrence,
    IntervalTimeOutOfRange,
    MissingPeriodicLdrInfo,
    PeriodicReportingWindowExceeded,
    MissingPrivacyAction,
    GprsNodeIndicatorWithoutNodeNumber,
    MissingLocationEstimate,
    MissingLcsEvent,
    UnsupportedShape,
    InvalidPolygonPointCount,
    CoordinateOutOfRange,
    AccuracyOutOfRange,
    ReportingPlmnListTooLong,
    InvalidSequenceNumber,
    SequenceNumberOutOfOrder,
}

impl ValidationRule {
    /// Stable identifier of the rule
    pub const fn code(self) -> &'static str {
        match self {
            ValidationRule::MissingTargetIdentity => "MISSING_TARGET_IDENTITY",
            ValidationRule::AmbiguousTargetIdentity => "AMBIGUOUS_TARGET_IDENTITY",
            ValidationRule::MissingLocationType => "MISSING_LOCATION_TYPE",
            ValidationRule::MissingLcsClientId => "MISSING_LCS_CLIENT_ID",
            ValidationRule::MissingDeferredEventType => "MISSING_DEFERRED_EVENT_TYPE",
            ValidationRule::MissingLcsReferenceNumber => "MISSING_LCS_REFERENCE_NUMBER",
            ValidationRule::MissingAreaEventInfo => "MISSING_AREA_EVENT_INFO",
            ValidationRule::UnexpectedAreaEventInfo => "UNEXPECTED_AREA_EVENT_INFO",
            ValidationRule::EmptyAreaDefinition => "EMPTY_AREA_DEFINITION",
            ValidationRule::IntervalTimeWithoutMultipleOccurrence => {
                "INTERVAL_TIME_WITHOUT_MULTIPLE_OCCURRENCE"
            },
            ValidationRule::IntervalTimeOutOfRange => "INTERVAL_TIME_OUT_OF_RANGE",
            ValidationRule::MissingPeriodicLdrInfo => "MISSING_PERIODIC_LDR_INFO",
            ValidationRule::PeriodicReportingWindowExceeded => {
                "PERIODIC_REPORTING_WINDOW_EXCEEDED"
            },
            ValidationRule::MissingPrivacyAction => "MISSING_PRIVACY_ACTION",
            ValidationRule::GprsNodeIndicatorWithoutNodeNumber => {
                "GPRS_NODE_INDICATOR_WITHOUT_NODE_NUMBER"
            },
            ValidationRule::MissingLocationEstimate => "MISSING_LOCATION_ESTIMATE",
            ValidationRule::MissingLcsEvent => "MISSING_LCS_EVENT",
            ValidationRule::UnsupportedShape => "UNSUPPORTED_SHAPE",
            ValidationRule::InvalidPolygonPointCount => "INVALID_POLYGON_POINT_COUNT",
            ValidationRule::CoordinateOutOfRange => "COORDINATE_OUT_OF_RANGE",
            ValidationRule::AccuracyOutOfRange => "ACCURACY_OUT_OF_RANGE",
            ValidationRule::ReportingPlmnListTooLong => "REPORTING_PLMN_LIST_TOO_LONG",
            ValidationRule::InvalidSequenceNumber => "INVALID_SEQUENCE_NUMBER",
            ValidationRule::SequenceNumberOutOfOrder => "SEQUENCE_NUMBER_OUT_OF_ORDER",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rejection of a populated or decoded aggregate at the protocol boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{rule}: {detail}")]
pub struct ProtocolValidationError {
    pub rule: ValidationRule,
    pub detail: String,
}

impl ProtocolValidationError {
    pub fn new(rule: ValidationRule, detail: impl Into<String>) -> Self {
        Self {
            rule,
            detail: detail.into(),
        }
    }

    pub fn rule(&self) -> ValidationRule {
        self.rule
    }
}
