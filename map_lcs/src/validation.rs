//! Boundary validation of populated or decoded [`LcsParams`].
//!
//! The model accepts any combination of values; the checks here decide whether an aggregate may
//! be encoded into, or trusted after decoding from, a MAP operation.

use core::fmt;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::{
    error::{ProtocolValidationError, ValidationRule},
    lcs_params::{
        AreaDefinition, GeographicShape, LcsEvent, LcsParams, LocationEstimateType,
        OccurrenceInfo, MAX_PERIODIC_REPORTING, MAX_UNCERTAINTY_CODE,
    },
};

const MIN_POLYGON_POINTS: usize = 3;
/// Seconds
const MAX_INTERVAL_TIME: u16 = 32_767;

/// The MAP operation an aggregate is a payload of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LcsOperation {
    /// `provideSubscriberLocation` request
    ProvideSubscriberLocation,
    /// `provideSubscriberLocation` result
    ProvideSubscriberLocationResult,
    /// `subscriberLocationReport` request
    SubscriberLocationReport,
}

impl fmt::Display for LcsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LcsOperation::ProvideSubscriberLocation => "provideSubscriberLocation",
            LcsOperation::ProvideSubscriberLocationResult => "provideSubscriberLocationResult",
            LcsOperation::SubscriberLocationReport => "subscriberLocationReport",
        })
    }
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidationPolicy {
    /// Most corners a polygon may have
    pub max_polygon_points: usize,
    /// Most entries of a reporting PLMN list
    pub max_reporting_plmns: usize,
    /// Check latitude, longitude, confidence and accuracy code ranges
    pub check_coordinate_ranges: bool,
    /// Reject estimates whose shape the requester did not declare in `supportedGADShapes`
    pub enforce_supported_shapes: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_polygon_points: 15,
            max_reporting_plmns: 20,
            check_coordinate_ranges: true,
            enforce_supported_shapes: true,
        }
    }
}

#[derive(Default)]
struct Violations(Vec<ProtocolValidationError>);

impl Violations {
    fn push(&mut self, rule: ValidationRule, detail: impl Into<String>) {
        self.0.push(ProtocolValidationError::new(rule, detail));
    }
}

/// Checks the conditional-mandatory and range rules of MAP LCS parameters.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Accepts `params` as a payload of `operation`, or returns the first violated rule.
    pub fn validate(
        &self,
        params: &LcsParams,
        operation: LcsOperation,
    ) -> Result<(), ProtocolValidationError> {
        match self.violations(params, operation).into_iter().next() {
            Some(err) => {
                warn!(rule = %err.rule, %operation, "rejected LCS parameters: {}", err.detail);
                Err(err)
            },
            None => {
                debug!(%operation, "accepted LCS parameters");
                Ok(())
            },
        }
    }

    /// Every violated rule, in a fixed order.
    pub fn violations(
        &self,
        params: &LcsParams,
        operation: LcsOperation,
    ) -> Vec<ProtocolValidationError> {
        trace!(%operation, params = %params, "validating");
        let mut out = Violations::default();
        match operation {
            LcsOperation::ProvideSubscriberLocation => check_request(params, &mut out),
            LcsOperation::ProvideSubscriberLocationResult => check_result(params, &mut out),
            LcsOperation::SubscriberLocationReport => check_report(params, &mut out),
        }
        check_area_event_info(params, &mut out);
        check_periodic_ldr_info(params, &mut out);
        check_privacy(params, &mut out);
        check_serving_node(params, &mut out);
        self.check_shapes(params, &mut out);
        self.check_accuracy(params, &mut out);
        self.check_reporting_plmns(params, &mut out);
        check_sequence_number(params, &mut out);
        out.0
    }

    fn check_shapes(&self, params: &LcsParams, out: &mut Violations) {
        let estimates = [
            ("locationEstimate", params.geographic_shape()),
            (
                "additionalLocationEstimate",
                params.additional_geographic_shape(),
            ),
        ];
        for (label, shape) in estimates {
            let Some(shape) = shape else { continue };
            if let GeographicShape::Polygon(polygon) = shape {
                let points = polygon.len();
                if !(MIN_POLYGON_POINTS..=self.policy.max_polygon_points).contains(&points) {
                    out.push(
                        ValidationRule::InvalidPolygonPointCount,
                        format!(
                            "{} polygon has {} points, expected {}..={}",
                            label, points, MIN_POLYGON_POINTS, self.policy.max_polygon_points
                        ),
                    );
                }
            }
            if self.policy.check_coordinate_ranges {
                if let Some(point) = shape.coordinates().iter().find(|p| !p.is_in_range()) {
                    out.push(
                        ValidationRule::CoordinateOutOfRange,
                        format!("{} has coordinates {} out of range", label, point),
                    );
                }
                if let Some(confidence) = shape.confidence().filter(|c| *c > 100) {
                    out.push(
                        ValidationRule::CoordinateOutOfRange,
                        format!("{} confidence {} above 100", label, confidence),
                    );
                }
            }
            if self.policy.enforce_supported_shapes {
                if let Some(supported) = params.supported_gad_shapes() {
                    let kind = shape.type_of_shape();
                    if !supported.supports(kind) {
                        out.push(
                            ValidationRule::UnsupportedShape,
                            format!("{} is {}, supported: {}", label, kind, supported),
                        );
                    }
                }
            }
        }
    }

    fn check_accuracy(&self, params: &LcsParams, out: &mut Violations) {
        if !self.policy.check_coordinate_ranges {
            return;
        }
        let Some(qos) = params.lcs_qos() else { return };
        for (label, accuracy) in [
            ("horizontalAccuracy", qos.horizontal_accuracy),
            ("verticalAccuracy", qos.vertical_accuracy),
        ] {
            if let Some(code) = accuracy.filter(|code| *code > MAX_UNCERTAINTY_CODE) {
                out.push(
                    ValidationRule::AccuracyOutOfRange,
                    format!("{} code {} above {}", label, code, MAX_UNCERTAINTY_CODE),
                );
            }
        }
    }

    fn check_reporting_plmns(&self, params: &LcsParams, out: &mut Violations) {
        let Some(list) = params.reporting_plmn_list() else { return };
        let len = list.plmns.len();
        if len == 0 || len > self.policy.max_reporting_plmns {
            out.push(
                ValidationRule::ReportingPlmnListTooLong,
                format!(
                    "reportingPlmnList has {} entries, expected 1..={}",
                    len, self.policy.max_reporting_plmns
                ),
            );
        }
    }
}

fn check_request(params: &LcsParams, out: &mut Violations) {
    match (params.msisdn(), params.imsi()) {
        (None, None) => out.push(
            ValidationRule::MissingTargetIdentity,
            "neither msisdn nor imsi identifies the target",
        ),
        (Some(_), Some(_)) => out.push(
            ValidationRule::AmbiguousTargetIdentity,
            "both msisdn and imsi identify the target",
        ),
        _ => {},
    }
    if params.lcs_client_id().is_none() {
        out.push(ValidationRule::MissingLcsClientId, "lcsClientId is absent");
    }
    let Some(location_type) = params.location_type() else {
        out.push(ValidationRule::MissingLocationType, "locationType is absent");
        return;
    };

    match location_type.location_estimate_type {
        LocationEstimateType::ActivateDeferredLocation => {
            let events = location_type
                .deferred_location_event_type
                .filter(|events| !events.is_empty());
            let Some(events) = events else {
                out.push(
                    ValidationRule::MissingDeferredEventType,
                    "activateDeferredLocation without deferredLocationEventType",
                );
                return;
            };
            if events.requires_reference_number() && params.lcs_reference_number().is_none() {
                out.push(
                    ValidationRule::MissingLcsReferenceNumber,
                    format!("deferred MT-LR for {} without lcsReferenceNumber", events),
                );
            }
            if events.is_area_event() && params.area_event_info().is_none() {
                out.push(
                    ValidationRule::MissingAreaEventInfo,
                    format!("deferred MT-LR for {} without areaEventInfo", events),
                );
            }
            if events.is_periodic() && params.periodic_ldr_info().is_none() {
                out.push(
                    ValidationRule::MissingPeriodicLdrInfo,
                    "periodic deferred MT-LR without periodicLdrInfo",
                );
            }
            if !events.is_area_event() && params.area_event_info().is_some() {
                out.push(
                    ValidationRule::UnexpectedAreaEventInfo,
                    format!("areaEventInfo given for {}", events),
                );
            }
        },
        LocationEstimateType::CancelDeferredLocation => {
            if params.lcs_reference_number().is_none() {
                out.push(
                    ValidationRule::MissingLcsReferenceNumber,
                    "cancelDeferredLocation without lcsReferenceNumber",
                );
            }
        },
        estimate_type => {
            if params.area_event_info().is_some() {
                out.push(
                    ValidationRule::UnexpectedAreaEventInfo,
                    format!("areaEventInfo given for {}", estimate_type),
                );
            }
        },
    }
}

fn check_result(params: &LcsParams, out: &mut Violations) {
    if params.geographic_shape().is_none() {
        out.push(
            ValidationRule::MissingLocationEstimate,
            "provideSubscriberLocation result without locationEstimate",
        );
    }
}

fn check_report(params: &LcsParams, out: &mut Violations) {
    let Some(event) = params.lcs_event() else {
        out.push(ValidationRule::MissingLcsEvent, "lcsEvent is absent");
        return;
    };
    if event == LcsEvent::DeferredMtLrResponse && params.lcs_reference_number().is_none() {
        out.push(
            ValidationRule::MissingLcsReferenceNumber,
            "deferred MT-LR response without lcsReferenceNumber",
        );
    }
}

fn check_area_event_info(params: &LcsParams, out: &mut Violations) {
    let Some(info) = params.area_event_info() else { return };
    let areas = info.area_definition.areas.len();
    if areas == 0 || areas > AreaDefinition::MAX_AREAS {
        out.push(
            ValidationRule::EmptyAreaDefinition,
            format!(
                "areaDefinition has {} areas, expected 1..={}",
                areas,
                AreaDefinition::MAX_AREAS
            ),
        );
    }
    if let Some(interval) = info.interval_time {
        if !(1..=MAX_INTERVAL_TIME).contains(&interval) {
            out.push(
                ValidationRule::IntervalTimeOutOfRange,
                format!("intervalTime {} outside 1..={}", interval, MAX_INTERVAL_TIME),
            );
        }
        if info.occurrence() != OccurrenceInfo::MultipleTimeEvent {
            out.push(
                ValidationRule::IntervalTimeWithoutMultipleOccurrence,
                format!("intervalTime {} on a {}", interval, info.occurrence()),
            );
        }
    }
}

fn check_periodic_ldr_info(params: &LcsParams, out: &mut Violations) {
    let Some(info) = params.periodic_ldr_info() else { return };
    let range = 1..=MAX_PERIODIC_REPORTING;
    if !range.contains(&info.reporting_amount)
        || !range.contains(&info.reporting_interval)
        || info.reporting_window() > u64::from(MAX_PERIODIC_REPORTING)
    {
        out.push(
            ValidationRule::PeriodicReportingWindowExceeded,
            format!(
                "{} reports every {}s exceed {}s",
                info.reporting_amount, info.reporting_interval, MAX_PERIODIC_REPORTING
            ),
        );
    }
}

fn check_privacy(params: &LcsParams, out: &mut Violations) {
    if params.lcs_privacy_check().is_some_and(|check| check.is_empty()) {
        out.push(
            ValidationRule::MissingPrivacyAction,
            "lcsPrivacyCheck carries no action",
        );
    }
}

fn check_serving_node(params: &LcsParams, out: &mut Violations) {
    if params.gprs_node_indicator() == Some(true) && params.network_node_number().is_none() {
        out.push(
            ValidationRule::GprsNodeIndicatorWithoutNodeNumber,
            "gprsNodeIndicator set without networkNodeNumber",
        );
    }
}

fn check_sequence_number(params: &LcsParams, out: &mut Violations) {
    if let Some(sequence) = params.sequence_number() {
        if !(1..=MAX_PERIODIC_REPORTING).contains(&sequence) {
            out.push(
                ValidationRule::InvalidSequenceNumber,
                format!(
                    "sequenceNumber {} outside 1..={}",
                    sequence, MAX_PERIODIC_REPORTING
                ),
            );
        }
    }
}

/// Enforces the per-reference-number sequence of periodic location reports.
///
/// The first report of an LCS reference number must carry sequence number 1 and each later report
/// exactly one more. Numbers are checked, never rewritten.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    last: HashMap<u8, u32>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the next report, returning its sequence number.
    pub fn observe(&mut self, params: &LcsParams) -> Result<u32, ProtocolValidationError> {
        let reference = params.lcs_reference_number().ok_or_else(|| {
            ProtocolValidationError::new(
                ValidationRule::MissingLcsReferenceNumber,
                "periodic report without lcsReferenceNumber",
            )
        })?;
        let sequence = params
            .sequence_number()
            .filter(|n| (1..=MAX_PERIODIC_REPORTING).contains(n))
            .ok_or_else(|| {
                ProtocolValidationError::new(
                    ValidationRule::InvalidSequenceNumber,
                    format!("reference {}: missing or invalid sequenceNumber", reference),
                )
            })?;

        let expected = self.last.get(&reference).map_or(1, |last| last + 1);
        if sequence != expected {
            let err = ProtocolValidationError::new(
                ValidationRule::SequenceNumberOutOfOrder,
                format!(
                    "reference {}: expected sequenceNumber {}, got {}",
                    reference, expected, sequence
                ),
            );
            warn!(rule = %err.rule, reference, "{}", err.detail);
            return Err(err);
        }
        self.last.insert(reference, sequence);
        Ok(sequence)
    }

    pub fn last_sequence(&self, reference: u8) -> Option<u32> {
        self.last.get(&reference).copied()
    }

    /// Forgets a reference number once its deferred MT-LR has ended.
    pub fn reset(&mut self, reference: u8) -> Option<u32> {
        self.last.remove(&reference)
    }
}
