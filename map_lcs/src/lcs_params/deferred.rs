use core::fmt;

use super::{fmt_hex, fmt_list, DeferredLocationEventType, Fields, IsdnAddress, Plmn};

/// Upper bound of reporting amount, interval, their product and of sequence numbers
pub const MAX_PERIODIC_REPORTING: u32 = 8_639_999;

protocol_enum! {
    /// `LCS-Event` of a `subscriberLocationReport`
    pub enum LcsEvent {
        EmergencyCallOrigination = 0 => "emergencyCallOrigination",
        EmergencyCallRelease = 1 => "emergencyCallRelease",
        MoLr = 2 => "mo-lr",
        DeferredMtLrResponse = 3 => "deferredmt-lrResponse",
        DeferredMoLrTtpInitiation = 4 => "deferredmo-lrTTTPInitiation",
        EmergencyCallHandover = 5 => "emergencyCallHandover",
    }
}

protocol_enum! {
    /// `AreaType`
    pub enum AreaType {
        CountryCode = 0 => "countryCode",
        PlmnId = 1 => "plmnId",
        LocationAreaId = 2 => "locationAreaId",
        RoutingAreaId = 3 => "routingAreaId",
        CellGlobalId = 4 => "cellGlobalId",
        UtranCellId = 5 => "utranCellId",
    }
}

/// `Area`: an area type and its identification octets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub area_type: AreaType,
    pub identification: Vec<u8>,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.area_type)?;
        fmt_hex(&self.identification, f)
    }
}

/// `AreaDefinition`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaDefinition {
    pub areas: Vec<Area>,
}

impl AreaDefinition {
    /// At most this many areas fit in one definition
    pub const MAX_AREAS: usize = 10;
}

impl fmt::Display for AreaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(&self.areas, f)
    }
}

protocol_enum! {
    /// `OccurrenceInfo`
    pub enum OccurrenceInfo {
        OneTimeEvent = 0 => "oneTimeEvent",
        MultipleTimeEvent = 1 => "multipleTimeEvent",
    }
}

/// `Area-EventInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaEventInfo {
    pub area_definition: AreaDefinition,
    pub occurrence_info: Option<OccurrenceInfo>,
    /// Minimum seconds between reports, only for multiple-time events
    pub interval_time: Option<u16>,
}

impl AreaEventInfo {
    /// Occurrence policy in force; an absent value means one-time.
    pub fn occurrence(&self) -> OccurrenceInfo {
        self.occurrence_info.unwrap_or(OccurrenceInfo::OneTimeEvent)
    }
}

impl fmt::Display for AreaEventInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "AreaEventInfo")?;
        fields.field("areaDefinition", &self.area_definition)?;
        fields.opt("occurrenceInfo", self.occurrence_info.as_ref())?;
        fields.opt("intervalTime", self.interval_time.as_ref())?;
        fields.finish()
    }
}

protocol_enum! {
    /// `TerminationCause` of a deferred MT-LR
    pub enum TerminationCause {
        Normal = 0 => "normal",
        ErrorUndefined = 1 => "errorundefined",
        InternalTimeout = 2 => "internalTimeout",
        Congestion = 3 => "congestion",
        MtLrRestart = 4 => "mt-lrRestart",
        PrivacyViolation = 5 => "privacyViolation",
        ShapeOfLocationEstimateNotSupported = 6 => "shapeOfLocationEstimateNotSupported",
        SubscriberTermination = 7 => "subscriberTermination",
        UeTermination = 8 => "uETermination",
        NetworkTermination = 9 => "networkTermination",
    }
}

/// `Deferredmt-lrData`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferredMtLrData {
    pub deferred_location_event_type: DeferredLocationEventType,
    pub termination_cause: Option<TerminationCause>,
    pub network_node_number: Option<IsdnAddress>,
}

impl DeferredMtLrData {
    pub fn new(deferred_location_event_type: DeferredLocationEventType) -> Self {
        Self {
            deferred_location_event_type,
            termination_cause: None,
            network_node_number: None,
        }
    }
}

impl fmt::Display for DeferredMtLrData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "DeferredMtLrData")?;
        fields.field(
            "deferredLocationEventType",
            &self.deferred_location_event_type,
        )?;
        fields.opt("terminationCause", self.termination_cause.as_ref())?;
        fields.opt("networkNodeNumber", self.network_node_number.as_ref())?;
        fields.finish()
    }
}

/// `PeriodicLDRInfo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicLdrInfo {
    /// Number of reports
    pub reporting_amount: u32,
    /// Seconds between reports
    pub reporting_interval: u32,
}

impl PeriodicLdrInfo {
    pub const fn new(reporting_amount: u32, reporting_interval: u32) -> Self {
        Self {
            reporting_amount,
            reporting_interval,
        }
    }

    /// Total reporting duration in seconds
    pub fn reporting_window(&self) -> u64 {
        u64::from(self.reporting_amount) * u64::from(self.reporting_interval)
    }
}

impl fmt::Display for PeriodicLdrInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "PeriodicLdrInfo")?;
        fields.field("reportingAmount", &self.reporting_amount)?;
        fields.field("reportingInterval", &self.reporting_interval)?;
        fields.finish()
    }
}

protocol_enum! {
    /// `RAN-Technology`
    pub enum RanTechnology {
        Gsm = 0 => "gsm",
        Umts = 1 => "umts",
    }
}

/// `ReportingPLMN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportingPlmn {
    pub plmn: Plmn,
    pub ran_technology: Option<RanTechnology>,
    pub ran_periodic_location_support: bool,
}

impl fmt::Display for ReportingPlmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plmn)?;
        if let Some(ran) = self.ran_technology {
            write!(f, "/{}", ran)?;
        }
        if self.ran_periodic_location_support {
            f.write_str("/periodic")?;
        }
        Ok(())
    }
}

/// `ReportingPLMNList`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportingPlmnList {
    /// Entries are in priority order
    pub prioritized: bool,
    pub plmns: Vec<ReportingPlmn>,
}

impl fmt::Display for ReportingPlmnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "ReportingPlmnList")?;
        if self.prioritized {
            fields.field("plmnListPrioritized", &true)?;
        }
        fields.field("plmnList", &PlmnList(&self.plmns))?;
        fields.finish()
    }
}

struct PlmnList<'a>(&'a [ReportingPlmn]);

impl fmt::Display for PlmnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(self.0, f)
    }
}
