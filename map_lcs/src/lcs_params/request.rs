use bitflags::bitflags;
use core::fmt;

use super::{fmt_flags, Fields, IsdnAddress};

protocol_enum! {
    /// `LocationEstimateType`
    pub enum LocationEstimateType {
        CurrentLocation = 0 => "currentLocation",
        CurrentOrLastKnownLocation = 1 => "currentOrLastKnownLocation",
        InitialLocation = 2 => "initialLocation",
        ActivateDeferredLocation = 3 => "activateDeferredLocation",
        CancelDeferredLocation = 4 => "cancelDeferredLocation",
        NotificationVerificationOnly = 5 => "notificationVerificationOnly",
    }
}

bitflags! {
    /// `DeferredLocationEventType`: the events that trigger a deferred location report
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeferredLocationEventType: u8 {
        /// UE becomes available
        const MS_AVAILABLE = 0x01;
        const ENTERING_INTO_AREA = 0x02;
        const LEAVING_FROM_AREA = 0x04;
        const BEING_INSIDE_AREA = 0x08;
        const PERIODIC_LDR = 0x10;
    }
}

impl DeferredLocationEventType {
    /// Any of the three area triggers is set.
    pub fn is_area_event(self) -> bool {
        self.intersects(
            Self::ENTERING_INTO_AREA | Self::LEAVING_FROM_AREA | Self::BEING_INSIDE_AREA,
        )
    }

    pub fn is_periodic(self) -> bool {
        self.contains(Self::PERIODIC_LDR)
    }

    /// Events whose reports are correlated by an LCS reference number.
    pub fn requires_reference_number(self) -> bool {
        self.contains(Self::MS_AVAILABLE) || self.is_area_event() || self.is_periodic()
    }
}

impl fmt::Display for DeferredLocationEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_flags(self, f)
    }
}

/// `LocationType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationType {
    pub location_estimate_type: LocationEstimateType,
    pub deferred_location_event_type: Option<DeferredLocationEventType>,
}

impl LocationType {
    /// Immediate location request of the given kind.
    pub const fn immediate(location_estimate_type: LocationEstimateType) -> Self {
        Self {
            location_estimate_type,
            deferred_location_event_type: None,
        }
    }

    /// Activation of a deferred MT-LR for the given events.
    pub const fn deferred(events: DeferredLocationEventType) -> Self {
        Self {
            location_estimate_type: LocationEstimateType::ActivateDeferredLocation,
            deferred_location_event_type: Some(events),
        }
    }

    pub fn is_deferred_activation(&self) -> bool {
        self.location_estimate_type == LocationEstimateType::ActivateDeferredLocation
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LocationType")?;
        fields.field("locationEstimateType", &self.location_estimate_type)?;
        fields.opt(
            "deferredLocationEventType",
            self.deferred_location_event_type.as_ref(),
        )?;
        fields.finish()
    }
}

protocol_enum! {
    /// `LCSClientType`
    pub enum LcsClientType {
        EmergencyServices = 0 => "emergencyServices",
        ValueAddedServices = 1 => "valueAddedServices",
        PlmnOperatorServices = 2 => "plmnOperatorServices",
        LawfulInterceptServices = 3 => "lawfulInterceptServices",
    }
}

protocol_enum! {
    /// `LCS-FormatIndicator` of a client name or requestor id
    pub enum FormatIndicator {
        LogicalName = 0 => "logicalName",
        EmailAddress = 1 => "e-mailAddress",
        Msisdn = 2 => "msisdn",
        Url = 3 => "url",
        SipUrl = 4 => "sipUrl",
    }
}

/// `LCSClientName`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LcsClientName {
    /// USSD data coding scheme of `name`
    pub data_coding_scheme: u8,
    pub name: String,
    pub format_indicator: Option<FormatIndicator>,
}

impl fmt::Display for LcsClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsClientName")?;
        fields.field("dataCodingScheme", &self.data_coding_scheme)?;
        fields.field("nameString", &self.name)?;
        fields.opt("formatIndicator", self.format_indicator.as_ref())?;
        fields.finish()
    }
}

/// `LCSRequestorID`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LcsRequestorId {
    pub data_coding_scheme: u8,
    pub requestor_id: String,
    pub format_indicator: Option<FormatIndicator>,
}

impl fmt::Display for LcsRequestorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsRequestorId")?;
        fields.field("dataCodingScheme", &self.data_coding_scheme)?;
        fields.field("requestorIdString", &self.requestor_id)?;
        fields.opt("formatIndicator", self.format_indicator.as_ref())?;
        fields.finish()
    }
}

/// `LCS-ClientID`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LcsClientId {
    pub client_type: LcsClientType,
    pub external_address: Option<IsdnAddress>,
    pub client_name: Option<LcsClientName>,
    pub requestor_id: Option<LcsRequestorId>,
    /// Access point name of the client, if reached through one
    pub apn: Option<String>,
}

impl LcsClientId {
    pub fn new(client_type: LcsClientType) -> Self {
        Self {
            client_type,
            external_address: None,
            client_name: None,
            requestor_id: None,
            apn: None,
        }
    }
}

impl fmt::Display for LcsClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsClientId")?;
        fields.field("lcsClientType", &self.client_type)?;
        fields.opt("lcsClientExternalId", self.external_address.as_ref())?;
        fields.opt("lcsClientName", self.client_name.as_ref())?;
        fields.opt("lcsRequestorId", self.requestor_id.as_ref())?;
        fields.opt("lcsAPN", self.apn.as_ref())?;
        fields.finish()
    }
}

protocol_enum! {
    /// `ResponseTimeCategory`
    pub enum ResponseTimeCategory {
        LowDelay = 0 => "lowdelay",
        DelayTolerant = 1 => "delaytolerant",
    }
}

/// `ResponseTime`, optionally narrowed to a maximum delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseTime {
    pub category: ResponseTimeCategory,
    /// Seconds
    pub max_delay: Option<u16>,
}

impl From<ResponseTimeCategory> for ResponseTime {
    fn from(category: ResponseTimeCategory) -> Self {
        Self {
            category,
            max_delay: None,
        }
    }
}

impl fmt::Display for ResponseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_delay {
            Some(delay) => write!(f, "{} ({}s)", self.category, delay),
            None => fmt::Display::fmt(&self.category, f),
        }
    }
}

protocol_enum! {
    /// `LCS-QoS-Class`
    pub enum LcsQosClass {
        BestEffort = 0 => "bestEffort",
        Assured = 1 => "assured",
    }
}

/// `LCS-QoS`.
///
/// Accuracies are the 7-bit uncertainty codes of TS 23.032, not meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LcsQos {
    pub horizontal_accuracy: Option<u8>,
    pub vertical_coordinate_request: Option<bool>,
    pub vertical_accuracy: Option<u8>,
    pub response_time: Option<ResponseTime>,
    pub qos_class: Option<LcsQosClass>,
}

impl fmt::Display for LcsQos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsQos")?;
        fields.opt("horizontalAccuracy", self.horizontal_accuracy.as_ref())?;
        fields.opt(
            "verticalCoordinateRequest",
            self.vertical_coordinate_request.as_ref(),
        )?;
        fields.opt("verticalAccuracy", self.vertical_accuracy.as_ref())?;
        fields.opt("responseTime", self.response_time.as_ref())?;
        fields.opt("lcsQosClass", self.qos_class.as_ref())?;
        fields.finish()
    }
}

protocol_enum! {
    /// `LCS-Priority`
    pub enum LcsPriority {
        HighestPriority = 0 => "highestPriority",
        NormalPriority = 1 => "normalPriority",
    }
}

protocol_enum! {
    /// `PrivacyCheckRelatedAction`
    pub enum PrivacyCheckRelatedAction {
        AllowedWithoutNotification = 0 => "allowedWithoutNotification",
        AllowedWithNotification = 1 => "allowedWithNotification",
        AllowedIfNoResponse = 2 => "allowedIfNoResponse",
        RestrictedIfNoResponse = 3 => "restrictedIfNoResponse",
        NotAllowed = 4 => "notAllowed",
    }
}

/// `LCS-PrivacyCheck`: actions for call/session unrelated and related requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LcsPrivacyCheck {
    pub call_session_unrelated: Option<PrivacyCheckRelatedAction>,
    pub call_session_related: Option<PrivacyCheckRelatedAction>,
}

impl LcsPrivacyCheck {
    pub fn is_empty(&self) -> bool {
        self.call_session_unrelated.is_none() && self.call_session_related.is_none()
    }
}

impl fmt::Display for LcsPrivacyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsPrivacyCheck")?;
        fields.opt("callSessionUnrelated", self.call_session_unrelated.as_ref())?;
        fields.opt("callSessionRelated", self.call_session_related.as_ref())?;
        fields.finish()
    }
}

/// `LCSCodeword`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LcsCodeword {
    pub data_coding_scheme: u8,
    pub codeword: String,
}

impl fmt::Display for LcsCodeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsCodeword")?;
        fields.field("dataCodingScheme", &self.data_coding_scheme)?;
        fields.field("lcsCodewordString", &self.codeword)?;
        fields.finish()
    }
}
