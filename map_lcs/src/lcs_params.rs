use core::fmt;

/// Declares a MAP `ENUMERATED` (or small `INTEGER`) parameter with its raw protocol codes.
///
/// Generates `code()`, `name()`, `TryFrom<u8>` and a `Display` that renders the ASN.1 identifier.
macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $asn:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $code, )+
        }

        impl $name {
            /// Raw protocol code
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// ASN.1 identifier
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $asn, )+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = &'static str;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $code => Ok($name::$variant), )+
                    _ => Err(concat!("Invalid ", stringify!($name), " value")),
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

mod deferred;
mod identity;
mod positioning;
mod request;
mod shape;

pub use deferred::*;
pub use identity::*;
pub use positioning::*;
pub use request::*;
pub use shape::*;

/// Writes `Name [label=value, ...]`, skipping absent values.
pub(crate) struct Fields<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    empty: bool,
}

impl<'a, 'b> Fields<'a, 'b> {
    pub(crate) fn new(f: &'a mut fmt::Formatter<'b>, name: &str) -> Result<Self, fmt::Error> {
        write!(f, "{} [", name)?;
        Ok(Self { f, empty: true })
    }

    pub(crate) fn field(&mut self, label: &str, value: &dyn fmt::Display) -> fmt::Result {
        if !self.empty {
            self.f.write_str(", ")?;
        }
        self.empty = false;
        write!(self.f, "{}={}", label, value)
    }

    pub(crate) fn opt<T: fmt::Display>(&mut self, label: &str, value: Option<&T>) -> fmt::Result {
        match value {
            Some(value) => self.field(label, value),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> fmt::Result {
        self.f.write_str("]")
    }
}

/// Renders a set of bitflags as `A | B`, or `(empty)`.
pub(crate) fn fmt_flags<F: bitflags::Flags>(flags: &F, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (name, _) in flags.iter_names() {
        if !first {
            f.write_str(" | ")?;
        }
        first = false;
        f.write_str(name)?;
    }
    if first {
        f.write_str("(empty)")?;
    }
    Ok(())
}

pub(crate) fn fmt_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// Renders a list as `[a, b, c]`.
pub(crate) fn fmt_list<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

macro_rules! lcs_params {
    (@get copy $(#[$meta:meta])* $field:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<$ty> {
            self.$field
        }
    };
    (@get borrowed $(#[$meta:meta])* $field:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $field(&self) -> Option<&$ty> {
            self.$field.as_ref()
        }
    };
    (
        $(
            $(#[$meta:meta])*
            $label:literal $field:ident, $setter:ident: $kind:ident $ty:ty;
        )+
    ) => {
        /// Every optional or conditional parameter of a MAP LCS request or response.
        ///
        /// One instance carries one `provideSubscriberLocation` or `subscriberLocationReport`
        /// pass. All fields start absent and accept any value; conditional-mandatory rules are
        /// checked by [`Validator`](crate::Validator), never here.
        ///
        /// Setters take `impl Into<Option<T>>`, so a value sets the field and `None` clears it.
        /// Integer literals cannot be inferred through that bound: write `3u32` or `Some(3)`.
        ///
        /// ```
        /// let mut params = map_lcs::LcsParams::new();
        /// params.set_sequence_number(3u32);
        /// params.set_lcs_reference_number(Some(7));
        /// assert_eq!(params.sequence_number(), Some(3));
        /// assert_eq!(params.lcs_reference_number(), Some(7));
        /// ```
        #[derive(Debug, Clone, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        pub struct LcsParams {
            $( $field: Option<$ty>, )+
        }

        impl LcsParams {
            $(
                lcs_params!(@get $kind $(#[$meta])* $field: $ty);

                #[doc = concat!("Sets `", $label, "`, or clears it when given `None`.")]
                ///
                /// Integer literals need a type suffix or `Some(..)`.
                pub fn $setter(&mut self, value: impl Into<Option<$ty>>) {
                    self.$field = value.into();
                }
            )+

            fn write_fields(&self, fields: &mut Fields<'_, '_>) -> fmt::Result {
                $( fields.opt($label, self.$field.as_ref())?; )+
                Ok(())
            }
        }
    };
}

lcs_params! {
    // Identity
    /// Target directory number
    "msisdn" msisdn, set_msisdn: borrowed IsdnAddress;
    /// Target subscriber identity
    "imsi" imsi, set_imsi: borrowed Imsi;
    /// Target equipment identity
    "imei" imei, set_imei: borrowed Imei;
    /// VLR-local correlation handle; never identifies the target on its own
    "lmsi" lmsi, set_lmsi: copy Lmsi;
    /// MSC, MME, SGSN or Router number of the serving node
    "networkNodeNumber" network_node_number, set_network_node_number: borrowed IsdnAddress;
    /// Secondary serving node number
    "additionalNumber" additional_number, set_additional_number: borrowed AdditionalNumber;
    /// The conveyed node number belongs to an SGSN
    "gprsNodeIndicator" gprs_node_indicator, set_gprs_node_indicator: copy bool;
    "mmeName" mme_name, set_mme_name: borrowed DiameterIdentity;
    "sgsnName" sgsn_name, set_sgsn_name: borrowed DiameterIdentity;
    "aaaServerName" aaa_server_name, set_aaa_server_name: borrowed DiameterIdentity;
    "hGmlcAddress" h_gmlc_address, set_h_gmlc_address: copy GsnAddress;
    "vGmlcAddress" v_gmlc_address, set_v_gmlc_address: copy GsnAddress;
    "pprAddress" ppr_address, set_ppr_address: copy GsnAddress;
    /// Number of the requesting GMLC
    "mlcNumber" mlc_number, set_mlc_number: borrowed IsdnAddress;
    "lcsCapabilitySets" lcs_capability_sets, set_lcs_capability_sets: copy LcsCapabilitySets;

    // Request shape
    "locationType" location_type, set_location_type: copy LocationType;
    "lcsClientId" lcs_client_id, set_lcs_client_id: borrowed LcsClientId;
    "lcsPriority" lcs_priority, set_lcs_priority: copy LcsPriority;
    "lcsQos" lcs_qos, set_lcs_qos: borrowed LcsQos;
    "lcsPrivacyCheck" lcs_privacy_check, set_lcs_privacy_check: copy LcsPrivacyCheck;
    "lcsCodeword" lcs_codeword, set_lcs_codeword: borrowed LcsCodeword;
    "lcsServiceTypeId" lcs_service_type_id, set_lcs_service_type_id: copy u8;
    /// Shapes the requesting node can receive
    "supportedGadShapes" supported_gad_shapes, set_supported_gad_shapes: copy SupportedShapes;
    "privacyOverride" privacy_override, set_privacy_override: copy bool;
    "moLrShortCircuitIndicator" mo_lr_short_circuit_indicator, set_mo_lr_short_circuit_indicator: copy bool;

    // Geographic shape
    /// The location estimate; exactly one shape variant at a time
    "locationEstimate" geographic_shape, set_geographic_shape: borrowed GeographicShape;
    "additionalLocationEstimate" additional_geographic_shape, set_additional_geographic_shape: borrowed GeographicShape;
    /// Minutes since the estimate was obtained
    "ageOfLocationEstimate" age_of_location_estimate, set_age_of_location_estimate: copy u16;

    // Positioning data
    "geranPositioningData" geran_positioning_data, set_geran_positioning_data: borrowed GeranPositioningData;
    "utranPositioningData" utran_positioning_data, set_utran_positioning_data: borrowed UtranPositioningData;
    "geranGanssPositioningData" geran_ganss_positioning_data, set_geran_ganss_positioning_data: borrowed GanssPositioningData;
    "utranGanssPositioningData" utran_ganss_positioning_data, set_utran_ganss_positioning_data: borrowed GanssPositioningData;
    "velocityEstimate" velocity_estimate, set_velocity_estimate: copy VelocityEstimate;
    "accuracyFulfilmentIndicator" accuracy_fulfilment_indicator, set_accuracy_fulfilment_indicator: copy AccuracyFulfilmentIndicator;
    "cellGlobalId" cell_global_id, set_cell_global_id: copy CellGlobalId;
    "saiPresent" sai_present, set_sai_present: copy bool;

    // Deferred and periodic
    "lcsEvent" lcs_event, set_lcs_event: copy LcsEvent;
    /// Correlates every report of one deferred MT-LR
    "lcsReferenceNumber" lcs_reference_number, set_lcs_reference_number: copy u8;
    "areaEventInfo" area_event_info, set_area_event_info: borrowed AreaEventInfo;
    "deferredMtLrData" deferred_mt_lr_data, set_deferred_mt_lr_data: borrowed DeferredMtLrData;
    "periodicLdrInfo" periodic_ldr_info, set_periodic_ldr_info: copy PeriodicLdrInfo;
    /// Report counter within one periodic MT-LR, passed through as given
    "sequenceNumber" sequence_number, set_sequence_number: copy u32;
    "reportingPlmnList" reporting_plmn_list, set_reporting_plmn_list: borrowed ReportingPlmnList;
    "pseudonymIndicator" pseudonym_indicator, set_pseudonym_indicator: copy bool;
}

impl LcsParams {
    /// Creates an aggregate with every parameter absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serving node number to use for a successful response.
    ///
    /// `networkNodeNumber` always wins over `additionalNumber` when both are present.
    pub fn effective_serving_node_number(&self) -> Option<&IsdnAddress> {
        self.network_node_number
            .as_ref()
            .or_else(|| self.additional_number.as_ref().map(AdditionalNumber::number))
    }

    /// Whether the node behind [`effective_serving_node_number`](Self::effective_serving_node_number)
    /// is an SGSN.
    pub fn serving_node_is_sgsn(&self) -> bool {
        match (&self.network_node_number, &self.additional_number) {
            (Some(_), _) => self.gprs_node_indicator == Some(true),
            (None, Some(additional)) => additional.is_sgsn(),
            (None, None) => false,
        }
    }

    /// Deferred event type of the request, taken from `locationType` when it activates a
    /// deferred location, else from `deferredMtLrData`.
    pub fn deferred_event_type(&self) -> Option<DeferredLocationEventType> {
        self.location_type
            .filter(LocationType::is_deferred_activation)
            .and_then(|location_type| location_type.deferred_location_event_type)
            .or_else(|| {
                self.deferred_mt_lr_data
                    .as_ref()
                    .map(|data| data.deferred_location_event_type)
            })
    }

    /// Stable rendering of every present parameter, in declaration order.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LcsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "LcsParams")?;
        self.write_fields(&mut fields)?;
        fields.finish()
    }
}
