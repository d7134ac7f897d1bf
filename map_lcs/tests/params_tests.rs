use std::net::{IpAddr, Ipv4Addr};

use map_lcs::{
    AccuracyFulfilmentIndicator, AdditionalNumber, Area, AreaDefinition, AreaEventInfo, AreaType,
    CellGlobalId, DeferredLocationEventType, DeferredMtLrData, DiameterIdentity,
    GanssMethod, GanssMethodUsage, GanssPositioningData, GeographicShape, GeranPositioningData,
    GeranPositioningMethod, GsnAddress, Imei, Imsi, IsdnAddress, LcsCapabilitySets, LcsClientId,
    LcsClientType, LcsCodeword, LcsEvent, LcsParams, LcsPriority, LcsPrivacyCheck, LcsQos,
    Lmsi, LocationEstimateType, LocationType, OccurrenceInfo, PeriodicLdrInfo, Plmn,
    PositioningUsage, PrivacyCheckRelatedAction, ReportingPlmn, ReportingPlmnList,
    ResponseTime, ResponseTimeCategory, SupportedShapes, TerminationCause, UtranPositioningData,
    UtranPositioningMethod, VelocityEstimate,
};

fn gmlc_address() -> GsnAddress {
    GsnAddress(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
}

#[test]
fn fresh_params_have_every_field_absent() {
    let params = LcsParams::new();
    assert_eq!(params.msisdn(), None);
    assert_eq!(params.imsi(), None);
    assert_eq!(params.imei(), None);
    assert_eq!(params.lmsi(), None);
    assert_eq!(params.network_node_number(), None);
    assert_eq!(params.additional_number(), None);
    assert_eq!(params.gprs_node_indicator(), None);
    assert_eq!(params.location_type(), None);
    assert_eq!(params.lcs_qos(), None);
    assert_eq!(params.lcs_privacy_check(), None);
    assert_eq!(params.geographic_shape(), None);
    assert_eq!(params.velocity_estimate(), None);
    assert_eq!(params.accuracy_fulfilment_indicator(), None);
    assert_eq!(params.lcs_reference_number(), None);
    assert_eq!(params.sequence_number(), None);
    assert_eq!(params.area_event_info(), None);
    assert_eq!(params.reporting_plmn_list(), None);
    assert_eq!(params, LcsParams::default());
}

#[test]
fn identity_round_trip() {
    let mut params = LcsParams::new();
    params.set_msisdn(IsdnAddress::international("33612345678"));
    params.set_imsi(Imsi::new("123450000000001"));
    params.set_imei(Imei::new("490154203237518"));
    params.set_lmsi(Lmsi([1, 2, 3, 4]));
    params.set_mme_name(DiameterIdentity::new("mme1.epc.mnc001.mcc001.3gppnetwork.org"));
    params.set_h_gmlc_address(gmlc_address());
    params.set_lcs_capability_sets(LcsCapabilitySets::LCS_CAPA_SET1 | LcsCapabilitySets::LCS_CAPA_SET2);

    assert_eq!(params.msisdn().map(IsdnAddress::digits), Some("33612345678"));
    assert_eq!(params.imsi(), Some(&Imsi::new("123450000000001")));
    assert_eq!(params.imei().map(Imei::as_str), Some("490154203237518"));
    assert_eq!(params.lmsi(), Some(Lmsi([1, 2, 3, 4])));
    assert_eq!(
        params.mme_name().map(DiameterIdentity::as_str),
        Some("mme1.epc.mnc001.mcc001.3gppnetwork.org")
    );
    assert_eq!(params.h_gmlc_address(), Some(gmlc_address()));
    assert_eq!(params.v_gmlc_address(), None);
    assert!(params
        .lcs_capability_sets()
        .unwrap()
        .contains(LcsCapabilitySets::LCS_CAPA_SET2));
}

#[test]
fn false_and_zero_are_not_absent() {
    let mut params = LcsParams::new();
    params.set_gprs_node_indicator(false);
    params.set_lcs_reference_number(0u8);
    params.set_age_of_location_estimate(0u16);

    assert_eq!(params.gprs_node_indicator(), Some(false));
    assert_eq!(params.lcs_reference_number(), Some(0));
    assert_eq!(params.age_of_location_estimate(), Some(0));
    let described = params.describe();
    assert!(described.contains("gprsNodeIndicator=false"));
    assert!(described.contains("lcsReferenceNumber=0"));
    assert!(!described.contains("sequenceNumber"));
}

#[test]
fn setting_none_clears_a_field() {
    let mut params = LcsParams::new();
    params.set_imsi(Imsi::new("001010000000001"));
    params.set_imsi(None);
    assert_eq!(params.imsi(), None);

    params.set_sequence_number(3u32);
    params.set_sequence_number(None);
    assert_eq!(params.sequence_number(), None);
}

#[test]
fn request_shape_round_trip() {
    let mut params = LcsParams::new();
    let location_type = LocationType::immediate(LocationEstimateType::CurrentOrLastKnownLocation);
    let qos = LcsQos {
        horizontal_accuracy: Some(18),
        vertical_coordinate_request: Some(true),
        vertical_accuracy: Some(30),
        response_time: Some(ResponseTime {
            category: ResponseTimeCategory::LowDelay,
            max_delay: Some(5),
        }),
        qos_class: None,
    };
    let privacy = LcsPrivacyCheck {
        call_session_unrelated: Some(PrivacyCheckRelatedAction::AllowedIfNoResponse),
        call_session_related: None,
    };
    let mut client = LcsClientId::new(LcsClientType::EmergencyServices);
    client.external_address = Some(IsdnAddress::international("112"));

    params.set_location_type(location_type);
    params.set_lcs_qos(qos);
    params.set_lcs_privacy_check(privacy);
    params.set_lcs_priority(LcsPriority::HighestPriority);
    params.set_lcs_client_id(client.clone());
    params.set_lcs_codeword(LcsCodeword {
        data_coding_scheme: 0x0f,
        codeword: "open sesame".into(),
    });
    params.set_supported_gad_shapes(SupportedShapes::ELLIPSOID_POINT | SupportedShapes::POLYGON);
    params.set_lcs_service_type_id(4u8);

    assert_eq!(params.location_type(), Some(location_type));
    assert_eq!(params.lcs_qos(), Some(&qos));
    assert_eq!(params.lcs_privacy_check(), Some(privacy));
    assert_eq!(params.lcs_priority(), Some(LcsPriority::HighestPriority));
    assert_eq!(params.lcs_client_id(), Some(&client));
    assert_eq!(params.lcs_service_type_id(), Some(4));
    assert_eq!(
        params.lcs_codeword().map(|c| c.codeword.as_str()),
        Some("open sesame")
    );
    assert!(params
        .supported_gad_shapes()
        .unwrap()
        .supports(map_lcs::TypeOfShape::Polygon));
}

#[test]
fn positioning_round_trip() {
    let mut params = LcsParams::new();
    let geran: GeranPositioningData = [(
        GeranPositioningMethod::TimingAdvance,
        PositioningUsage::ResultsUsedToGenerate,
    )]
    .into_iter()
    .collect();
    let ganss = GanssPositioningData {
        entries: vec![GanssMethodUsage {
            method: GanssMethod::MsBased,
            ganss_id: None,
            usage: PositioningUsage::ResultsUsedToVerify,
        }],
    };
    let velocity = VelocityEstimate::HorizontalVelocityWithUncertainty {
        bearing: 270,
        horizontal_speed: 42,
        uncertainty_speed: 5,
    };
    let cell = CellGlobalId {
        plmn: Plmn::new(1, 1, false),
        lac: 0x1234,
        cell_id: 0x0042,
    };

    params.set_geran_positioning_data(geran.clone());
    params.set_geran_ganss_positioning_data(ganss.clone());
    params.set_velocity_estimate(velocity);
    params.set_accuracy_fulfilment_indicator(AccuracyFulfilmentIndicator::RequestedAccuracyFulfilled);
    params.set_cell_global_id(cell);
    params.set_sai_present(true);

    assert_eq!(params.geran_positioning_data(), Some(&geran));
    assert_eq!(params.utran_positioning_data(), None);
    assert_eq!(params.geran_ganss_positioning_data(), Some(&ganss));
    assert_eq!(params.velocity_estimate(), Some(velocity));
    assert_eq!(
        params.accuracy_fulfilment_indicator(),
        Some(AccuracyFulfilmentIndicator::RequestedAccuracyFulfilled)
    );
    assert_eq!(params.cell_global_id(), Some(cell));
    assert_eq!(params.sai_present(), Some(true));
}

#[test]
fn deferred_round_trip() {
    let mut params = LcsParams::new();
    let area_event = AreaEventInfo {
        area_definition: AreaDefinition {
            areas: vec![Area {
                area_type: AreaType::CellGlobalId,
                identification: vec![0x00, 0xf1, 0x10, 0x12, 0x34, 0x00, 0x42],
            }],
        },
        occurrence_info: Some(OccurrenceInfo::MultipleTimeEvent),
        interval_time: Some(60),
    };
    let mut deferred = DeferredMtLrData::new(DeferredLocationEventType::ENTERING_INTO_AREA);
    deferred.termination_cause = Some(TerminationCause::Normal);
    let plmns = ReportingPlmnList {
        prioritized: true,
        plmns: vec![ReportingPlmn {
            plmn: Plmn::new(208, 1, false),
            ran_technology: None,
            ran_periodic_location_support: false,
        }],
    };

    params.set_lcs_event(LcsEvent::DeferredMtLrResponse);
    params.set_lcs_reference_number(17u8);
    params.set_area_event_info(area_event.clone());
    params.set_deferred_mt_lr_data(deferred.clone());
    params.set_periodic_ldr_info(PeriodicLdrInfo::new(10, 60));
    params.set_reporting_plmn_list(plmns.clone());
    params.set_pseudonym_indicator(false);

    assert_eq!(params.lcs_event(), Some(LcsEvent::DeferredMtLrResponse));
    assert_eq!(params.lcs_reference_number(), Some(17));
    assert_eq!(params.area_event_info(), Some(&area_event));
    assert_eq!(params.deferred_mt_lr_data(), Some(&deferred));
    assert_eq!(params.periodic_ldr_info(), Some(PeriodicLdrInfo::new(10, 60)));
    assert_eq!(params.reporting_plmn_list(), Some(&plmns));
    assert_eq!(params.pseudonym_indicator(), Some(false));
    assert_eq!(
        params.deferred_event_type(),
        Some(DeferredLocationEventType::ENTERING_INTO_AREA)
    );
}

#[test]
fn network_node_number_takes_precedence() {
    let node = IsdnAddress::international("33609000001");
    let additional = IsdnAddress::international("33609000002");

    let mut params = LcsParams::new();
    params.set_additional_number(AdditionalNumber::SgsnNumber(additional.clone()));
    assert_eq!(params.effective_serving_node_number(), Some(&additional));
    assert!(params.serving_node_is_sgsn());

    params.set_network_node_number(node.clone());
    assert_eq!(params.effective_serving_node_number(), Some(&node));
    assert!(!params.serving_node_is_sgsn());

    params.set_gprs_node_indicator(true);
    assert_eq!(params.effective_serving_node_number(), Some(&node));
    assert!(params.serving_node_is_sgsn());
}

#[test]
fn no_serving_node_without_numbers() {
    let params = LcsParams::new();
    assert_eq!(params.effective_serving_node_number(), None);
    assert!(!params.serving_node_is_sgsn());
}

#[test]
fn sequence_numbers_pass_through_unchanged() {
    let reports: Vec<LcsParams> = (1..=25u32)
        .map(|n| {
            let mut params = LcsParams::new();
            params.set_lcs_reference_number(9u8);
            params.set_sequence_number(n);
            params
        })
        .collect();
    let seen: Vec<u32> = reports.iter().filter_map(LcsParams::sequence_number).collect();
    assert_eq!(seen, (1..=25).collect::<Vec<_>>());

    // Out-of-order values are kept as given.
    let mut params = LcsParams::new();
    params.set_sequence_number(7u32);
    params.set_sequence_number(3u32);
    assert_eq!(params.sequence_number(), Some(3));
}

#[test]
fn describe_lists_only_present_fields() {
    let mut params = LcsParams::new();
    params.set_imsi(Imsi::new("123450000000001"));
    params.set_lcs_qos(LcsQos {
        horizontal_accuracy: Some(10),
        ..Default::default()
    });

    let described = params.describe();
    assert!(described.contains("123450000000001"));
    assert!(described.contains("horizontalAccuracy=10"));
    for absent in [
        "msisdn",
        "imei",
        "lmsi",
        "networkNodeNumber",
        "verticalAccuracy",
        "responseTime",
        "locationEstimate",
        "lcsReferenceNumber",
        "sequenceNumber",
    ] {
        assert!(!described.contains(absent), "{} in {}", absent, described);
    }
}

#[test]
fn describe_is_in_fixed_field_order() {
    let mut params = LcsParams::new();
    params.set_sequence_number(2u32);
    params.set_geographic_shape(GeographicShape::point(1.5, -2.25));
    params.set_lcs_reference_number(4u8);
    params.set_msisdn(IsdnAddress::international("4912345"));

    assert_eq!(
        params.describe(),
        "LcsParams [msisdn=4912345 (international/isdn), \
         locationEstimate=ellipsoidPoint [latitude=1.5, longitude=-2.25], \
         lcsReferenceNumber=4, sequenceNumber=2]"
    );
    assert_eq!(params.describe(), params.clone().describe());
}

#[test]
fn describe_renders_nested_groups() {
    let mut params = LcsParams::new();
    params.set_location_type(LocationType::deferred(
        DeferredLocationEventType::ENTERING_INTO_AREA | DeferredLocationEventType::PERIODIC_LDR,
    ));
    params.set_lcs_privacy_check(LcsPrivacyCheck {
        call_session_unrelated: None,
        call_session_related: Some(PrivacyCheckRelatedAction::NotAllowed),
    });
    params.set_additional_number(AdditionalNumber::MscNumber(IsdnAddress::international("1")));

    assert_eq!(
        params.describe(),
        "LcsParams [additionalNumber=msc-Number 1 (international/isdn), \
         locationType=LocationType [locationEstimateType=activateDeferredLocation, \
         deferredLocationEventType=ENTERING_INTO_AREA | PERIODIC_LDR], \
         lcsPrivacyCheck=LcsPrivacyCheck [callSessionRelated=notAllowed]]"
    );
}

/// One row per aggregate field, in declaration order: label, getter kind, getter, setter, value.
macro_rules! every_field {
    ($check:ident) => {{
        let mut labels = Vec::new();
        $check!(labels, "msisdn", borrowed msisdn, set_msisdn, IsdnAddress::international("4912345"));
        $check!(labels, "imsi", borrowed imsi, set_imsi, Imsi::new("001010000000001"));
        $check!(labels, "imei", borrowed imei, set_imei, Imei::new("490154203237518"));
        $check!(labels, "lmsi", copy lmsi, set_lmsi, Lmsi([0, 0, 0, 1]));
        $check!(labels, "networkNodeNumber", borrowed network_node_number, set_network_node_number,
            IsdnAddress::international("4917200001"));
        $check!(labels, "additionalNumber", borrowed additional_number, set_additional_number,
            AdditionalNumber::SgsnNumber(IsdnAddress::international("4917200002")));
        $check!(labels, "gprsNodeIndicator", copy gprs_node_indicator, set_gprs_node_indicator, true);
        $check!(labels, "mmeName", borrowed mme_name, set_mme_name, DiameterIdentity::new("mme.example"));
        $check!(labels, "sgsnName", borrowed sgsn_name, set_sgsn_name, DiameterIdentity::new("sgsn.example"));
        $check!(labels, "aaaServerName", borrowed aaa_server_name, set_aaa_server_name,
            DiameterIdentity::new("aaa.example"));
        $check!(labels, "hGmlcAddress", copy h_gmlc_address, set_h_gmlc_address, gmlc_address());
        $check!(labels, "vGmlcAddress", copy v_gmlc_address, set_v_gmlc_address, gmlc_address());
        $check!(labels, "pprAddress", copy ppr_address, set_ppr_address, gmlc_address());
        $check!(labels, "mlcNumber", borrowed mlc_number, set_mlc_number, IsdnAddress::international("4917200003"));
        $check!(labels, "lcsCapabilitySets", copy lcs_capability_sets, set_lcs_capability_sets,
            LcsCapabilitySets::LCS_CAPA_SET1);
        $check!(labels, "locationType", copy location_type, set_location_type,
            LocationType::immediate(LocationEstimateType::CurrentLocation));
        $check!(labels, "lcsClientId", borrowed lcs_client_id, set_lcs_client_id,
            LcsClientId::new(LcsClientType::PlmnOperatorServices));
        $check!(labels, "lcsPriority", copy lcs_priority, set_lcs_priority, LcsPriority::NormalPriority);
        $check!(labels, "lcsQos", borrowed lcs_qos, set_lcs_qos, LcsQos {
            horizontal_accuracy: Some(1),
            ..Default::default()
        });
        $check!(labels, "lcsPrivacyCheck", copy lcs_privacy_check, set_lcs_privacy_check, LcsPrivacyCheck {
            call_session_unrelated: Some(PrivacyCheckRelatedAction::NotAllowed),
            call_session_related: None,
        });
        $check!(labels, "lcsCodeword", borrowed lcs_codeword, set_lcs_codeword, LcsCodeword {
            data_coding_scheme: 0,
            codeword: "w".into(),
        });
        $check!(labels, "lcsServiceTypeId", copy lcs_service_type_id, set_lcs_service_type_id, 0u8);
        $check!(labels, "supportedGadShapes", copy supported_gad_shapes, set_supported_gad_shapes,
            SupportedShapes::POLYGON);
        $check!(labels, "privacyOverride", copy privacy_override, set_privacy_override, false);
        $check!(labels, "moLrShortCircuitIndicator", copy mo_lr_short_circuit_indicator,
            set_mo_lr_short_circuit_indicator, true);
        $check!(labels, "locationEstimate", borrowed geographic_shape, set_geographic_shape,
            GeographicShape::point(0.0, 0.0));
        $check!(labels, "additionalLocationEstimate", borrowed additional_geographic_shape,
            set_additional_geographic_shape, GeographicShape::circle(0.0, 0.0, 10.0));
        $check!(labels, "ageOfLocationEstimate", copy age_of_location_estimate, set_age_of_location_estimate, 0u16);
        $check!(labels, "geranPositioningData", borrowed geran_positioning_data, set_geran_positioning_data,
            [(GeranPositioningMethod::TimingAdvance, PositioningUsage::ResultsNotUsed)]
                .into_iter()
                .collect::<GeranPositioningData>());
        $check!(labels, "utranPositioningData", borrowed utran_positioning_data, set_utran_positioning_data,
            [(UtranPositioningMethod::CellId, PositioningUsage::ResultsUsedToGenerate)]
                .into_iter()
                .collect::<UtranPositioningData>());
        $check!(labels, "geranGanssPositioningData", borrowed geran_ganss_positioning_data,
            set_geran_ganss_positioning_data, GanssPositioningData::default());
        $check!(labels, "utranGanssPositioningData", borrowed utran_ganss_positioning_data,
            set_utran_ganss_positioning_data, GanssPositioningData {
                entries: vec![GanssMethodUsage {
                    method: GanssMethod::Conventional,
                    ganss_id: None,
                    usage: PositioningUsage::MethodUndetermined,
                }],
            });
        $check!(labels, "velocityEstimate", copy velocity_estimate, set_velocity_estimate,
            VelocityEstimate::HorizontalVelocity { bearing: 0, horizontal_speed: 0 });
        $check!(labels, "accuracyFulfilmentIndicator", copy accuracy_fulfilment_indicator,
            set_accuracy_fulfilment_indicator, AccuracyFulfilmentIndicator::RequestedAccuracyNotFulfilled);
        $check!(labels, "cellGlobalId", copy cell_global_id, set_cell_global_id, CellGlobalId {
            plmn: Plmn::new(1, 1, false),
            lac: 0,
            cell_id: 0,
        });
        $check!(labels, "saiPresent", copy sai_present, set_sai_present, false);
        $check!(labels, "lcsEvent", copy lcs_event, set_lcs_event, LcsEvent::MoLr);
        $check!(labels, "lcsReferenceNumber", copy lcs_reference_number, set_lcs_reference_number, 0u8);
        $check!(labels, "areaEventInfo", borrowed area_event_info, set_area_event_info, AreaEventInfo::default());
        $check!(labels, "deferredMtLrData", borrowed deferred_mt_lr_data, set_deferred_mt_lr_data,
            DeferredMtLrData::new(DeferredLocationEventType::MS_AVAILABLE));
        $check!(labels, "periodicLdrInfo", copy periodic_ldr_info, set_periodic_ldr_info, PeriodicLdrInfo::new(1, 1));
        $check!(labels, "sequenceNumber", copy sequence_number, set_sequence_number, 1u32);
        $check!(labels, "reportingPlmnList", borrowed reporting_plmn_list, set_reporting_plmn_list,
            ReportingPlmnList::default());
        $check!(labels, "pseudonymIndicator", copy pseudonym_indicator, set_pseudonym_indicator, false);
        labels
    }};
}

macro_rules! single_field_round_trip {
    ($labels:ident, $label:literal, $kind:ident $get:ident, $set:ident, $value:expr) => {{
        let value = $value;
        let mut params = LcsParams::new();
        assert_eq!(params.$get(), None, "{} present on a fresh aggregate", $label);

        params.$set(value.clone());
        single_field_round_trip!(@get $kind params.$get(), value, $label);
        assert!(
            params.describe().starts_with(concat!("LcsParams [", $label, "=")),
            "{}",
            params.describe()
        );

        params.$set(None);
        assert_eq!(params.$get(), None, "{} not cleared", $label);
        assert_eq!(params, LcsParams::new());
        $labels.push($label);
    }};
    (@get copy $got:expr, $value:expr, $label:literal) => {
        assert_eq!($got, Some($value), "{}", $label)
    };
    (@get borrowed $got:expr, $value:expr, $label:literal) => {
        assert_eq!($got, Some(&$value), "{}", $label)
    };
}

#[test]
fn every_field_round_trips_and_clears() {
    let labels: Vec<&str> = every_field!(single_field_round_trip);
    assert_eq!(labels.len(), 44);
}

#[test]
fn fully_populated_describe_keeps_declaration_order() {
    let mut params = LcsParams::new();
    macro_rules! populate {
        ($labels:ident, $label:literal, $kind:ident $get:ident, $set:ident, $value:expr) => {{
            params.$set($value);
            $labels.push($label);
        }};
    }
    let labels: Vec<&str> = every_field!(populate);
    assert_eq!(labels.len(), 44);

    let described = params.describe();
    let mut last = 0;
    for label in labels {
        let needle = format!(", {}=", label);
        let position = if last == 0 {
            described.find(&format!("[{}=", label))
        } else {
            described[last..].find(&needle).map(|offset| last + offset)
        };
        let position = position.unwrap_or_else(|| panic!("{} missing or out of order", label));
        assert!(position >= last);
        last = position + 1;
    }
}
