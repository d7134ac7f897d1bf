use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use map_lcs::*;

fn populated_report(points: usize) -> LcsParams {
    let mut params = LcsParams::new();
    params.set_msisdn(IsdnAddress::international("491720000001"));
    params.set_network_node_number(IsdnAddress::international("491720009999"));
    params.set_lcs_event(LcsEvent::DeferredMtLrResponse);
    params.set_lcs_reference_number(42u8);
    params.set_sequence_number(7u32);
    params.set_supported_gad_shapes(SupportedShapes::all());
    params.set_geographic_shape(GeographicShape::Polygon(
        (0..points)
            .map(|i| Coordinates::new(50.0 + i as f64 * 0.01, 8.0 - i as f64 * 0.01))
            .collect(),
    ));
    params.set_reporting_plmn_list(ReportingPlmnList {
        prioritized: true,
        plmns: (1..=20)
            .map(|mnc| ReportingPlmn {
                plmn: Plmn::new(262, mnc, false),
                ran_technology: Some(RanTechnology::Umts),
                ran_periodic_location_support: true,
            })
            .collect(),
    });
    params
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for points in &[3, 15] {
        let params = populated_report(*points);
        c.bench_function(&format!("describe_polygon_{}", points), |b| {
            b.iter(|| black_box(&params).describe())
        });
    }

    let validator = Validator::default();
    let params = populated_report(15);
    c.bench_function("validate_report", |b| {
        b.iter(|| validator.validate(black_box(&params), LcsOperation::SubscriberLocationReport))
    });
    c.bench_function("violations_report", |b| {
        b.iter(|| validator.violations(black_box(&params), LcsOperation::SubscriberLocationReport))
    });

    c.bench_function("sequence_tracker_1000", |b| {
        let reports: Vec<LcsParams> = (1..=1000u32)
            .map(|sequence| {
                let mut report = params.clone();
                report.set_sequence_number(sequence);
                report
            })
            .collect();
        b.iter(|| {
            let mut tracker = SequenceTracker::new();
            for report in &reports {
                let _ = tracker.observe(report);
            }
            tracker.last_sequence(42)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
