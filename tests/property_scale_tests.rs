use proptest::prelude::*;
use specificity_graph::core::LinearScale;
use specificity_graph::interaction::nearest_index;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new((domain_start, domain_end), (60.0, 1988.0)).expect("valid scale");
        let px = scale.domain_to_pixel(value).expect("to pixel");
        let recovered = scale.pixel_to_domain(px).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn nice_domain_contains_original(
        start in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0
    ) {
        let scale = LinearScale::new((start, start + span), (0.0, 100.0))
            .expect("valid scale")
            .nice(10);
        let (low, high) = scale.domain();
        prop_assert!(low <= start);
        prop_assert!(high >= start + span);
    }

    #[test]
    fn nearest_index_is_closest(
        mut xs in prop::collection::vec(-1_000.0f64..1_000.0, 1..64),
        target in -1_200.0f64..1_200.0
    ) {
        xs.sort_by(f64::total_cmp);
        let index = nearest_index(&xs, target).expect("non-empty");
        let best = (xs[index] - target).abs();
        for x in &xs {
            prop_assert!(best <= (x - target).abs());
        }
    }
}
