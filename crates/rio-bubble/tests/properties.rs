//! Property tests for the geometry, packing, and circle reconciliation invariants.

use std::f64::consts::TAU;

use proptest::prelude::*;
use rio_bubble::{
    almost_equal, compute_diameters, perimeter, position_along_perimeter, BubbleAnimationState, BubbleConfig,
    BubbleType, CircleAnimationManager, CircleId,
};

fn bubble_type() -> impl Strategy<Value = BubbleType> {
    prop_oneof![Just(BubbleType::Thinking), Just(BubbleType::Talking), Just(BubbleType::Read)]
}

proptest! {
    #[test]
    fn perimeter_matches_closed_form(
        w in 1.0f64..500.0,
        h in 1.0f64..500.0,
        frac in 0.0f64..=1.0,
    ) {
        let r = frac * w.min(h) / 2.0;
        let expected = 2.0 * (w - 2.0 * r) + 2.0 * (h - 2.0 * r) + TAU * r;
        prop_assert!((perimeter(w, h, r) - expected).abs() < 1e-9 * expected.max(1.0));
    }

    #[test]
    fn positions_stay_on_bounding_box(
        w in 1.0f64..300.0,
        h in 1.0f64..300.0,
        frac in 0.0f64..=1.0,
        s in -1000.0f64..1000.0,
    ) {
        let r = frac * w.min(h) / 2.0;
        let p = position_along_perimeter(s, w, h, r);
        prop_assert!(p.x >= -1e-9 && p.x <= w + 1e-9);
        prop_assert!(p.y >= -1e-9 && p.y <= h + 1e-9);
    }

    #[test]
    fn valid_packing_sums_to_target_within_bounds(
        target in 1.0f64..2000.0,
        min in 2.0f64..30.0,
        spread in 0.0f64..40.0,
        seed in any::<u64>(),
    ) {
        let max = min + spread;
        let result = compute_diameters(target, min, max, seed);
        if result.is_valid {
            prop_assert!((result.sum() - target).abs() < 1e-6 * target.max(1.0));
            for &d in &result.diameters {
                prop_assert!(d >= min * 0.99 - 1e-9 && d <= max * 1.01 + 1e-9, "{d} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn wide_bounds_always_pack(
        target in 10.0f64..2000.0,
        seed in any::<u64>(),
    ) {
        // max >= 2 * min leaves no unplaceable remainder
        let result = compute_diameters(target, 10.0, 20.0, seed);
        prop_assert!(result.is_valid);
        prop_assert!(result.diameters.iter().all(|&d| (10.0 - 1e-9..=20.0 + 1e-9).contains(&d)));
    }

    #[test]
    fn packing_is_deterministic(
        target in 0.0f64..2000.0,
        min in 1.0f64..30.0,
        spread in 0.0f64..40.0,
        seed in any::<u64>(),
    ) {
        let a = compute_diameters(target, min, min + spread, seed);
        let b = compute_diameters(target, min, min + spread, seed);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn transition_is_total_and_resolves_to_destination(
        from in bubble_type(),
        to in bubble_type(),
        t0 in 0.0f64..1000.0,
    ) {
        let config = BubbleConfig::default();
        let state = BubbleAnimationState::transition(from, to, t0);
        prop_assert_eq!(state.target_type(), to);

        let end = t0 + state.duration(&config);
        prop_assert!(state.is_complete(end, &config));
        let p = state.morph_progress(t0, &config);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn growth_preserves_ids(
        initial in prop::collection::vec(5.0f64..20.0, 0..12),
        extra in prop::collection::vec(5.0f64..20.0, 1..8),
    ) {
        let mut m = CircleAnimationManager::new(0.3);
        m.configure_initial(&initial);
        let n = initial.len();

        let mut targets = initial.clone();
        targets.extend(&extra);
        m.update_transitions(&targets, 1.0);

        let transitions = m.transitions();
        prop_assert_eq!(transitions.len(), n + extra.len());
        for (i, t) in transitions.iter().enumerate() {
            if i < n {
                prop_assert_eq!(t.id, CircleId(i as u64));
            } else {
                prop_assert!(t.id.0 >= n as u64);
                prop_assert_eq!(t.start_value, 0.0);
            }
        }
    }

    #[test]
    fn shrink_drops_ids_after_transition(
        initial in prop::collection::vec(5.0f64..20.0, 2..12),
        keep_frac in 0.0f64..1.0,
    ) {
        let duration = 0.3;
        let mut m = CircleAnimationManager::new(duration);
        m.configure_initial(&initial);
        let keep = ((initial.len() as f64) * keep_frac) as usize;
        let keep = keep.min(initial.len() - 1);

        m.update_transitions(&initial[..keep], 2.0);
        let gone: Vec<CircleId> = m.transitions()[keep..].iter().map(|t| t.id).collect();
        for t in &m.transitions()[keep..] {
            prop_assert!(t.is_disappearing);
            prop_assert_eq!(t.end_value, 0.0);
        }

        let after = m.current_base_circles(2.0 + duration);
        prop_assert!(after.iter().all(|c| !gone.contains(&c.id)));
        prop_assert_eq!(after.len(), keep);
        prop_assert!(almost_equal(&m.current_base_diameters(2.0 + duration), &initial[..keep], 1e-9));
    }
}
