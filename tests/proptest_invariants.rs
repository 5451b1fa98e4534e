//! Property-based invariant tests for slide resolution.
//!
//! Verifies, for every strategy:
//! 1. Bounds: every positional box ends inside the content area
//! 2. Clean reports mean the detector finds nothing on the result
//! 3. Termination: iterations never exceed the cap, and a partial result used all of it
//! 4. Idempotence: resolving a clean result again moves nothing
//! 5. Determinism: the same slide and config always give the same boxes
//! 6. Non-positional components and component order are never touched

use proptest::prelude::*;
use proptest::strategy::Strategy as PropStrategy;
use slide_align::{
    AlignConfig, Component, ComponentKind, GridSpec, Margin, Rect, Slide, Strategy, check_slide,
    prepare_slide, resolve_slide,
};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 300.0;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_strategy() -> impl PropStrategy<Value = Strategy> {
    prop_oneof![
        Just(Strategy::PreserveOrder),
        Just(Strategy::Compact),
        Just(Strategy::Balanced),
    ]
}

fn arb_grid() -> impl PropStrategy<Value = GridSpec> {
    (0u8..=20, 0u8..=12, 1i64..=6).prop_map(|(margin, gutter, columns)| GridSpec {
        margin: Margin::Uniform(f32::from(margin)),
        gutter: f32::from(gutter),
        columns,
        snap: None,
    })
}

fn arb_component(index: usize) -> impl PropStrategy<Value = Component> {
    (-20i16..400, -20i16..300, 5i16..150, 5i16..120, prop::bool::weighted(0.1)).prop_map(
        move |(x, y, w, h, background)| {
            let comp = Component::new(
                format!("c{index}"),
                ComponentKind::Shape,
                Rect::new(f32::from(x), f32::from(y), f32::from(w), f32::from(h)),
            );
            if background { comp.non_positional() } else { comp }
        },
    )
}

fn arb_slide() -> impl PropStrategy<Value = Slide> {
    (arb_grid(), 0usize..12).prop_flat_map(|(grid, count)| {
        let components: Vec<_> = (0..count).map(arb_component).collect();
        (Just(grid), components).prop_map(|(grid, components)| {
            let mut slide = Slide::new(WIDTH, HEIGHT, grid);
            slide.components = components;
            slide
        })
    })
}

fn arb_config() -> impl PropStrategy<Value = AlignConfig> {
    (arb_strategy(), 0usize..8).prop_map(|(strategy, max_iterations)| AlignConfig {
        max_iterations,
        ..AlignConfig::default().with_strategy(strategy)
    })
}

fn boxes(slide: &Slide) -> Vec<Option<Rect>> {
    slide.components.iter().map(|comp| comp.bounds).collect()
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn positional_boxes_end_inside_content(slide in arb_slide(), config in arb_config()) {
        let mut resolved = slide.clone();
        resolve_slide(&mut resolved, &config).expect("resolve");
        let layout = prepare_slide(&resolved, &config).expect("prepare");
        prop_assert!(layout.out_of_bounds().is_empty());
    }

    #[test]
    fn clean_report_means_no_overlaps(slide in arb_slide(), config in arb_config()) {
        let mut resolved = slide.clone();
        let report = resolve_slide(&mut resolved, &config).expect("resolve");
        let remaining = check_slide(&resolved, &config).expect("check");
        prop_assert_eq!(report.clean, remaining.is_empty());
        prop_assert_eq!(report.unresolved, remaining);
    }

    #[test]
    fn iterations_are_bounded(slide in arb_slide(), config in arb_config()) {
        let mut resolved = slide.clone();
        let report = resolve_slide(&mut resolved, &config).expect("resolve");
        prop_assert!(report.iterations <= config.max_iterations);
        if !report.clean {
            prop_assert_eq!(report.iterations, config.max_iterations);
        }
    }

    #[test]
    fn clean_results_are_fixed_points(slide in arb_slide(), config in arb_config()) {
        let mut resolved = slide.clone();
        let report = resolve_slide(&mut resolved, &config).expect("resolve");
        prop_assume!(report.clean);
        let before = boxes(&resolved);
        let again = resolve_slide(&mut resolved, &config).expect("resolve again");
        prop_assert!(again.clean);
        prop_assert_eq!(again.moved_count, 0);
        prop_assert_eq!(again.iterations, 0);
        prop_assert_eq!(boxes(&resolved), before);
    }

    #[test]
    fn resolution_is_deterministic(slide in arb_slide(), config in arb_config()) {
        let mut first = slide.clone();
        let mut second = slide.clone();
        let a = resolve_slide(&mut first, &config).expect("first");
        let b = resolve_slide(&mut second, &config).expect("second");
        prop_assert_eq!(a, b);
        prop_assert_eq!(boxes(&first), boxes(&second));
    }

    #[test]
    fn background_and_order_are_preserved(slide in arb_slide(), config in arb_config()) {
        let mut resolved = slide.clone();
        resolve_slide(&mut resolved, &config).expect("resolve");
        prop_assert_eq!(resolved.components.len(), slide.components.len());
        for (after, before) in resolved.components.iter().zip(&slide.components) {
            prop_assert_eq!(&after.id, &before.id);
            if before.non_positional {
                prop_assert_eq!(after.bounds, before.bounds);
            }
        }
    }
}
