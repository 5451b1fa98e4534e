use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use slide_align::config::AlignConfig;
use slide_align::ir::{Deck, Document, Slide};
use slide_align::layout::{Strategy, check_slide, prepare_slide, resolve_deck};
use slide_align::parser::parse_document;
use std::hint::black_box;

/// A 1280x720 slide with `count` components laid out on a loose lattice so that
/// neighbours overlap by roughly a third of their size.
fn dense_slide_source(count: usize) -> String {
    let mut components = Vec::with_capacity(count);
    for i in 0..count {
        let x = (i % 8) as f32 * 110.0 + 16.0;
        let y = (i / 8) as f32 * 60.0 + 16.0;
        components.push(format!(
            r#"{{"id": "c{i}", "type": "text", "box": {{"x": {x}, "y": {y}, "w": 150, "h": 90}}}}"#
        ));
    }
    format!(
        r#"{{"width": 1280, "height": 720, "components": [{}]}}"#,
        components.join(",")
    )
}

fn dense_deck_source(slides: usize, per_slide: usize) -> String {
    let slide = dense_slide_source(per_slide);
    let body = vec![slide; slides].join(",");
    format!(r#"{{"slide_size": "16x9", "slides": [{body}]}}"#)
}

fn parsed_slide(count: usize) -> Slide {
    match parse_document(&dense_slide_source(count)).expect("parse failed") {
        Document::Slide(slide) => slide,
        Document::Deck(_) => unreachable!("slide source parsed as a deck"),
    }
}

fn parsed_deck(slides: usize, per_slide: usize) -> Deck {
    match parse_document(&dense_deck_source(slides, per_slide)).expect("parse failed") {
        Document::Deck(deck) => deck,
        Document::Slide(_) => unreachable!("deck source parsed as a slide"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (slides, per_slide) in [(1usize, 16usize), (20, 24), (100, 24)] {
        let name = format!("deck_{slides}x{per_slide}");
        let input = dense_deck_source(slides, per_slide);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_document(black_box(data)).expect("parse failed");
                black_box(parsed);
            });
        });
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let config = AlignConfig::default();
    // 64 and below take the pairwise path, above it the sweep.
    for count in [16usize, 64, 65, 200] {
        let slide = parsed_slide(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &slide, |b, slide| {
            b.iter(|| {
                let overlaps = check_slide(black_box(slide), &config).expect("check failed");
                black_box(overlaps.len());
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let config = AlignConfig::default();
    for count in [8usize, 24, 48] {
        let slide = parsed_slide(count);
        let layout = prepare_slide(&slide, &config).expect("prepare failed");
        for strategy in [Strategy::PreserveOrder, Strategy::Compact, Strategy::Balanced] {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), count),
                &layout,
                |b, layout| {
                    b.iter(|| {
                        let resolved = layout.resolve(strategy, config.max_iterations);
                        black_box(resolved.report.moved_count);
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_deck");
    let config = AlignConfig::default();
    for slides in [10usize, 50] {
        let deck = parsed_deck(slides, 24);
        group.bench_with_input(BenchmarkId::from_parameter(slides), &deck, |b, deck| {
            b.iter(|| {
                let mut deck = deck.clone();
                let report = resolve_deck(black_box(&mut deck), &config).expect("resolve failed");
                black_box(report.total_moved);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_detect, bench_resolve, bench_deck);
criterion_main!(benches);
