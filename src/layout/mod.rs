mod balanced;
mod compact;
pub mod geometry;
pub mod grid;
mod overlap;
mod preserve_order;
pub(crate) mod types;
pub use geometry::{Rect, clamp_to_bounds, intersection, intersects};
pub use grid::{Column, GridModel};
pub use types::*;
use balanced::*;
use compact::*;
use overlap::detect_overlaps;
use preserve_order::*;

use crate::config::AlignConfig;
use crate::error::{AlignError, Result};
use crate::ir::{Deck, Slide};
use crate::parser::{apply_deck_defaults, ingest_components};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Geometry-only projection of a positional component.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Item {
    pub(crate) index: usize,
    pub(crate) id: String,
    pub(crate) rect: Rect,
}

/// Per-slide resolution state. `Clean` and `PartiallyResolved` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Start,
    Detecting {
        iterations: usize,
    },
    Clean {
        iterations: usize,
    },
    PartiallyResolved {
        iterations: usize,
        unresolved: Vec<OverlapPair>,
    },
}

impl Resolution {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Clean { .. } | Self::PartiallyResolved { .. })
    }

    pub fn iterations(&self) -> usize {
        match self {
            Self::Start => 0,
            Self::Detecting { iterations }
            | Self::Clean { iterations }
            | Self::PartiallyResolved { iterations, .. } => *iterations,
        }
    }
}

/// A slide that passed ingestion: grid derived, every component box validated.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    grid: GridModel,
    rects: Vec<Rect>,
    items: Vec<Item>,
    eps: f32,
}

/// Final boxes for every component (in slide order) plus the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSlide {
    pub rects: Vec<Rect>,
    pub report: AlignmentReport,
    pub steps: usize,
}

impl SlideLayout {
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn tolerance(&self) -> f32 {
        self.eps
    }

    /// Overlaps among positional components as ingested.
    pub fn overlaps(&self) -> Vec<OverlapPair> {
        detect_overlaps(&self.items, self.eps)
    }

    /// Ids of positional components that stick out of the content area.
    pub fn out_of_bounds(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !self.grid.content.contains(&item.rect, self.eps))
            .map(|item| item.id.clone())
            .collect()
    }

    pub fn resolve(&self, strategy: Strategy, max_iterations: usize) -> ResolvedSlide {
        let mut resolver = Resolver {
            grid: &self.grid,
            items: self.items.clone(),
            strategy,
            max_iterations,
            eps: self.eps,
        };
        let mut state = Resolution::Start;
        let mut steps = 0;
        while !state.is_terminal() {
            state = resolver.step(state);
            steps += 1;
        }

        let mut rects = self.rects.clone();
        let mut moved_count = 0;
        let mut total_displacement = 0.0;
        for item in &resolver.items {
            let before = self.rects[item.index];
            if !before.approx_eq(&item.rect, self.eps) {
                moved_count += 1;
                total_displacement += before.displacement_to(&item.rect);
            }
            rects[item.index] = item.rect;
        }

        let iterations = state.iterations();
        let unresolved = match state {
            Resolution::PartiallyResolved { unresolved, .. } => unresolved,
            _ => Vec::new(),
        };
        ResolvedSlide {
            rects,
            report: AlignmentReport {
                strategy,
                iterations,
                moved_count,
                total_displacement,
                clean: unresolved.is_empty(),
                unresolved,
            },
            steps,
        }
    }
}

struct Resolver<'a> {
    grid: &'a GridModel,
    items: Vec<Item>,
    strategy: Strategy,
    max_iterations: usize,
    eps: f32,
}

impl Resolver<'_> {
    fn step(&mut self, state: Resolution) -> Resolution {
        match state {
            Resolution::Start => {
                self.clamp_all();
                Resolution::Detecting { iterations: 0 }
            }
            Resolution::Detecting { iterations } => {
                let overlaps = detect_overlaps(&self.items, self.eps);
                if overlaps.is_empty() {
                    return Resolution::Clean { iterations };
                }
                if iterations >= self.max_iterations {
                    return Resolution::PartiallyResolved {
                        iterations,
                        unresolved: overlaps,
                    };
                }
                log::debug!(
                    "{}: pass {} with {} overlap(s)",
                    self.strategy,
                    iterations + 1,
                    overlaps.len()
                );
                self.apply_strategy(&overlaps);
                self.clamp_all();
                Resolution::Detecting {
                    iterations: iterations + 1,
                }
            }
            terminal => terminal,
        }
    }

    fn apply_strategy(&mut self, overlaps: &[OverlapPair]) {
        match self.strategy {
            Strategy::PreserveOrder => {
                apply_preserve_order(&mut self.items, self.grid, overlaps, self.eps)
            }
            Strategy::Compact => apply_compact(&mut self.items, self.grid, overlaps, self.eps),
            Strategy::Balanced => apply_balanced(&mut self.items, self.grid, overlaps, self.eps),
        }
    }

    fn clamp_all(&mut self) {
        for item in &mut self.items {
            item.rect = clamp_to_bounds(&item.rect, &self.grid.content);
        }
    }
}

/// Ingests one slide: derives its grid and validates every component box.
/// The slide must already carry its size; grid defaults apply when absent.
pub fn prepare_slide(slide: &Slide, config: &AlignConfig) -> Result<SlideLayout> {
    config.validate()?;
    let width = slide
        .width
        .ok_or_else(|| AlignError::config("slide width is missing"))?;
    let height = slide
        .height
        .ok_or_else(|| AlignError::config("slide height is missing"))?;
    let spec = slide.grid.clone().unwrap_or_default();
    let grid = GridModel::new(width, height, &spec)?;
    let rects = ingest_components(slide, &grid)?;
    let items = slide
        .components
        .iter()
        .zip(&rects)
        .enumerate()
        .filter(|(_, (comp, _))| !comp.non_positional)
        .map(|(index, (comp, rect))| Item {
            index,
            id: comp.id.clone(),
            rect: *rect,
        })
        .collect();
    Ok(SlideLayout {
        grid,
        rects,
        items,
        eps: config.tolerance(width, height),
    })
}

fn write_back(slide: &mut Slide, rects: &[Rect]) {
    for (comp, rect) in slide.components.iter_mut().zip(rects) {
        comp.bounds = Some(*rect);
    }
}

fn strict_failure(report: &AlignmentReport) -> AlignError {
    AlignError::UnresolvedOverlap {
        iterations: report.iterations,
        unresolved: report.unresolved.clone(),
    }
}

fn warn_partial(index: usize, report: &AlignmentReport) {
    if !report.clean {
        log::warn!(
            "slide {index}: {} overlap(s) remain after {} {} iteration(s)",
            report.unresolved.len(),
            report.iterations,
            report.strategy
        );
    }
}

/// Resolves a single slide in place. A standalone slide counts as index 0 for
/// `slide_overrides`, then the slide's own strategy, then the config default.
pub fn resolve_slide(slide: &mut Slide, config: &AlignConfig) -> Result<AlignmentReport> {
    let layout = prepare_slide(slide, config)?;
    let strategy = config.strategy_for(0, slide.strategy, None);
    let resolved = layout.resolve(strategy, config.max_iterations);
    if !resolved.report.clean && config.strict {
        return Err(strict_failure(&resolved.report));
    }
    warn_partial(0, &resolved.report);
    write_back(slide, &resolved.rects);
    Ok(resolved.report)
}

/// Overlaps on a slide as it stands, without moving anything.
pub fn check_slide(slide: &Slide, config: &AlignConfig) -> Result<Vec<OverlapPair>> {
    Ok(prepare_slide(slide, config)?.overlaps())
}

/// Resolves every slide of a deck, one independent task per slide.
///
/// All slides are ingested before any is resolved, and boxes are written back
/// only when the whole deck succeeds, so a failing deck is left untouched. When
/// several slides fail, the lowest slide index is reported.
pub fn resolve_deck(deck: &mut Deck, config: &AlignConfig) -> Result<DeckReport> {
    config.validate()?;
    let mut staged = deck.clone();
    apply_deck_defaults(&mut staged)?;

    #[cfg(feature = "parallel")]
    let prepared: Vec<Result<SlideLayout>> = staged
        .slides
        .par_iter()
        .map(|slide| prepare_slide(slide, config))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let prepared: Vec<Result<SlideLayout>> = staged
        .slides
        .iter()
        .map(|slide| prepare_slide(slide, config))
        .collect();
    let layouts = prepared
        .into_iter()
        .enumerate()
        .map(|(index, layout)| layout.map_err(|err| err.in_slide(index)))
        .collect::<Result<Vec<_>>>()?;

    let strategies: Vec<Strategy> = staged
        .slides
        .iter()
        .enumerate()
        .map(|(index, slide)| config.strategy_for(index, slide.strategy, staged.strategy))
        .collect();

    #[cfg(feature = "parallel")]
    let resolved: Vec<ResolvedSlide> = layouts
        .par_iter()
        .zip(strategies.par_iter())
        .map(|(layout, &strategy)| layout.resolve(strategy, config.max_iterations))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let resolved: Vec<ResolvedSlide> = layouts
        .iter()
        .zip(&strategies)
        .map(|(layout, &strategy)| layout.resolve(strategy, config.max_iterations))
        .collect();

    if config.strict {
        if let Some((index, slide)) = resolved
            .iter()
            .enumerate()
            .find(|(_, slide)| !slide.report.clean)
        {
            return Err(strict_failure(&slide.report).in_slide(index));
        }
    }

    let mut reports = Vec::with_capacity(resolved.len());
    for (index, (slide, result)) in staged.slides.iter_mut().zip(resolved).enumerate() {
        warn_partial(index, &result.report);
        write_back(slide, &result.rects);
        reports.push(result.report);
    }
    *deck = staged;
    let report = DeckReport::from_slides(reports);
    log::info!(
        "resolved {} slide(s): {} clean, {} component(s) moved",
        report.slides.len(),
        report.clean_slides,
        report.total_moved
    );
    Ok(report)
}
