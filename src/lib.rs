#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{AlignConfig, Config, load_config};
pub use error::{AlignError, Result};
pub use ir::{Component, ComponentKind, Deck, Document, GridSpec, Margin, Slide};
pub use layout::{
    AlignmentReport, DeckReport, GridModel, OverlapPair, Rect, Strategy, check_slide,
    prepare_slide, resolve_deck, resolve_slide,
};
pub use parser::parse_document;

/// Resolved document together with its per-slide reports.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlignOutput {
    pub document: Document,
    pub report: DeckReport,
}

/// Resolves a parsed document in place. A bare slide is treated as a one-slide deck.
pub fn align_document(document: &mut Document, config: &AlignConfig) -> Result<DeckReport> {
    match document {
        Document::Deck(deck) => resolve_deck(deck, config),
        Document::Slide(slide) => {
            let mut deck = Deck::from_slide(slide.clone());
            let report = resolve_deck(&mut deck, config)?;
            if let Some(resolved) = deck.slides.pop() {
                *slide = resolved;
            }
            Ok(report)
        }
    }
}

/// Parses `input` and resolves it with `config`.
pub fn align_with_options(input: &str, config: &AlignConfig) -> Result<AlignOutput> {
    let mut document = parse_document(input)?;
    let report = align_document(&mut document, config)?;
    Ok(AlignOutput { document, report })
}

/// Parses and resolves `input` with the default configuration.
pub fn align(input: &str) -> Result<AlignOutput> {
    align_with_options(input, &AlignConfig::default())
}
