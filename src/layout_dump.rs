use crate::ir::{Document, Slide};
use crate::layout::{DeckReport, Rect};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ReportDump {
    pub slides: Vec<SlideDump>,
    pub clean_slides: usize,
    pub total_moved: usize,
    pub total_displacement: f32,
    pub clean: bool,
}

#[derive(Debug, Serialize)]
pub struct SlideDump {
    pub index: usize,
    pub strategy: String,
    pub iterations: usize,
    pub moved_count: usize,
    pub total_displacement: f32,
    pub clean: bool,
    pub unresolved: Vec<PairDump>,
    pub components: Vec<ComponentDump>,
}

#[derive(Debug, Serialize)]
pub struct PairDump {
    pub a: String,
    pub b: String,
    pub rect: Rect,
}

#[derive(Debug, Serialize)]
pub struct ComponentDump {
    pub id: String,
    pub kind: String,
    pub non_positional: bool,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ReportDump {
    pub fn from_report(report: &DeckReport, slides: &[Slide]) -> Self {
        let dumped = report
            .slides
            .iter()
            .enumerate()
            .map(|(index, slide_report)| {
                let components = slides
                    .get(index)
                    .map(|slide| {
                        slide
                            .components
                            .iter()
                            .filter_map(|comp| {
                                let rect = comp.bounds?;
                                Some(ComponentDump {
                                    id: comp.id.clone(),
                                    kind: format!("{:?}", comp.kind),
                                    non_positional: comp.non_positional,
                                    x: rect.x,
                                    y: rect.y,
                                    w: rect.w,
                                    h: rect.h,
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                SlideDump {
                    index,
                    strategy: slide_report.strategy.to_string(),
                    iterations: slide_report.iterations,
                    moved_count: slide_report.moved_count,
                    total_displacement: slide_report.total_displacement,
                    clean: slide_report.clean,
                    unresolved: slide_report
                        .unresolved
                        .iter()
                        .map(|pair| PairDump {
                            a: pair.a.clone(),
                            b: pair.b.clone(),
                            rect: pair.rect,
                        })
                        .collect(),
                    components,
                }
            })
            .collect();

        ReportDump {
            slides: dumped,
            clean_slides: report.clean_slides,
            total_moved: report.total_moved,
            total_displacement: report.total_displacement,
            clean: report.is_clean(),
        }
    }
}

fn write_json<T: Serialize>(writer: impl Write, value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_report(
    path: &Path,
    report: &DeckReport,
    document: &Document,
    pretty: bool,
) -> anyhow::Result<()> {
    let slides = match document {
        Document::Deck(deck) => deck.slides.as_slice(),
        Document::Slide(slide) => std::slice::from_ref(slide),
    };
    let dump = ReportDump::from_report(report, slides);
    write_json(File::create(path)?, &dump, pretty)
}

/// Writes the resolved document to `path`, or stdout when `path` is `None`.
pub fn write_document(path: Option<&Path>, document: &Document, pretty: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => write_json(File::create(path)?, document, pretty),
        None => write_json(io::stdout().lock(), document, pretty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignConfig;
    use crate::ir::Deck;
    use crate::layout::resolve_deck;

    #[test]
    fn dump_lists_components_and_unresolved_pairs() {
        let mut deck: Deck = serde_json::from_str(
            r#"{"grid": {"margin": 0, "gutter": 0, "columns": 1}, "slides": [
                {"width": 100, "height": 100, "components": [
                    {"id": "a", "type": "image", "box": {"x": 0, "y": 0, "w": 90, "h": 90}},
                    {"id": "b", "type": "chart", "box": {"x": 0, "y": 0, "w": 90, "h": 90}}
                ]}
            ]}"#,
        )
        .expect("deck");
        let report = resolve_deck(&mut deck, &AlignConfig::default()).expect("resolve");
        let dump = ReportDump::from_report(&report, &deck.slides);
        assert!(!dump.clean);
        assert_eq!(dump.slides[0].strategy, "preserve_order");
        assert_eq!(dump.slides[0].components.len(), 2);
        assert_eq!(dump.slides[0].components[1].kind, "Chart");
        assert_eq!(dump.slides[0].unresolved.len(), 1);
        assert_eq!(dump.slides[0].unresolved[0].a, "a");

        let json = serde_json::to_value(&dump).expect("serialize");
        let rect = &json["slides"][0]["unresolved"][0]["rect"];
        assert!(rect.is_object(), "{rect}");
        for key in ["x", "y", "w", "h"] {
            assert!(rect[key].is_number(), "missing `{key}` in {rect}");
        }
    }
}
