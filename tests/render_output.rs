use std::fs;
use sustain_charts::ChartError;
use sustain_charts::config::{AspectsConfig, BarsConfig, GraphConfig};
use sustain_charts::graph::{
    DrawOptions, Graph, LegendElements, MultidisciplinaryGraph, ProspectiveScenarioGraph,
};
use sustain_charts::models::ProcessData;
use sustain_charts::paths::{DataPaths, root_directory};
use sustain_charts::render::{
    self, LegendLayout, RenderOptions, fonts_available, registered_font,
};
use tempfile::tempdir;

fn sample() -> ProcessData {
    ProcessData::from_json_file(root_directory().join("data/samples/reference_scenario.json"))
        .expect("sample process data")
}

fn bars_graph() -> MultidisciplinaryGraph {
    let bars = BarsConfig::load_default(&DataPaths::default()).unwrap();
    let mut g = MultidisciplinaryGraph::new(GraphConfig::new("Référence"), bars).unwrap();
    g.draw(&sample(), DrawOptions::default()).unwrap();
    g
}

fn scenario_graph() -> ProspectiveScenarioGraph {
    let (areas, lines) = AspectsConfig::load_default(&DataPaths::default()).unwrap();
    let mut g =
        ProspectiveScenarioGraph::new(GraphConfig::new("Trajectoires"), areas, lines).unwrap();
    g.draw(&sample(), DrawOptions::default()).unwrap();
    g
}

#[test]
fn bars_render_to_svg_and_png() {
    let g = bars_graph();
    let dir = tempdir().unwrap();
    for name in ["bars.svg", "bars.png"] {
        let path = dir.path().join(name);
        render::render_figure(g.figure().unwrap(), &path, 800, 480, &RenderOptions::default())
            .unwrap();
        let meta = fs::metadata(&path).expect("file created");
        assert!(meta.len() > 0, "{name} has content");
    }
}

#[test]
fn svg_string_contains_the_bars() {
    let g = bars_graph();
    let svg =
        render::render_figure_svg_string(g.figure().unwrap(), 800, 480, &RenderOptions::default())
            .unwrap();
    assert!(svg.contains("<svg"));
    // 3 categories x 2 series, plus the background
    assert!(svg.matches("<rect").count() >= 6);
    if fonts_available() {
        assert!(svg.contains("Catégories"));
    }
}

#[test]
fn scenario_renders_with_german_ticks() {
    let g = scenario_graph();
    let options = RenderOptions {
        locale: "de".into(),
        font_path: None,
    };
    let svg = render::render_figure_svg_string(g.figure().unwrap(), 900, 540, &options).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<polygon") || svg.contains("<path") || svg.contains("<polyline"));
}

#[test]
fn inconsistent_figure_is_not_rendered() {
    let g = bars_graph();
    let mut figure = g.figure().unwrap().clone();
    figure.hold_sync(|marks| {
        if let sustain_charts::graph::Mark::Bars(b) = &mut marks[0] {
            b.y[0].pop();
        }
        Ok(())
    })
    .unwrap();
    let err = render::render_figure_svg_string(&figure, 800, 480, &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, ChartError::LengthMismatch { .. }));
}

#[test]
fn combined_legend_panel() {
    let mut legend = LegendElements::default();
    legend.merge(&bars_graph().legend_elements().unwrap());
    legend.merge(&scenario_graph().legend_elements().unwrap());
    assert_eq!(legend.len(), 6);

    let dir = tempdir().unwrap();
    let path = dir.path().join("legend.svg");
    let res = render::render_legend_panel(
        &legend,
        &path,
        600,
        LegendLayout::Rows,
        "",
        &RenderOptions::default(),
    );
    if fonts_available() {
        res.unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Consommations"));
    } else {
        assert!(matches!(res, Err(ChartError::FontUnavailable)));
    }
}

#[test]
fn explicit_font_wins_after_default_render() {
    let g = bars_graph();
    render::render_figure_svg_string(g.figure().unwrap(), 800, 480, &RenderOptions::default())
        .unwrap();
    let Some(default_font) = registered_font() else {
        return;
    };

    // same font bytes at another path, so the registration is observable
    let dir = tempdir().unwrap();
    let copy = dir.path().join("ChartFont.ttf");
    fs::copy(&default_font, &copy).unwrap();
    let options = RenderOptions {
        locale: "en".into(),
        font_path: Some(copy.clone()),
    };
    let svg = render::render_figure_svg_string(g.figure().unwrap(), 800, 480, &options).unwrap();
    assert!(svg.contains("Catégories"));
    assert_eq!(registered_font(), Some(copy));
}

#[test]
fn unusable_explicit_font_falls_back() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("bogus.ttf");
    fs::write(&bogus, b"not a font").unwrap();
    let options = RenderOptions {
        locale: "en".into(),
        font_path: Some(bogus.clone()),
    };
    let g = bars_graph();
    render::render_figure_svg_string(g.figure().unwrap(), 800, 480, &options).unwrap();
    assert_ne!(registered_font(), Some(bogus));
}
