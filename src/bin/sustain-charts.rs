use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use sustain_charts::cards::{card_text, render_cards};
use sustain_charts::config::{AspectsConfig, BarsConfig, GraphConfig, load_cards};
use sustain_charts::generate_pastel_palette;
use sustain_charts::graph::{
    DrawOptions, Figure, Graph, LegendElements, LinearScale, MultidisciplinaryGraph,
    ProspectiveScenarioGraph, get_multidisciplinary_graphs_y_scales,
    get_prospective_scenario_graphs_y_scales,
};
use sustain_charts::models::ProcessData;
use sustain_charts::paths::DataPaths;
use sustain_charts::render::{self, LegendLayout, RenderOptions};

#[derive(Parser, Debug)]
#[command(
    name = "sustain-charts",
    version,
    about = "Render sustainability-assessment dashboard charts"
)]
struct Cli {
    /// Repository root holding the `data/` definition files.
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Multidisciplinary budget vs. consumption bars, one chart per process file.
    Bars(ChartArgs),
    /// Prospective-scenario areas and lines, one chart per process file.
    Scenario(ChartArgs),
    /// Print the shared y range of the multidisciplinary charts.
    Scales(ScalesArgs),
    /// Print a pastel palette.
    Palette {
        /// Number of colors.
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Print the dashboard cards of a process file.
    Cards(CardsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LegendArg {
    Column,
    Rows,
}

impl From<LegendArg> for LegendLayout {
    fn from(l: LegendArg) -> Self {
        match l {
            LegendArg::Column => LegendLayout::Column,
            LegendArg::Rows => LegendLayout::Rows,
        }
    }
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Process data JSON files. Several files share one y scale.
    #[arg(short, long, required = true, num_args = 1..)]
    data: Vec<PathBuf>,
    /// Output chart (.svg or .png). With several inputs, `_<n>` is appended to the file stem.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Chart title (defaults to the process file stem).
    #[arg(long)]
    title: Option<String>,
    /// Explicit colors, comma separated (e.g. "#bf2626,#26bfbf").
    #[arg(long)]
    palette: Option<String>,
    /// Width of the chart (default 900).
    #[arg(long, default_value_t = 900)]
    width: u32,
    /// Height of the chart (default 540).
    #[arg(long, default_value_t = 540)]
    height: u32,
    /// Locale for tick labels (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// TrueType font used for text.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Hide the legend inside the charts.
    #[arg(long, default_value_t = false)]
    no_legend: bool,
    /// Also write a combined legend panel to this path.
    #[arg(long)]
    legend_out: Option<PathBuf>,
    /// Layout of the combined legend panel.
    #[arg(long, value_enum, default_value = "rows")]
    legend_layout: LegendArg,
    /// Print the figure model(s) as JSON to stdout.
    #[arg(long, default_value_t = false)]
    emit_json: bool,
}

#[derive(Args, Debug)]
struct ScalesArgs {
    /// Process data JSON files.
    #[arg(short, long, num_args = 0..)]
    data: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct CardsArgs {
    /// Process data JSON file.
    #[arg(short, long)]
    data: PathBuf,
    /// Locale for thousands separators; plain truncated integers when omitted.
    #[arg(long)]
    locale: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let paths = cli.root.map(DataPaths::new).unwrap_or_default();
    match cli.cmd {
        Command::Bars(args) => cmd_bars(&paths, args),
        Command::Scenario(args) => cmd_scenario(&paths, args),
        Command::Scales(args) => cmd_scales(&paths, args),
        Command::Palette { count } => {
            for color in generate_pastel_palette(count) {
                println!("{color}");
            }
            Ok(())
        }
        Command::Cards(args) => cmd_cards(&paths, args),
    }
}

fn load_processes(files: &[PathBuf]) -> Result<Vec<ProcessData>> {
    files
        .iter()
        .map(|f| {
            ProcessData::from_json_file(f)
                .with_context(|| format!("failed to load process data {}", f.display()))
        })
        .collect()
}

fn parse_palette(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn graph_config(args: &ChartArgs, file: &Path) -> GraphConfig {
    let title = args.title.clone().unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    GraphConfig {
        title,
        color_palette: args.palette.as_deref().map(parse_palette),
    }
}

/// `out` for a single chart, `out` with `_<index>` appended to the stem otherwise.
fn output_path(out: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return out.to_path_buf();
    }
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart".to_string());
    let name = match out.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{index}.{ext}"),
        None => format!("{stem}_{index}"),
    };
    out.with_file_name(name)
}

fn draw_options(args: &ChartArgs, range: (f64, f64), total: usize) -> DrawOptions {
    let mut options = DrawOptions::default();
    if total > 1 {
        options = options.with_y_scale(LinearScale::from_range(range));
    }
    if args.no_legend {
        options = options.without_legend();
    }
    options
}

fn emit(args: &ChartArgs, figures: &[Figure], legend: &LegendElements) -> Result<()> {
    let render_options = RenderOptions {
        locale: args.locale.clone(),
        font_path: args.font.clone(),
    };
    if let Some(out) = args.out.as_ref() {
        for (i, figure) in figures.iter().enumerate() {
            let path = output_path(out, i, figures.len());
            render::render_figure(figure, &path, args.width, args.height, &render_options)
                .with_context(|| format!("failed to render {}", path.display()))?;
            eprintln!("Wrote chart to {}", path.display());
        }
    }
    if let Some(path) = args.legend_out.as_ref() {
        render::render_legend_panel(
            legend,
            path,
            args.width,
            args.legend_layout.into(),
            "",
            &render_options,
        )
        .with_context(|| format!("failed to render legend {}", path.display()))?;
        eprintln!("Wrote legend to {}", path.display());
    }
    if args.emit_json {
        println!("{}", serde_json::to_string_pretty(figures)?);
    }
    Ok(())
}

fn cmd_bars(paths: &DataPaths, args: ChartArgs) -> Result<()> {
    let bars = BarsConfig::load_default(paths).context("failed to load bar categories")?;
    let processes = load_processes(&args.data)?;
    let range = get_multidisciplinary_graphs_y_scales(&processes, &bars)?;

    let mut figures = Vec::with_capacity(processes.len());
    let mut legend = LegendElements::default();
    for (process, file) in processes.iter().zip(&args.data) {
        let mut graph = MultidisciplinaryGraph::new(graph_config(&args, file), bars.clone())?;
        graph.draw(process, draw_options(&args, range, processes.len()))?;
        legend.merge(&graph.legend_elements()?);
        if let Some(figure) = graph.figure() {
            figures.push(figure.clone());
        }
    }
    emit(&args, &figures, &legend)
}

fn cmd_scenario(paths: &DataPaths, args: ChartArgs) -> Result<()> {
    let (areas, lines) =
        AspectsConfig::load_default(paths).context("failed to load scenario aspects")?;
    let processes = load_processes(&args.data)?;
    let range = get_prospective_scenario_graphs_y_scales(&processes, &areas, &lines)?;

    let mut figures = Vec::with_capacity(processes.len());
    let mut legend = LegendElements::default();
    for (process, file) in processes.iter().zip(&args.data) {
        let mut graph = ProspectiveScenarioGraph::new(
            graph_config(&args, file),
            areas.clone(),
            lines.clone(),
        )?;
        graph.draw(process, draw_options(&args, range, processes.len()))?;
        legend.merge(&graph.legend_elements()?);
        if let Some(figure) = graph.figure() {
            figures.push(figure.clone());
        }
    }
    emit(&args, &figures, &legend)
}

fn cmd_scales(paths: &DataPaths, args: ScalesArgs) -> Result<()> {
    let bars = BarsConfig::load_default(paths).context("failed to load bar categories")?;
    let processes = load_processes(&args.data)?;
    let (min, max) = get_multidisciplinary_graphs_y_scales(&processes, &bars)?;
    println!("min={min} max={max}");
    Ok(())
}

fn cmd_cards(paths: &DataPaths, args: CardsArgs) -> Result<()> {
    let cards = load_cards(paths.cards()).context("failed to load cards")?;
    let process = ProcessData::from_json_file(&args.data)
        .with_context(|| format!("failed to load process data {}", args.data.display()))?;
    match args.locale.as_deref() {
        Some(locale) => {
            for (title, text) in render_cards(&cards, &process, locale)? {
                println!("{title}: {text}");
            }
        }
        None => {
            for card in &cards {
                println!("{}: {}", card.title, card_text(card, &process)?);
            }
        }
    }
    Ok(())
}
