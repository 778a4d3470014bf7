//! pagestrip - Entry Point
//!
//! Replays a scripted browsing session against a simulated paging strip and prints
//! which pages are materialized after each step.

use clap::Parser;
use pagestrip::config::ResolvedConfig;
use pagestrip::model::{AppError, Size};
use pagestrip::provider::{CatalogProvider, ItemProvider, MemoryProvider};
use pagestrip::viewport::{
    ContentLoading, PagingStrip, StripLayout, TilerReport, ViewportTiler, ZoomablePage,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Item count used when neither `--catalog` nor `--synthetic` is given.
const DEFAULT_SYNTHETIC_COUNT: usize = 20;

/// pagestrip - simulate viewport-driven page virtualization
#[derive(Parser, Debug)]
#[command(name = "pagestrip")]
#[command(version)]
#[command(about = "Simulate a horizontally paging strip and report which pages are live")]
pub struct Args {
    /// JSON manifest listing the items (images live next to it as <name>.jpg)
    #[arg(long, conflicts_with = "synthetic")]
    pub catalog: Option<PathBuf>,

    /// Use N generated items instead of a catalog
    #[arg(long)]
    pub synthetic: Option<usize>,

    /// Width of the containing view
    #[arg(long, default_value_t = 320.0)]
    pub width: f64,

    /// Height of the containing view
    #[arg(long, default_value_t = 480.0)]
    pub height: f64,

    /// Scroll to this content offset (repeatable, applied in order)
    #[arg(long = "scroll", value_name = "X", allow_negative_numbers = true)]
    pub scrolls: Vec<f64>,

    /// Resize the containing view after scrolling, e.g. 480x320
    #[arg(long, value_name = "WxH", value_parser = parse_view_size)]
    pub resize: Option<Size>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page padding override
    #[arg(long)]
    pub padding: Option<f64>,

    /// Bind placeholders first and deliver content afterwards
    #[arg(long)]
    pub deferred: bool,

    /// Print one JSON object per step instead of text
    #[arg(long)]
    pub json: bool,
}

fn parse_view_size(raw: &str) -> Result<Size, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: f64 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{h}'"))?;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(format!("view size must be positive, got '{raw}'"));
    }
    Ok(Size::new(width, height))
}

type SessionTiler = ViewportTiler<Box<dyn ItemProvider>, PagingStrip, ZoomablePage>;

/// One replayed step and the tiler state after it.
#[derive(Debug, Serialize)]
struct Step {
    action: String,
    delivered: usize,
    report: TilerReport,
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = pagestrip::config::load_config_with_precedence(args.config.clone())?;
    let merged = pagestrip::config::merge_config(config_file);
    let with_env = pagestrip::config::apply_env_overrides(merged);
    let loading_override = args.deferred.then_some(ContentLoading::Deferred);
    Ok(pagestrip::config::apply_cli_overrides(
        with_env,
        args.padding,
        loading_override,
    ))
}

fn build_provider(args: &Args) -> Result<Box<dyn ItemProvider>, AppError> {
    match &args.catalog {
        Some(manifest) => Ok(Box::new(CatalogProvider::load(manifest)?)),
        None => {
            let count = args.synthetic.unwrap_or(DEFAULT_SYNTHETIC_COUNT);
            Ok(Box::new(MemoryProvider::synthetic(count, 2000.0, 1500.0)))
        }
    }
}

/// Run the scripted session and collect a report per step.
fn simulate(
    args: &Args,
    config: &ResolvedConfig,
    provider: Box<dyn ItemProvider>,
) -> Vec<Step> {
    let view = Size::new(args.width, args.height);
    let host = PagingStrip::new(StripLayout::strip_frame(view, config.page_padding));
    let max_zoom = config.max_zoom_scale;
    let mut tiler: SessionTiler =
        ViewportTiler::new(provider, host, config.tiler_options(), move || {
            ZoomablePage::new(max_zoom)
        });

    let mut steps = Vec::new();
    let mut record = |tiler: &mut SessionTiler, action: String| {
        let delivered = tiler.load_pending_content();
        steps.push(Step {
            action,
            delivered,
            report: tiler.report(),
        });
    };

    record(&mut tiler, "initial".to_string());

    for offset in &args.scrolls {
        tiler.scroll_to(*offset);
        record(&mut tiler, format!("scroll {offset}"));
    }

    if let Some(size) = args.resize {
        tiler.on_layout_changed(size);
        record(&mut tiler, format!("resize {}x{}", size.width, size.height));
    }

    steps
}

fn print_text(step: &Step) {
    let report = &step.report;
    let range = match (report.first, report.last) {
        (Some(first), Some(last)) => format!("{first}..={last}"),
        _ => "none".to_string(),
    };
    println!(
        "{}: offset={} page_width={} visible={} pooled={} delivered={}",
        step.action,
        report.content_offset_x,
        report.page_width,
        range,
        report.pooled,
        step.delivered
    );
    for page in &report.visible {
        println!(
            "  #{} page={} {} x={} w={} {:?}",
            page.index,
            page.page,
            page.name,
            page.frame.min_x(),
            page.frame.width(),
            page.content
        );
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    pagestrip::logging::init(&config.log_file_path)?;

    info!(config = ?config, "pagestrip starting");

    let provider = build_provider(&args)?;
    info!(items = provider.count(), "Provider ready");

    for step in simulate(&args, &config, provider) {
        if args.json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            print_text(&step);
        }
    }

    info!("pagestrip finished");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}
