use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "choreo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one tooltip placement and print it as JSON.
    Place(PlaceArgs),
    /// Print the (phase, scale, wait) plan of one playthrough.
    Plan(PlanArgs),
    /// Play a demo on a static layout, printing every stage event as a JSON line.
    Play(PlayArgs),
    /// List the built-in demos.
    Demos,
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Container size as `WxH`.
    #[arg(long, value_parser = parse_size)]
    container: choreo::Size,

    /// Anchor rectangle as `x,y,w,h` in container coordinates.
    #[arg(long, value_parser = parse_rect)]
    anchor: choreo::Rect,

    /// Tooltip size as `WxH` (defaults to the config's tooltip size).
    #[arg(long, value_parser = parse_size)]
    size: Option<choreo::Size>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Built-in demo name.
    #[arg(long, conflicts_with = "script", required_unless_present = "script")]
    demo: Option<choreo::DemoKind>,

    /// Script JSON.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Built-in demo name.
    #[arg(long, conflicts_with = "script", required_unless_present = "script")]
    demo: Option<choreo::DemoKind>,

    /// Script JSON (use with `--layout`).
    #[arg(long, requires = "layout")]
    script: Option<PathBuf>,

    /// Explanations JSON for `--script`.
    #[arg(long, requires = "script")]
    explanations: Option<PathBuf>,

    /// Layout JSON (defaults to the demo's reference layout).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of playthroughs before stopping.
    #[arg(long, default_value_t = 1)]
    loops: u32,
}

struct JsonLines;

impl choreo::StageObserver for JsonLines {
    fn on_event(&self, event: &choreo::StageEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("serialize stage event: {e}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CHOREO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Play(args) => cmd_play(args).await,
        Command::Demos => {
            for kind in choreo::DemoKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn parse_size(s: &str) -> Result<choreo::Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok(choreo::Size::new(w, h))
}

fn parse_rect(s: &str) -> Result<choreo::Rect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let [x, y, w, h] = parts[..] else {
        return Err(format!("expected x,y,w,h, got '{s}'"));
    };
    Ok(choreo::Rect::new(x, y, x + w, y + h))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<choreo::EngineConfig> {
    match path {
        Some(p) => choreo::EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(choreo::EngineConfig::default()),
    }
}

fn load_script(
    demo: Option<choreo::DemoKind>,
    path: Option<&Path>,
) -> anyhow::Result<choreo::Script> {
    match (demo, path) {
        (_, Some(p)) => {
            choreo::Script::from_path(p).with_context(|| format!("load script '{}'", p.display()))
        }
        (Some(kind), None) => Ok(kind.script()?),
        (None, None) => anyhow::bail!("either --demo or --script is required"),
    }
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let container = choreo::Rect::from_origin_size((0.0, 0.0), args.container);
    let anchor = choreo::Anchor::from_rects(choreo::TagKey::from("anchor"), args.anchor, container)
        .context("anchor and container must be finite")?;
    let size = args.size.unwrap_or(config.tooltip_size);
    let placement = choreo::place(&anchor, size, &config.placement);

    let out = serde_json::json!({
        "placement": placement,
        "footprint": placement.footprint(),
        "css_transform": placement.css_transform(),
        "transform_origin": placement.origin.as_css(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let script = load_script(args.demo, args.script.as_deref())?;
    for entry in choreo::Sequencer::plan(&script) {
        println!("{}", serde_json::to_string(&entry)?);
    }
    Ok(())
}

async fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_config(args.config.as_deref())?);
    let script = load_script(args.demo, args.script.as_deref())?;
    let explanations = match (&args.explanations, args.demo) {
        (Some(p), _) => choreo::ExplanationTable::from_path(p)
            .with_context(|| format!("load explanations '{}'", p.display()))?,
        (None, Some(kind)) => kind.explanations(),
        _ => choreo::ExplanationTable::new(),
    };
    let layout = match (&args.layout, args.demo) {
        (Some(p), _) => choreo::StaticLayout::from_path(p)
            .with_context(|| format!("load layout '{}'", p.display()))?,
        (None, Some(kind)) => kind.layout(),
        (None, None) => anyhow::bail!("--layout is required with --script"),
    };

    // One playthrough, plus the idle pause between playthroughs when looping.
    let plan = choreo::Sequencer::plan(&script);
    let cycle_ms: u64 = plan.iter().map(|e| e.wait_ms).sum();
    let play_ms = match script.replay {
        choreo::Replay::Loop => cycle_ms
            .saturating_mul(u64::from(args.loops.max(1)))
            .saturating_sub(script.idle_ms / 2),
        choreo::Replay::Once => cycle_ms,
    };

    let name = script.name.clone();
    let choreography =
        choreo::Choreography::new(script, explanations, Arc::new(layout), config)?;
    let mut controller = choreo::DemoController::new(name, choreography, Arc::new(JsonLines))?;
    controller.apply_signal(choreo::LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(play_ms)).await;
    controller.shutdown();
    Ok(())
}
