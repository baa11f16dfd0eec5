// SPDX-License-Identifier: MIT
//
// n-chrome: deterministic per-workspace tinting of editor chrome.
//
// This is the command-line collaborator around the engine crates:
//
//   n-color → OKLCH conversion, gamut boundary, hue arithmetic
//   n-tint  → hashing, harmonies, styles, directed blending, palettes
//
// Each invocation flows through:
//
//   args + config file + theme file → TintOptions → compute_tint → output
//
// Output formats:
//
//   table  inspector view of every key (tint / theme / final / factor)
//   json   the full TintResult
//   apply  `{ key: hex }` for enabled keys, ready for the host settings

mod render;

use std::env;
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use n_tint::{
    Element, Harmony, PREVIEW_HUES, Style, ThemeClass, ThemeColors, TintCache, TintConfig, TintResult,
    managed_key_names, preview,
};

/// Environment variable holding the log filter (`tracing` directives).
const LOG_ENV: &str = "N_CHROME_LOG";

// ─── Command line ───────────────────────────────────────────────────────────

/// Deterministic per-workspace tinting of editor chrome
#[derive(Debug, Parser)]
#[command(name = "n-chrome")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the palette for a workspace
    Tint(TintArgs),
    /// Show a style and harmony at fixed sample hues
    Preview(PreviewArgs),
    /// List every managed palette key
    Keys,
}

#[derive(Debug, clap::Args)]
struct TintArgs {
    /// Workspace identifier (defaults to the current directory)
    identifier: Option<String>,

    /// JSON config file (camelCase `TintConfig`)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// JSON theme file: a flat color map or `{ "type": ..., "colors": {...} }`
    #[arg(long, short)]
    theme: Option<PathBuf>,

    /// Theme class: dark, light, hc-dark, hc-light
    #[arg(long)]
    theme_class: Option<ThemeClass>,

    #[arg(long)]
    style: Option<Style>,

    #[arg(long)]
    harmony: Option<Harmony>,

    /// Elements to tint, comma-separated
    #[arg(long, value_delimiter = ',')]
    targets: Option<Vec<Element>>,

    #[arg(long)]
    seed: Option<i64>,

    /// Fixed base hue, ignoring the identifier
    #[arg(long, allow_negative_numbers = true)]
    hue: Option<f64>,

    /// Default blend factor toward the theme, 0 to 1
    #[arg(long)]
    blend: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Never emit color escapes
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, clap::Args)]
struct PreviewArgs {
    #[arg(long, default_value_t = Style::default())]
    style: Style,

    #[arg(long, default_value_t = Harmony::default())]
    harmony: Harmony,

    #[arg(long, default_value_t = ThemeClass::default())]
    theme_class: ThemeClass,

    /// Print the rows as JSON
    #[arg(long)]
    json: bool,

    /// Never emit color escapes
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Apply,
}

// ─── Theme file ─────────────────────────────────────────────────────────────

/// A theme file as editors export it, or just its color map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThemeFile {
    Full {
        #[serde(rename = "type")]
        kind: Option<String>,
        colors: ThemeColors,
    },
    Colors(ThemeColors),
}

impl ThemeFile {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("failed to read theme {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid theme JSON in {}", path.display()))
    }

    fn into_parts(self) -> Result<(Option<ThemeClass>, ThemeColors)> {
        match self {
            Self::Full { kind, colors } => {
                let class = kind.as_deref().map(parse_theme_type).transpose()?;
                Ok((class, colors))
            }
            Self::Colors(colors) => Ok((None, colors)),
        }
    }
}

/// Theme `type` field. Editor exports use `vs` / `vs-dark` / `hc-black`.
fn parse_theme_type(kind: &str) -> Result<ThemeClass> {
    Ok(match kind {
        "vs" => ThemeClass::Light,
        "vs-dark" => ThemeClass::Dark,
        "hc-black" => ThemeClass::HighContrastDark,
        other => other.parse()?,
    })
}

/// Flag, then the theme file's own type, then a guess from its colors.
fn resolve_theme_class(
    flag: Option<ThemeClass>,
    declared: Option<ThemeClass>,
    colors: Option<&ThemeColors>,
) -> ThemeClass {
    flag.or(declared)
        .or_else(|| colors.map(ThemeClass::infer))
        .unwrap_or_default()
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn build_config(args: &TintArgs) -> Result<TintConfig> {
    let mut config = match &args.config {
        Some(path) => TintConfig::load(path)?,
        None => TintConfig::default(),
    };
    if let Some(style) = args.style {
        config.style = style.name().to_owned();
    }
    if let Some(harmony) = args.harmony {
        config.harmony = harmony.name().to_owned();
    }
    if let Some(targets) = &args.targets {
        config.targets = targets.iter().map(|e| e.name().to_owned()).collect();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(hue) = args.hue {
        config.hue_override = Some(hue);
    }
    if let Some(blend) = args.blend {
        config.blend_factor = blend;
    }
    Ok(config)
}

fn workspace_identifier(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(id) => Ok(id.to_owned()),
        None => {
            let cwd = env::current_dir().context("failed to read the current directory")?;
            Ok(cwd.to_string_lossy().into_owned())
        }
    }
}

fn compute(args: &TintArgs, cache: &mut TintCache) -> Result<TintResult> {
    let config = build_config(args)?;
    let identifier = workspace_identifier(args.identifier.as_deref())?;

    let (declared, colors) = match &args.theme {
        Some(path) => {
            let (class, colors) = ThemeFile::load(path)?.into_parts()?;
            (class, Some(colors))
        }
        None => (None, None),
    };
    let theme_class = resolve_theme_class(args.theme_class, declared, colors.as_ref());
    debug!(%identifier, %theme_class, "tint request");

    let options = config.into_options(Some(identifier), theme_class, colors)?;
    Ok(cache.get_or_compute(&options)?.clone())
}

fn use_color(no_color: bool) -> bool {
    !no_color && env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

fn run_tint(args: &TintArgs, out: &mut impl Write) -> Result<()> {
    let mut cache = TintCache::new();
    let result = compute(args, &mut cache)?;
    match args.format {
        Format::Table => render::write_table(out, &result, use_color(args.no_color))?,
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        Format::Apply => writeln!(out, "{}", serde_json::to_string_pretty(&result.enabled_colors())?)?,
    }
    Ok(())
}

fn run_preview(args: &PreviewArgs, out: &mut impl Write) -> Result<()> {
    let rows = preview(args.style, args.harmony, args.theme_class, &PREVIEW_HUES)?;
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        writeln!(out, "{} / {} / {}", args.style, args.harmony, args.theme_class)?;
        render::write_preview(out, &rows, use_color(args.no_color))?;
    }
    Ok(())
}

fn run_keys(out: &mut impl Write) -> Result<()> {
    for name in managed_key_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match &cli.command {
        Commands::Tint(args) => run_tint(args, &mut out)?,
        Commands::Preview(args) => run_preview(args, &mut out)?,
        Commands::Keys => run_keys(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
