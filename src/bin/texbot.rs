//! CLI binary for texbot.
//!
//! A thin shim over the library crate: reads message text from the command
//! line or stdin, maps flags to `RenderConfig`, and writes the PNG.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use texbot::message::failure_text;
use texbot::{
    extract, render, InkscapeCli, RenderConfig, RenderRequest, RenderSummary, USAGE_HINT,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render the expression in a message (default scale 4 → 200 px high)
  texbot 'the answer is $$ \int_0^1 x^2\,dx = \frac{1}{3} $$'

  # Bigger image, custom output path
  texbot '$$ e^{i\pi} + 1 = 0 $$[6]' -o euler.png

  # Expression without delimiters
  texbot --raw '\sum_{n=1}^\infty \frac{1}{n^2}'

  # Read the message from stdin, print a JSON summary
  echo '$$ a^2 + b^2 = c^2 $$' | texbot --json

  # Inkscape 1.x
  texbot --inkscape-cli modern '$$ \sqrt{2} $$'

ENVIRONMENT VARIABLES:
  TEXBOT_LATEX            Path to latex             (default: latex)
  TEXBOT_DVISVGM          Path to dvisvgm           (default: dvisvgm)
  TEXBOT_INKSCAPE         Path to inkscape          (default: inkscape)
  TEXBOT_INKSCAPE_CLI     legacy | modern           (default: legacy)
  TEXBOT_WORKSPACE_ROOT   Parent dir for scratch directories
  RUST_LOG                Log filter, e.g. texbot=debug
"#;

/// Render the $$…$$ LaTeX expression in a message to PNG.
#[derive(Parser, Debug)]
#[command(
    name = "texbot",
    version,
    about = "Render the $$…$$ LaTeX expression in a message to PNG",
    long_about = "Extract the first $$…$$ block (with optional [scale] suffix) from the \
given text and render it to a PNG via latex, dvisvgm and inkscape. White text on a \
transparent background, height = scale × 50 px.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Message text containing $$ <LaTeX> $$. Read from stdin if omitted.
    text: Option<String>,

    /// Treat the text as the expression itself (no $$ delimiters needed).
    #[arg(long)]
    raw: bool,

    /// Write the PNG to this file.
    #[arg(short, long, env = "TEXBOT_OUTPUT", default_value = "render.png")]
    output: PathBuf,

    /// Override the scale factor (height = scale × 50 px).
    #[arg(short, long)]
    scale: Option<u32>,

    /// Print a data:image/png;base64 URI to stdout instead of writing a file.
    #[arg(long, conflicts_with = "json")]
    data_uri: bool,

    /// Print a JSON summary of the render to stdout.
    #[arg(long)]
    json: bool,

    /// Path to the latex binary.
    #[arg(long, env = "TEXBOT_LATEX", default_value = "latex")]
    latex: PathBuf,

    /// Path to the dvisvgm binary.
    #[arg(long, env = "TEXBOT_DVISVGM", default_value = "dvisvgm")]
    dvisvgm: PathBuf,

    /// Path to the inkscape binary.
    #[arg(long, env = "TEXBOT_INKSCAPE", default_value = "inkscape")]
    inkscape: PathBuf,

    /// Inkscape command-line dialect: legacy (0.92) or modern (1.x).
    #[arg(long, env = "TEXBOT_INKSCAPE_CLI", value_enum, default_value = "legacy")]
    inkscape_cli: InkscapeCliArg,

    /// Directory in which per-render scratch directories are created.
    #[arg(long, env = "TEXBOT_WORKSPACE_ROOT")]
    workspace_root: Option<PathBuf>,

    /// Disable the spinner.
    #[arg(long, env = "TEXBOT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TEXBOT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TEXBOT_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum InkscapeCliArg {
    Legacy,
    Modern,
}

impl From<InkscapeCliArg> for InkscapeCli {
    fn from(v: InkscapeCliArg) -> Self {
        match v {
            InkscapeCliArg::Legacy => InkscapeCli::Legacy,
            InkscapeCliArg::Modern => InkscapeCli::Modern,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner gives all the feedback that matters; keep library logs
    // quiet while it is shown.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build request ────────────────────────────────────────────────────
    let text = match cli.text {
        Some(ref t) => t.clone(),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message text from stdin")?;
            buf
        }
    };

    let request = build_request(&text, cli.raw, cli.scale)?;
    let config = build_config(&cli)?;

    // ── Render ───────────────────────────────────────────────────────────
    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Rendering");
        bar.set_message(request.expression().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let result = render(request.clone(), &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    if cli.json {
        let summary = RenderSummary::new(&request, &result);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    }

    let image = match result {
        Ok(image) => image,
        Err(e) => {
            if !cli.json {
                eprintln!("{} {}", red("✘"), e);
                eprintln!("{}", failure_text(request.expression(), e.diagnostic().unwrap_or("")));
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    // ── Deliver ──────────────────────────────────────────────────────────
    if cli.data_uri {
        println!("{}", image.to_data_uri());
    } else {
        std::fs::write(&cli.output, image.as_bytes())
            .with_context(|| format!("Failed to write PNG to {:?}", cli.output))?;
        if !cli.quiet && !cli.json {
            eprintln!(
                "{}  {}x{} px  {}  →  {}",
                green("✔"),
                image.width(),
                image.height(),
                dim(&format!("{} bytes", image.as_bytes().len())),
                cli.output.display(),
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Turn the message text into a request, honouring `--raw` and `--scale`.
fn build_request(text: &str, raw: bool, scale: Option<u32>) -> Result<RenderRequest> {
    let request = if raw {
        RenderRequest::new(text, texbot::DEFAULT_SCALE).context("Invalid expression")?
    } else {
        match extract(text).context("Invalid expression")? {
            Some(r) => r,
            None => anyhow::bail!("No expression found. Expected: {}", USAGE_HINT),
        }
    };

    match scale {
        Some(s) => request.with_scale(s).context("Invalid --scale"),
        None => Ok(request),
    }
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let mut builder = RenderConfig::builder()
        .latex_path(&cli.latex)
        .dvisvgm_path(&cli.dvisvgm)
        .inkscape_path(&cli.inkscape)
        .inkscape_cli(cli.inkscape_cli.into());

    if let Some(ref root) = cli.workspace_root {
        builder = builder.workspace_root(root);
    }

    builder.build().context("Invalid configuration")
}
