use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vb_capture::ReplaySource;
use vb_gesture::{GestureClassifier, GesturePredicate};
use volley_block::{analyze, load_config};

#[derive(Parser, Debug)]
#[command(about = "Run the gesture classifier over a pose recording and print what it sees", version)]
struct Args {
    /// JSON-lines recording. Prompted for on stdin when omitted.
    path: Option<PathBuf>,
    /// Config layer for gesture thresholds (repeatable).
    #[arg(long = "config")]
    config: Vec<PathBuf>,
}

fn prompt_for_path() -> Result<PathBuf> {
    print!("Recording path: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        bail!("no recording path given");
    }
    Ok(PathBuf::from(line))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = match args.path {
        Some(p) => p,
        None => prompt_for_path()?,
    };
    if !path.exists() {
        bail!("recording not found: {}", path.display());
    }

    let (cfg, report) = load_config(&args.config);
    for msg in report.errors.iter().chain(&report.warnings) {
        eprintln!("config: {msg}");
    }

    let mut source = ReplaySource::open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut classifier = GestureClassifier::from_config(&cfg.gesture);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = analyze(&mut source, &mut classifier, &mut out)?;

    writeln!(out, "---")?;
    writeln!(
        out,
        "{} frames, {} with a pose, {} malformed lines skipped",
        summary.frames,
        summary.detected,
        source.skipped()
    )?;
    writeln!(out, "{} jumps, max power {:.0}", summary.jumps, summary.max_power)?;
    for p in GesturePredicate::ALL {
        writeln!(out, "{:>22}: {} frames", p.label(), summary.active_frames[p.index()])?;
    }
    Ok(())
}
