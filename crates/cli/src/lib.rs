use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use regress_synth::{ReportTable, SynthError, Synthesizer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod report;

use report::{GenerateSummary, SignatureOutput};

const DEFAULT_OUTPUT: &str = "GeneratedTest.java";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "regress")]
#[command(about = "Synthesize regression harnesses from failing submission reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Synthesis config file (JSON or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert default returns into methods that lack one
    Normalize(NormalizeArgs),

    /// Print the signature of the first method in a source file
    Signature(SignatureArgs),

    /// Build a regression harness from a source file and a report table
    Generate(GenerateArgs),
}

#[derive(Args)]
struct NormalizeArgs {
    /// Source file
    source: PathBuf,

    /// Write the normalized text here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SignatureArgs {
    /// Source file
    source: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Source file holding the method under test
    #[arg(long)]
    source: PathBuf,

    /// Report table (JSON)
    #[arg(long)]
    report: PathBuf,

    /// Harness output path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also write the normalized source here
    #[arg(long)]
    normalized_output: Option<PathBuf>,

    /// Output a JSON summary
    #[arg(long)]
    json: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Signature(args) => args.json,
        Commands::Generate(args) => args.json,
        Commands::Normalize(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let synth_config = config::load_config(cli.config.as_deref())?;
    let synthesizer =
        Synthesizer::new(synth_config).context("Failed to initialize synthesizer")?;

    match cli.command {
        Commands::Normalize(args) => run_normalize(&synthesizer, args),
        Commands::Signature(args) => run_signature(&synthesizer, args),
        Commands::Generate(args) => run_generate(&synthesizer, args),
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read source {}", path.display()))
}

fn run_normalize(synthesizer: &Synthesizer, args: NormalizeArgs) -> Result<()> {
    let source = read_source(&args.source)?;
    let normalized = synthesizer.normalize(&source);

    match args.output {
        Some(path) => {
            fs::write(&path, &normalized)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Normalized source written to {}", path.display());
            Ok(())
        }
        None => print_stdout(normalized.trim_end_matches('\n')),
    }
}

fn run_signature(synthesizer: &Synthesizer, args: SignatureArgs) -> Result<()> {
    let source = read_source(&args.source)?;
    let normalized = synthesizer.normalize(&source);
    let signature = synthesizer
        .extract_signature(&normalized)
        .with_context(|| format!("No usable method in {}", args.source.display()))?;

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&SignatureOutput::from(
            &signature,
        ))?)
    } else {
        print_stdout(&signature.to_string())
    }
}

fn run_generate(synthesizer: &Synthesizer, args: GenerateArgs) -> Result<()> {
    let source = read_source(&args.source)?;
    let report_text = fs::read_to_string(&args.report)
        .with_context(|| format!("Failed to read report {}", args.report.display()))?;
    let table = ReportTable::from_json(&report_text)
        .with_context(|| format!("Invalid report {}", args.report.display()))?;

    let normalized = synthesizer.normalize(&source);
    if let Some(path) = &args.normalized_output {
        fs::write(path, &normalized)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Normalized source written to {}", path.display());
    }

    let signature = match synthesizer.extract_signature(&normalized) {
        Ok(signature) => signature,
        Err(err @ SynthError::MalformedSignature(_)) => {
            let saved = formatted_path(&args.source, &args.output);
            fs::write(&saved, &normalized)
                .with_context(|| format!("Failed to write {}", saved.display()))?;
            log::error!(
                "Signature extraction failed; normalized source saved to {}",
                saved.display()
            );
            return Err(err).with_context(|| {
                format!(
                    "No usable method in {} (normalized text saved to {})",
                    args.source.display(),
                    saved.display()
                )
            });
        }
        Err(err) => return Err(err.into()),
    };
    log::info!("Method under test: {signature}");

    let generation = synthesizer.generate(&signature, &table);
    generation
        .artifact
        .write_to(&args.output)
        .context("Failed to write harness")?;
    log::info!(
        "Wrote {} case(s) to {}",
        generation.artifact.case_count,
        args.output.display()
    );

    if args.json {
        let summary = GenerateSummary {
            output: args.output.display().to_string(),
            cases: generation.cases.len(),
            warnings: &generation.warnings,
        };
        print_stdout(&serde_json::to_string_pretty(&summary)?)
    } else {
        print_stdout(&report::render_generate_summary(
            &signature,
            &args.output,
            generation.cases.len(),
            &generation.warnings,
        ))
    }
}

/// `<source-stem>_formatted.java` beside the harness output
fn formatted_path(source: &Path, output: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map_or_else(|| "source".into(), |stem| stem.to_string_lossy());
    let file_name = format!("{stem}_formatted.java");
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
