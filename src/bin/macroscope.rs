//! Macroscope CLI - compile and play text-editing macros
//!
//! Provides subcommands for checking a macro, dumping its compiled form,
//! and playing it against a text file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use macroscope::config::{MacroConfig, load_config};
use macroscope::language::{Compilation, Compiler, Keywords};
use macroscope::player::{MemorySurface, Player, Position};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "macroscope")]
#[command(about = "Compile and play line-oriented text-editing macros", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a macro and report diagnostics
    Check {
        /// Macro source file
        script: PathBuf,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the operation and move keywords
    Keywords,

    /// Print the compiled program as JSON
    Dump {
        /// Macro source file
        script: PathBuf,
    },

    /// Play a macro against a text file
    Play {
        /// Macro source file
        script: PathBuf,

        /// Text file to edit
        #[arg(short, long)]
        input: PathBuf,

        /// 1-based cursor line
        #[arg(long, default_value = "1")]
        line: usize,

        /// 1-based cursor column
        #[arg(long, default_value = "1")]
        column: usize,

        /// Number of times to play (resumes across pauses)
        #[arg(short, long, default_value = "1")]
        times: usize,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MacroConfig::default(),
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "loaded configuration");
    let compiler = Compiler::new(config.compiler.clone());

    match cli.command {
        Commands::Check { script, json } => {
            let compilation = compile_file(&compiler, &script)?;
            let diagnostics = compilation.diagnostics.unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&diagnostics)?);
            } else if diagnostics.is_empty() {
                println!(
                    "{}: {} operation(s), ok",
                    script.display(),
                    compilation.program.len()
                );
            } else {
                for diagnostic in &diagnostics {
                    println!("{}: {}", script.display(), diagnostic);
                }
            }
            if !diagnostics.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Keywords => {
            let keywords = Keywords::global();
            println!("operations:");
            for word in keywords.operation_keywords() {
                println!("  {word}");
            }
            println!("moves:");
            for word in keywords.move_keywords() {
                println!("  {word}");
            }
        }

        Commands::Dump { script } => {
            let compilation = compile_file(&compiler, &script)?;
            for diagnostic in compilation.diagnostics.iter().flatten() {
                tracing::warn!(%diagnostic, "compile diagnostic");
            }
            println!("{}", serde_json::to_string_pretty(&compilation.program)?);
        }

        Commands::Play {
            script,
            input,
            line,
            column,
            times,
            output,
        } => {
            let program = compiler
                .load_program(&script)
                .with_context(|| format!("cannot play {}", script.display()))?;
            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let cursor = Position::new(line.saturating_sub(1), column.saturating_sub(1));
            let mut surface = MemorySurface::new(&text).with_cursor(cursor);
            let mut player = Player::new();

            for run in 1..=times {
                let outcome = player.play(&mut surface, &program).await;
                tracing::info!(run, ?outcome, "play finished");
            }

            match output {
                Some(path) => fs::write(&path, surface.text())
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", surface.text()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn compile_file(compiler: &Compiler, script: &Path) -> anyhow::Result<Compilation> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;
    Ok(compiler.compile(&source))
}
