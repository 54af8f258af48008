use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::Command;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for vectorscape")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt, clippy and tests, stopping at the first failure
    Check,
    /// Run all tests
    Test,
    /// Run the depth-sort benchmark
    Bench,
    /// Render a few seeded frames headless and verify the PNG
    Smoke {
        #[arg(long, default_value = "target/smoke.png")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            cargo(
                "clippy",
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            )?;
            cargo("test", &["test", "--workspace"])?;
        }
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "vectorscape-render", "--bench", "bench_depth_sort"],
        )?,
        Commands::Smoke { out } => smoke(&out)?,
    }

    Ok(())
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}

fn smoke(out: &PathBuf) -> Result<()> {
    let out_arg = out.to_string_lossy();
    cargo(
        "run (smoke render)",
        &[
            "run", "-p", "vectorscape-cli", "--", "render", "--frames", "30", "--seed", "1",
            "--out", &out_arg,
        ],
    )?;
    let bytes = std::fs::read(out).with_context(|| format!("reading {}", out.display()))?;
    if !bytes.starts_with(&PNG_SIGNATURE) {
        anyhow::bail!("{} is not a PNG", out.display());
    }
    println!("==> smoke OK: {} ({} bytes)", out.display(), bytes.len());
    Ok(())
}
