//! capability-check — 校验能力配置文件是否被当前二进制支持
//!
//! Usage:
//!   capability-check <FILE> --context <channel|orderer|application> [--report] [--verbose]
//!
//! Exit codes: 0 compatible, 1 unreadable or malformed config, 2 a required
//! capability is not supported by this build.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use capability_registry::{CapabilityStatus, Context, Error, Registry};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "capability-check", version)]
struct Args {
    /// Capability config file (.yaml, .yml or .json)
    file: PathBuf,

    /// Deployment context whose built-in capability list is checked
    #[arg(long, short)]
    context: Context,

    /// Print the status of every declared capability
    #[arg(long)]
    report: bool,

    /// Log optional capabilities this build does not support
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(&args);
    if let Err(e) = &result {
        eprintln!("error: {:#}", e);
    }
    ExitCode::from(exit_code(&result))
}

/// 0 when compatible, 2 when a required capability is unsupported, 1 for
/// anything else. Sees through `anyhow` context wrappers.
fn exit_code(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<Error>() {
            Some(err) if err.is_incompatible() => 2,
            _ => 1,
        },
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let registry = Registry::from_config_file(args.context.provider(), &args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;

    if args.report {
        for (name, status) in registry.status_report() {
            let label = match status {
                CapabilityStatus::Active { required: true } => "active (required)",
                CapabilityStatus::Active { required: false } => "active (optional)",
                CapabilityStatus::Unsupported { required: true } => "UNSUPPORTED (required)",
                CapabilityStatus::Unsupported { required: false } => "unsupported (optional)",
            };
            println!("{:<24} {}", name, label);
        }
    }

    if let Err(err) = registry.supported() {
        let missing = registry.unsupported_required();
        if missing.len() > 1 {
            eprintln!(
                "{} required {} capabilities are not supported: {}",
                missing.len(),
                args.context,
                missing.join(", ")
            );
        }
        return Err(Error::from(err).into());
    }

    println!(
        "{} capabilities in {} are supported by this build",
        args.context,
        args.file.display()
    );
    Ok(())
}
