use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_qpcr::cli::{Cli, Commands};
use kira_qpcr::ctx::Ctx;
use kira_qpcr::io;
use kira_qpcr::math::stats::NanPolicy;
use kira_qpcr::pipeline::Pipeline;
use kira_qpcr::quant::QuantConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = QuantConfig {
                nan_policy: if args.skip_nan {
                    NanPolicy::Skip
                } else {
                    NanPolicy::Propagate
                },
                threads: args.threads,
            };
            let mut ctx = Ctx::new(
                args.input,
                args.out,
                args.controls,
                args.calibrator,
                config,
                args.json,
                !args.no_tsv,
                env!("CARGO_PKG_VERSION"),
            );
            Pipeline::full().run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                PathBuf::from("."),
                args.controls,
                args.calibrator,
                QuantConfig::default(),
                false,
                false,
                env!("CARGO_PKG_VERSION"),
            );
            Pipeline::quantify().run(&mut ctx)?;
            print_validate_summary(&ctx);
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) {
    println!("kira-qpcr validate ok");
    println!("readings: {}", ctx.readings.len());
    println!("pairs: {}", ctx.pair_count());
    print_warnings(ctx);
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
