use anyhow::{bail, Context, Result};
use clap::Parser;
use gigavue_migrate::catalog::{load_embedded, load_from_dir, Catalog};
use gigavue_migrate::classify::build_facts;
use gigavue_migrate::inventory::build_inventory;
use gigavue_migrate::plan::{build_migration_plan, render_plan_text};
use gigavue_migrate::report::{render_facts_text, render_inventory_text, render_warnings};
use showdiag_core::split_capture_file;

mod cli;

use cli::{AnalyzeArgs, Cli, Command, InspectArgs, OutputFormat, PlanArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => run_inspect(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Plan(args) => run_plan(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let capture = split_capture_file(&args.file)
        .with_context(|| format!("failed to read capture {}", args.file.display()))?;
    let (inventory, warnings) = build_inventory(&capture);

    match args.format {
        OutputFormat::Text => {
            println!("[sections]");
            for (kind, lines) in &capture.sections {
                println!("- {kind}: {} lines", lines.len());
            }
            println!();
            println!("{}", render_inventory_text(&inventory));
            if args.verbose && !capture.unparsed.is_empty() {
                println!();
                println!("unclaimed_lines={}", capture.unparsed.len());
                for line in &capture.unparsed {
                    println!("- {line}");
                }
            }
            if !warnings.is_empty() {
                eprintln!("{}", render_warnings(&warnings));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inventory)?),
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let capture = split_capture_file(&args.file)
        .with_context(|| format!("failed to read capture {}", args.file.display()))?;
    let (inventory, warnings) = build_inventory(&capture);
    let facts = build_facts(&inventory);

    match args.format {
        OutputFormat::Text => {
            println!("{}", render_facts_text(&facts));
            if !warnings.is_empty() {
                eprintln!("{}", render_warnings(&warnings));
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({ "facts": facts, "warnings": warnings });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let capture = split_capture_file(&args.file)
        .with_context(|| format!("failed to read capture {}", args.file.display()))?;
    let catalog = resolve_catalog(&args)?;
    let plan = build_migration_plan(&capture, &catalog, None)?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_plan_text(&plan));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    if args.strict && plan.port_map.unmapped_count() > 0 {
        bail!(
            "strict mode failed: {} ports could not be mapped",
            plan.port_map.unmapped_count()
        );
    }
    Ok(())
}

fn resolve_catalog(args: &PlanArgs) -> Result<Catalog> {
    if let Some(dir) = &args.catalog_dir {
        return load_from_dir(dir)
            .with_context(|| format!("failed to load catalog from {}", dir.display()));
    }
    Ok(load_embedded()?)
}
