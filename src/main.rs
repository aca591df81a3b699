use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use serde_json::Value;
use std::sync::Arc;
use test_explorer_core::cli::{self, Command, DiscoverArgs, FilterArgs, ResultsArgs};
use test_explorer_core::discovery::DirectoryExplorer;
use test_explorer_core::filter::map_test_ids_to_test_filter;
use test_explorer_core::lifecycle::TestLoader;
use test_explorer_core::logging::{self, Verbosity};
use test_explorer_core::output::OutputFormatter;
use test_explorer_core::parser::JsTestParser;
use test_explorer_core::results::{ResultTree, RunReport};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let value = match &args.command {
        Command::Discover(discover) => discover_tests(discover).await?,
        Command::Results(results) => map_report(results).await?,
        Command::Filter(filter) => {
            if filter.cli_args {
                return print_cli_args(filter);
            }
            serde_json::to_value(map_test_ids_to_test_filter(filter.ids.as_slice()))?
        }
    };

    let content = OutputFormatter::format(&value, args.format)?;
    OutputFormatter::write(&content, args.output_file.as_deref())
}

fn loader(explorer_args: &cli::ExplorerArgs) -> Result<TestLoader> {
    let config = explorer_args.to_config()?;
    let explorer = DirectoryExplorer::new(&config, Arc::new(JsTestParser::new()))
        .context("Invalid test file patterns")?;
    let (loader, _events) = TestLoader::channel(explorer);
    Ok(loader)
}

async fn discover_tests(args: &DiscoverArgs) -> Result<Value> {
    let suite = loader(&args.explorer)?
        .load()
        .await
        .context("Test discovery failed")?;
    Ok(serde_json::to_value(suite)?)
}

async fn map_report(args: &ResultsArgs) -> Result<Value> {
    let report = RunReport::from_path(&args.report)
        .with_context(|| format!("Cannot load report: {}", args.report.display()))?;
    let loader = loader(&args.explorer)?;

    if args.merge {
        loader.load().await.context("Test discovery failed")?;
    }
    let result = loader.map_run(&report).await;

    if !args.merge {
        return Ok(serde_json::to_value(result)?);
    }
    let merged = ResultTree {
        suite: loader.merged_tree().await,
        decorations: result.decorations,
    };
    Ok(serde_json::to_value(merged)?)
}

fn print_cli_args(args: &FilterArgs) -> Result<()> {
    if let Some(filter) = map_test_ids_to_test_filter(args.ids.as_slice()) {
        for arg in filter.to_cli_args() {
            println!("{arg}");
        }
    }
    Ok(())
}
