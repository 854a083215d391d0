//! `tco` - test configuration optimizer
//!
//! Reads SPARQL result feeds and JSON artifacts, runs one or all pipeline
//! stages, and writes pretty-printed JSON.

use anyhow::{bail, Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tco_model::feed::{self, SparqlResults};
use tco_model::{CostTable, OrderedTest, SufficiencyTable, TestConfiguration};
use tco_pipeline::{
    calculate_costs, generate_tests, optimize_test_order, prune_tests, CostSummary,
    OptimizedOrder, OptimizerConfig, Pipeline, SwapStrategy,
};
use tracing_subscriber::EnvFilter;

fn file_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .value_parser(value_parser!(PathBuf))
        .help("Write JSON here instead of stdout")
}

fn optimizer_args() -> [Arg; 7] {
    [
        Arg::new("no-optimize")
            .long("no-optimize")
            .action(ArgAction::SetTrue)
            .help("Keep the initial order, skip 2-opt"),
        Arg::new("resort")
            .long("resort")
            .action(ArgAction::SetTrue)
            .help("Shuffle tests before building the tour"),
        Arg::new("concorde")
            .long("concorde")
            .action(ArgAction::SetTrue)
            .help("Request the exact solver (falls back to 2-opt)"),
        Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .help("Seed for --resort"),
        Arg::new("strategy")
            .long("strategy")
            .value_parser(PossibleValuesParser::new(["scan-continue", "best-improvement"]))
            .help("2-opt move strategy"),
        Arg::new("max-passes")
            .long("max-passes")
            .value_parser(value_parser!(usize))
            .help("Stop 2-opt after this many passes"),
        Arg::new("config")
            .long("config")
            .value_parser(value_parser!(PathBuf))
            .help("TOML optimizer config; flags override it"),
    ]
}

fn cli() -> Command {
    Command::new("tco")
        .version(tco_pipeline::VERSION)
        .about("Test configuration generation, pruning and ordering")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate test configurations from a requirements feed")
                .arg(file_arg("requirements", "SPARQL requirements feed"))
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("prune")
                .about("Drop requirements not sufficient for their test")
                .arg(file_arg("tests", "Generated tests JSON"))
                .arg(file_arg("sufficiency", "SPARQL sufficiency feed"))
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("optimize")
                .about("Order tests to minimize reconfiguration cost")
                .arg(file_arg("tests", "Pruned tests JSON"))
                .arg(file_arg("costs", "Combined cost table JSON"))
                .args(optimizer_args())
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("costs")
                .about("Sum apply and retract costs of an ordered sequence")
                .arg(file_arg("tests", "Ordered tests JSON"))
                .arg(file_arg("costs", "Combined cost table JSON"))
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("run")
                .about("Run every stage and write all artifacts")
                .arg(file_arg("requirements", "SPARQL requirements feed"))
                .arg(file_arg("sufficiency", "SPARQL sufficiency feed"))
                .arg(file_arg("scenario-costs", "SPARQL scenario cost feed"))
                .arg(file_arg("observation-costs", "SPARQL observation cost feed"))
                .arg(file_arg("out-dir", "Directory for output artifacts"))
                .args(optimizer_args()),
        )
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("json-logs"));

    match matches.subcommand() {
        Some(("generate", args)) => generate(args),
        Some(("prune", args)) => prune(args),
        Some(("optimize", args)) => optimize(args),
        Some(("costs", args)) => costs(args),
        Some(("run", args)) => run(args),
        Some((other, _)) => bail!("unknown subcommand {other}"),
        None => bail!("no subcommand given"),
    }
}

fn path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing --{name}"))
}

fn read_feed(path: &Path) -> Result<SparqlResults> {
    SparqlResults::from_path(path).with_context(|| format!("reading feed {}", path.display()))
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    feed::read_json(path).with_context(|| format!("reading {}", path.display()))
}

fn emit<T: Serialize>(value: &T, out: Option<&PathBuf>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// File config first, then command-line overrides
fn optimizer_config(args: &ArgMatches) -> Result<OptimizerConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => OptimizerConfig::default(),
    };

    if args.get_flag("no-optimize") {
        config = config.with_optimize(false);
    }
    if args.get_flag("resort") {
        config = config.with_resort(true);
    }
    if args.get_flag("concorde") {
        config = config.with_concorde(true);
    }
    if let Some(seed) = args.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    if let Some(strategy) = args.get_one::<String>("strategy") {
        config = config.with_strategy(match strategy.as_str() {
            "best-improvement" => SwapStrategy::BestImprovement,
            _ => SwapStrategy::ScanContinue,
        });
    }
    if let Some(passes) = args.get_one::<usize>("max-passes") {
        config = config.with_max_passes(*passes);
    }
    Ok(config)
}

fn generate(args: &ArgMatches) -> Result<()> {
    let doc = read_feed(path(args, "requirements")?)?;
    let report = generate_tests(&feed::requirements_from_sparql(&doc));
    if report.skipped_count() > 0 {
        tracing::warn!("{} requirement rows skipped", report.skipped_count());
    }
    emit(&report.tests, args.get_one("out"))
}

fn prune(args: &ArgMatches) -> Result<()> {
    let tests: Vec<TestConfiguration> = read_artifact(path(args, "tests")?)?;
    let doc = read_feed(path(args, "sufficiency")?)?;
    let table = SufficiencyTable::from_records(&feed::sufficiency_from_sparql(&doc));
    emit(&prune_tests(tests, &table).tests, args.get_one("out"))
}

fn optimize(args: &ArgMatches) -> Result<()> {
    let tests: Vec<TestConfiguration> = read_artifact(path(args, "tests")?)?;
    let costs: CostTable = read_artifact(path(args, "costs")?)?;
    let order = optimize_test_order(&tests, &costs, &optimizer_config(args)?)?;
    emit(&order, args.get_one("out"))
}

/// Either an optimizer result or a bare ordered list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Sequence {
    Optimized(OptimizedOrder),
    Plain(Vec<OrderedTest>),
}

impl Sequence {
    fn tests(&self) -> &[OrderedTest] {
        match self {
            Self::Optimized(order) => &order.tests,
            Self::Plain(tests) => tests,
        }
    }
}

fn costs(args: &ArgMatches) -> Result<()> {
    let sequence: Sequence = read_artifact(path(args, "tests")?)?;
    let costs: CostTable = read_artifact(path(args, "costs")?)?;
    emit(&calculate_costs(sequence.tests(), &costs), args.get_one("out"))
}

#[derive(Debug, Serialize)]
struct CostComparison {
    optimized: CostSummary,
    unoptimized: CostSummary,
}

fn run(args: &ArgMatches) -> Result<()> {
    let requirements = read_feed(path(args, "requirements")?)?;
    let sufficiency = read_feed(path(args, "sufficiency")?)?;
    let costs = feed::cost_table_from_sparql(
        &read_feed(path(args, "scenario-costs")?)?,
        &read_feed(path(args, "observation-costs")?)?,
    )?;

    let out_dir = path(args, "out-dir")?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let report = Pipeline::new(optimizer_config(args)?)
        .run_feeds(&requirements, &sufficiency, &costs)?;
    if report.generation.skipped_count() > 0 {
        tracing::warn!("{} requirement rows skipped", report.generation.skipped_count());
    }

    let artifact = |name: &str| Some(out_dir.join(name));
    emit(&report.generation.tests, artifact("tests.json").as_ref())?;
    emit(&report.pruning.tests, artifact("pruned_tests.json").as_ref())?;
    emit(&costs, artifact("costs.json").as_ref())?;
    emit(&report.optimized, artifact("test_order_optimized.json").as_ref())?;
    emit(&report.baseline, artifact("tests_unoptimized.json").as_ref())?;
    emit(
        &CostComparison {
            optimized: report.optimized_costs,
            unoptimized: report.baseline_costs,
        },
        artifact("cost_summary.json").as_ref(),
    )?;

    tracing::info!(
        "Wrote artifacts to {} (saved {} over unoptimized order)",
        out_dir.display(),
        report.savings()
    );
    Ok(())
}
