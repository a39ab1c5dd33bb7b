use std::fs::File;
use std::io::{
    stdout,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use log::{
    info,
    LevelFilter,
};
use ranksum::prelude::*;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[arg(
        short,
        long,
        help = "Tab-separated input with one `value<TAB>group` pair per line. \
                Groups are A/B or 1/2."
    )]
    input: PathBuf,
    #[arg(
        short,
        long,
        help = "Run a one-sided test for this group instead of a two-sided test."
    )]
    group: Option<Group>,
    #[arg(short, long, value_enum, help = "Method selection.")]
    strategy: Option<Strategy>,
    #[arg(long, value_enum, help = "Exact probability mode.")]
    exact_mode: Option<ExactMode>,
    #[arg(long, help = "Largest group size handled by the exact method.")]
    exact_max_group: Option<usize>,
    #[arg(short, long, help = "JSON file with test configuration.")]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = false, help = "Verbose output.")]
    verbose: bool,
}

impl Cli {
    /// Config file values, overridden by command-line flags.
    fn mwu_config(&self) -> Result<MwuConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path).with_context(|| {
                    format!("failed to open config {}", path.display())
                })?;
                MwuConfig::from_json(file).with_context(|| {
                    format!("failed to parse config {}", path.display())
                })?
            },
            None => MwuConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if let Some(exact_mode) = self.exact_mode {
            config = config.with_exact_mode(exact_mode);
        }
        if let Some(exact_max_group) = self.exact_max_group {
            config = config.with_exact_max_group(exact_max_group);
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct Report {
    sizes:     SampleSizes,
    rank_sums: (f64, f64),
    u_a:       f64,
    u_b:       f64,
    group:     Option<Group>,
    result:    TestResult,
}

fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    }
    else {
        LevelFilter::Warn
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .context("failed to set up logger")
}

fn read_observations(
    path: &Path,
    config: MwuConfig,
) -> Result<RankSumTester> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open input {}", path.display()))?;

    let mut tester = RankSumTester::new().with_config(config);
    for (idx, record) in reader.deserialize::<(f64, Group)>().enumerate() {
        let (value, group) =
            record.with_context(|| format!("malformed record {}", idx + 1))?;
        tester
            .add(value, group)
            .with_context(|| format!("invalid observation in record {}", idx + 1))?;
    }
    info!(
        "Read {} observations from {}",
        tester.len(),
        path.display()
    );
    Ok(tester)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let config = cli.mwu_config()?;
    let tester = read_observations(&cli.input, config)?;

    let result = match cli.group {
        Some(group) => tester.run_one_sided_test(group)?,
        None => tester.run_two_sided_test()?,
    };
    let report = Report {
        sizes: tester.set_sizes(),
        rank_sums: tester.rank_sums(),
        u_a: tester.u_statistic(Group::A)?,
        u_b: tester.u_statistic(Group::B)?,
        group: cli.group,
        result,
    };

    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
