//! `autofail`: finds objects a chart's engine would unload too early and
//! proposes filler padding that keeps them loaded.

mod chart;
mod prompt;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autofail_fix::{AutoFailSession, Decision, FixOutcome, FixProposal};
use autofail_model::TimingParams;
use clap::Parser;
use log::{LevelFilter, info};

use chart::Chart;
use prompt::PromptDecider;

#[derive(Parser, Debug)]
#[command(name = "autofail", about = "Detect and fix auto-fail in a chart")]
struct Args {
    /// Chart JSON file
    chart: PathBuf,

    /// Timing parameters JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Approach time in milliseconds
    #[arg(long, env = "AUTOFAIL_APPROACH_TIME")]
    approach_time: Option<i64>,

    /// 50-score hit window in milliseconds
    #[arg(long = "hit-window-50", env = "AUTOFAIL_HIT_WINDOW_50")]
    hit_window_50: Option<i64>,

    /// Extra physics lifetime in milliseconds
    #[arg(long, env = "AUTOFAIL_PHYSICS_MARGIN")]
    physics_margin: Option<i64>,

    /// Give up once a solution would need more than this many fillers
    #[arg(long)]
    max_padding: Option<usize>,

    /// Accept the first proposal without asking
    #[arg(short, long)]
    yes: bool,

    /// Report the accepted solution without changing the chart
    #[arg(long)]
    dry_run: bool,

    /// Where to write the fixed chart (default: <chart>.fixed.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// CLI overrides > config file > chart params > defaults.
    fn timing_params(&self, chart: &Chart) -> Result<TimingParams> {
        let mut params = match &self.config {
            Some(path) => TimingParams::read(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => chart.params.unwrap_or_default(),
        };
        if let Some(v) = self.approach_time {
            params.approach_time = v;
        }
        if let Some(v) = self.hit_window_50 {
            params.hit_window_50 = v;
        }
        if let Some(v) = self.physics_margin {
            params.physics_margin = v;
        }
        params.validate();
        Ok(params)
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.chart.with_extension("fixed.json"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut chart = Chart::read(&args.chart)?;
    let params = args.timing_params(&chart)?;
    info!(
        "approach {} ms, 50-window {} ms, physics margin {} ms",
        params.approach_time, params.hit_window_50, params.physics_margin
    );

    let mut session = AutoFailSession::new(chart.timeline(), params)
        .with_context(|| format!("invalid chart {}", args.chart.display()))?
        .with_max_padding(args.max_padding);

    let has_auto_fail = session.detect()?;
    print_report(&session, has_auto_fail);

    let auto_apply = !args.dry_run;
    let outcome = if args.yes {
        session.run_fix_dialogue(auto_apply, &mut |proposal: &FixProposal| {
            println!("{proposal}");
            Decision::Accept
        })?
    } else {
        let stdin = io::stdin();
        let mut decider = PromptDecider::new(stdin.lock(), io::stdout());
        session.run_fix_dialogue(auto_apply, &mut decider)?
    };

    match outcome {
        FixOutcome::NothingToFix => println!("Nothing to fix."),
        FixOutcome::Aborted => println!("Cancelled."),
        FixOutcome::Exhausted => println!("No accepted solution within the padding limit."),
        FixOutcome::Accepted(solution) => {
            println!("Accepted {} fillers; chart left unchanged.", solution.total());
        }
        FixOutcome::Applied(solution) => {
            let has_auto_fail = session.detect()?;
            print_report(&session, has_auto_fail);
            write_fixed(&mut chart, session.into_timeline(), &args.output_path())?;
            println!("Inserted {} fillers.", solution.total());
        }
    }
    Ok(())
}

fn print_report(session: &AutoFailSession, has_auto_fail: bool) {
    println!("Auto-fail detected: {has_auto_fail}");
    println!("Unloading objects: {:?}", session.unloading_objects());
    println!(
        "Potential unloading objects: {:?}",
        session.potential_unloading_objects()
    );
    println!("Disruptors: {:?}", session.disruptors());
}

fn write_fixed(chart: &mut Chart, timeline: autofail_model::Timeline, path: &Path) -> Result<()> {
    chart.set_timeline(timeline);
    chart.write(path)?;
    info!("wrote fixed chart to {}", path.display());
    Ok(())
}
