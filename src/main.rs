use gravsim::{Scenario, ScenarioConfig};
use gravsim::run_sandbox;
use gravsim::{bench_pairwise, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML to load; the built-in three-body setup when omitted
    #[arg(short, long)]
    file_name: Option<PathBuf>,

    /// Run the step scaling benchmarks instead of the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_config(path: &PathBuf) -> Result<ScenarioConfig> {
    let file = File::open(path)
        .with_context(|| format!("failed to open scenario file {}", path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario file {}", path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_pairwise();
        bench_step_curve();
        return Ok(());
    }

    let scenario_cfg = match &args.file_name {
        Some(path) => load_scenario_config(path)?,
        None => ScenarioConfig::default(),
    };

    let scenario = Scenario::build_scenario(scenario_cfg);
    run_sandbox(scenario);

    Ok(())
}
