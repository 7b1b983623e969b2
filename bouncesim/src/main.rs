use bouncesim::{ScenarioConfig, Scenario2D, Scenario3D, RunSummary};
use bouncesim::{bench_step, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "arena_2d.yaml")]
    file_name: String,

    /// Override the number of frames in the scenario
    #[arg(long)]
    frames: Option<u64>,

    /// Run the step benchmark instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Print the benchmark as CSV (with --bench)
    #[arg(long)]
    csv: bool,
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        if args.csv {
            bench_step_curve();
        } else {
            bench_step();
        }
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(frames) = args.frames {
        scenario_cfg.engine.frames = frames;
    }

    let summary: RunSummary = if scenario_cfg.engine.dimension {
        Scenario3D::build_scenario(scenario_cfg)?.run()
    } else {
        Scenario2D::build_scenario(scenario_cfg)?.run()
    };

    println!("{summary}");
    Ok(())
}
