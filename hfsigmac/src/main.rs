use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hfsigmac::config::SigmacConfig;
use hfsigmac::data::io::{read_event_batch, write_output};
use hfsigmac::error::SigmacResult;
use hfsigmac::workflow::SigmacWorkflow;

/// Σc0,++ → Λc+(→pK-π+) π-,+ candidate creator
#[derive(Parser, Debug)]
#[command(name = "hfsigmac", version, about)]
struct Args {
    /// Event batch (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output tables (JSON)
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (JSON), defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the Monte-Carlo matching regardless of the configuration
    #[arg(long)]
    mc: bool,

    /// Number of worker threads, rayon default when omitted
    #[arg(long)]
    threads: Option<usize>,
}

fn run(args: Args) -> SigmacResult<()> {
    let mut config = match &args.config {
        Some(path) => SigmacConfig::from_json_file(path)?,
        None => SigmacConfig::default(),
    };
    if args.mc {
        config.process_mc = true;
    }

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    let workflow = SigmacWorkflow::new(config)?;
    let batch = read_event_batch(&args.input)?;
    let output = workflow.run(&batch);
    write_output(&args.output, &output)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
