use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::Result;
use callscript::{
    AjaxBehavior, config::Config, header::RecordingHeaderResponse, request::RequestFile,
    throttle_script,
};
use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, debug};

#[derive(Parser, Debug)]
#[command(
    name = "callscript",
    version,
    about = "Compose client-side Ajax callback scripts"
)]
struct Cli {
    /// Additional configuration file, applied after user and project config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the callback script described by a request file
    Compose {
        /// TOML request file
        request: PathBuf,
    },
    /// Print the header contributions of the behavior in a request file
    Head {
        /// TOML request file
        request: PathBuf,
    },
    /// Wrap a script so it runs at most once per delay window
    Throttle {
        /// Throttle id, constant for the same script
        #[arg(long)]
        id: String,
        /// Minimum interval between executions
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Script to throttle
        script: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Compose { request } => {
            let call = RequestFile::load(&request)?.build()?;
            debug!("Composing callback script for {}", request.display());
            writeln!(stdout, "{}", call.script())?;
        }
        Command::Head { request } => {
            let config = Config::load(cli.config.as_deref())?;
            let call = RequestFile::load(&request)?.build()?;
            let mut response = RecordingHeaderResponse::new();
            call.behavior.render_head(&mut response, &config.settings());
            for item in response.items() {
                writeln!(stdout, "{item}")?;
            }
        }
        Command::Throttle {
            id,
            delay_ms,
            script,
        } => {
            let wrapped = throttle_script(&script, &id, delay_ms.map(Duration::from_millis))?;
            writeln!(stdout, "{wrapped}")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
