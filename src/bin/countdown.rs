//! countdown - print a live MM:SS countdown in the terminal

use clap::Parser;
use std::process::ExitCode;

use modbot::logging::{self, LogOptions};
use modbot::timer::{self, Countdown, Launch, TICK};

#[derive(Parser, Debug)]
#[command(name = "countdown", version, about = "Count down the given number of seconds")]
struct Args {
    /// Duration in seconds (fractions are rounded down).
    #[arg(allow_hyphen_values = true)]
    seconds: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let opts = LogOptions {
        level: "warn".to_string(),
        ..LogOptions::default()
    };
    let _log_guard = logging::init(&opts).ok().flatten();

    let launched = timer::launch(
        args.seconds.as_deref(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    let seconds = match launched {
        Ok(Launch::Run(seconds)) => seconds,
        Ok(Launch::Exit(code)) => return ExitCode::from(code),
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match Countdown::new(seconds).run(&mut stdout, TICK).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
