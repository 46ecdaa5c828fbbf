//! Unreal Test Wrapper - bootstraps and beautifies Unreal Automation tests
//!
//! Launches the editor headless with `Automation RunTests <pattern>` and
//! renders its log as a live, hierarchical test report. Call from the
//! directory of your uproject file.

use clap::Parser;
use utw::commands::RunArgs;
use utw::common::logging;
use utw::runner;

#[derive(Parser)]
#[command(name = "utw", about = "Unreal Test Wrapper")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() {
    let guard = logging::init();

    let cli = Cli::parse();

    let code = match runner::run(cli.run).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            if let Some(path) = logging::log_path() {
                eprintln!("See {} for details", path.display());
            }
            1
        }
    };

    // process::exit skips destructors; flush the log writer first
    drop(guard);
    std::process::exit(code);
}
