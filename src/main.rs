// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, parse arguments and hand them to
//   the UI layer, which decides the exit code.

use clap::Parser;
use imgur_upload::ui::{run, Cli};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is reserved for the link.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let code = run(&cli)?;
    std::process::exit(code);
}
