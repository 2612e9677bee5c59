use std::io;
use std::path::PathBuf;

use clap::Parser;
use studyquest_cli::app::App;
use studyquest_core::Config;

#[derive(Parser)]
#[command(name = "studyquest", version, about = "StudyQuest learning adventure")]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the focus phase duration in seconds.
    #[arg(long)]
    focus_secs: Option<u64>,
    /// Override the break phase duration in seconds.
    #[arg(long)]
    break_secs: Option<u64>,
    /// Do not clear the screen between actions.
    #[arg(long)]
    no_clear: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(secs) = cli.focus_secs {
        config.timer.focus_secs = secs;
    }
    if let Some(secs) = cli.break_secs {
        config.timer.break_secs = secs;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(config.timer, stdin.lock(), stdout.lock());
    if cli.no_clear {
        app = app.without_clear();
    }
    app.run()?;
    Ok(())
}
