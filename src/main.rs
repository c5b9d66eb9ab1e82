use clap::Parser;

use task_list::cli::Cli;
use task_list::cmd::*;
use task_list::config::Config;
use task_list::error::CliError;

fn run(cli: Cli) -> Result<(), CliError> {
    // Resolved on demand: completions don't need a data directory
    let config = || Config::resolve(cli.dir.as_deref());

    match cli.command {
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::New { name } => cmd_new(&config()?, &name)?,
        Commands::Lists => cmd_lists(&config()?)?,
        Commands::Show { list, search } => cmd_show(&config()?, &list, search)?,
        Commands::Add { list, tasks } => cmd_add(&config()?, &list, tasks)?,
        Commands::Done { list, indexes } => cmd_done(&config()?, &list, indexes)?,
        Commands::Ui { list } => cmd_ui(&config()?, list)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
