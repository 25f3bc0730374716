use clap::Parser;
use todo::cli::commands::{Cli, Commands};
use todo::cli::handlers;

fn main() {
    let mut cli = Cli::parse();

    let result = match cli.command.take() {
        // Init is handled before the config is read, so a broken todo.toml can be replaced
        Some(Commands::Init(args)) => handlers::cmd_init(args, cli.dir.as_deref()),
        command => {
            cli.command = command;
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
