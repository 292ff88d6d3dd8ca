use clap::Parser;

use chatbot_audio::cli::{self, Cli, Command, ConfigCommand};
use chatbot_audio::logging;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.config.as_deref();
    match args.command {
        Some(Command::Version) => {
            cli::handle_version();
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Path)) => {
            cli::handle_config_path(config_path);
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            let cfg = cli::load_app_config(config_path)?;
            cli::handle_config_show(&cfg)
        }
        Some(Command::Run { event, output }) => {
            let cfg = cli::load_app_config(config_path)?;
            logging::init_logging(&cfg.logging)?;
            cli::handle_run(cfg, &event, output.as_deref()).await
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
