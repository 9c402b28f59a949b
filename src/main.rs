use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use minilinker::cli::{Cli, Commands, ConfigCommands};
use minilinker::config::{StaticConfig, get_config, init_config};
use minilinker::errors::MinilinkerError;
use minilinker::runtime::run_server;
use minilinker::system::init_logging;

const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config.as_deref()).await,
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => generate_config(output_path.as_deref().unwrap_or(DEFAULT_SAMPLE_PATH), force),
    }
}

async fn serve(config_path: Option<&str>) -> ExitCode {
    init_config(config_path);
    let config = get_config();

    // guard 必须存活到进程结束
    let _guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server error: {:#}", e);
            eprintln!("{}", MinilinkerError::config(format!("{:#}", e)).format_colored());
            ExitCode::FAILURE
        }
    }
}

fn generate_config(path: &str, force: bool) -> ExitCode {
    if Path::new(path).exists() && !force {
        eprintln!(
            "{}",
            MinilinkerError::file_operation(format!(
                "{} already exists, use --force to overwrite",
                path
            ))
            .format_colored()
        );
        return ExitCode::FAILURE;
    }

    match StaticConfig::write_sample_config(path) {
        Ok(()) => {
            println!("Sample configuration written to {}", path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}
