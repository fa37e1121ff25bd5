mod config;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use config::AppConfig;
use editopia_adapters::{
    present_export, present_export_failure, present_session, ImageCrateDecoder, JpegImageEncoder,
};
use editopia_application::{ApplicationService, ApplyFilterCommand, ExportCommand, LoadImageCommand};
use editopia_domain::FilterKind;

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_env();
    let mut service = build_application_service(&config);

    let command = parse_command(&args);
    match run_command(command, &mut service, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            log::error!("{msg}");
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> ApplicationService {
    ApplicationService::with_history_capacity(
        Box::new(ImageCrateDecoder),
        Box::new(JpegImageEncoder::new(config.jpeg_quality)),
        config.history_capacity,
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Ui { image: Option<PathBuf> },
    Apply { image: PathBuf, filter: FilterKind },
    Help,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Ok(Command::Ui { image: None });
    }

    match args[1].as_str() {
        "ui" => Ok(Command::Ui {
            image: args.get(2).map(PathBuf::from),
        }),
        "apply" => {
            if args.len() < 4 {
                return Err(CommandError::Usage(
                    "apply needs an image path and a filter name".to_string(),
                ));
            }
            let filter = args[3]
                .parse::<FilterKind>()
                .map_err(|error| CommandError::Usage(error.to_string()))?;
            Ok(Command::Apply {
                image: PathBuf::from(&args[2]),
                filter,
            })
        }
        "help" => Ok(Command::Help),
        other if args.len() == 2 => Ok(Command::Ui {
            image: Some(PathBuf::from(other)),
        }),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn run_command(
    command: Result<Command, CommandError>,
    service: &mut ApplicationService,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command? {
        Command::Ui { image } => {
            ui::launch_window(service, config, image).map_err(CommandError::Runtime)
        }
        Command::Apply { image, filter } => {
            service
                .load_image(LoadImageCommand { path: image })
                .map_err(|error| CommandError::Runtime(format!("load failed: {error}")))?;
            let summary = service
                .apply_filter(ApplyFilterCommand { kind: filter })
                .map_err(|error| CommandError::Runtime(format!("filter failed: {error}")))?;
            log::info!("{}", present_session(&summary));
            let path = service
                .export(ExportCommand {
                    output_dir: config.output_dir.clone(),
                })
                .map_err(|error| {
                    CommandError::Runtime(format!("{} ({error})", present_export_failure()))
                })?;
            println!("{}", present_export(&path));
            Ok(())
        }
        Command::Help => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  editopia [image]");
    println!("  editopia ui [image]");
    println!("  editopia apply <image> <none|warm|cool|vintage|sepia|b&w>");
    println!("  editopia help");
}
