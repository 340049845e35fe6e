use clap::{Arg, Command as ClapCommand, ArgAction, ArgMatches};
use std::path::Path;
use std::process;
use log::{error, LevelFilter};

use crskit::registry::{self, Config};
use crskit::utils::logger::Logger;
use crskit::commands::{CommandFactory, CrskitCommandFactory};

fn cli() -> ClapCommand {
    ClapCommand::new("CrsKit")
        .version("1.0")
        .author("Maurice Schilpp")
        .about("Convert coordinate reference system definitions between WKT, Proj4, EPSG and Esri WKT")
        .arg(
            Arg::new("input")
                .help("Definition: WKT, Proj4, EPSG:<code>, a bare code, or @file")
                .required_unless_present("batch")
                .index(1),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Input notation (wkt, proj4, epsg, esri, auto)")
                .value_name("FORMAT")
                .default_value("auto")
                .required(false),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Output notation (wkt, pretty, proj4, esri)")
                .value_name("FORMAT")
                .default_value("wkt")
                .required(false),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .help("Convert every non-empty line of this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .help("Print a summary of the definition instead of converting it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("registry")
                .long("registry")
                .help("Folder holding the registry tables")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Record conversions to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// `out.log` -> `out-global.log`
fn global_log_path(log_file: &str) -> String {
    let path = Path::new(log_file);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("crskit");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-global.{}", stem, ext),
        None => format!("{}-global", stem),
    };
    path.with_file_name(name).to_string_lossy().into_owned()
}

fn init_logging(matches: &ArgMatches, configured: Option<LevelFilter>) -> Logger {
    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        configured.unwrap_or(LevelFilter::Warn)
    };

    let log_file = match matches.get_one::<String>("log-file") {
        Some(file) => file,
        None => {
            env_logger::Builder::from_default_env()
                .filter_level(level)
                .init();
            return Logger::disabled();
        },
    };

    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Some(global_level) = level.to_level() {
        if let Err(e) = Logger::init_global_logger(&global_log_path(log_file), global_level) {
            eprintln!("Error setting up global logger: {}", e);
            process::exit(1);
        }
    }
    logger
}

fn main() {
    let matches = cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => match Config::from_file(Path::new(path)) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let logger = init_logging(&matches, config.as_ref().and_then(|c| c.level_filter()));

    if let Some(config) = &config {
        config.apply();
    }
    if let Some(dir) = matches.get_one::<String>("registry") {
        registry::set_registry_dir(dir);
    }

    let factory = CrskitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
        let matches = cli().get_matches_from(["crskit", "--batch", "defs.txt", "--to", "proj4"]);
        assert_eq!(matches.get_one::<String>("from").map(String::as_str), Some("auto"));
        assert!(matches.get_one::<String>("input").is_none());
    }

    #[test]
    fn test_global_log_path() {
        assert_eq!(global_log_path("out.log"), "out-global.log");
        assert_eq!(global_log_path("logs/run"), "logs/run-global");
    }
}
