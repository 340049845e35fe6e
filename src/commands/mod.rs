//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod convert_command;
pub mod info_command;
pub mod batch_command;

pub use command_traits::{Command, CommandFactory};
pub use convert_command::ConvertCommand;
pub use info_command::InfoCommand;
pub use batch_command::BatchCommand;

use clap::ArgMatches;
use crate::api::{InputFormat, OutputFormat};
use crate::srs::errors::{SrsError, SrsResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct CrskitCommandFactory;

impl CrskitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CrskitCommandFactory
    }
}

impl Default for CrskitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CrskitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SrsResult<Box<dyn Command + 'a>> {
        if args.get_one::<String>("batch").is_some() {
            Ok(Box::new(BatchCommand::new(args, logger)?))
        } else if args.get_flag("info") {
            Ok(Box::new(InfoCommand::new(args, logger)?))
        } else {
            Ok(Box::new(ConvertCommand::new(args, logger)?))
        }
    }
}

/// Reads `--from`, defaulting to auto-detection
pub(crate) fn input_format(args: &ArgMatches) -> SrsResult<InputFormat> {
    args.get_one::<String>("from")
        .map(|s| s.parse())
        .unwrap_or(Ok(InputFormat::Auto))
}

/// Reads `--to`, defaulting to single-line WKT
pub(crate) fn output_format(args: &ArgMatches) -> SrsResult<OutputFormat> {
    args.get_one::<String>("to")
        .map(|s| s.parse())
        .unwrap_or(Ok(OutputFormat::Wkt))
}

/// The positional definition argument
pub(crate) fn input_definition(args: &ArgMatches) -> SrsResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| SrsError::GenericError("Missing input definition".to_string()))
}
