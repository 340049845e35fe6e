//! Definition conversion command
//!
//! This module implements the command for converting one definition
//! between notations.

use clap::ArgMatches;
use log::info;

use crate::api::{parse_input, render, InputFormat, OutputFormat};
use crate::commands::command_traits::Command;
use crate::commands::{input_definition, input_format, output_format};
use crate::srs::errors::SrsResult;
use crate::utils::logger::Logger;

/// Command for converting a definition
pub struct ConvertCommand<'a> {
    /// Definition text or `@path`
    input: String,
    /// Notation of the input
    from: InputFormat,
    /// Notation to write
    to: OutputFormat,
    /// Logger for recording conversions
    logger: &'a Logger,
}

impl<'a> ConvertCommand<'a> {
    /// Create a new convert command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording conversions
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrsResult<Self> {
        Ok(ConvertCommand {
            input: input_definition(args)?,
            from: input_format(args)?,
            to: output_format(args)?,
            logger,
        })
    }
}

impl<'a> Command for ConvertCommand<'a> {
    fn execute(&self) -> SrsResult<()> {
        info!("Converting definition ({:?} -> {})", self.from, self.to);

        let srs = parse_input(&self.input, self.from)?;
        let output = render(&srs, self.to)?;
        println!("{}", output);

        self.logger.log_conversion(&self.input, &self.to.to_string(), &output)?;
        Ok(())
    }
}
