//! Definition summary command

use clap::ArgMatches;
use log::info;

use crate::api::{describe, parse_input, InputFormat};
use crate::commands::command_traits::Command;
use crate::commands::{input_definition, input_format};
use crate::srs::errors::SrsResult;
use crate::utils::logger::Logger;

/// Command printing a summary of one definition
pub struct InfoCommand<'a> {
    input: String,
    from: InputFormat,
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrsResult<Self> {
        Ok(InfoCommand {
            input: input_definition(args)?,
            from: input_format(args)?,
            logger,
        })
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> SrsResult<()> {
        let srs = parse_input(&self.input, self.from)?;
        let summary = describe(&srs);
        print!("{}", summary);

        info!("Described definition {}", srs.name().unwrap_or("(unnamed)"));
        self.logger.log(&summary)?;
        Ok(())
    }
}
