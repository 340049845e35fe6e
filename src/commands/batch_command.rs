//! Batch conversion command
//!
//! Converts every non-empty line of a file. A line that fails is reported
//! and skipped; the rest of the batch still runs.

use std::fs;
use clap::ArgMatches;
use log::{error, info};

use crate::api::{parse_input, render, InputFormat, OutputFormat};
use crate::commands::command_traits::Command;
use crate::commands::{input_format, output_format};
use crate::srs::errors::{SrsError, SrsResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command converting a file of definitions, one per line
pub struct BatchCommand<'a> {
    /// File holding the definitions
    batch_file: String,
    from: InputFormat,
    to: OutputFormat,
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SrsResult<Self> {
        let batch_file = args.get_one::<String>("batch")
            .ok_or_else(|| SrsError::GenericError("Missing batch file".to_string()))?
            .clone();

        Ok(BatchCommand {
            batch_file,
            from: input_format(args)?,
            to: output_format(args)?,
            logger,
        })
    }

    /// Converts each non-empty line, pairing results with 1-based line numbers
    fn convert_lines(&self, content: &str) -> Vec<(usize, SrsResult<String>)> {
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line.trim()))
            .collect();

        let progress = ProgressTracker::new(lines.len() as u64, "Converting definitions");
        let mut results = Vec::with_capacity(lines.len());

        for (number, line) in lines {
            let result = parse_input(line, self.from).and_then(|srs| render(&srs, self.to));
            if let Ok(output) = &result {
                if let Err(e) = self.logger.log_conversion(line, &self.to.to_string(), output) {
                    error!("Unable to record conversion: {}", e);
                }
            }
            results.push((number, result));
            progress.increment(1);
        }

        let failures = results.iter().filter(|(_, r)| r.is_err()).count();
        progress.finish(failures);
        results
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> SrsResult<()> {
        info!("Converting definitions from {}", self.batch_file);
        let content = fs::read_to_string(&self.batch_file)?;

        let results = self.convert_lines(&content);
        let mut failures = 0;
        for (number, result) in &results {
            match result {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    failures += 1;
                    error!("Line {}: {}", number, e);
                    eprintln!("line {}: {}", number, e);
                },
            }
        }

        info!("Converted {} of {} definitions", results.len() - failures, results.len());
        Ok(())
    }
}
