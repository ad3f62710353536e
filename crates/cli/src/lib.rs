//! Command-line wrapper around the `jsmin` engine.
//!
//! `jsmin <input.js> <output.js>` minifies one file into another. Nothing is written to
//! stdout; diagnostics go to stderr and the exit status tells success (0), a usage error
//! (2) or any other failure (1).

use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use clap::Parser;
use jsmin::{MinifyError, Summary};

#[derive(Parser, Debug)]
#[command(name = "jsmin")]
#[command(about = "Strip comments and insignificant whitespace from a script", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Script to minify
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// Destination for the minified script (truncated if it exists)
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
}

/// Errors that end a CLI run.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("usage: jsmin <input.js> <output.js>")]
    ArgumentCount,

    #[error("unable to open input: {}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to open output: {}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing output: {}", path.display())]
    OutputClose {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Minify(#[from] MinifyError),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ArgumentCount => 2,
            _ => 1,
        }
    }
}

/// Run the CLI over `args` (including the program name).
pub fn run<I, T>(args: I) -> Result<Summary, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args).map_err(|_| CliError::ArgumentCount)?;

    let input = File::open(&args.input).map_err(|source| CliError::InputOpen {
        path: args.input.clone(),
        source,
    })?;
    let output = File::create(&args.output).map_err(|source| CliError::OutputOpen {
        path: args.output.clone(),
        source,
    })?;

    let mut writer = BufWriter::new(output);
    let summary = jsmin::minify(BufReader::new(input), &mut writer)?;

    // A failed final flush is a failed close.
    writer.into_inner().map_err(|e| CliError::OutputClose {
        path: args.output.clone(),
        source: e.into_error(),
    })?;

    Ok(summary)
}
