use std::process::ExitCode;

use jsmin_cli::CliError;

fn main() -> ExitCode {
    match jsmin_cli::run(std::env::args_os()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err @ CliError::ArgumentCount) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
        Err(err) => {
            eprintln!("jsmin: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
