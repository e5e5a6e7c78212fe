use std::process::ExitCode;

use image_sort::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = match image_sort::cli::try_parse() {
        Ok(a) => a,
        Err(e) => {
            // --help/--version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
