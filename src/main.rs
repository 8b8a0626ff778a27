use std::process::ExitCode;

fn main() -> ExitCode {
    match spex::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spex: {err}");
            ExitCode::FAILURE
        }
    }
}
