use std::process::ExitCode;

fn main() -> ExitCode {
    match rolabel2yolor::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
