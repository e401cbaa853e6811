use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = mdnote::run() {
        eprintln!("error: {err:#}");
        return ExitCode::from(mdnote::exit_code(&err));
    }
    ExitCode::SUCCESS
}
