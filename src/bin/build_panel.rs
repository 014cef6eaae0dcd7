use std::process::ExitCode;

fn main() -> ExitCode {
    match stable_yields::app::build_panel() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
