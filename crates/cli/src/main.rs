use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    stockcast_observability::init();

    let outcome = stockcast_cli::run(std::env::args_os().skip(1), stockcast_cli::Config::from_env);

    let mut stdout = std::io::stdout().lock();
    let written = writeln!(stdout, "{}", outcome.response.to_json_line());
    if let Err(e) = written.and_then(|_| stdout.flush()) {
        tracing::error!(error = %e, "failed to write response to stdout");
        return ExitCode::FAILURE;
    }

    ExitCode::from(outcome.exit_code)
}
