use clap::Parser;
use crashtop::{Cli, run};
use crashtop_types::Error;

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let code = match err.downcast_ref::<Error>() {
            // Valid no-results outcome, not a failure.
            Some(Error::EmptyResult) => {
                eprintln!("{}", err);
                3
            }
            Some(e) => {
                eprintln!("Error: {}", err);
                e.exit_code()
            }
            None => {
                eprintln!("Error: {:#}", err);
                2
            }
        };
        std::process::exit(code);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
