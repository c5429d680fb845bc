//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use recnews_cli::{CliError, run};

fn main() {
    if let Err(err) = run() {
        if let CliError::ArgumentParsing(parse) = &err {
            parse.exit();
        }
        eprintln!("recnews: {err}");
        std::process::exit(1);
    }
}
