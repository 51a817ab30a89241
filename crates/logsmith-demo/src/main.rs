#![forbid(unsafe_code)]

//! LogSmith demo binary entry point.

use logsmith_demo::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to initialize: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
