// This is the entry point of our `reel` CLI tool.
// It builds the shared services once and delegates argument parsing and
// command dispatching to the `reel` crate.

use reel::services::Services;
use std::io::IsTerminal;
use std::{env, panic, process};

fn main() {
    let args: Vec<String> = env::args().collect();
    let debug = reel::debug_enabled();

    // Handler panics are reported by the failure handler below
    if !debug {
        panic::set_hook(Box::new(|_| {}));
    }

    let result = Services::from_env().and_then(|services| reel::run(&args, &services));
    if let Err(err) = result {
        let style = reel::ReportStyle {
            debug,
            color: std::io::stderr().is_terminal(),
        };
        if let Err(e) = reel::report_failure(&err, style, &mut std::io::stderr()) {
            eprintln!("Impossible to report the error: {e}");
        }
        process::exit(1)
    }
}
