//! Entry point for the `nearby` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = nearby_cli::run() {
        eprintln!("nearby: {err}");
        std::process::exit(1);
    }
}
