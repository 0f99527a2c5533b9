//! Binary entrypoint for xcprep-cli.

fn main() {
    if let Err(err) = xcprep_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
