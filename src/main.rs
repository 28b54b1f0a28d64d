// fpbridge - stdin/stdout command bridge for UART fingerprint sensors
use clap::Parser;
use fpbridge::cli::{execute, Args};

fn main() {
    let args = Args::parse();

    if let Err(e) = execute(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
