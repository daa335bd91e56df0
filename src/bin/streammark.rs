//! CLI entry point for streammark

use std::io::{self, Read};
use std::process;

use clap::Parser;
use duplay::marker::{MESSAGE_WINDOW, PACKET_WINDOW, find_marker};

#[derive(Parser, Debug)]
#[command(name = "streammark")]
#[command(about = "Finds the first unique-run marker in a datastream")]
#[command(version)]
struct Args {
    /// Datastream to scan (reads standard input when omitted)
    stream: Option<String>,

    /// Marker window length
    #[arg(short = 'w', long = "window", default_value_t = PACKET_WINDOW)]
    window: usize,

    /// Scan for a start-of-message marker (window of 14)
    #[arg(short = 'm', long = "message", conflicts_with = "window")]
    message: bool,
}

fn main() {
    let args = Args::parse();

    let window = if args.message {
        MESSAGE_WINDOW
    } else {
        args.window
    };
    if window == 0 {
        eprintln!("streammark: window must be at least 1");
        process::exit(1);
    }

    let stream = match args.stream {
        Some(stream) => stream,
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("streammark: failed to read standard input: {}", e);
                process::exit(1);
            }
            buffer.trim_end().to_string()
        }
    };

    match find_marker(&stream, window) {
        Some(consumed) => println!("first marker after {} characters", consumed),
        None => {
            eprintln!("streammark: no marker found");
            process::exit(1);
        }
    }
}
