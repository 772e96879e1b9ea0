use std::time::Duration;

use plum_rules::cli::cli_top::run_stdio_loop;
use plum_rules::game_state::session::SessionConfig;

// Use 'cargo run --release -- --engine stockfish --depth 12 --interval-ms 500'
fn main() -> std::io::Result<()> {
    let config = parse_args(std::env::args().skip(1));
    run_stdio_loop(config)
}

fn parse_args(args: impl Iterator<Item = String>) -> SessionConfig {
    let mut config = SessionConfig::default();
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => config.verbose = true,
            "--depth" => {
                if let Some(depth) = args.next().and_then(|x| x.parse::<u8>().ok()) {
                    config.evaluation_depth = depth;
                }
            }
            "--interval-ms" => {
                if let Some(ms) = args.next().and_then(|x| x.parse::<u64>().ok()) {
                    config.evaluation_interval = Duration::from_millis(ms);
                }
            }
            "--engine" => config.engine_path = args.next(),
            other => eprintln!("ignoring unknown argument '{other}'"),
        }
    }

    config
}
