//! Tessera probe (default binary).
//!
//! Builds one board from the command line or a JSON config and prints the
//! answer to a single query as JSON. Set `RUST_LOG=debug` to see grid
//! construction.

use anyhow::Result;

use tessera::probe::{parse_probe_args, run_probe};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let probe = parse_probe_args(&args)?;
    let answer = run_probe(&probe)?;
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}
