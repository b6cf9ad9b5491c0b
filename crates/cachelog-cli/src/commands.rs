use super::args::Cli;
use super::scanner;
use anyhow::Result;
use cachelog_engine::ScanOptions;

pub fn run(cli: Cli) -> Result<()> {
    // -1 is the "no filtering" sentinel; any other value, including other
    // negatives, is a live limit.
    let options = ScanOptions {
        stdin_limit: (cli.stdin_limit != -1).then_some(cli.stdin_limit),
    };

    let cwd = std::env::current_dir()?;
    let report = scanner::scan_dir(&cwd, options)?;
    println!("{report}");
    Ok(())
}
