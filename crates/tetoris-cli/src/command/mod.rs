use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use self::{simulate::SimulateArg, speed_table::SpeedTableArg};

mod simulate;
mod speed_table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a command sequence through the engine and print the final state
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the gravity interval for each level
    SpeedTable(#[clap(flatten)] SpeedTableArg),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.verbose);
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::SpeedTable(arg) => speed_table::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_verbosity_and_mode() {
        let args = CommandArgs::try_parse_from(["tetoris", "-vv", "speed-table"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::SpeedTable(_)));

        let args =
            CommandArgs::try_parse_from(["tetoris", "simulate", "--keys", "<<_", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert!(matches!(args.mode, Mode::Simulate(_)));
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(CommandArgs::try_parse_from(["tetoris", "simulate", "--seed", "xyz"]).is_err());
    }
}
