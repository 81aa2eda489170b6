use std::io::Write as _;

use anyhow::Context as _;
use tetoris_engine::{LEVEL_SPEED_MS, drop_interval};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SpeedTableArg {
    /// Highest level to list
    #[arg(long, default_value_t = LEVEL_SPEED_MS.len() + 1)]
    max_level: usize,
}

pub(crate) fn run(arg: &SpeedTableArg) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(render(arg.max_level).as_bytes())
        .context("Failed to write speed table to stdout")?;
    Ok(())
}

fn render(max_level: usize) -> String {
    let mut table = String::from("level  interval_ms\n");
    for level in 1..=max_level {
        table.push_str(&format!(
            "{level:>5}  {:>11}\n",
            drop_interval(level).as_millis()
        ));
    }
    table
}
