use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context as _;
use log::info;
use serde::{Deserialize, Serialize};
use tetoris_engine::{
    Board, Command, GameEngine, GameEvent, GameSnapshot, PieceGenerator, PieceKind, PieceSeed,
    PieceSequence, PieceSource, parse_keys, parse_script,
};

use crate::util::{self, Output};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hex digits; overrides the scenario seed, random when neither is given
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Scenario JSON file with an optional seed, board, piece list and commands
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Commands by name separated by whitespace or commas, run after the scenario commands
    #[arg(long)]
    script: Option<String>,
    /// Single-key commands (`<` `>` `v` `^` space `p` `.` `r`), run after `--script`
    #[arg(long)]
    keys: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Starting conditions and inputs for one simulated game.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    #[serde(default)]
    seed: Option<PieceSeed>,
    /// Initial board as 20 rows of 10 cells (`.` or a piece letter), top row first.
    #[serde(default)]
    board: Option<Board>,
    /// Fixed piece order replacing random draws; repeats once exhausted.
    #[serde(default)]
    pieces: Option<Vec<PieceKind>>,
    #[serde(default)]
    commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationReport {
    /// Seed of the random generator, absent when a fixed piece list was used.
    seed: Option<PieceSeed>,
    commands: usize,
    accepted: usize,
    events: Vec<GameEvent>,
    snapshot: GameSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut scenario: Scenario = match &arg.scenario {
        Some(path) => util::read_json_file("scenario", path)?,
        None => Scenario::default(),
    };
    if let Some(script) = &arg.script {
        let commands = parse_script(script).context("Failed to parse --script")?;
        scenario.commands.extend(commands);
    }
    if let Some(keys) = &arg.keys {
        let commands = parse_keys(keys).context("Failed to parse --keys")?;
        scenario.commands.extend(commands);
    }
    if arg.seed.is_some() {
        scenario.seed = arg.seed;
    }

    let report = simulate(scenario)?;
    info!(
        "applied {} commands ({} accepted), final score {}",
        report.commands, report.accepted, report.snapshot.score
    );

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Json => output.write_json(&report)?,
        OutputFormat::Text => output.write_text(&render_text(&report))?,
    }
    Ok(())
}

fn simulate(scenario: Scenario) -> anyhow::Result<SimulationReport> {
    let board = scenario.board.unwrap_or_default();
    if let Some(pieces) = scenario.pieces {
        let source = PieceSequence::new(pieces).context("Scenario piece list is empty")?;
        let engine = GameEngine::with_board(board, source);
        Ok(play(engine, None, &scenario.commands))
    } else {
        let generator = scenario
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        let seed = generator.seed();
        let engine = GameEngine::with_board(board, generator);
        Ok(play(engine, Some(seed), &scenario.commands))
    }
}

fn play<S>(
    mut engine: GameEngine<S>,
    seed: Option<PieceSeed>,
    commands: &[Command],
) -> SimulationReport
where
    S: PieceSource,
{
    let mut events = vec![];
    let mut accepted = 0;
    for &command in commands {
        let report = engine.apply_with(command, &mut |event: &GameEvent| {
            events.push(event.clone());
        });
        if report.is_accepted() {
            accepted += 1;
        }
    }
    SimulationReport {
        seed,
        commands: commands.len(),
        accepted,
        events,
        snapshot: engine.snapshot(),
    }
}

fn render_text(report: &SimulationReport) -> String {
    let snapshot = &report.snapshot;
    let active_kind = snapshot.active.map(|piece| piece.kind());
    let mut text = String::new();
    for (y, row) in (0..).zip(snapshot.board.rows()) {
        text.push('|');
        for (x, cell) in (0..).zip(row) {
            let ch = match active_kind {
                Some(kind) if snapshot.active_cells.contains(&(x, y)) => {
                    kind.as_char().to_ascii_lowercase()
                }
                _ => cell.as_char(),
            };
            text.push(ch);
        }
        text.push_str("|\n");
    }
    text.push_str("+----------+\n");

    let status = if snapshot.game_over {
        "game over"
    } else if snapshot.paused {
        "paused"
    } else {
        "running"
    };
    let _ = writeln!(text, "next:   {}", snapshot.next);
    let _ = writeln!(text, "score:  {}", snapshot.score);
    let _ = writeln!(text, "level:  {}", snapshot.level);
    let _ = writeln!(text, "lines:  {}", snapshot.lines);
    let _ = writeln!(text, "status: {status}");
    if let Some(seed) = report.seed {
        let _ = writeln!(text, "seed:   {seed}");
    }
    text
}
