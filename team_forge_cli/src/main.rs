use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use team_forge_core::distribute::TeamDistributor;
use team_forge_core::export::write_distribution;
use team_forge_core::import::{read_roster_file, ParseWarning};

#[derive(Parser, Debug)]
#[command(
    name = "team_forge",
    about = "Randomly assign students to teams from a CSV file."
)]
struct Cli {
    /// Path to the input CSV file containing student data.
    input_file: PathBuf,

    /// Number of teams to create.
    #[arg(short = 'n', long)]
    num_teams: i64,

    /// Number of students per team.
    #[arg(short = 's', long, default_value_t = 6)]
    students_per_team: i64,

    /// Directory to save the output CSV files.
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,
}

// The counts are parsed as signed integers so that zero and negative values
// reach our validation instead of clap's error path.
fn validate(cli: &Cli) -> Result<(), anyhow::Error> {
    if cli.num_teams <= 0 {
        anyhow::bail!("number of teams must be positive");
    }
    if cli.students_per_team <= 0 {
        anyhow::bail!("students per team must be positive");
    }
    if !cli.input_file.is_file() {
        anyhow::bail!(
            "input file '{}' does not exist",
            cli.input_file.display()
        );
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    let parsed = read_roster_file(&cli.input_file)?;
    for warning in &parsed.warnings {
        match warning {
            ParseWarning::SkippedEmptyRow { index } => {
                warn!(row = *index, "skipped empty row in input file")
            }
        }
    }

    let distributor = TeamDistributor::new(
        cli.num_teams as usize,
        cli.students_per_team as usize,
    );
    let distribution = distributor.distribute(parsed.roster.students);

    let paths = write_distribution(&distribution, &parsed.roster.columns, &cli.output_dir)?;

    println!("Full team file saved: {}", paths.combined.display());
    for (name, path) in &paths.team_files {
        println!("{} saved: {}", name, path.display());
    }

    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if std::env::args().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();
    validate(&cli)?;
    run(&cli)
}
