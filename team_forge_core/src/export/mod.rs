use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::distribute::Distribution;
use crate::roster::StudentRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize output file: {0}")]
    Csv(#[from] csv::Error),
}

/// Paths produced by `write_distribution`, so callers can report them.
pub struct ExportPaths {
    pub combined: PathBuf,
    pub team_files: Vec<(String, PathBuf)>,
}

/// Writes `teams.csv` plus one `{team name}.csv` per team into `output_dir`,
/// creating the directory if it does not exist. Every file carries the input
/// column order with a trailing "Team" column.
pub fn write_distribution(
    distribution: &Distribution,
    columns: &[String],
    output_dir: &Path,
) -> Result<ExportPaths, ExportError> {
    std::fs::create_dir_all(output_dir)?;

    let mut header = columns.iter().map(|c| c.as_str()).collect::<Vec<_>>();
    header.push("Team");

    let combined_path = output_dir.join("teams.csv");
    let mut writer = csv::Writer::from_path(&combined_path)?;
    writer.write_record(&header)?;
    for assignment in &distribution.combined {
        write_row(&mut writer, columns, &assignment.record, &assignment.team)?;
    }
    writer.flush()?;

    debug!(path = %combined_path.display(), "wrote combined roster");

    let mut team_files = Vec::with_capacity(distribution.teams.len());
    for team in &distribution.teams {
        let team_path = output_dir.join(format!("{}.csv", team.name));
        let mut writer = csv::Writer::from_path(&team_path)?;
        writer.write_record(&header)?;
        for member in &team.members {
            write_row(&mut writer, columns, member, &team.name)?;
        }
        writer.flush()?;
        team_files.push((team.name.clone(), team_path));
    }

    Ok(ExportPaths {
        combined: combined_path,
        team_files,
    })
}

fn write_row(
    writer: &mut csv::Writer<File>,
    columns: &[String],
    record: &StudentRecord,
    team: &str,
) -> Result<(), ExportError> {
    let mut row = columns
        .iter()
        .map(|c| record.get(c).unwrap_or(""))
        .collect::<Vec<_>>();
    row.push(team);
    writer.write_record(&row)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::distribute::TeamDistributor;
    use crate::import::RosterReaderConfig;

    use super::write_distribution;

    const TEST_FILE: &str = "\
Email Address,1. Name of student,2. Year of study,3. Branch of study
a@uni.edu,Pers. A,2,CS
b@uni.edu,Pers. B,3,EE
c@uni.edu,Pers. C,1,ME
d@uni.edu,Pers. D,2,CS
";

    #[test]
    fn test_written_files_and_row_counts() -> Result<(), anyhow::Error> {
        let parsed = RosterReaderConfig::with_delimiter(b',').parse(TEST_FILE.as_bytes())?;
        let mut rng: StdRng = SeedableRng::from_seed([4; 32]);
        let distribution =
            TeamDistributor::new(2, 2).distribute_with_rng(parsed.roster.students, &mut rng);

        let dir = tempfile::tempdir()?;
        let paths = write_distribution(&distribution, &parsed.roster.columns, dir.path())?;

        assert_eq!(paths.combined, dir.path().join("teams.csv"));
        assert_eq!(paths.team_files.len(), 2);

        let combined = std::fs::read_to_string(&paths.combined)?;
        let mut lines = combined.lines();
        assert_eq!(
            lines.next(),
            Some("Email Address,1. Name of student,2. Year of study,3. Branch of study,Team")
        );
        assert_eq!(lines.count(), 4);

        for (name, path) in &paths.team_files {
            let content = std::fs::read_to_string(path)?;
            assert_eq!(content.lines().count(), 3);
            assert!(content.lines().skip(1).all(|l| l.ends_with(name.as_str())));
        }

        Ok(())
    }

    #[test]
    fn test_creates_missing_output_directory() -> Result<(), anyhow::Error> {
        let parsed = RosterReaderConfig::with_delimiter(b',').parse(TEST_FILE.as_bytes())?;
        let mut rng: StdRng = SeedableRng::from_seed([8; 32]);
        let distribution =
            TeamDistributor::new(1, 6).distribute_with_rng(parsed.roster.students, &mut rng);

        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("out").join("teams");
        write_distribution(&distribution, &parsed.roster.columns, &nested)?;

        assert!(nested.join("teams.csv").is_file());
        assert!(nested.join("Team 1.csv").is_file());

        Ok(())
    }
}
