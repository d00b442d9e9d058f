use rand::{seq::SliceRandom, thread_rng, Rng};
use tracing::debug;

use crate::roster::StudentRecord;

/// Deals a shuffled roster into a fixed number of teams.
///
/// Callers are responsible for ensuring both counts are at least 1.
pub struct TeamDistributor {
    pub num_teams: usize,
    pub students_per_team: usize,
}

impl Default for TeamDistributor {
    fn default() -> Self {
        TeamDistributor {
            num_teams: 1,
            students_per_team: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAssignment {
    pub team: String,
    pub record: StudentRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    pub name: String,
    pub members: Vec<StudentRecord>,
}

/// Result of a distribution run: the full shuffled roster with each entry
/// tagged with its team, plus the per-team rosters in team-name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub combined: Vec<TeamAssignment>,
    pub teams: Vec<TeamRoster>,
}

impl TeamDistributor {
    pub fn new(num_teams: usize, students_per_team: usize) -> TeamDistributor {
        TeamDistributor {
            num_teams,
            students_per_team,
        }
    }

    pub fn distribute(&self, students: Vec<StudentRecord>) -> Distribution {
        self.distribute_with_rng(students, &mut thread_rng())
    }

    /// Shuffles the students and deals them out team by team. Each team is
    /// filled up to `students_per_team` before moving on; after the last
    /// team the walk wraps back to the first one, so inputs larger than
    /// `num_teams * students_per_team` leave the leading teams oversized.
    /// The walk always places exactly one entry per input record.
    pub fn distribute_with_rng<R>(&self, mut students: Vec<StudentRecord>, rng: &mut R) -> Distribution
    where
        R: Rng,
    {
        students.shuffle(rng);

        let mut teams = (0..self.num_teams)
            .map(|i| TeamRoster {
                name: format!("Team {}", i + 1),
                members: Vec::new(),
            })
            .collect::<Vec<_>>();

        let mut combined = Vec::with_capacity(students.len());
        let mut team_idx = 0;

        for student in students {
            let team = &mut teams[team_idx];
            combined.push(TeamAssignment {
                team: team.name.clone(),
                record: student.clone(),
            });
            team.members.push(student);

            if team.members.len() == self.students_per_team {
                team_idx += 1;
                if team_idx == self.num_teams {
                    team_idx = 0;
                }
            }
        }

        debug!(
            num_students = combined.len(),
            num_teams = self.num_teams,
            "distributed students"
        );

        Distribution { combined, teams }
    }
}
