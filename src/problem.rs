//! Problem definition: the venue-to-venue distance matrix of a TTP instance.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TtsaError;

/// A TTP instance. Venue `i` is the home of team `i`; ids are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    distances: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a problem from a square matrix of travel costs.
    pub fn new(name: String, distances: Vec<Vec<f64>>) -> Result<Self, TtsaError> {
        let n = distances.len();
        if n == 0 {
            return Err(TtsaError::DistanceMatrix("matrix is empty".to_string()));
        }

        for (i, row) in distances.iter().enumerate() {
            if row.len() != n {
                return Err(TtsaError::DistanceMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i + 1,
                    row.len(),
                    n
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(TtsaError::DistanceMatrix(format!(
                        "entry ({}, {}) = {} is not a non-negative number",
                        i + 1,
                        j + 1,
                        d
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(TtsaError::DistanceMatrix(format!(
                    "diagonal entry ({0}, {0}) must be zero",
                    i + 1
                )));
            }
        }

        Ok(Problem { name, distances })
    }

    /// Number of teams (and venues) described by the matrix.
    pub fn number_of_teams(&self) -> usize {
        self.distances.len()
    }

    /// Travel cost from the venue of team `from` to the venue of team `to`.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from - 1][to - 1]
    }

    /// The instance restricted to its first `teams` venues.
    pub fn truncated(&self, teams: usize) -> Result<Self, TtsaError> {
        if teams > self.number_of_teams() {
            return Err(TtsaError::DistanceMatrix(format!(
                "cannot take {} teams from a matrix of {}",
                teams,
                self.number_of_teams()
            )));
        }
        if teams == self.number_of_teams() {
            return Ok(self.clone());
        }

        let distances = self
            .distances
            .iter()
            .take(teams)
            .map(|row| row[..teams].to_vec())
            .collect();

        Problem::new(format!("{}[{}]", self.name, teams), distances)
    }

    /// Parse whitespace-separated rows of distances.
    pub fn parse(name: &str, text: &str) -> Result<Self, TtsaError> {
        let mut distances = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| TtsaError::Parse {
                        line: i + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            distances.push(row);
        }

        Problem::new(name.to_string(), distances)
    }

    /// Load a problem from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TtsaError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());

        Problem::parse(&name, &text)
    }
}
