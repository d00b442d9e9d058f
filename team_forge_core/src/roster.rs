use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Columns every input file must provide for team composition. All other
/// columns are carried through to the output unchanged.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Email Address",
    "1. Name of student",
    "2. Year of study",
    "3. Branch of study",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StudentRecord {
    pub fields: HashMap<String, String>,
}

impl StudentRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }

    pub fn set<K, V>(&mut self, column: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.insert(column.into(), value.into());
    }
}

/// An ordered list of students together with the column order of the file
/// they were read from. Record identity is positional; duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Roster {
    pub columns: Vec<String>,
    pub students: Vec<StudentRecord>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
