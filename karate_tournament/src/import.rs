//! Participant import.
//!
//! Registration forms and spreadsheets are flattened by the host into
//! [`ParticipantRecord`]s (plain strings, as typed). Each record is
//! validated on its own; bad rows are reported and skipped, good rows go
//! straight into category assignment.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::{
    entities::{Belt, Discipline, ParseEntityError, Participant, ParticipantId, Sex},
    tournament::{Tournament, TournamentError},
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("first and last name are required")]
    BlankName,

    #[error("invalid age {0}")]
    InvalidAge(i32),

    #[error("no discipline selected")]
    NoDisciplines,

    #[error(transparent)]
    Parse(#[from] ParseEntityError),

    #[error("malformed import file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tournament(#[from] TournamentError),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// One participant as supplied by an external source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub belt: String,
    pub sex: String,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default)]
    pub disciplines: Vec<String>,
}

impl ParticipantRecord {
    /// Validate the record and build a participant with a fresh id
    pub fn into_participant(self) -> ImportResult<Participant> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(ImportError::BlankName);
        }

        let age = u8::try_from(self.age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or(ImportError::InvalidAge(self.age))?;
        let belt: Belt = self.belt.parse()?;
        let sex: Sex = self.sex.parse()?;
        let disciplines = self
            .disciplines
            .iter()
            .map(|d| d.parse::<Discipline>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        if disciplines.is_empty() {
            return Err(ImportError::NoDisciplines);
        }

        let mut participant =
            Participant::new(first_name, last_name, age, belt, sex).with_disciplines(disciplines);
        if let Some(club) = self.club.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            participant = participant.with_club(club);
        }
        Ok(participant)
    }
}

/// Parse a JSON array of records
pub fn parse_records(json: &str) -> ImportResult<Vec<ParticipantRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// A row that was not imported
#[derive(Debug)]
pub struct SkippedRecord {
    /// 1-based position in the input
    pub row: usize,
    pub error: ImportError,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<ParticipantId>,
    pub skipped: Vec<SkippedRecord>,
}

/// Register every valid record, in order
pub fn import_records(
    tournament: &mut Tournament,
    records: impl IntoIterator<Item = ParticipantRecord>,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (offset, record) in records.into_iter().enumerate() {
        let row = offset + 1;
        let outcome = record.into_participant().and_then(|participant| {
            let id = participant.id;
            tournament.register(participant)?;
            Ok(id)
        });

        match outcome {
            Ok(id) => report.imported.push(id),
            Err(error) => {
                warn!("Skipping import row {row}: {error}");
                report.skipped.push(SkippedRecord { row, error });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::TournamentSettings;

    fn record(first: &str, age: i32, disciplines: &[&str]) -> ParticipantRecord {
        ParticipantRecord {
            first_name: first.to_string(),
            last_name: "Kowalska".to_string(),
            age,
            belt: "Kyu5".to_string(),
            sex: "F".to_string(),
            club: Some("  ".to_string()),
            disciplines: disciplines.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_valid_record() {
        let p = record("Ala", 9, &["Kata", "kumite"]).into_participant().unwrap();
        assert_eq!(p.full_name(), "Ala Kowalska");
        assert_eq!(p.sex, Sex::Female);
        assert_eq!(p.disciplines.len(), 2);
        assert_eq!(p.club, None);
    }

    #[test]
    fn test_invalid_records() {
        assert!(matches!(
            record(" ", 9, &["Kata"]).into_participant(),
            Err(ImportError::BlankName)
        ));
        assert!(matches!(
            record("Ala", 0, &["Kata"]).into_participant(),
            Err(ImportError::InvalidAge(0))
        ));
        assert!(matches!(
            record("Ala", 300, &["Kata"]).into_participant(),
            Err(ImportError::InvalidAge(300))
        ));
        assert!(matches!(
            record("Ala", 9, &[]).into_participant(),
            Err(ImportError::NoDisciplines)
        ));
        assert!(matches!(
            record("Ala", 9, &["Sumo"]).into_participant(),
            Err(ImportError::Parse(ParseEntityError::Discipline(_)))
        ));
    }

    #[test]
    fn test_parse_camel_case_json() {
        let json = r#"[
            {"firstName": "Ala", "lastName": "Nowak", "age": 12, "belt": "Kyu4",
             "sex": "Female", "club": "Dojo A", "disciplines": ["Kata"]},
            {"firstName": "Jan", "lastName": "Lis", "age": 30, "belt": "Dan", "sex": "M"}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].club.as_deref(), Some("Dojo A"));
        assert!(records[1].disciplines.is_empty());
        assert!(matches!(parse_records("{"), Err(ImportError::Json(_))));
    }

    #[test]
    fn test_import_reports_skipped_rows() {
        let mut tournament = Tournament::new(TournamentSettings::default()).unwrap();
        let report = import_records(
            &mut tournament,
            vec![
                record("Ala", 9, &["Kata"]),
                record("Ola", 9, &[]),
                record("Ela", 9, &["Kata"]),
            ],
        );
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 2);
        assert_eq!(tournament.category(0).unwrap().members, report.imported);
    }
}
