use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vocab_types::TrainingUnit;

/// Terms a user looked up that are due for review on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub user_id: i64,
    pub date: NaiveDate,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedUnit {
    pub user_id: i64,
    pub unit: TrainingUnit,
}

/// Everything the stores keep, in the shape written to disk
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub history: Vec<HistoryDay>,
    pub units: Vec<SavedUnit>,
}

impl StoreData {
    /// Returns false when the term was already recorded for that day
    pub fn append_lookup(&mut self, user_id: i64, term: &str, date: NaiveDate) -> bool {
        match self
            .history
            .iter_mut()
            .find(|day| day.user_id == user_id && day.date == date)
        {
            Some(day) if day.terms.iter().any(|t| t == term) => false,
            Some(day) => {
                day.terms.push(term.to_string());
                true
            }
            None => {
                self.history.push(HistoryDay {
                    user_id,
                    date,
                    terms: vec![term.to_string()],
                });
                true
            }
        }
    }

    pub fn history_of(&self, user_id: i64) -> Vec<HistoryDay> {
        let mut days: Vec<HistoryDay> = self
            .history
            .iter()
            .filter(|day| day.user_id == user_id)
            .cloned()
            .collect();
        days.sort_by_key(|day| day.date);
        days
    }

    pub fn count_units(&self, user_id: i64) -> usize {
        self.units.iter().filter(|u| u.user_id == user_id).count()
    }

    pub fn units_of(&self, user_id: i64, limit: usize) -> Vec<TrainingUnit> {
        self.units
            .iter()
            .filter(|u| u.user_id == user_id)
            .take(limit)
            .map(|u| u.unit.clone())
            .collect()
    }

    pub fn upsert_unit(&mut self, user_id: i64, unit: TrainingUnit) {
        let existing = self.units.iter_mut().find(|saved| {
            saved.user_id == user_id
                && saved.unit.item == unit.item
                && saved.unit.sense.definition == unit.sense.definition
        });
        match existing {
            Some(saved) => saved.unit = unit,
            None => self.units.push(SavedUnit { user_id, unit }),
        }
    }
}
