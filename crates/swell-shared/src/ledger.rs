//! Append-only ledger of claimed missions.
//!
//! Entries are created once per `(date, mission_id)` and never mutated or
//! removed. Storage sits behind `LedgerStore`; the only implementation kept
//! here is the in-memory one used for a single session.

use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::mission::Focus;

/// Single completed mission in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub date: DayKey,
    pub focus: Focus,
    pub mission_id: String,
    pub xp: u32,
    pub shells: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    /// Coach note attached to the reward, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Entry {
    pub fn new(date: DayKey, focus: Focus, mission_id: &str, xp: u32, shells: u32) -> Self {
        Self {
            id: format!("{}-{}", date, mission_id),
            date,
            focus,
            mission_id: mission_id.to_string(),
            xp,
            shells,
            reflection: None,
            note: None,
        }
    }

    /// Attach a reflection; blank text is dropped.
    pub fn with_reflection(mut self, reflection: &str) -> Self {
        let trimmed = reflection.trim();
        self.reflection = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// True if this entry occupies the `(date, mission_id)` slot.
    pub fn is_for(&self, date: DayKey, mission_id: &str) -> bool {
        self.date == date && self.mission_id == mission_id
    }
}

/// Append-only storage seam for the progression ledger.
pub trait LedgerStore {
    /// Append an entry. Callers check `contains` first.
    fn append(&mut self, entry: Entry);

    /// Every entry, most recent first.
    fn read_all(&self) -> &[Entry];

    fn contains(&self, date: DayKey, mission_id: &str) -> bool {
        self.read_all().iter().any(|e| e.is_for(date, mission_id))
    }
}

/// Process-memory ledger; lost when the session ends.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: Vec<Entry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedger {
    fn append(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }

    fn read_all(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2024, 4, d).unwrap()
    }

    #[test]
    fn test_entry_id_combines_date_and_mission() {
        let entry = Entry::new(day(2), Focus::Stress, "2024-04-02-easy-7", 10, 1);
        assert_eq!(entry.id, "2024-04-02-2024-04-02-easy-7");
        assert!(entry.is_for(day(2), "2024-04-02-easy-7"));
        assert!(!entry.is_for(day(3), "2024-04-02-easy-7"));
    }

    #[test]
    fn test_blank_reflection_dropped() {
        let entry = Entry::new(day(2), Focus::Stress, "m", 10, 1).with_reflection("   ");
        assert_eq!(entry.reflection, None);
        let entry = entry.with_reflection("  called mum ");
        assert_eq!(entry.reflection.as_deref(), Some("called mum"));
    }

    #[test]
    fn test_memory_ledger_most_recent_first() {
        let mut ledger = MemoryLedger::new();
        ledger.append(Entry::new(day(1), Focus::Stress, "a", 10, 1));
        ledger.append(Entry::new(day(2), Focus::Stress, "b", 12, 1));
        let all = ledger.read_all();
        assert_eq!(all[0].mission_id, "b");
        assert_eq!(all[1].mission_id, "a");
        assert!(ledger.contains(day(1), "a"));
        assert!(!ledger.contains(day(2), "a"));
    }
}
