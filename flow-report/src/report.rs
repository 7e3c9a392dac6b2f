//! Aggregated design set: every scanned variant, ordered by key.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::design::{DesignKey, DesignRecord, Status};

/// All design records of one run, ordered by `(platform, design, variant)`.
#[derive(Debug, Clone, Default)]
pub struct DesignSet {
    records: BTreeMap<DesignKey, DesignRecord>,
}

/// JSON view of one design.
#[derive(Serialize)]
struct DesignEntry<'a> {
    name: String,
    #[serde(flatten)]
    key: &'a DesignKey,
    status: Status,
    #[serde(flatten)]
    record: &'a DesignRecord,
}

impl DesignSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any previous record for the same key.
    pub fn insert(&mut self, key: DesignKey, record: DesignRecord) {
        self.records.insert(key, record);
    }

    /// Looks up a record.
    pub fn get(&self, key: &DesignKey) -> Option<&DesignRecord> {
        self.records.get(key)
    }

    /// Iterates records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DesignKey, &DesignRecord)> {
        self.records.iter()
    }

    /// Iterates records with the given status, in key order.
    pub fn with_status(
        &self,
        status: Status,
    ) -> impl Iterator<Item = (&DesignKey, &DesignRecord)> {
        self.records.iter().filter(move |(_, r)| r.status() == status)
    }

    /// Number of designs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no design was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of failing designs.
    pub fn failure_count(&self) -> usize {
        self.with_status(Status::Failing).count()
    }

    /// True if no design is failing.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Serializes the set as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a record cannot be encoded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let entries: Vec<DesignEntry<'_>> = self
            .records
            .iter()
            .map(|(key, record)| DesignEntry {
                name: key.to_string(),
                key,
                status: record.status(),
                record,
            })
            .collect();
        serde_json::to_string_pretty(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::tests::clean_record;

    #[test]
    fn ordered_by_key_and_grouped_by_status() {
        let mut set = DesignSet::new();
        let mut failing = clean_record();
        failing.flow.errors.push("[ERROR] x".to_string());
        set.insert(DesignKey::new("sky130hd", "aes", "base"), failing);
        set.insert(DesignKey::new("nangate45", "gcd", "base"), clean_record());

        let names: Vec<String> = set.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, vec!["nangate45 gcd (base)", "sky130hd aes (base)"]);
        assert_eq!(set.failure_count(), 1);
        assert!(!set.all_passed());
        assert_eq!(set.with_status(Status::Passing).count(), 1);
    }

    #[test]
    fn json_carries_name_and_status() -> anyhow::Result<()> {
        let mut set = DesignSet::new();
        set.insert(DesignKey::new("asap7", "ibex", "base"), clean_record());
        let value: serde_json::Value = serde_json::from_str(&set.to_json()?)?;
        assert_eq!(value[0]["name"], "asap7 ibex (base)");
        assert_eq!(value[0]["status"], "Passing");
        assert_eq!(value[0]["variant"], "base");
        Ok(())
    }
}
