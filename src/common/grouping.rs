//! Order-preserving grouping of claim records.
//!
//! Groups come back in order of first appearance, and records inside a
//! group keep their input order. Nothing is sorted or deduplicated, so the
//! group sizes always add up to the input length.

use crate::core::{ClaimRecord, NOT_SPECIFIED};
use std::collections::HashMap;

/// Records sharing one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub key: String,
    pub records: Vec<&'a ClaimRecord>,
}

impl<'a> Group<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in input order. Groups are never built empty.
    pub fn first(&self) -> Option<&'a ClaimRecord> {
        self.records.first().copied()
    }

    pub fn total_paid(&self) -> f64 {
        self.records.iter().map(|r| r.paid_amount).sum()
    }

    pub fn paid_amounts(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.paid_amount).collect()
    }
}

/// Grouping key for a field value: trimmed, or [`NOT_SPECIFIED`] when
/// absent or blank.
pub fn group_key(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

/// Partition records by the value `selector` picks out of each one.
pub fn group_by<'a, I, F>(records: I, selector: F) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a ClaimRecord>,
    F: Fn(&'a ClaimRecord) -> Option<&'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for record in records {
        let key = group_key(selector(record));
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key: key.to_string(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}
