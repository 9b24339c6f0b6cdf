use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use sessreport_records::Population;

use crate::error::ReportError;
use crate::stats::{GlobalStats, UserStats};

const USERS_STATS_KEY: &str = "usersStats";

/// The complete report: the global metrics in [`GlobalMetric`] order, then
/// the per-user stats under `usersStats`.
///
/// [`GlobalMetric`]: crate::stats::GlobalMetric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub global: GlobalStats,
    pub users_stats: UsersStats,
}

impl Report {
    pub fn new(global: GlobalStats, users_stats: UsersStats) -> Self {
        Self {
            global,
            users_stats,
        }
    }
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        self.global.serialize_entries(&mut map)?;
        map.serialize_entry(USERS_STATS_KEY, &self.users_stats)?;
        map.end()
    }
}

/// Per-user stats keyed by full name, kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersStats {
    entries: Vec<(String, UserStats)>,
    index: HashMap<String, usize>,
}

impl UsersStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `stats` under `full_name`.
    ///
    /// When the name is already present the two metric sets merge key by key
    /// with `stats` winning. Every metric is present in both, so the later
    /// user's values replace the earlier ones while the entry keeps its
    /// original position. Returns the replaced stats on a collision.
    pub fn insert(&mut self, full_name: String, stats: UserStats) -> Option<UserStats> {
        match self.index.get(&full_name) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, stats)),
            None => {
                self.index.insert(full_name.clone(), self.entries.len());
                self.entries.push((full_name, stats));
                None
            }
        }
    }

    pub fn get(&self, full_name: &str) -> Option<&UserStats> {
        self.index.get(full_name).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }
}

impl Serialize for UsersStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, stats) in &self.entries {
            map.serialize_entry(name, stats)?;
        }
        map.end()
    }
}

/// Compute every metric for `population` and assemble the report.
///
/// Each user's stats are computed completely before insertion. Full-name
/// collisions are reported through `on_collision` and resolved by
/// [`UsersStats::insert`].
pub fn build_report<F>(population: &Population, mut on_collision: F) -> Result<Report, ReportError>
where
    F: FnMut(&str),
{
    let global = GlobalStats::compute(population);

    let mut users_stats = UsersStats::new();
    for user in population.users() {
        let stats = UserStats::compute(user.sessions())?;
        let full_name = user.full_name();
        if users_stats.get(&full_name).is_some() {
            tracing::warn!(
                full_name = %full_name,
                user_id = %user.id,
                "Duplicate full name, later user's stats replace earlier ones"
            );
            on_collision(&full_name);
        }
        users_stats.insert(full_name, stats);
    }

    Ok(Report::new(global, users_stats))
}
