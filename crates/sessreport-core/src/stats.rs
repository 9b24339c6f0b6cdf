//! Named, pure metric functions over session sequences.
//!
//! Per-user metrics take one user's sessions; global metrics take the whole
//! population. [`UserStats::compute`] and [`GlobalStats::compute`] call each
//! metric function exactly once.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use sessreport_records::{Population, Session};

use crate::dates::iso_date;
use crate::error::ReportError;

const INTERNET_EXPLORER: &str = "INTERNET EXPLORER";
const CHROME: &str = "CHROME";

/// Metrics reported for every user, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserMetric {
    SessionsCount,
    TotalTime,
    LongestSession,
    Browsers,
    UsedIe,
    AlwaysUsedChrome,
    Dates,
}

impl UserMetric {
    pub const ALL: [UserMetric; 7] = [
        UserMetric::SessionsCount,
        UserMetric::TotalTime,
        UserMetric::LongestSession,
        UserMetric::Browsers,
        UserMetric::UsedIe,
        UserMetric::AlwaysUsedChrome,
        UserMetric::Dates,
    ];

    /// Key of this metric in the report.
    pub fn name(self) -> &'static str {
        match self {
            UserMetric::SessionsCount => "sessionsCount",
            UserMetric::TotalTime => "totalTime",
            UserMetric::LongestSession => "longestSession",
            UserMetric::Browsers => "browsers",
            UserMetric::UsedIe => "usedIE",
            UserMetric::AlwaysUsedChrome => "alwaysUsedChrome",
            UserMetric::Dates => "dates",
        }
    }
}

/// Metrics reported once for the whole input, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalMetric {
    TotalUsers,
    UniqueBrowsersCount,
    TotalSessions,
    AllBrowsers,
}

impl GlobalMetric {
    pub const ALL: [GlobalMetric; 4] = [
        GlobalMetric::TotalUsers,
        GlobalMetric::UniqueBrowsersCount,
        GlobalMetric::TotalSessions,
        GlobalMetric::AllBrowsers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GlobalMetric::TotalUsers => "totalUsers",
            GlobalMetric::UniqueBrowsersCount => "uniqueBrowsersCount",
            GlobalMetric::TotalSessions => "totalSessions",
            GlobalMetric::AllBrowsers => "allBrowsers",
        }
    }
}

/// Every per-user metric for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub sessions_count: usize,
    pub total_time: String,
    pub longest_session: String,
    pub browsers: String,
    pub used_ie: bool,
    pub always_used_chrome: bool,
    pub dates: Vec<String>,
}

impl UserStats {
    pub fn compute(sessions: &[Session]) -> Result<Self, ReportError> {
        Ok(Self {
            sessions_count: sessions_count(sessions),
            total_time: total_time(sessions),
            longest_session: longest_session(sessions),
            browsers: browsers(sessions),
            used_ie: used_ie(sessions),
            always_used_chrome: always_used_chrome(sessions),
            dates: dates(sessions)?,
        })
    }
}

/// Every global metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStats {
    pub total_users: usize,
    pub unique_browsers_count: usize,
    pub total_sessions: usize,
    pub all_browsers: String,
}

impl GlobalStats {
    pub fn compute(population: &Population) -> Self {
        let sessions = population.global_sessions();
        Self {
            total_users: total_users(population),
            unique_browsers_count: unique_browsers_count(&sessions),
            total_sessions: total_sessions(&sessions),
            all_browsers: all_browsers(&sessions),
        }
    }
}

impl GlobalStats {
    /// Write one entry per [`GlobalMetric`] into an open map, in report order.
    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for metric in GlobalMetric::ALL {
            let key = metric.name();
            match metric {
                GlobalMetric::TotalUsers => map.serialize_entry(key, &self.total_users)?,
                GlobalMetric::UniqueBrowsersCount => {
                    map.serialize_entry(key, &self.unique_browsers_count)?
                }
                GlobalMetric::TotalSessions => map.serialize_entry(key, &self.total_sessions)?,
                GlobalMetric::AllBrowsers => map.serialize_entry(key, &self.all_browsers)?,
            }
        }
        Ok(())
    }
}

impl Serialize for GlobalStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(GlobalMetric::ALL.len()))?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}

impl Serialize for UserStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(UserMetric::ALL.len()))?;
        for metric in UserMetric::ALL {
            let key = metric.name();
            match metric {
                UserMetric::SessionsCount => map.serialize_entry(key, &self.sessions_count)?,
                UserMetric::TotalTime => map.serialize_entry(key, &self.total_time)?,
                UserMetric::LongestSession => map.serialize_entry(key, &self.longest_session)?,
                UserMetric::Browsers => map.serialize_entry(key, &self.browsers)?,
                UserMetric::UsedIe => map.serialize_entry(key, &self.used_ie)?,
                UserMetric::AlwaysUsedChrome => map.serialize_entry(key, &self.always_used_chrome)?,
                UserMetric::Dates => map.serialize_entry(key, &self.dates)?,
            }
        }
        map.end()
    }
}

fn format_minutes(minutes: impl std::fmt::Display) -> String {
    format!("{} min.", minutes)
}

/// Browser names compared in original case, sorted ascending by bytes.
fn distinct_browsers<'a, I>(sessions: I) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a Session>,
{
    sessions.into_iter().map(|s| s.browser.as_str()).collect()
}

// ------------------------------------------------------------
// Per-user metrics
// ------------------------------------------------------------

pub fn sessions_count(sessions: &[Session]) -> usize {
    sessions.len()
}

/// Sum of every session's minutes, saturating at the `i64` bounds.
pub fn total_time(sessions: &[Session]) -> String {
    let sum = sessions
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(s.minutes()));
    format_minutes(sum)
}

/// The empty maximum renders as an empty number, giving `" min."`.
pub fn longest_session(sessions: &[Session]) -> String {
    match sessions.iter().map(Session::minutes).max() {
        Some(max) => format_minutes(max),
        None => format_minutes(""),
    }
}

/// All browsers uppercased, duplicates kept, sorted, joined with `", "`.
pub fn browsers(sessions: &[Session]) -> String {
    let mut names: Vec<String> = sessions.iter().map(|s| s.browser.to_uppercase()).collect();
    names.sort();
    names.join(", ")
}

pub fn used_ie(sessions: &[Session]) -> bool {
    distinct_browsers(sessions)
        .into_iter()
        .any(|b| b.to_uppercase().contains(INTERNET_EXPLORER))
}

/// Vacuously true for a user without sessions.
pub fn always_used_chrome(sessions: &[Session]) -> bool {
    distinct_browsers(sessions)
        .into_iter()
        .all(|b| b.to_uppercase().contains(CHROME))
}

/// Session dates as `YYYY-MM-DD`, newest first, duplicates kept.
pub fn dates(sessions: &[Session]) -> Result<Vec<String>, ReportError> {
    let mut dates = sessions
        .iter()
        .map(iso_date)
        .collect::<Result<Vec<_>, _>>()?;
    dates.sort();
    dates.reverse();
    Ok(dates)
}

// ------------------------------------------------------------
// Global metrics
// ------------------------------------------------------------

pub fn total_users(population: &Population) -> usize {
    population.users().len()
}

/// Case-sensitive: `"chrome"` and `"Chrome"` count twice.
pub fn unique_browsers_count(sessions: &[&Session]) -> usize {
    distinct_browsers(sessions.iter().copied()).len()
}

pub fn total_sessions(sessions: &[&Session]) -> usize {
    sessions.len()
}

/// Distinct browsers sorted in original case, then uppercased and joined
/// with `","`. Case variants stay separate entries after uppercasing.
pub fn all_browsers(sessions: &[&Session]) -> String {
    distinct_browsers(sessions.iter().copied())
        .into_iter()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(",")
}
