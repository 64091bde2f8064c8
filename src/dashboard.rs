//! Dashboard & Report Aggregation
//!
//! Pure derivations over fetched lists. Nothing here talks to the network.

use std::collections::BTreeSet;

use crate::calendar::SCHOOL_DAYS;
use crate::models::{DailyEntry, Observation, Schedule};

pub const RECENT_OBSERVATIONS: usize = 5;
pub const PREVIEW_CHARS: usize = 80;

/// Entries scheduled on `day` (English weekday name), in their original order.
pub fn today_schedule<'a>(entries: &'a [Schedule], day: &str) -> Vec<&'a Schedule> {
    entries.iter().filter(|entry| entry.day == day).collect()
}

/// Last few observations, most recent first
pub fn recent_observations(observations: &[Observation]) -> Vec<&Observation> {
    let start = observations.len().saturating_sub(RECENT_OBSERVATIONS);
    observations[start..].iter().rev().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub students: usize,
    pub observations: usize,
    pub daily_entries: usize,
    pub schedules: usize,
}

impl DashboardCounts {
    pub fn new(students: usize, observations: usize, daily_entries: usize, schedules: usize) -> Self {
        Self { students, observations, daily_entries, schedules }
    }
}

/// Monday through Friday, each day's entries sorted by their time string.
///
/// The sort is lexicographic and stable, so "10:00 AM" lands before
/// "9:00 AM". Entries on other days are not shown.
pub fn group_by_day(entries: &[Schedule]) -> Vec<(&'static str, Vec<&Schedule>)> {
    SCHOOL_DAYS
        .iter()
        .map(|day| {
            let mut items = today_schedule(entries, day);
            items.sort_by(|a, b| a.time.cmp(&b.time));
            (*day, items)
        })
        .collect()
}

pub fn newest_first<T>(items: &[T]) -> Vec<&T> {
    items.iter().rev().collect()
}

/// First `max` characters, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Progress summary for one student
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport<'a> {
    pub student: String,
    pub observations: Vec<&'a Observation>,
    pub entries: Vec<&'a DailyEntry>,
    pub areas_covered: usize,
}

pub fn student_report<'a>(
    student: &str,
    observations: &'a [Observation],
    entries: &'a [DailyEntry],
) -> StudentReport<'a> {
    let observations: Vec<&Observation> = observations.iter().filter(|o| o.student == student).collect();
    let entries: Vec<&DailyEntry> = entries.iter().filter(|e| e.student == student).collect();
    let areas: BTreeSet<&str> = observations.iter().map(|o| o.area.as_str()).collect();

    StudentReport {
        student: student.to_string(),
        areas_covered: areas.len(),
        observations,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;

    fn slot(id: u32, day: &str, time: &str) -> Schedule {
        Schedule {
            id,
            day: day.into(),
            time: time.into(),
            activity: format!("Activity {}", id),
            duration: 30,
            students: "All".into(),
        }
    }

    fn observation(id: u32, student: &str, area: &str) -> Observation {
        Observation {
            id,
            student: student.into(),
            date: "2024-03-04".into(),
            area: area.into(),
            skills: vec![],
            notes: String::new(),
        }
    }

    #[test]
    fn test_today_schedule_keeps_order() {
        let entries = vec![
            slot(1, "Monday", "9:00 AM"),
            slot(2, "Tuesday", "8:00 AM"),
            slot(3, "Monday", "8:30 AM"),
        ];
        let ids: Vec<u32> = today_schedule(&entries, "Monday").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(today_schedule(&entries, "Saturday").is_empty());
    }

    #[test]
    fn test_recent_observations() {
        let all: Vec<Observation> = (1..=7).map(|id| observation(id, "Ana", "Sensorial")).collect();
        let ids: Vec<u32> = recent_observations(&all).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);

        let few = vec![observation(1, "Ana", "Art"), observation(2, "Ben", "Art")];
        let ids: Vec<u32> = recent_observations(&few).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_group_by_day_sorts_time_strings() {
        let entries = vec![
            slot(1, "Monday", "9:00 AM"),
            slot(2, "Monday", "10:00 AM"),
            slot(3, "Wednesday", "8:00 AM"),
            slot(4, "Sunday", "8:00 AM"),
        ];
        let groups = group_by_day(&entries);
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[0].0, "Monday");
        let monday: Vec<u32> = groups[0].1.iter().map(|s| s.id).collect();
        assert_eq!(monday, vec![2, 1]);
        assert!(groups[1].1.is_empty());
        assert_eq!(groups[2].1.len(), 1);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 80), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ñañaña", 2), "ña...");
    }

    #[test]
    fn test_student_report() {
        let observations = vec![
            observation(1, "Ana", "Sensorial"),
            observation(2, "Ben", "Language"),
            observation(3, "Ana", "Sensorial"),
            observation(4, "Ana", "Mathematics"),
        ];
        let entries = vec![DailyEntry {
            id: 1,
            student: "Ana".into(),
            date: "2024-03-04".into(),
            subject: "Math".into(),
            activities: vec!["Golden beads".into()],
            skill_level: SkillLevel::Developing,
            notes: String::new(),
        }];

        let report = student_report("Ana", &observations, &entries);
        assert_eq!(report.observations.len(), 3);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.areas_covered, 2);

        let empty = student_report("Zoe", &observations, &entries);
        assert_eq!(empty.areas_covered, 0);
    }

    #[test]
    fn test_newest_first() {
        assert_eq!(newest_first(&[1, 2, 3]), vec![&3, &2, &1]);
    }
}
