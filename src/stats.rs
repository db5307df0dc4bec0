//! Derived Statistics
//!
//! Pure aggregate figures computed from form values and records: attendance
//! percentages, countdowns, password strength and review averages.

use serde::Serialize;

use crate::core::AttendanceRecord;
use crate::policy::PasswordPolicy;
use crate::validation::PasswordRule;

/// Present/total counts with the rounded percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub present: usize,
    pub total: usize,
    pub percentage: u8,
}

pub fn attendance_stats(records: &[AttendanceRecord]) -> AttendanceStats {
    let present = records.iter().filter(|r| r.present).count();
    let total = records.len();
    let percentage = if total == 0 {
        0
    } else {
        ((present as f64 / total as f64) * 100.0).round() as u8
    };

    AttendanceStats {
        present,
        total,
        percentage,
    }
}

/// Share of present records, 0 for an empty list
pub fn attendance_percentage(records: &[AttendanceRecord]) -> u8 {
    attendance_stats(records).percentage
}

/// Format seconds as `HH:MM:SS`; hours keep growing past 99
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Countdown display, clamped at `00:00:00`
pub fn remaining_time(elapsed_seconds: u64, total_seconds: u64) -> String {
    format_duration(total_seconds.saturating_sub(elapsed_seconds))
}

/// Score 0..=5 plus hints for the rules that are not met yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub missing: Vec<String>,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        password_strength_label(self.score)
    }
}

/// One point per satisfied rule; every rule counts, enforced or not
pub fn password_strength(value: &str, policy: &PasswordPolicy) -> PasswordStrength {
    let mut score = 0;
    let mut missing = Vec::new();

    for rule in PasswordRule::ALL {
        if rule.is_satisfied(value, policy.min_length) {
            score += 1;
        } else {
            missing.push(rule.hint(policy.min_length));
        }
    }

    PasswordStrength { score, missing }
}

pub fn password_strength_label(score: u8) -> &'static str {
    match score {
        0..=2 => "Débil",
        3 => "Media",
        _ => "Fuerte",
    }
}

/// Absences a student can still afford before being reported
pub fn remaining_opportunities(absences: u32, max_absences: u32) -> u32 {
    max_absences.saturating_sub(absences)
}

/// A student is reportable once the absence allowance is used up
pub fn is_reportable(absences: u32, max_absences: u32) -> bool {
    remaining_opportunities(absences, max_absences) == 0
}

/// Mean of the rated review categories; 0 means "not rated"
pub fn review_average(ratings: &[u8]) -> Option<f64> {
    let rated: Vec<f64> = ratings
        .iter()
        .filter(|r| **r > 0)
        .map(|r| f64::from((*r).min(5)))
        .collect();

    if rated.is_empty() {
        None
    } else {
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, present: bool) -> AttendanceRecord {
        AttendanceRecord::new(id, format!("Alumno {}", id)).with_present(present)
    }

    #[test]
    fn test_attendance_percentage() {
        assert_eq!(attendance_percentage(&[]), 0);

        let records = vec![
            record("1", true),
            record("2", true),
            record("3", false),
            record("4", false),
        ];
        assert_eq!(attendance_percentage(&records), 50);

        // 1/3 rounds down, 2/3 rounds up
        let records = vec![record("1", true), record("2", false), record("3", false)];
        assert_eq!(attendance_percentage(&records), 33);
        let records = vec![record("1", true), record("2", true), record("3", false)];
        assert_eq!(attendance_percentage(&records), 67);
    }

    #[test]
    fn test_attendance_stats_counts() {
        let records = vec![record("1", true), record("2", false)];
        assert_eq!(
            attendance_stats(&records),
            AttendanceStats {
                present: 1,
                total: 2,
                percentage: 50
            }
        );
    }

    #[test]
    fn test_remaining_time_clamps() {
        assert_eq!(remaining_time(7200, 7200), "00:00:00");
        assert_eq!(remaining_time(0, 7200), "02:00:00");
        assert_eq!(remaining_time(9000, 7200), "00:00:00");
        assert_eq!(remaining_time(3661, 7200), "00:58:59");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(3600 * 100 + 61), "100:01:01");
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(password_strength_label(0), "Débil");
        assert_eq!(password_strength_label(2), "Débil");
        assert_eq!(password_strength_label(3), "Media");
        assert_eq!(password_strength_label(4), "Fuerte");
        assert_eq!(password_strength_label(5), "Fuerte");
    }

    #[test]
    fn test_password_strength_score() {
        let policy = PasswordPolicy::strict();

        let strength = password_strength("", &policy);
        assert_eq!(strength.score, 0);
        assert_eq!(strength.missing.len(), 5);
        assert_eq!(strength.missing[0], "Al menos 8 caracteres");

        let strength = password_strength("abcdefgh", &policy);
        assert_eq!(strength.score, 2);
        assert_eq!(strength.label(), "Débil");

        let strength = password_strength("Abcdefg1", &policy);
        assert_eq!(strength.score, 4);
        assert_eq!(strength.missing, vec!["Un carácter especial".to_string()]);

        assert_eq!(password_strength("Abcdef1!", &policy).score, 5);
    }

    #[test]
    fn test_absence_opportunities() {
        assert_eq!(remaining_opportunities(0, 3), 3);
        assert_eq!(remaining_opportunities(2, 3), 1);
        assert_eq!(remaining_opportunities(5, 3), 0);
        assert!(!is_reportable(2, 3));
        assert!(is_reportable(3, 3));
    }

    #[test]
    fn test_review_average() {
        assert_eq!(review_average(&[0, 0, 0, 0, 0, 0]), None);
        assert_eq!(review_average(&[4, 5, 0, 0, 0, 0]), Some(4.5));
        assert_eq!(review_average(&[3, 3, 3, 3, 3, 3]), Some(3.0));
    }
}
