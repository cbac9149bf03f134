use std::cmp::Ordering;
use std::collections::HashMap;

use crate::branch::{branch_name, extract_branch_code};
use crate::models::{
    ConsistencyMetric, HighPerformerStats, Student, SubjectDifficulty, SubjectPopularity,
    SubjectSuccessRate,
};

/// Subjects observed fewer times than this are too small a sample to rank.
const MIN_OBSERVATIONS: usize = 50;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Average grade point per subject, hardest first. Subjects with fewer than
/// [`MIN_OBSERVATIONS`] observations are dropped.
pub fn subject_difficulty(students: &[Student]) -> Vec<SubjectDifficulty> {
    let mut totals: HashMap<String, (i64, usize)> = HashMap::new();

    for s in students {
        for sub in &s.subjects {
            let entry = totals.entry(sub.code.clone()).or_insert((0, 0));
            entry.0 += sub.gp as i64;
            entry.1 += 1;
        }
    }

    let mut difficulties: Vec<SubjectDifficulty> = totals
        .into_iter()
        .filter(|(_, (_, count))| *count >= MIN_OBSERVATIONS)
        .map(|(code, (total, count))| SubjectDifficulty {
            code,
            avg_gp: total as f64 / count as f64,
            students: count,
        })
        .collect();

    difficulties.sort_by(|a, b| a.avg_gp.partial_cmp(&b.avg_gp).unwrap_or(Ordering::Equal));
    difficulties
}

/// Share of observations with gp >= 6 per subject, lowest pass rate first.
/// Same significance cutoff as difficulty.
pub fn subject_success_rate(students: &[Student]) -> Vec<SubjectSuccessRate> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for s in students {
        for sub in &s.subjects {
            let entry = counts.entry(sub.code.clone()).or_insert((0, 0));
            entry.1 += 1;
            if sub.gp >= 6 {
                entry.0 += 1;
            }
        }
    }

    let mut rates: Vec<SubjectSuccessRate> = counts
        .into_iter()
        .filter(|(_, (_, total))| *total >= MIN_OBSERVATIONS)
        .map(|(code, (passed, total))| SubjectSuccessRate {
            code,
            passed,
            total,
            rate: round1(passed as f64 / total as f64 * 100.0),
        })
        .collect();

    rates.sort_by(|a, b| a.rate.partial_cmp(&b.rate).unwrap_or(Ordering::Equal));
    rates
}

/// The ten most-taken subjects by observation count.
pub fn subject_popularity(students: &[Student]) -> Vec<SubjectPopularity> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for s in students {
        for sub in &s.subjects {
            *counts.entry(sub.code.clone()).or_insert(0) += 1;
        }
    }

    let mut popularity: Vec<SubjectPopularity> = counts
        .into_iter()
        .map(|(code, count)| SubjectPopularity { code, count })
        .collect();

    popularity.sort_by(|a, b| b.count.cmp(&a.count));
    popularity.truncate(10);
    popularity
}

/// Per-branch share of students above 7.5 (strict) and at or above 8.5,
/// sorted by the 8.5 percentage descending. Undecodable rolls are excluded.
pub fn high_performers_by_branch(students: &[Student]) -> Vec<HighPerformerStats> {
    let mut counts: HashMap<String, (usize, usize, usize)> = HashMap::new();

    for s in students {
        let code = extract_branch_code(&s.roll_no);
        if code.is_empty() {
            continue;
        }
        let entry = counts.entry(code.to_string()).or_insert((0, 0, 0));
        entry.2 += 1;
        if s.sgpa > 7.5 {
            entry.0 += 1;
        }
        if s.sgpa >= 8.5 {
            entry.1 += 1;
        }
    }

    let mut stats: Vec<HighPerformerStats> = counts
        .into_iter()
        .map(|(code, (above75, above85, total))| HighPerformerStats {
            name: branch_name(&code).to_string(),
            code,
            above75_pct: round1(above75 as f64 / total as f64 * 100.0),
            above85_pct: round1(above85 as f64 / total as f64 * 100.0),
            total,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.above85_pct
            .partial_cmp(&a.above85_pct)
            .unwrap_or(Ordering::Equal)
    });
    stats
}

/// Students with gp >= 9 in every subject, best SGPA first. A student with
/// no subjects passes the check vacuously and is included.
pub fn perfect_scorers(students: &[Student]) -> Vec<Student> {
    let mut scorers: Vec<Student> = students
        .iter()
        .filter(|s| s.subjects.iter().all(|sub| sub.gp >= 9))
        .cloned()
        .collect();

    scorers.sort_by(|a, b| b.sgpa.partial_cmp(&a.sgpa).unwrap_or(Ordering::Equal));
    scorers
}

/// Per-student consistency: the population standard deviation of subject
/// grade points around the stated SGPA (not around the subjects' own mean),
/// flipped so that 10 means perfectly steady. Most consistent first.
pub fn consistency(students: &[Student]) -> Vec<ConsistencyMetric> {
    let mut metrics: Vec<ConsistencyMetric> = students
        .iter()
        .map(|s| {
            let variance = if s.subjects.is_empty() {
                0.0
            } else {
                s.subjects
                    .iter()
                    .map(|sub| (sub.gp as f64 - s.sgpa).powi(2))
                    .sum::<f64>()
                    / s.subjects.len() as f64
            };
            let std_dev = variance.sqrt();
            ConsistencyMetric {
                student: s.clone(),
                consistency: 10.0 - std_dev,
                std_dev,
            }
        })
        .collect();

    metrics.sort_by(|a, b| {
        b.consistency
            .partial_cmp(&a.consistency)
            .unwrap_or(Ordering::Equal)
    });
    metrics
}
