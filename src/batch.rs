use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::branch::{branch_name, extract_branch_code};
use crate::models::{BranchChartData, BranchStats, OverallStats, SgpaBucket, Student, TopPerformer};

/// Keeps students whose roll number starts with the batch year prefix,
/// preserving order.
pub fn filter_by_batch(students: &[Student], batch_year: &str) -> Vec<Student> {
    students
        .iter()
        .filter(|s| s.roll_no.starts_with(batch_year))
        .cloned()
        .collect()
}

/// Distinct decodable branch codes, ascending.
pub fn unique_branches(students: &[Student]) -> Vec<String> {
    let mut codes = BTreeSet::new();
    for s in students {
        let code = extract_branch_code(&s.roll_no);
        if !code.is_empty() {
            codes.insert(code.to_string());
        }
    }
    codes.into_iter().collect()
}

/// Groups students by decoded branch code and aggregates their SGPAs.
/// Students whose roll number does not decode are left out of every group.
pub fn branch_statistics(students: &[Student]) -> HashMap<String, BranchStats> {
    let mut stats: HashMap<String, BranchStats> = HashMap::new();

    for s in students {
        let code = extract_branch_code(&s.roll_no);
        if code.is_empty() {
            continue;
        }
        let entry = stats.entry(code.to_string()).or_default();
        entry.count += 1;
        entry.sgpas.push(s.sgpa);
        entry.max = entry.max.max(s.sgpa);
        entry.min = entry.min.min(s.sgpa);
    }

    for stat in stats.values_mut() {
        stat.avg = stat.sgpas.iter().sum::<f64>() / stat.sgpas.len() as f64;
        stat.median = median(&stat.sgpas);
    }

    stats
}

/// Branch stats joined with display names, sorted by average descending.
pub fn branch_chart_data(stats: &HashMap<String, BranchStats>) -> Vec<BranchChartData> {
    let mut rows: Vec<BranchChartData> = stats
        .iter()
        .map(|(code, stat)| BranchChartData {
            name: branch_name(code).to_string(),
            code: code.clone(),
            avg: stat.avg,
            median: stat.median,
            max: stat.max,
            min: stat.min,
            count: stat.count,
        })
        .collect();

    rows.sort_by(|a, b| b.avg.partial_cmp(&a.avg).unwrap_or(Ordering::Equal));
    rows
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Aggregates over the whole batch, undecodable branches included. An empty
/// collection reports all-zero stats.
pub fn overall_statistics(students: &[Student]) -> OverallStats {
    if students.is_empty() {
        return OverallStats {
            total: 0,
            avg: 0.0,
            median: 0.0,
            max: 0.0,
            min: 0.0,
        };
    }

    let sgpas: Vec<f64> = students.iter().map(|s| s.sgpa).collect();
    OverallStats {
        total: sgpas.len(),
        avg: sgpas.iter().sum::<f64>() / sgpas.len() as f64,
        median: median(&sgpas),
        max: sgpas.iter().cloned().fold(f64::MIN, f64::max),
        min: sgpas.iter().cloned().fold(f64::MAX, f64::min),
    }
}

/// Tallies SGPAs into the seven fixed buckets. Each bucket is half-open
/// `[min, max)` except that an SGPA of exactly 10 counts in "9-10"; anything
/// that matches no bucket lands in the "<4" catch-all.
pub fn sgpa_histogram(students: &[Student]) -> Vec<SgpaBucket> {
    let mut buckets: Vec<SgpaBucket> = [
        ("9-10", 9.0, 10.0),
        ("8-9", 8.0, 9.0),
        ("7-8", 7.0, 8.0),
        ("6-7", 6.0, 7.0),
        ("5-6", 5.0, 6.0),
        ("4-5", 4.0, 5.0),
        ("<4", 0.0, 4.0),
    ]
    .iter()
    .map(|(range, min, max)| SgpaBucket {
        range: range.to_string(),
        min: *min,
        max: *max,
        count: 0,
    })
    .collect();

    let last = buckets.len() - 1;
    for s in students {
        let idx = if s.sgpa == 10.0 {
            0
        } else {
            buckets
                .iter()
                .position(|b| s.sgpa >= b.min && s.sgpa < b.max)
                .unwrap_or(last)
        };
        buckets[idx].count += 1;
    }

    buckets
}

/// The single best student per branch, ties going to the first seen, sorted
/// by that student's SGPA descending.
pub fn top_performers(students: &[Student]) -> Vec<TopPerformer> {
    let mut top: HashMap<String, Student> = HashMap::new();

    for s in students {
        let code = extract_branch_code(&s.roll_no);
        if code.is_empty() {
            continue;
        }
        match top.get(code) {
            Some(current) if s.sgpa <= current.sgpa => {}
            _ => {
                top.insert(code.to_string(), s.clone());
            }
        }
    }

    let mut performers: Vec<TopPerformer> = top
        .into_iter()
        .map(|(code, student)| TopPerformer {
            name: branch_name(&code).to_string(),
            code,
            student,
        })
        .collect();

    performers.sort_by(|a, b| {
        b.student
            .sgpa
            .partial_cmp(&a.student.sgpa)
            .unwrap_or(Ordering::Equal)
    });
    performers
}
