use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub code: String,
    pub gp: i32,
}

/// One student row from the gazette export. `sgpa` is taken as-is from the
/// source data and is never recomputed from the subject grade points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub roll_no: String,
    pub name: String,
    pub subjects: Vec<Subject>,
    pub sgpa: f64,
}

/// Per-branch aggregate. An empty group reports `min = 10`, `max = 0`
/// (the accumulator sentinels); callers must not assume `min <= max`.
#[derive(Debug, Clone, Serialize)]
pub struct BranchStats {
    pub count: usize,
    pub sgpas: Vec<f64>,
    pub avg: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

impl BranchStats {
    pub fn new() -> Self {
        BranchStats {
            count: 0,
            sgpas: Vec::new(),
            avg: 0.0,
            median: 0.0,
            max: 0.0,
            min: 10.0,
        }
    }
}

impl Default for BranchStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchChartData {
    pub name: String,
    pub code: String,
    pub avg: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total: usize,
    pub avg: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SgpaBucket {
    pub range: String,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPerformer {
    pub code: String,
    pub name: String,
    pub student: Student,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDifficulty {
    pub code: String,
    pub avg_gp: f64,
    pub students: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectSuccessRate {
    pub code: String,
    pub passed: usize,
    pub total: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectPopularity {
    pub code: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighPerformerStats {
    pub name: String,
    pub code: String,
    pub above75_pct: f64,
    pub above85_pct: f64,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyMetric {
    pub student: Student,
    pub consistency: f64,
    pub std_dev: f64,
}

/// Display band for a grade point. Out-of-range values are not rejected
/// anywhere in the pipeline; they land in the nearest band or the fallback.
pub fn grade_band(gp: i32) -> &'static str {
    if gp >= 9 {
        "grade-9"
    } else if gp >= 8 {
        "grade-8"
    } else if gp >= 7 {
        "grade-7"
    } else if gp >= 6 {
        "grade-6"
    } else if gp >= 5 {
        "grade-5"
    } else if gp >= 4 {
        "grade-4"
    } else {
        "grade-low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_band_tiers() {
        assert_eq!(grade_band(10), "grade-9");
        assert_eq!(grade_band(9), "grade-9");
        assert_eq!(grade_band(8), "grade-8");
        assert_eq!(grade_band(6), "grade-6");
        assert_eq!(grade_band(4), "grade-4");
        assert_eq!(grade_band(3), "grade-low");
        assert_eq!(grade_band(-1), "grade-low");
    }

    #[test]
    fn empty_branch_stats_keep_sentinels() {
        let stats = BranchStats::new();
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.count, 0);
    }
}
