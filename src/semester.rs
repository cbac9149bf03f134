use anyhow::bail;

/// Where a semester's results live and which admission cohort sits in it.
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSource {
    pub semester: u8,
    pub file_name: String,
    pub batch_year: String,
}

/// Maps a semester of the 2025-26 session to its gazette CSV and batch-year
/// prefix. The gazette publishes odd semesters only, so semester 3 is the
/// 2024 cohort, semester 5 the 2023 cohort, and so on.
pub fn semester_source(semester: u8) -> anyhow::Result<SemesterSource> {
    if !(1..=7).contains(&semester) || semester % 2 == 0 {
        bail!("no gazette data for semester {semester}; odd semesters 1-7 are published");
    }

    let batch_year = 2025 - (semester as i32 - 1) / 2;
    Ok(SemesterSource {
        semester,
        file_name: format!("results_sem{semester}.csv"),
        batch_year: batch_year.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_three_is_the_2024_batch() {
        let source = semester_source(3).unwrap();
        assert_eq!(source.batch_year, "2024");
        assert_eq!(source.file_name, "results_sem3.csv");
    }

    #[test]
    fn odd_semesters_step_back_one_cohort_each() {
        assert_eq!(semester_source(1).unwrap().batch_year, "2025");
        assert_eq!(semester_source(5).unwrap().batch_year, "2023");
        assert_eq!(semester_source(7).unwrap().batch_year, "2022");
    }

    #[test]
    fn even_and_out_of_range_semesters_are_rejected() {
        assert!(semester_source(2).is_err());
        assert!(semester_source(0).is_err());
        assert!(semester_source(9).is_err());
    }
}
