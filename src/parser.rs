use std::path::Path;

use anyhow::Context;
use csv::StringRecord;

use crate::models::{Student, Subject};

/// Reads a gazette CSV export and parses it into students.
///
/// Rows have a variable width: `rollNo, name, code_1, gp_1, ..., sgpa`.
/// The first row is a header and is skipped.
pub fn load_students(path: &Path) -> anyhow::Result<Vec<Student>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_text(&text))
}

pub fn parse_text(text: &str) -> Vec<Student> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let rows: Vec<StringRecord> = reader
        .records()
        .filter_map(|result| result.ok())
        .collect();
    parse_students(&rows)
}

/// Converts raw rows into students, skipping the header row. Rows missing a
/// roll number or name are dropped without signaling; output order follows
/// input order for the rows that are kept.
pub fn parse_students(rows: &[StringRecord]) -> Vec<Student> {
    rows.iter().skip(1).filter_map(parse_row).collect()
}

fn parse_row(row: &StringRecord) -> Option<Student> {
    let fields: Vec<&str> = row.iter().map(str::trim).collect();

    let roll_no = fields.first().copied().unwrap_or("");
    let name = fields.get(1).copied().unwrap_or("");
    if roll_no.is_empty() || name.is_empty() {
        return None;
    }

    // A bad SGPA never rejects the row; it reads as zero.
    let sgpa = fields
        .last()
        .copied()
        .unwrap_or("")
        .parse::<f64>()
        .unwrap_or(0.0);

    let mut subjects = Vec::new();
    if fields.len() > 3 {
        // Middle fields pair up as (code, gp); an odd trailing field is
        // dropped by chunks_exact.
        for pair in fields[2..fields.len() - 1].chunks_exact(2) {
            if pair[0].is_empty() {
                continue;
            }
            subjects.push(Subject {
                code: pair[0].to_string(),
                gp: pair[1].parse::<i32>().unwrap_or(0),
            });
        }
    }

    Some(Student {
        roll_no: roll_no.to_string(),
        name: name.to_string(),
        subjects,
        sgpa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn rows(data: &[&[&str]]) -> Vec<StringRecord> {
        data.iter().map(|fields| record(fields)).collect()
    }

    const HEADER: &[&str] = &["roll_no", "name", "sub", "gp", "sgpa"];

    #[test]
    fn parses_a_well_formed_row() {
        let input = rows(&[HEADER, &["r1", "Alice", "MATH", "9", "PHY", "7", "8.0"]]);
        let students = parse_students(&input);
        assert_eq!(students.len(), 1);
        let s = &students[0];
        assert_eq!(s.roll_no, "r1");
        assert_eq!(s.name, "Alice");
        assert_eq!(s.sgpa, 8.0);
        assert_eq!(
            s.subjects,
            vec![
                Subject { code: "MATH".to_string(), gp: 9 },
                Subject { code: "PHY".to_string(), gp: 7 },
            ]
        );
    }

    #[test]
    fn header_row_is_skipped() {
        let input = rows(&[HEADER]);
        assert!(parse_students(&input).is_empty());
    }

    #[test]
    fn drops_rows_missing_roll_or_name() {
        let input = rows(&[
            HEADER,
            &["", "NoRoll", "X", "5", "9.0"],
            &["r2", "", "X", "5", "9.0"],
            &["r3", "Cara", "X", "5", "9.0"],
        ]);
        let students = parse_students(&input);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].roll_no, "r3");
    }

    #[test]
    fn bad_grade_point_defaults_to_zero() {
        let input = rows(&[HEADER, &["r1", "Alice", "MATH", "nine", "7.5"]]);
        let students = parse_students(&input);
        assert_eq!(students[0].subjects[0].gp, 0);
    }

    #[test]
    fn bad_sgpa_defaults_to_zero_without_rejecting_row() {
        let input = rows(&[HEADER, &["r1", "Alice", "MATH", "9", "not-a-number"]]);
        let students = parse_students(&input);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].sgpa, 0.0);
    }

    #[test]
    fn odd_trailing_subject_field_is_dropped() {
        let input = rows(&[HEADER, &["r1", "Alice", "MATH", "9", "PHY", "7.5"]]);
        let students = parse_students(&input);
        assert_eq!(students[0].subjects.len(), 1);
        assert_eq!(students[0].subjects[0].code, "MATH");
        assert_eq!(students[0].sgpa, 7.5);
    }

    #[test]
    fn empty_subject_code_skips_the_pair() {
        let input = rows(&[HEADER, &["r1", "Alice", "", "9", "PHY", "7", "8.0"]]);
        let students = parse_students(&input);
        assert_eq!(students[0].subjects.len(), 1);
        assert_eq!(students[0].subjects[0].code, "PHY");
    }

    #[test]
    fn row_with_only_roll_and_name_has_no_subjects() {
        let input = rows(&[HEADER, &["r1", "Alice"]]);
        let students = parse_students(&input);
        assert_eq!(students.len(), 1);
        assert!(students[0].subjects.is_empty());
        assert_eq!(students[0].sgpa, 0.0);
    }

    #[test]
    fn output_preserves_input_order() {
        let input = rows(&[
            HEADER,
            &["r1", "Alice", "8.0"],
            &["", "dropped", "5.0"],
            &["r2", "Bob", "6.0"],
        ]);
        let students = parse_students(&input);
        let rolls: Vec<&str> = students.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["r1", "r2"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "roll,name,sub,gp,sgpa\n\
                    2024UCS1,Alice,MATH,9,PHY,7,8.0\n\
                    2024UEC2,Bob,MATH,6,5.5\n";
        assert_eq!(parse_text(text), parse_text(text));
    }

    #[test]
    fn tokenizer_handles_quoted_names() {
        let text = "roll,name,sub,gp,sgpa\n\
                    2024UCS1,\"Lee, Alice\",MATH,9,8.0\n";
        let students = parse_text(text);
        assert_eq!(students[0].name, "Lee, Alice");
    }
}
