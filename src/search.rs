use crate::models::Student;

/// Case-insensitive substring lookup over roll number and name. A blank
/// query matches nothing rather than everything; results keep the
/// collection's order and stop at ten.
pub fn search<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    students
        .iter()
        .filter(|s| {
            s.roll_no.to_lowercase().contains(&query) || s.name.to_lowercase().contains(&query)
        })
        .take(10)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll_no: &str, name: &str) -> Student {
        Student {
            roll_no: roll_no.to_string(),
            name: name.to_string(),
            subjects: Vec::new(),
            sgpa: 7.0,
        }
    }

    #[test]
    fn blank_query_matches_nothing() {
        let students = vec![student("2024UCS1", "Alice")];
        assert!(search(&students, "").is_empty());
        assert!(search(&students, "   ").is_empty());
    }

    #[test]
    fn matches_roll_number_case_insensitively() {
        let students = vec![student("2024UCS1234", "Alice"), student("2024UEC1", "Bob")];
        let hits = search(&students, "ucs");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].roll_no, "2024UCS1234");
    }

    #[test]
    fn matches_name_substring() {
        let students = vec![student("r1", "Alice Lee"), student("r2", "Bob")];
        let hits = search(&students, "lee");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice Lee");
    }

    #[test]
    fn results_keep_collection_order_and_cap_at_ten() {
        let students: Vec<Student> = (0..15)
            .map(|i| student(&format!("2024UCS{i:02}"), "Same Name"))
            .collect();
        let hits = search(&students, "same");
        assert_eq!(hits.len(), 10);
        assert_eq!(hits[0].roll_no, "2024UCS00");
        assert_eq!(hits[9].roll_no, "2024UCS09");
    }
}
