use once_cell::sync::Lazy;
use regex::Regex;

/// Roll numbers look like `2024UCS1234`: a four-digit admission year, a
/// 2-3 letter branch code, then the serial.
static ROLL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}([A-Z]{2,3})\d+").unwrap());

const BRANCH_NAMES: &[(&str, &str)] = &[
    ("UME", "Mechanical"),
    ("UCM", "MAC"),
    ("UEA", "ECAM"),
    ("UCA", "CSAI"),
    ("UEV", "VLSI"),
    ("UIT", "IT"),
    ("UCS", "CSE"),
    ("UEE", "Electrical"),
    ("UEC", "ECE"),
    ("UIC", "ICE"),
    ("UCD", "CSDS"),
    ("UCB", "CSDA"),
    ("UIN", "ITNS"),
    ("UBT", "Biotech"),
    ("UGI", "Geoinformatics"),
    ("UCI", "CSIOT"),
    ("UMV", "MEEV"),
    ("UCE", "Civil"),
];

/// Extracts the branch code from a roll number, or `""` when the roll
/// number does not follow the gazette pattern. Never fails.
pub fn extract_branch_code(roll_no: &str) -> &str {
    ROLL_PATTERN
        .captures(roll_no)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Human-readable branch name for a code. Unmapped codes fall back to the
/// code itself; an empty code reads as "Unknown".
pub fn branch_name(code: &str) -> &str {
    if code.is_empty() {
        return "Unknown";
    }
    BRANCH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

pub fn branch_from_roll(roll_no: &str) -> &str {
    branch_name(extract_branch_code(roll_no))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_code_from_well_formed_roll() {
        assert_eq!(extract_branch_code("2024UCS1234"), "UCS");
        assert_eq!(extract_branch_code("2023UIT007"), "UIT");
    }

    #[test]
    fn accepts_two_letter_codes() {
        assert_eq!(extract_branch_code("2024AB12"), "AB");
    }

    #[test]
    fn non_matching_roll_yields_empty_code() {
        assert_eq!(extract_branch_code("garbage"), "");
        assert_eq!(extract_branch_code(""), "");
        assert_eq!(extract_branch_code("2024ucs1234"), "");
    }

    #[test]
    fn maps_known_codes_to_names() {
        assert_eq!(branch_name("UCS"), "CSE");
        assert_eq!(branch_name("UEC"), "ECE");
        assert_eq!(branch_name("UCE"), "Civil");
    }

    #[test]
    fn unmapped_code_falls_back_to_itself() {
        assert_eq!(branch_name("XYZ"), "XYZ");
    }

    #[test]
    fn empty_code_reads_unknown() {
        assert_eq!(branch_name(""), "Unknown");
    }

    #[test]
    fn composition_decodes_from_roll() {
        assert_eq!(branch_from_roll("2024UCS1234"), "CSE");
        assert_eq!(branch_from_roll("2024XYZ1234"), "XYZ");
        assert_eq!(branch_from_roll("not-a-roll"), "Unknown");
    }
}
