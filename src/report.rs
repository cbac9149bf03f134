use std::fmt::Write;

use chrono::Utc;

use crate::batch;
use crate::models::Student;
use crate::subjects;

/// Renders the full markdown digest for one batch: overall stats, branch
/// rankings, SGPA spread, subject rankings, and the student leaderboards.
/// Pure over its inputs; `students` is expected to be batch-filtered already.
pub fn build_report(origin: &str, batch_year: &str, students: &[Student]) -> String {
    let overall = batch::overall_statistics(students);
    let chart = batch::branch_chart_data(&batch::branch_statistics(students));
    let distribution = batch::sgpa_histogram(students);
    let toppers = batch::top_performers(students);
    let difficulty = subjects::subject_difficulty(students);
    let success = subjects::subject_success_rate(students);
    let high = subjects::high_performers_by_branch(students);
    let consistency = subjects::consistency(students);

    let mut output = String::new();

    let _ = writeln!(output, "# Batch {batch_year} Results Digest");
    let _ = writeln!(
        output,
        "Generated {} from {} ({} students)",
        Utc::now().date_naive(),
        origin,
        overall.total
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall");

    if overall.total == 0 {
        let _ = writeln!(output, "No student records loaded.");
    } else {
        let _ = writeln!(
            output,
            "Average SGPA {:.2}, median {:.2}, max {:.2}, min {:.2}.",
            overall.avg, overall.median, overall.max, overall.min
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Branch Rankings");

    if chart.is_empty() {
        let _ = writeln!(output, "No decodable branches in this batch.");
    } else {
        for row in chart.iter() {
            let _ = writeln!(
                output,
                "- {} ({}): avg {:.2}, median {:.2}, max {:.2}, min {:.2}, {} students",
                row.name, row.code, row.avg, row.median, row.max, row.min, row.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## SGPA Distribution");

    for bucket in distribution.iter() {
        let _ = writeln!(output, "- {}: {} students", bucket.range, bucket.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Hardest Subjects");

    if difficulty.is_empty() {
        let _ = writeln!(output, "No subject has enough observations to rank.");
    } else {
        for subject in difficulty.iter().take(10) {
            let _ = writeln!(
                output,
                "- {}: avg GP {:.2} across {} students",
                subject.code, subject.avg_gp, subject.students
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Lowest Pass Rates");

    if success.is_empty() {
        let _ = writeln!(output, "No subject has enough observations to rank.");
    } else {
        for subject in success.iter().take(10) {
            let _ = writeln!(
                output,
                "- {}: {:.1}% passed ({} of {})",
                subject.code, subject.rate, subject.passed, subject.total
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## High Performers by Branch");

    if high.is_empty() {
        let _ = writeln!(output, "No decodable branches in this batch.");
    } else {
        for stats in high.iter() {
            let _ = writeln!(
                output,
                "- {} ({}): {:.1}% above 8.5, {:.1}% above 7.5 ({} students)",
                stats.name, stats.code, stats.above85_pct, stats.above75_pct, stats.total
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Branch Toppers");

    if toppers.is_empty() {
        let _ = writeln!(output, "No decodable branches in this batch.");
    } else {
        for top in toppers.iter() {
            let _ = writeln!(
                output,
                "- {} ({}): {} [{}] SGPA {:.2}",
                top.name, top.code, top.student.name, top.student.roll_no, top.student.sgpa
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Consistent Students");

    if consistency.is_empty() {
        let _ = writeln!(output, "No student records loaded.");
    } else {
        for metric in consistency.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} [{}]: consistency {:.2} (stddev {:.2}, SGPA {:.2})",
                metric.student.name,
                metric.student.roll_no,
                metric.consistency,
                metric.std_dev,
                metric.student.sgpa
            );
        }
    }

    output
}
