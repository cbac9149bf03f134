use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

mod batch;
mod branch;
mod models;
mod parser;
mod report;
mod search;
mod semester;
mod subjects;

use models::{grade_band, Student};

#[derive(Parser)]
#[command(name = "results-dashboard")]
#[command(about = "Read-only analytics over semester gazette CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Semester of the 2025-26 session (odd semesters only)
    #[arg(long, default_value_t = 3)]
    semester: u8,
    /// Override the CSV path derived from the semester
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Override the batch-year prefix derived from the semester
    #[arg(long)]
    batch: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall batch statistics and the SGPA distribution
    Overview {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// Branch rankings and the top performer per branch
    Branches {
        #[command(flatten)]
        source: SourceArgs,
        /// Show a single branch code instead of the full table
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Subject difficulty, pass rates, and popularity
    Subjects {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// High-performer shares, perfect scorers, and consistency leaders
    Toppers {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Search students by roll number or name
    Lookup {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Write the full markdown digest for the batch
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

struct Loaded {
    all: Vec<Student>,
    batch: Vec<Student>,
    batch_year: String,
    origin: String,
}

/// Resolves the semester selection, loads the CSV, and pre-filters the
/// batch. A transport failure degrades to the empty collection with a
/// diagnostic on stderr; only a bad semester argument is a hard error.
fn load(source: &SourceArgs) -> anyhow::Result<Loaded> {
    let sem = semester::semester_source(source.semester)?;
    let path = source
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(&sem.file_name));
    let batch_year = source.batch.clone().unwrap_or(sem.batch_year);

    let all = match parser::load_students(&path) {
        Ok(students) => students,
        Err(err) => {
            eprintln!("error loading {}: {err:#}", path.display());
            Vec::new()
        }
    };
    let batch = batch::filter_by_batch(&all, &batch_year);

    Ok(Loaded {
        all,
        batch,
        batch_year,
        origin: path.display().to_string(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Overview { source, json } => {
            let loaded = load(&source)?;
            let overall = batch::overall_statistics(&loaded.batch);
            let distribution = batch::sgpa_histogram(&loaded.batch);

            if json {
                let payload = json!({
                    "batch": loaded.batch_year,
                    "overall": overall,
                    "distribution": distribution,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            println!(
                "Batch {} overview ({} students from {})",
                loaded.batch_year, overall.total, loaded.origin
            );
            println!(
                "Average SGPA {:.2} | median {:.2} | max {:.2} | min {:.2}",
                overall.avg, overall.median, overall.max, overall.min
            );
            println!();
            println!("SGPA distribution:");
            for bucket in distribution.iter() {
                println!("- {:>4}: {} students", bucket.range, bucket.count);
            }
        }
        Commands::Branches { source, branch, json } => {
            let loaded = load(&source)?;
            let stats = batch::branch_statistics(&loaded.batch);
            let toppers = batch::top_performers(&loaded.batch);

            if let Some(code) = branch {
                let Some(stat) = stats.get(&code) else {
                    println!("No students decoded for branch {code} in batch {}.", loaded.batch_year);
                    return Ok(());
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&json!({ "code": code, "stats": stat }))?);
                    return Ok(());
                }
                println!(
                    "{} ({}): {} students, avg {:.2}, median {:.2}, max {:.2}, min {:.2}",
                    branch::branch_name(&code),
                    code,
                    stat.count,
                    stat.avg,
                    stat.median,
                    stat.max,
                    stat.min
                );
                return Ok(());
            }

            let chart = batch::branch_chart_data(&stats);
            if json {
                let payload = json!({ "branches": chart, "toppers": toppers });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            if chart.is_empty() {
                println!("No decodable branches in batch {}.", loaded.batch_year);
                return Ok(());
            }
            println!("Branch rankings for batch {}:", loaded.batch_year);
            for row in chart.iter() {
                println!(
                    "- {} ({}): avg {:.2}, median {:.2}, max {:.2}, min {:.2}, {} students",
                    row.name, row.code, row.avg, row.median, row.max, row.min, row.count
                );
            }
            println!();
            println!("Branch toppers:");
            for top in toppers.iter() {
                println!(
                    "- {} ({}): {} [{}] SGPA {:.2}",
                    top.name, top.code, top.student.name, top.student.roll_no, top.student.sgpa
                );
            }
        }
        Commands::Subjects { source, json } => {
            let loaded = load(&source)?;
            let difficulty = subjects::subject_difficulty(&loaded.batch);
            let success = subjects::subject_success_rate(&loaded.batch);
            let popularity = subjects::subject_popularity(&loaded.batch);

            if json {
                let payload = json!({
                    "difficulty": difficulty,
                    "success_rate": success,
                    "popularity": popularity,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            println!("Hardest subjects (lowest average GP):");
            if difficulty.is_empty() {
                println!("- no subject has enough observations to rank");
            }
            for subject in difficulty.iter() {
                println!(
                    "- {}: avg GP {:.2} across {} students",
                    subject.code, subject.avg_gp, subject.students
                );
            }
            println!();
            println!("Lowest pass rates (GP >= 6):");
            if success.is_empty() {
                println!("- no subject has enough observations to rank");
            }
            for subject in success.iter() {
                println!(
                    "- {}: {:.1}% passed ({} of {})",
                    subject.code, subject.rate, subject.passed, subject.total
                );
            }
            println!();
            println!("Most taken subjects:");
            for subject in popularity.iter() {
                println!("- {}: {} students", subject.code, subject.count);
            }
        }
        Commands::Toppers { source, limit, json } => {
            let loaded = load(&source)?;
            let high = subjects::high_performers_by_branch(&loaded.batch);
            let perfect = subjects::perfect_scorers(&loaded.batch);
            let consistency = subjects::consistency(&loaded.batch);

            if json {
                let payload = json!({
                    "high_performers": high,
                    "perfect_scorers": perfect.iter().take(limit).collect::<Vec<_>>(),
                    "consistency": consistency.iter().take(limit).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            println!("High performers by branch:");
            for stats in high.iter() {
                println!(
                    "- {} ({}): {:.1}% at or above 8.5, {:.1}% above 7.5 ({} students)",
                    stats.name, stats.code, stats.above85_pct, stats.above75_pct, stats.total
                );
            }
            println!();
            println!("Perfect scorers (GP >= 9 everywhere):");
            if perfect.is_empty() {
                println!("- none in this batch");
            }
            for s in perfect.iter().take(limit) {
                println!("- {} [{}] SGPA {:.2}", s.name, s.roll_no, s.sgpa);
            }
            println!();
            println!("Most consistent students:");
            for metric in consistency.iter().take(limit) {
                println!(
                    "- {} [{}]: consistency {:.2} (stddev {:.2})",
                    metric.student.name, metric.student.roll_no, metric.consistency, metric.std_dev
                );
            }
        }
        Commands::Lookup { source, query, json } => {
            let loaded = load(&source)?;
            // Lookup spans every loaded batch, not just the selected one.
            let hits = search::search(&loaded.all, &query);

            if json {
                println!("{}", serde_json::to_string_pretty(&json!({ "matches": hits }))?);
                return Ok(());
            }

            if hits.is_empty() {
                println!("No students match '{query}'.");
                return Ok(());
            }
            for s in hits.iter() {
                println!(
                    "- {} [{}] ({}) SGPA {:.2}",
                    s.name,
                    s.roll_no,
                    branch::branch_from_roll(&s.roll_no),
                    s.sgpa
                );
                for sub in s.subjects.iter() {
                    println!("    {} GP {} [{}]", sub.code, sub.gp, grade_band(sub.gp));
                }
            }
        }
        Commands::Report { source, out } => {
            let loaded = load(&source)?;
            let report = report::build_report(&loaded.origin, &loaded.batch_year, &loaded.batch);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
