use dotenvy::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

/// Roster path: first positional argument that isn't a flag.
fn roster_path() -> Option<String> {
    std::env::args().skip(1).find(|a| !a.starts_with("--"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentRow {
    matricule: String,
    last_name: String,
    first_name: String,
    #[serde(default)]
    email: Option<String>,
    campus_id: Value,
}

#[derive(Debug, Deserialize)]
struct ImportStats {
    inserted: usize,
    skipped: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let student_domain = env::var("STUDENT_DOMAIN").unwrap_or_else(|_| "etu.he2b.be".to_string());
    let path = roster_path().ok_or("usage: import_students <roster.json|roster.txt> [--apply]")?;

    let raw = std::fs::read_to_string(&path)?;
    let rows = if path.ends_with(".json") {
        serde_json::from_str::<Vec<StudentRow>>(&raw)?
    } else {
        let roster = parse_roster(&raw, &student_domain);
        if roster.records != roster.emails {
            println!(
                "Warning: {} student records but {} email/campus lines, extra entries dropped",
                roster.records, roster.emails
            );
        }
        roster.rows
    };

    println!("Students in roster: {}", rows.len());

    if is_dry_run() {
        for row in &rows {
            println!(
                "[DRY RUN] Would import {} {} {} (campus {})",
                row.matricule, row.first_name, row.last_name, row.campus_id
            );
        }
        return Ok(());
    }

    let client = Client::new();
    let stats: ImportStats = client
        .post(format!("{}/students/import", api_url.trim_end_matches('/')))
        .json(&rows)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Students inserted: {} / skipped: {}", stats.inserted, stats.skipped);

    Ok(())
}

#[derive(Debug, Default)]
struct Roster {
    rows: Vec<StudentRow>,
    records: usize,
    emails: usize,
}

/// Parses the text layer of the registrar's PDF export.
///
/// Email lines look like `52345@etu.he2b.be 2`; record lines are exactly four
/// fields starting with the numeric matricule, `52345 Petit Lea Marie`. The two
/// sequences are paired in order.
fn parse_roster(text: &str, student_domain: &str) -> Roster {
    let marker = format!("@{}", student_domain);
    let mut emails_campuses = Vec::new();
    let mut records = Vec::new();

    for line in text.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if line.contains(&marker) {
            let Some(email) = parts.first() else { continue };
            let campus = parts.get(1).copied().unwrap_or("Inconnu");
            emails_campuses.push((email.to_string(), campus.to_string()));
        } else if parts.len() == 4 && parts[0].chars().all(|c| c.is_ascii_digit()) {
            records.push((
                parts[0].to_string(),
                parts[1].to_string(),
                parts[2..].join(" "),
            ));
        }
    }

    let counts = (records.len(), emails_campuses.len());
    let rows = records
        .into_iter()
        .zip(emails_campuses)
        .map(|((matricule, last_name, first_name), (email, campus_id))| StudentRow {
            matricule,
            last_name,
            first_name,
            email: Some(email),
            campus_id: Value::String(campus_id),
        })
        .collect();

    Roster {
        rows,
        records: counts.0,
        emails: counts.1,
    }
}
