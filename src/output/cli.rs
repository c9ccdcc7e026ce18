use crate::model::{ArchiveAnalysisResult, Issue, PackageIssues, SeveritySummary};
use chrono::Utc;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ArchiveRow {
    #[tabled(rename = "Archive")]
    jar: String,
    #[tabled(rename = "Identified By")]
    method: String,
    #[tabled(rename = "Packages")]
    packages: String,
    #[tabled(rename = "Vulnerabilities")]
    vulnerabilities: String,
    #[tabled(rename = "License Issues")]
    license_issues: String,
}

/// Prints every issue found for one package followed by severity counts.
pub fn print_package_issues(issues: &PackageIssues) {
    println!("Security Vulnerabilities:");
    if issues.vulnerabilities.is_empty() {
        println!("  (none found)");
    } else {
        for vuln in &issues.vulnerabilities {
            print_issue(vuln);
        }
    }

    println!("License Issues:");
    if issues.licenses.is_empty() {
        println!("  (none found)");
    } else {
        for license in &issues.licenses {
            print_issue(license);
        }
    }

    println!();
    println!("Summary:");
    print_severity_summary(
        "vulnerabilities",
        &SeveritySummary::from_issues(&issues.vulnerabilities),
    );
    print_severity_summary(
        "license issues",
        &SeveritySummary::from_issues(&issues.licenses),
    );
    println!();
}

fn print_issue(issue: &Issue) {
    println!("{}", issue.id);
    if let Some(title) = issue.title() {
        println!("  {}", title);
    }
    if let Some(url) = issue.url() {
        println!("  {}", url);
    }
    if let (Some(package), Some(version)) = (issue.package(), issue.version()) {
        println!("  {}@{}", package, version);
    }
    let cves = issue.cves();
    if !cves.is_empty() {
        println!("  identifiers: {}", cves.join(", "));
    }
    println!("  severity: {}", issue.severity_label().unwrap_or("unknown"));
    println!();
}

fn print_severity_summary(label: &str, summary: &SeveritySummary) {
    println!("{} {} found:", summary.total(), label);
    if summary.critical > 0 {
        println!("  {} critical severity", summary.critical);
    }
    println!("  {} high severity", summary.high);
    println!("  {} medium severity", summary.medium);
    println!("  {} low severity", summary.low);
}

/// Prints the end-of-run table of archives and what was found for each.
pub fn print_summary(results: &[ArchiveAnalysisResult], scanned: bool) {
    println!();
    println!(
        "Analysis completed at: {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if results.is_empty() {
        println!("No archives analyzed.");
        return;
    }

    let rows: Vec<ArchiveRow> = results.iter().map(|r| archive_row(r, scanned)).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    let identified = results.iter().filter(|r| r.is_identified()).count();
    println!();
    println!("{} of {} archives identified", identified, results.len());
}

fn archive_row(result: &ArchiveAnalysisResult, scanned: bool) -> ArchiveRow {
    let count_or_dash = |count: usize| {
        if scanned && result.is_identified() {
            count.to_string()
        } else {
            "-".to_string()
        }
    };

    ArchiveRow {
        jar: truncate(&result.jar, 50),
        method: result
            .identified_by
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unidentified".to_string()),
        packages: result
            .matching_packages
            .iter()
            .map(|p| p.coordinate.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        vulnerabilities: count_or_dash(result.vulnerability_count()),
        license_issues: count_or_dash(result.license_issue_count()),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
