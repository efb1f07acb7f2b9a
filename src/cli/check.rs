//! `notegraph check`: audit the whole corpus.
//!
//! Unlike a graph build, which stops at the first broken link, the audit
//! collects every problem so one run shows everything to fix.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use notegraph::graph::format_collisions;
use notegraph::utils::{plural_count, plural_s};
use notegraph::{Audit, Config, ContentSource, FsSource, GraphBuilder, log};

/// Audit findings grouped for display.
#[derive(Debug, Default)]
pub struct CheckReport {
    audit: Audit,
    /// Broken link targets, grouped by source document.
    broken: BTreeMap<String, Vec<(String, String)>>,
}

impl CheckReport {
    pub fn new(audit: Audit) -> Self {
        let mut broken: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
        for link in &audit.broken {
            broken
                .entry(link.document.to_string())
                .or_default()
                .push((link.target.clone(), format!("(resolved to {})", link.route)));
        }
        Self { audit, broken }
    }

    pub fn error_count(&self) -> usize {
        self.audit.duplicates.len() + self.audit.collisions.len() + self.audit.broken.len()
    }

    /// Print every problem to stderr (duplicate ids, collisions, then broken links).
    pub fn print(&self) {
        if !self.audit.duplicates.is_empty() {
            let count = self.audit.duplicates.len();
            eprintln!();
            eprintln!(
                "{} {}",
                "ids".red().bold(),
                format!("({count} duplicate{})", plural_s(count)).dimmed()
            );
            for id in &self.audit.duplicates {
                eprintln!("{} {}", "→".red(), id);
            }
        }

        if !self.audit.collisions.is_empty() {
            let count = self.audit.collisions.len();
            eprintln!();
            eprintln!(
                "{} {}",
                "routes".red().bold(),
                format!("({count} collision{})", plural_s(count)).dimmed()
            );
            eprintln!("{}", format_collisions(&self.audit.collisions));
        }

        if !self.broken.is_empty() {
            let file_count = self.broken.len();
            let error_count = self.audit.broken.len();
            eprintln!();
            eprintln!(
                "{} {}",
                "links".red().bold(),
                format!(
                    "({file_count} document{}, {error_count} error{})",
                    plural_s(file_count),
                    plural_s(error_count)
                )
                .dimmed()
            );
            for (document, targets) in &self.broken {
                eprintln!("{}{}{}", "[".dimmed(), document.cyan(), "]".dimmed());
                for (target, reason) in targets {
                    eprintln!("{} {} {}", "→".red(), target, reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        let checked = format!(
            "{}, {}",
            plural_count(self.audit.documents, "document"),
            plural_count(self.audit.links, "link")
        );
        if total == 0 {
            write!(f, "{} {}", "all checks passed".green(), checked.dimmed())
        } else {
            write!(
                f,
                "{} {} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed(),
                format!("in {checked}").dimmed()
            )
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let source = FsSource::from_config(config);
    let documents = source.list_documents().await?;

    let builder = GraphBuilder::from_config(config);
    let audit = tokio::task::spawn_blocking(move || builder.audit(documents)).await?;

    let report = CheckReport::new(audit);
    report.print();
    log!("check"; "{}", report);

    if report.error_count() > 0 {
        bail!("check failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph::Document;

    fn report(documents: Vec<Document>) -> CheckReport {
        CheckReport::new(GraphBuilder::new().audit(documents))
    }

    #[test]
    fn test_clean_corpus() {
        let report = report(vec![
            Document::new("a", "a", "[b](/b)"),
            Document::new("b", "b", ""),
        ]);
        assert_eq!(report.error_count(), 0);
        assert!(report.to_string().contains("all checks passed"));
    }

    #[test]
    fn test_broken_links_grouped_by_document() {
        let report = report(vec![
            Document::new("a", "a", "[x](/x) [y](/y)"),
            Document::new("b", "b", "[z](/z)"),
        ]);
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.broken.len(), 2);
        assert_eq!(report.broken["a"].len(), 2);
        assert_eq!(report.broken["a"][0].0, "/x");
    }

    #[test]
    fn test_collisions_counted() {
        let report = report(vec![
            Document::new("a.md", "a", ""),
            Document::new("a.mdx", "a", ""),
        ]);
        assert_eq!(report.error_count(), 1);
        assert!(report.to_string().contains("found"));
    }

    #[test]
    fn test_duplicate_ids_counted() {
        let report = report(vec![
            Document::new("x", "a", ""),
            Document::new("x", "b", ""),
        ]);
        assert_eq!(report.error_count(), 1);
    }
}
