//! `notegraph graph`: JSON export of every document and link.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use notegraph::utils::plural_count;
use notegraph::{Config, FsSource, GraphBuilder, GraphExport, LinkIndex, log};

pub async fn run(config: &Config, output: Option<&Path>) -> Result<()> {
    let index = LinkIndex::new(FsSource::from_config(config), GraphBuilder::from_config(config));
    let export = index.export().await?;
    let json = render(&export)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            log!(
                "graph";
                "wrote {}, {} to {}",
                plural_count(export.nodes.len(), "document"),
                plural_count(export.links.len(), "link"),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn render(export: &GraphExport) -> Result<String> {
    serde_json::to_string_pretty(export).context("failed to serialize graph")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("a.md"), "[b](/b)").unwrap();
        fs::write(content.join("b.md"), "---\ntitle: Bee\n---\n").unwrap();

        let config = Config {
            root: dir.path().to_path_buf(),
            ..Config::default()
        };
        let output = dir.path().join("graph.json");
        run(&config, Some(&output)).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["nodes"][1]["title"], "Bee");
        assert_eq!(json["links"][0]["source"], "a");
        assert_eq!(json["links"][0]["target"], "b");
    }
}
