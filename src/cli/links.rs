//! `notegraph links <DOC>`: show one document's neighbors.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use notegraph::{Config, ContentSource, DocId, GraphBuilder, LinkIndex, LinkedDocument};

pub async fn run(config: &Config, document: &str) -> Result<()> {
    let index = LinkIndex::new(
        notegraph::FsSource::from_config(config),
        GraphBuilder::from_config(config),
    );

    let id = resolve_document(&index, document).await?;
    let route = index.get_route(id.as_str()).await?;
    let forward = index.forward_links(id.as_str()).await?;
    let back = index.back_links(id.as_str()).await?;

    println!("{} {}", id.as_str().cyan().bold(), route.dimmed());
    print_section("links to", &forward);
    print_section("linked from", &back);
    Ok(())
}

/// Accept either a document id or a route.
async fn resolve_document<S: ContentSource>(index: &LinkIndex<S>, input: &str) -> Result<DocId> {
    let graph = index.graph().await?;
    if let Some(node) = graph.get(input) {
        return Ok(node.id().clone());
    }
    match index.resolve_route(input).await? {
        Some(id) => Ok(id),
        None => bail!("no document with id or route `{input}`"),
    }
}

fn print_section(label: &str, documents: &[LinkedDocument]) {
    println!();
    println!("{} {}", label.bold(), format!("({})", documents.len()).dimmed());
    if documents.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for linked in documents {
        println!(
            "  {} {} {}",
            "→".green(),
            linked.route,
            linked.document.title().dimmed()
        );
    }
}
