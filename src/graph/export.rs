//! Serializable node/edge listing of a graph.

use serde::Serialize;

use super::adjacency::LinkGraph;
use crate::core::Route;
use crate::page::DocId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportNode {
    pub id: DocId,
    pub route: Route,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLink {
    pub source: DocId,
    pub target: DocId,
}

/// Every node sorted by route and every edge sorted by
/// (source route, target route).
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

impl GraphExport {
    pub fn from_graph(graph: &LinkGraph) -> Self {
        let nodes = graph
            .documents()
            .into_iter()
            .map(|node| ExportNode {
                id: node.id().clone(),
                route: node.route.clone(),
                title: node.document.title().to_string(),
            })
            .collect();

        let links = graph
            .edges()
            .into_iter()
            .map(|(from, to)| ExportLink {
                source: from.id().clone(),
                target: to.id().clone(),
            })
            .collect();

        Self { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::page::Document;

    #[test]
    fn test_export_json_shape() {
        let graph = GraphBuilder::new()
            .build(vec![
                Document::new("b", "b", "[a](/a)").with_title("Bee"),
                Document::new("a", "a", "[b](/b)"),
            ])
            .unwrap();

        let export = GraphExport::from_graph(&graph);
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [
                    { "id": "a", "route": "/a", "title": "a" },
                    { "id": "b", "route": "/b", "title": "Bee" },
                ],
                "links": [
                    { "source": "a", "target": "b" },
                    { "source": "b", "target": "a" },
                ],
            })
        );
    }

    #[test]
    fn test_export_empty_graph() {
        let graph = GraphBuilder::new().build(Vec::new()).unwrap();
        let export = GraphExport::from_graph(&graph);
        assert!(export.nodes.is_empty());
        assert!(export.links.is_empty());
    }
}
