use hashbrown::HashMap;

use super::{Node, Way};
use crate::NodeId;

/// Read-only street map: nodes and ways in document order with an id index
#[derive(Debug, Clone, Default)]
pub struct StreetMap {
    nodes: Vec<Node>,
    ways: Vec<Way>,
    node_index: HashMap<NodeId, usize>,
}

impl StreetMap {
    pub fn new(nodes: Vec<Node>, ways: Vec<Way>) -> Self {
        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
        Self {
            nodes,
            ways,
            node_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Nodes in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Ways in document order
    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn node(id: NodeId, lon: f64, lat: f64) -> Node {
        Node {
            id,
            geometry: Point::new(lon, lat),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn lookup_by_id() {
        let map = StreetMap::new(vec![node(5, 0.0, 0.0), node(2, 1.0, 1.0)], Vec::new());
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.node_by_id(2).map(|n| n.id), Some(2));
        assert!(map.node_by_id(99).is_none());
        assert!(map.contains_node(5));
    }

    #[test]
    fn nodes_keep_document_order() {
        let map = StreetMap::new(vec![node(5, 0.0, 0.0), node(2, 1.0, 1.0)], Vec::new());
        let ids: Vec<NodeId> = map.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, [5, 2]);
    }
}
