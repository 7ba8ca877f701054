//! Street network components - nodes and ways

use geo::Point;

use crate::{NodeId, WayId};

/// Street map node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
    /// Raw tags in document order
    pub attributes: Vec<(String, String)>,
}

impl Node {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

/// Ordered polyline of street nodes; edges are implied between consecutive
/// entries of `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    /// OSM ID of the way
    pub id: WayId,
    /// Node ids in sequence
    pub nodes: Vec<NodeId>,
    /// Raw tags in document order
    pub attributes: Vec<(String, String)>,
}

impl Way {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// Edges flow only from earlier to later nodes in the sequence
    pub fn is_oneway(&self) -> bool {
        self.attribute("oneway") == Some("yes")
    }

    /// Whether the way contributes biking edges
    pub fn allows_bicycles(&self) -> bool {
        self.attribute("bicycle") != Some("no")
    }

    /// Posted driving speed in mph, if the `maxspeed` tag carries a usable
    /// number. Accepts a unit suffix (`"25 mph"` parses as 25).
    pub fn maxspeed(&self) -> Option<f64> {
        self.attribute("maxspeed")
            .and_then(|value| value.split_whitespace().next())
            .and_then(|token| token.parse::<f64>().ok())
            .filter(|speed| speed.is_finite() && *speed > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged_way(tags: &[(&str, &str)]) -> Way {
        Way {
            id: 1,
            nodes: vec![1, 2],
            attributes: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn maxspeed_accepts_plain_numbers_and_unit_suffixes() {
        assert_eq!(tagged_way(&[("maxspeed", "25")]).maxspeed(), Some(25.0));
        assert_eq!(tagged_way(&[("maxspeed", "25 mph")]).maxspeed(), Some(25.0));
    }

    #[test]
    fn maxspeed_rejects_garbage_and_nonpositive_values() {
        assert_eq!(tagged_way(&[("maxspeed", "fast")]).maxspeed(), None);
        assert_eq!(tagged_way(&[("maxspeed", "-5")]).maxspeed(), None);
        assert_eq!(tagged_way(&[("maxspeed", "0")]).maxspeed(), None);
        assert_eq!(tagged_way(&[]).maxspeed(), None);
    }

    #[test]
    fn oneway_and_bicycle_flags() {
        assert!(tagged_way(&[("oneway", "yes")]).is_oneway());
        assert!(!tagged_way(&[("oneway", "no")]).is_oneway());
        assert!(!tagged_way(&[]).is_oneway());
        assert!(!tagged_way(&[("bicycle", "no")]).allows_bicycles());
        assert!(tagged_way(&[("bicycle", "yes")]).allows_bicycles());
        assert!(tagged_way(&[]).allows_bicycles());
    }

    #[test]
    fn attributes_preserve_insertion_order() {
        let way = tagged_way(&[("b", "2"), ("a", "1")]);
        let keys: Vec<&str> = way.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
