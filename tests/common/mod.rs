//! Common test utilities: a road registry and edges built from it

#![allow(dead_code)]

use edge_priority::{road, AttributeRegistry, AttributeSet, AttributeValue, EdgeRecord};

/// Builder for test edges over the standard road attributes
pub struct RoadEdge<'a> {
    registry: &'a AttributeSet,
    record: EdgeRecord,
}

impl<'a> RoadEdge<'a> {
    pub fn new(registry: &'a AttributeSet) -> Self {
        Self {
            registry,
            record: EdgeRecord::new(registry),
        }
    }

    /// Set an attribute from its string form in both directions
    pub fn with(mut self, attribute: &str, value: &str) -> Self {
        let handle = self.registry.resolve(attribute).expect("attribute is registered");
        self.record.set_text(handle, value).expect("valid value");
        self
    }

    /// Set forward and backward maximum speed
    pub fn with_max_speed(mut self, forward: f64, backward: f64) -> Self {
        let handle = self.registry.resolve(road::MAX_SPEED).expect("max_speed is registered");
        self.record
            .set_directional(handle, AttributeValue::Number(forward), AttributeValue::Number(backward))
            .expect("max_speed is directional");
        self
    }

    pub fn build(self) -> EdgeRecord {
        self.record
    }
}
