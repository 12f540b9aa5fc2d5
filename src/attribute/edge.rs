//! Per-edge attribute storage

use super::handle::AttributeHandle;
use super::kind::AttributeValue;
use super::registry::{AttributeError, AttributeRegistry, AttributeResult};

/// Typed read access to the attribute values stored on one edge
///
/// `forward` selects the value read when traversing the edge in its stored
/// direction. Storage is expected to only hold values admitted by the
/// attribute's domain.
pub trait EdgeAttributes {
    fn get(&self, attribute: &AttributeHandle, forward: bool) -> AttributeValue;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    forward: AttributeValue,
    backward: AttributeValue,
}

/// In-memory attribute values of a single edge, one slot per registered attribute
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    slots: Vec<Slot>,
}

impl EdgeRecord {
    /// Create a record holding every attribute's default value
    pub fn new(registry: &dyn AttributeRegistry) -> Self {
        let handles = registry.attributes();
        let len = handles.iter().map(|h| h.id().index() + 1).max().unwrap_or(0);
        let unset = AttributeValue::Flag(false);
        let mut slots = vec![
            Slot {
                forward: unset,
                backward: unset,
            };
            len
        ];
        for handle in handles {
            let value = handle.default_value();
            slots[handle.id().index()] = Slot {
                forward: value,
                backward: value,
            };
        }
        Self { slots }
    }

    /// Set the value read in both directions
    pub fn set(&mut self, attribute: &AttributeHandle, value: AttributeValue) -> AttributeResult<()> {
        check(attribute, &value)?;
        let slot = self.slot_mut(attribute)?;
        slot.forward = value;
        slot.backward = value;
        Ok(())
    }

    /// Set separate forward and backward values of a directional attribute
    pub fn set_directional(
        &mut self,
        attribute: &AttributeHandle,
        forward: AttributeValue,
        backward: AttributeValue,
    ) -> AttributeResult<()> {
        if !attribute.is_directional() {
            return Err(AttributeError::NotDirectional(attribute.name().to_string()));
        }
        check(attribute, &forward)?;
        check(attribute, &backward)?;
        let slot = self.slot_mut(attribute)?;
        slot.forward = forward;
        slot.backward = backward;
        Ok(())
    }

    /// Set a value from its string form (e.g., "PRIMARY", "true", "80")
    pub fn set_text(&mut self, attribute: &AttributeHandle, text: &str) -> AttributeResult<()> {
        let value = parse(attribute, text)?;
        self.set(attribute, value)
    }

    /// Set directional values from their string forms
    pub fn set_text_directional(
        &mut self,
        attribute: &AttributeHandle,
        forward: &str,
        backward: &str,
    ) -> AttributeResult<()> {
        let forward = parse(attribute, forward)?;
        let backward = parse(attribute, backward)?;
        self.set_directional(attribute, forward, backward)
    }

    fn slot_mut(&mut self, attribute: &AttributeHandle) -> AttributeResult<&mut Slot> {
        self.slots
            .get_mut(attribute.id().index())
            .ok_or_else(|| AttributeError::Unregistered(attribute.name().to_string()))
    }
}

impl EdgeAttributes for EdgeRecord {
    fn get(&self, attribute: &AttributeHandle, forward: bool) -> AttributeValue {
        match self.slots.get(attribute.id().index()) {
            Some(slot) if forward => slot.forward,
            Some(slot) => slot.backward,
            None => attribute.default_value(),
        }
    }
}

fn check(attribute: &AttributeHandle, value: &AttributeValue) -> AttributeResult<()> {
    if value.kind() != attribute.kind() {
        return Err(AttributeError::WrongKind {
            attribute: attribute.name().to_string(),
            expected: attribute.kind(),
            found: value.kind(),
        });
    }
    if !attribute.admits(value) {
        return Err(AttributeError::UnknownValue {
            attribute: attribute.name().to_string(),
            value: attribute.format_value(value),
        });
    }
    Ok(())
}

fn parse(attribute: &AttributeHandle, text: &str) -> AttributeResult<AttributeValue> {
    attribute
        .parse_value(text)
        .ok_or_else(|| AttributeError::UnknownValue {
            attribute: attribute.name().to_string(),
            value: text.to_string(),
        })
}
