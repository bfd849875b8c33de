//! PropertyMap — the key-value view of an annotated vertex or edge.

use std::collections::BTreeMap;
use super::Value;

/// A map of attribute names to values, ordered by key so exports are stable.
pub type PropertyMap = BTreeMap<String, Value>;
