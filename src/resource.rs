//! Resource Abstraction
//!
//! Typed records backed by REST collections, plus foreign-key references.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A record kind served by one REST collection.
pub trait Resource:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection name as it appears in the URL, e.g. `Customer`.
    const KIND: &'static str;

    /// Unique record identifier.
    fn id(&self) -> u32;
}

/// Foreign-key reference: the id of an `R` record.
///
/// Serialized as the bare number the backend stores, but statically tied to
/// the resource kind it points at.
pub struct Ref<R> {
    id: u32,
    _kind: PhantomData<fn() -> R>,
}

impl<R> Ref<R> {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl<R> Clone for Ref<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Ref<R> {}

impl<R> PartialEq for Ref<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for Ref<R> {}

impl<R: Resource> std::fmt::Debug for Ref<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", R::KIND, self.id)
    }
}

impl<R> Serialize for Ref<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id)
    }
}

impl<'de, R> Deserialize<'de> for Ref<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::new)
    }
}

// ========================
// Local Row List Helpers
// ========================

/// Replace the record with a matching id in place.
pub fn replace_by_id<R: Resource>(rows: &mut [R], updated: R) {
    if let Some(slot) = rows.iter_mut().find(|r| r.id() == updated.id()) {
        *slot = updated;
    }
}

/// Remove the record with a matching id.
pub fn remove_by_id<R: Resource>(rows: &mut Vec<R>, id: u32) {
    rows.retain(|r| r.id() != id);
}

/// Shallow-merge submitted form fields over an existing record.
///
/// Submitted values win field-by-field; the merged object must still
/// deserialize as `R`, which re-validates it against the record schema.
pub fn merge_record<R: Resource>(existing: &R, patch: &Map<String, Value>) -> Result<R, String> {
    let mut value = serde_json::to_value(existing).map_err(|e| e.to_string())?;
    let fields = value
        .as_object_mut()
        .ok_or_else(|| format!("{} record is not an object", R::KIND))?;
    for (key, val) in patch {
        fields.insert(key.clone(), val.clone());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Gadget {
        id: u32,
        name: String,
        unit_price: f64,
    }

    impl Resource for Gadget {
        const KIND: &'static str = "Gadget";
        fn id(&self) -> u32 {
            self.id
        }
    }

    fn gadget(id: u32, name: &str, unit_price: f64) -> Gadget {
        Gadget {
            id,
            name: name.to_string(),
            unit_price,
        }
    }

    #[test]
    fn ref_serializes_as_bare_number() {
        let reference: Ref<Gadget> = Ref::new(7);
        assert_eq!(serde_json::to_value(reference).unwrap(), json!(7));

        let parsed: Ref<Gadget> = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(parsed.id(), 42);
    }

    #[test]
    fn replace_by_id_swaps_only_the_matching_record() {
        let mut rows = vec![gadget(1, "a", 1.0), gadget(2, "b", 2.0)];
        replace_by_id(&mut rows, gadget(2, "b2", 4.0));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "a");
        assert_eq!(rows[1].name, "b2");
    }

    #[test]
    fn replace_by_id_ignores_unknown_ids() {
        let mut rows = vec![gadget(1, "a", 1.0)];
        replace_by_id(&mut rows, gadget(9, "ghost", 0.0));
        assert_eq!(rows, vec![gadget(1, "a", 1.0)]);
    }

    #[test]
    fn remove_by_id_drops_exactly_one_record() {
        let mut rows = vec![gadget(1, "a", 1.0), gadget(2, "b", 2.0)];
        remove_by_id(&mut rows, 1);
        assert_eq!(rows, vec![gadget(2, "b", 2.0)]);
    }

    #[test]
    fn merge_record_overlays_submitted_fields() {
        let existing = gadget(3, "old", 9.5);
        let mut patch = Map::new();
        patch.insert("name".to_string(), json!("new"));

        let merged = merge_record(&existing, &patch).unwrap();
        assert_eq!(merged.id, 3);
        assert_eq!(merged.name, "new");
        assert_eq!(merged.unit_price, 9.5);
    }

    #[test]
    fn merge_record_rejects_schema_violations() {
        let existing = gadget(3, "old", 9.5);
        let mut patch = Map::new();
        patch.insert("unitPrice".to_string(), json!("not a number"));

        assert!(merge_record(&existing, &patch).is_err());
    }
}
