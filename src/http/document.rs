//! JSON-API document encoding and decoding.
//!
//! Each resource type states its own mapping: [`Resource`] turns a decoded
//! [`ResourceObject`] into a typed value, [`EncodeResource`] lists the
//! attributes and relationships an options struct sends.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{Result, TfeError};

/// Media type of JSON-API documents.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// A `type` + `id` pair referencing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Server-assigned identifier.
    pub id: String,
}

impl ResourceIdentifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Linkage data of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one relationship.
    One(ResourceIdentifier),
    /// To-many relationship.
    Many(Vec<ResourceIdentifier>),
}

/// A relationship entry of a resource object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    /// Linkage, absent when the server only sends links.
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

/// A resource object as it appears under `data` or `included`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceObject {
    /// Resource type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Attribute values by name.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationships by name.
    #[serde(default)]
    pub relationships: BTreeMap<String, Relationship>,
}

/// Resources sideloaded under the top-level `included` key.
#[derive(Debug, Clone, Copy)]
pub struct Included<'a> {
    objects: &'a [ResourceObject],
}

/// A response document whose primary data is `D`.
#[derive(Debug, Deserialize)]
struct Document<D> {
    data: D,
    #[serde(default)]
    included: Vec<ResourceObject>,
}

/// One entry of an error document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    /// HTTP status as reported by the server.
    #[serde(default)]
    pub status: Option<Value>,
    /// Short summary.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable explanation.
    #[serde(default)]
    pub detail: Option<String>,
}

/// A document carrying a top-level `errors` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    /// Reported errors.
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// Decoding half of the per-type mapping.
pub trait Resource: Sized {
    /// JSON-API type tag of this resource.
    const TYPE: &'static str;

    /// Builds the value from a resource object already known to be of `TYPE`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if an attribute has the wrong shape.
    fn decode(object: &ResourceObject, included: &Included<'_>) -> Result<Self>;
}

/// Encoding half of the per-type mapping, implemented by options structs.
pub trait EncodeResource {
    /// JSON-API type tag sent as the primary type.
    const TYPE: &'static str;

    /// Primary id to send; empty ids are omitted.
    fn id(&self) -> &str {
        ""
    }

    /// Attributes to send; absent options are left out.
    ///
    /// # Errors
    ///
    /// Returns an encode error if a value cannot be serialized.
    fn attributes(&self) -> Result<Attributes>;

    /// To-one relationships to send, by relationship name.
    fn relationships(&self) -> Vec<(&'static str, ResourceIdentifier)> {
        Vec::new()
    }
}

/// Attribute map under construction.
#[derive(Debug, Clone, Default)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value cannot be serialized.
    pub fn set<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| TfeError::encode(format!("attribute '{name}': {e}")))?;
        self.0.insert(name.to_owned(), value);
        Ok(self)
    }

    /// Sets an attribute only when a value was provided.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value cannot be serialized.
    pub fn set_opt<T: Serialize>(self, name: &str, value: Option<&T>) -> Result<Self> {
        match value {
            Some(value) => self.set(name, value),
            None => Ok(self),
        }
    }

    /// Returns the number of attributes set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl ResourceObject {
    /// Returns a bare object that only carries an identifier.
    #[must_use]
    pub fn reference(identifier: &ResourceIdentifier) -> Self {
        Self {
            kind: identifier.kind.clone(),
            id: Some(identifier.id.clone()),
            ..Self::default()
        }
    }

    /// Returns the identifier, or an empty string when the server sent none.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Reads an attribute, falling back to `T::default()` when absent or null.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the attribute has the wrong shape.
    pub fn attr<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        Ok(self.attr_opt(name)?.unwrap_or_default())
    }

    /// Reads an optional attribute; absent and null both give `None`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the attribute has the wrong shape.
    pub fn attr_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.attributes.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|e| {
                TfeError::decode(format!(
                    "attribute '{name}' of {} '{}': {e}",
                    self.kind,
                    self.id()
                ))
            }),
        }
    }

    /// Returns the identifier of a to-one relationship, if linked.
    #[must_use]
    pub fn relation_id(&self, name: &str) -> Option<&ResourceIdentifier> {
        match self.relationships.get(name)?.data.as_ref()? {
            RelationshipData::One(identifier) => Some(identifier),
            RelationshipData::Many(_) => None,
        }
    }

    /// Resolves a to-one relationship.
    ///
    /// The full object is decoded when it was sideloaded under `included`;
    /// otherwise the value only carries its id.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the linked type is not `T::TYPE`.
    pub fn related<T: Resource>(&self, name: &str, included: &Included<'_>) -> Result<Option<T>> {
        let Some(identifier) = self.relation_id(name) else {
            return Ok(None);
        };

        let reference;
        let object = if let Some(object) = included.find(identifier) {
            object
        } else {
            reference = Self::reference(identifier);
            &reference
        };

        decode_object(object, included).map(Some)
    }
}

impl<'a> Included<'a> {
    /// Wraps sideloaded objects.
    #[must_use]
    pub const fn new(objects: &'a [ResourceObject]) -> Self {
        Self { objects }
    }

    /// Returns an empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self { objects: &[] }
    }

    /// Looks up a sideloaded object by type and id.
    #[must_use]
    pub fn find(&self, identifier: &ResourceIdentifier) -> Option<&'a ResourceObject> {
        self.objects
            .iter()
            .find(|o| o.kind == identifier.kind && o.id() == identifier.id)
    }
}

impl ErrorDocument {
    /// Joins the reported errors into one message.
    ///
    /// Each entry contributes its `detail`, or its `title` when there is no
    /// detail. Returns `None` when nothing usable was reported.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| {
                e.detail
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .or_else(|| e.title.as_deref().filter(|t| !t.is_empty()))
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// Serde helper for nested attribute fields: `null` decodes to `T::default()`.
///
/// Pair it with `#[serde(default)]` so a missing key behaves the same way.
///
/// # Errors
///
/// Returns the deserializer's error if the value has the wrong shape.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes an object after checking its type tag.
///
/// # Errors
///
/// Returns a decode error on a type mismatch or a malformed attribute.
pub fn decode_object<T: Resource>(object: &ResourceObject, included: &Included<'_>) -> Result<T> {
    if object.kind != T::TYPE {
        return Err(TfeError::decode(format!(
            "expected resource type '{}', got '{}'",
            T::TYPE,
            object.kind
        )));
    }
    T::decode(object, included)
}

/// Decodes a document whose `data` is a single resource object.
///
/// # Errors
///
/// Returns a decode error if the envelope is malformed or the type differs.
pub fn decode_single<T: Resource>(body: &[u8]) -> Result<T> {
    let document: Document<ResourceObject> = serde_json::from_slice(body)
        .map_err(|e| TfeError::decode(format!("invalid {} document: {e}", T::TYPE)))?;
    decode_object(&document.data, &Included::new(&document.included))
}

/// Decodes a document whose `data` is an array, keeping server order.
///
/// # Errors
///
/// Returns a decode error if the envelope is malformed or any element has
/// another type.
pub fn decode_collection<T: Resource>(body: &[u8]) -> Result<Vec<T>> {
    let document: Document<Vec<ResourceObject>> = serde_json::from_slice(body)
        .map_err(|e| TfeError::decode(format!("invalid {} collection: {e}", T::TYPE)))?;
    let included = Included::new(&document.included);
    document
        .data
        .iter()
        .map(|object| decode_object(object, &included))
        .collect()
}

/// Encodes an options struct as a request document.
///
/// # Errors
///
/// Returns an encode error if an attribute cannot be serialized.
pub fn encode<T: EncodeResource>(resource: &T) -> Result<Value> {
    let mut data = Map::new();
    data.insert(String::from("type"), Value::from(T::TYPE));
    if !resource.id().is_empty() {
        data.insert(String::from("id"), Value::from(resource.id()));
    }
    data.insert(String::from("attributes"), resource.attributes()?.into_value());

    let relationships = resource.relationships();
    if !relationships.is_empty() {
        let mut linked = Map::new();
        for (name, identifier) in relationships {
            let identifier = serde_json::to_value(identifier)
                .map_err(|e| TfeError::encode(format!("relationship '{name}': {e}")))?;
            let mut entry = Map::new();
            entry.insert(String::from("data"), identifier);
            linked.insert(name.to_owned(), Value::Object(entry));
        }
        data.insert(String::from("relationships"), Value::Object(linked));
    }

    let mut document = Map::new();
    document.insert(String::from("data"), Value::Object(data));
    Ok(Value::Object(document))
}
