use std::collections::BTreeMap;

use kube::ResourceExt;
use kube::core::DynamicObject;

use crate::errors::StatusError;

/// Reference derived from a live object. The grouping key always comes from
/// here, never from the declared descriptor: the report reflects what the
/// cluster returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub uid: Option<String>,
}

impl ObjectRef {
    pub fn from_object(obj: &DynamicObject) -> Result<Self, StatusError> {
        let types =
            obj.types.as_ref().ok_or_else(|| StatusError::Reference {
                name: obj.name_any(),
                reason: "object carries no type metadata".to_string(),
            })?;
        if types.api_version.is_empty() || types.kind.is_empty() {
            return Err(StatusError::Reference {
                name: obj.name_any(),
                reason: format!(
                    "incomplete type metadata {:?}/{:?}",
                    types.api_version, types.kind
                ),
            });
        }
        let name = obj.metadata.name.clone().ok_or_else(|| {
            StatusError::Reference {
                name: obj.name_any(),
                reason: "object has no metadata.name".to_string(),
            }
        })?;
        Ok(Self {
            api_version: types.api_version.clone(),
            kind: types.kind.clone(),
            name,
            namespace: obj.metadata.namespace.clone(),
            uid: obj.metadata.uid.clone(),
        })
    }

    pub fn type_key(&self) -> String {
        format!("{}/{}", self.api_version, self.kind)
    }
}

/// Live objects accumulated per concrete `apiVersion/Kind`. Insertion order
/// within a group is fetch order; keys iterate lexicographically so the
/// rendered sections are stable across runs.
#[derive(Debug, Default)]
pub struct ObjectGroups(BTreeMap<String, Vec<DynamicObject>>);

impl ObjectGroups {
    pub fn push(&mut self, type_key: String, obj: DynamicObject) {
        self.0.entry(type_key).or_default().push(obj);
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&String, &Vec<DynamicObject>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
