use std::fmt::Display;

use crate::RecordType;

/// Value of the `dcterms:type` property derived from a record's `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Collection,
    Dataset,
}

impl ObjectType {
    pub fn is_collection(self) -> bool {
        matches!(self, ObjectType::Collection)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Collection => "collection",
            ObjectType::Dataset => "dataset",
        }
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projects are collections, everything else is a dataset.
///
/// Unlike [`crate::resolve_paths`] this never fails: names outside the
/// DesignSafe model are classified as datasets.
pub fn classify(name: &str) -> ObjectType {
    if name == RecordType::Project.as_str() {
        ObjectType::Collection
    } else {
        ObjectType::Dataset
    }
}
