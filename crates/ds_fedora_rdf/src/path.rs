use oxrdf::NamedNode;

use crate::{Error, Record, RecordType};

const PROJECT: &str = "project";
const EXPERIMENTS: &str = "experiments";
const MODEL_CONFIGS: &str = "modelConfigs";

const ROOT: &[&str] = &[];
const UNDER_PROJECT: &[&str] = &[PROJECT];
const UNDER_EXPERIMENT: &[&str] = &[PROJECT, EXPERIMENTS];
const UNDER_MODEL_CONFIG: &[&str] = &[PROJECT, EXPERIMENTS, MODEL_CONFIGS];

/// Container path of a record and of the container it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    pub container: String,
    /// `None` for projects, which sit directly under the base URI.
    pub parent: Option<String>,
}

/// Ancestor reference fields, outermost first, and how many of them make up
/// the parent container's path.
fn lineage(record_type: RecordType) -> (&'static [&'static str], usize) {
    match record_type {
        RecordType::Project => (ROOT, 0),
        RecordType::Experiment | RecordType::Analysis | RecordType::Report => (UNDER_PROJECT, 1),
        RecordType::ModelConfig => (UNDER_EXPERIMENT, 2),
        // Sensor lists are filed under their model configuration but point
        // back at the experiment.
        RecordType::SensorList => (UNDER_MODEL_CONFIG, 2),
        RecordType::Event => (UNDER_MODEL_CONFIG, 3),
    }
}

/// Computes where a record lives in the container tree under `base_uri`.
///
/// Only the first identifier of each ancestor list is used. A trailing `/`
/// on `base_uri` is ignored.
pub fn resolve_paths(base_uri: &str, record: &Record<'_>) -> Result<PathPair, Error> {
    let record_type = record.record_type()?;
    let uuid = segment("uuid", record.uuid()?)?;
    let (fields, parent_depth) = lineage(record_type);

    let mut segments = vec![base_uri.trim_end_matches('/')];
    for &field in fields {
        let id = record
            .first_ancestor(field)
            .ok_or(Error::MissingAncestorReference { record_type, field })?;
        segments.push(segment(field, id)?);
    }

    let parent = (parent_depth > 0).then(|| segments[..=parent_depth].join("/"));
    segments.push(uuid);
    Ok(PathPair {
        container: segments.join("/"),
        parent,
    })
}

/// Accepts `id` only if it names exactly one child of a container: no dot
/// segments, no `/`, `?` or `#`, and nothing an IRI cannot carry.
fn segment<'a>(field: &'static str, id: &'a str) -> Result<&'a str, Error> {
    let invalid = || Error::InvalidPathSegment {
        field,
        id: id.to_owned(),
    };
    if matches!(id, "." | "..") || id.contains(['/', '?', '#']) {
        return Err(invalid());
    }
    NamedNode::new(format!("http://localhost/{id}")).map_err(|_| invalid())?;
    Ok(id)
}
