//! Field mapping from DesignSafe record keys to Dublin Core terms.

use std::borrow::Cow;

use oxrdf::NamedNode;
use serde_json::Value;
use tracing::trace;

use crate::classify::classify;
use crate::triples::{LiteralKind, RdfRelation, TripleSet};
use crate::vocab::{self, Iri};
use crate::{Error, Record};

type Extract = fn(&Record<'_>) -> Option<Value>;

#[derive(Debug, Clone)]
enum Extractor {
    Builtin(Extract),
    Pointer(String),
}

/// One entry of the mapping table: where a value comes from, which predicate
/// it is stored under and how it is rendered.
#[derive(Debug, Clone)]
pub struct MappingRule {
    key: Cow<'static, str>,
    predicate: Iri,
    kind: LiteralKind,
    extractor: Extractor,
}

impl MappingRule {
    const fn builtin(
        key: &'static str,
        predicate: Iri,
        kind: LiteralKind,
        extract: Extract,
    ) -> Self {
        MappingRule {
            key: Cow::Borrowed(key),
            predicate,
            kind,
            extractor: Extractor::Builtin(extract),
        }
    }

    /// A rule reading the value at a JSON pointer into the record.
    pub fn pointer(
        key: &str,
        predicate: &str,
        kind: LiteralKind,
        pointer: &str,
    ) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidRule {
            key: key.to_owned(),
            reason,
        };
        NamedNode::new(predicate)
            .map_err(|error| invalid(format!("predicate {predicate}: {error}")))?;
        if !pointer.starts_with('/') {
            return Err(invalid(format!("pointer `{pointer}` must start with `/`")));
        }
        Ok(MappingRule {
            key: Cow::Owned(key.to_owned()),
            predicate: Iri::new(predicate),
            kind,
            extractor: Extractor::Pointer(pointer.to_owned()),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    fn extract(&self, record: &Record<'_>) -> Option<Value> {
        match &self.extractor {
            Extractor::Builtin(extract) => extract(record),
            Extractor::Pointer(pointer) => record.pointer(pointer).cloned(),
        }
    }
}

/// Applies an ordered list of [`MappingRule`]s to records.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    rules: Vec<MappingRule>,
}

impl Default for FieldMapper {
    fn default() -> Self {
        FieldMapper {
            rules: DESIGNSAFE_RULES.to_vec(),
        }
    }
}

impl FieldMapper {
    /// The DesignSafe table followed by `extra` rules.
    pub fn with_extra(extra: impl IntoIterator<Item = MappingRule>) -> FieldMapper {
        let mut mapper = FieldMapper::default();
        mapper.rules.extend(extra);
        mapper
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// Collects every non-empty rule result into a [`TripleSet`].
    ///
    /// Rules whose source field is absent, null or empty are skipped. Objects
    /// sharing a predicate are concatenated in rule order.
    pub fn map(&self, record: &Record<'_>) -> Result<TripleSet, Error> {
        record.uuid()?;
        record.name()?;

        let mut triples = TripleSet::new();
        for rule in &self.rules {
            let Some(value) = rule.extract(record) else {
                continue;
            };
            let objects = object_list(value);
            if objects.is_empty() {
                trace!(rule = rule.key(), "skipping empty value");
                continue;
            }
            triples.insert(
                rule.predicate.clone(),
                RdfRelation::new(rule.kind.clone(), objects),
            );
        }
        Ok(triples)
    }
}

/// Splits a keyword string on both `;` and `,`. Items are not trimmed.
pub fn split_keywords(keywords: &str) -> Option<Vec<String>> {
    if keywords.is_empty() {
        return None;
    }
    Some(
        keywords
            .replace(';', ",")
            .split(',')
            .map(str::to_owned)
            .collect(),
    )
}

fn object_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(scalar).collect(),
        other => scalar(other).into_iter().collect(),
    }
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field(record: &Record<'_>, prop: &str) -> Option<Value> {
    record.get_field(prop).cloned()
}

fn dcterm_type(record: &Record<'_>) -> Option<Value> {
    let name = record.name().ok()?;
    Some(classify(name).as_str().into())
}

fn keywords(record: &Record<'_>) -> Option<Value> {
    match record.get_field("keywords")? {
        Value::String(keywords) => split_keywords(keywords).map(Value::from),
        other => Some(other.clone()),
    }
}

static DESIGNSAFE_RULES: [MappingRule; 20] = [
    MappingRule::builtin("uuid", vocab::IDENTIFIER, LiteralKind::String, |r| {
        r.get("uuid").cloned()
    }),
    MappingRule::builtin("doi", vocab::IDENTIFIER, LiteralKind::String, |r| {
        r.get("doi").cloned()
    }),
    MappingRule::builtin("type", vocab::TYPE, LiteralKind::String, dcterm_type),
    MappingRule::builtin("publication_date", vocab::DATE, LiteralKind::DateTime, |r| {
        r.get("lastUpdated").cloned()
    }),
    MappingRule::builtin("title", vocab::TITLE, LiteralKind::String, |r| field(r, "title")),
    MappingRule::builtin("team_members", vocab::CREATOR, LiteralKind::String, |r| {
        field(r, "teamMembers")
    }),
    MappingRule::builtin("co_pis", vocab::CREATOR, LiteralKind::String, |r| field(r, "coPis")),
    MappingRule::builtin("pi", vocab::CREATOR, LiteralKind::String, |r| field(r, "pi")),
    MappingRule::builtin("authors", vocab::CREATOR, LiteralKind::String, |r| {
        field(r, "authors")
    }),
    MappingRule::builtin("project_type", vocab::TYPE, LiteralKind::String, |r| {
        field(r, "projectType")
    }),
    MappingRule::builtin("award_number", vocab::CONTRIBUTOR, LiteralKind::String, |r| {
        field(r, "awardNumber")
    }),
    MappingRule::builtin("project_id", vocab::IDENTIFIER, LiteralKind::String, |r| {
        field(r, "projectId")
    }),
    MappingRule::builtin("description", vocab::DESCRIPTION, LiteralKind::String, |r| {
        field(r, "description")
    }),
    MappingRule::builtin("keywords", vocab::SUBJECT, LiteralKind::String, keywords),
    MappingRule::builtin("experimental_facility", vocab::CONTRIBUTOR, LiteralKind::String, |r| {
        field(r, "experimentalFacility")
    }),
    MappingRule::builtin(
        "experimental_facility_other",
        vocab::CONTRIBUTOR,
        LiteralKind::String,
        |r| field(r, "experimentalFacilityOther"),
    ),
    MappingRule::builtin("experiment_type", vocab::SUBJECT, LiteralKind::String, |r| {
        field(r, "experimentType")
    }),
    MappingRule::builtin("experiment_type_other", vocab::SUBJECT, LiteralKind::String, |r| {
        field(r, "experimentTypeOther")
    }),
    MappingRule::builtin("equipment_type", vocab::SUBJECT, LiteralKind::String, |r| {
        field(r, "equipmentType")
    }),
    MappingRule::builtin("equipment_type_other", vocab::SUBJECT, LiteralKind::String, |r| {
        field(r, "equipmentTypeOther")
    }),
];
