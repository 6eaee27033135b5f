//! Per-record triple accumulator.

use crate::vocab::Iri;

/// How the objects of a relation are rendered in a SPARQL update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    DateTime,
    Uri,
    Integer,
    Decimal,
    /// A tag outside the known set; rendered like [`LiteralKind::String`].
    Other(String),
}

impl LiteralKind {
    pub fn from_tag(tag: &str) -> LiteralKind {
        match tag {
            "string_literal" => LiteralKind::String,
            "datetime_literal" => LiteralKind::DateTime,
            "uri" => LiteralKind::Uri,
            "integer_literal" => LiteralKind::Integer,
            "decimal_literal" => LiteralKind::Decimal,
            other => LiteralKind::Other(other.to_owned()),
        }
    }
}

/// Objects sharing one predicate. An empty subject stands for the container
/// being patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfRelation {
    pub subject: String,
    pub objects: Vec<String>,
    pub kind: LiteralKind,
}

impl RdfRelation {
    pub fn new(kind: LiteralKind, objects: Vec<String>) -> RdfRelation {
        RdfRelation {
            subject: String::new(),
            objects,
            kind,
        }
    }

    pub fn with_subject(self, subject: impl Into<String>) -> RdfRelation {
        RdfRelation {
            subject: subject.into(),
            ..self
        }
    }
}

/// Predicate to relation map that keeps first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleSet {
    entries: Vec<(Iri, RdfRelation)>,
}

impl TripleSet {
    pub fn new() -> TripleSet {
        TripleSet::default()
    }

    /// Appends the relation's objects to an existing entry for `predicate`,
    /// or adds a new entry at the end. An existing entry keeps its subject
    /// and literal kind.
    pub fn insert(&mut self, predicate: Iri, relation: RdfRelation) {
        match self.entries.iter_mut().find(|(p, _)| *p == predicate) {
            Some((_, existing)) => existing.objects.extend(relation.objects),
            None => self.entries.push((predicate, relation)),
        }
    }

    pub fn merge(mut self, other: TripleSet) -> TripleSet {
        for (predicate, relation) in other.entries {
            self.insert(predicate, relation);
        }
        self
    }

    pub fn get(&self, predicate: &Iri) -> Option<&RdfRelation> {
        self.entries
            .iter()
            .find(|(p, _)| p == predicate)
            .map(|(_, relation)| relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Iri, &RdfRelation)> {
        self.entries.iter().map(|(p, relation)| (p, relation))
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Iri> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::vocab::{CREATOR, IS_PART_OF, TITLE};

    use super::{LiteralKind, RdfRelation, TripleSet};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn insert_appends_to_existing_predicate() {
        let mut triples = TripleSet::new();
        triples.insert(CREATOR, RdfRelation::new(LiteralKind::String, strings(&["a"])));
        triples.insert(TITLE, RdfRelation::new(LiteralKind::String, strings(&["t"])));
        triples.insert(
            CREATOR,
            RdfRelation::new(LiteralKind::Uri, strings(&["b", "c"])),
        );

        assert_eq!(triples.len(), 2);
        let creator = triples.get(&CREATOR).unwrap();
        assert_eq!(creator.objects, strings(&["a", "b", "c"]));
        assert_eq!(creator.kind, LiteralKind::String);
        assert_eq!(
            triples.predicates().cloned().collect::<Vec<_>>(),
            vec![CREATOR, TITLE]
        );
    }

    #[test]
    fn merge_keeps_order() {
        let mut left = TripleSet::new();
        left.insert(TITLE, RdfRelation::new(LiteralKind::String, strings(&["t"])));
        let mut right = TripleSet::new();
        right.insert(
            IS_PART_OF,
            RdfRelation::new(LiteralKind::Uri, strings(&["http://x/p"])),
        );
        right.insert(TITLE, RdfRelation::new(LiteralKind::String, strings(&["u"])));

        let merged = left.merge(right);
        assert_eq!(
            merged.predicates().cloned().collect::<Vec<_>>(),
            vec![TITLE, IS_PART_OF]
        );
        assert_eq!(merged.get(&TITLE).unwrap().objects, strings(&["t", "u"]));
    }

    #[test]
    fn literal_kind_tags() {
        let known = [
            ("string_literal", LiteralKind::String),
            ("datetime_literal", LiteralKind::DateTime),
            ("uri", LiteralKind::Uri),
            ("integer_literal", LiteralKind::Integer),
            ("decimal_literal", LiteralKind::Decimal),
        ];
        for (tag, kind) in known {
            assert_eq!(LiteralKind::from_tag(tag), kind);
        }
        assert_eq!(
            LiteralKind::from_tag("boolean_literal"),
            LiteralKind::Other("boolean_literal".to_string())
        );
    }
}
