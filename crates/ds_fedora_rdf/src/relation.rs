use crate::PathPair;
use crate::triples::{LiteralKind, RdfRelation, TripleSet};
use crate::vocab;

/// Links a container to its parent with `dcterms:isPartOf`.
///
/// The reverse `dcterms:hasPart` is not emitted; only the new container's
/// own triples are ever patched.
pub fn containment(paths: &PathPair) -> TripleSet {
    let mut triples = TripleSet::new();
    if let Some(parent) = &paths.parent {
        triples.insert(
            vocab::IS_PART_OF,
            RdfRelation::new(LiteralKind::Uri, vec![parent.clone()]),
        );
    }
    triples
}

#[cfg(test)]
mod tests {
    use crate::triples::LiteralKind;
    use crate::{PathPair, vocab};

    use super::containment;

    #[test]
    fn root_has_no_containment() {
        let paths = PathPair {
            container: "http://f/rest/p".to_string(),
            parent: None,
        };
        assert!(containment(&paths).is_empty());
    }

    #[test]
    fn child_is_part_of_parent() {
        let paths = PathPair {
            container: "http://f/rest/p/x".to_string(),
            parent: Some("http://f/rest/p".to_string()),
        };
        let triples = containment(&paths);
        assert_eq!(triples.len(), 1);
        let relation = triples.get(&vocab::IS_PART_OF).unwrap();
        assert_eq!(relation.subject, "");
        assert_eq!(relation.objects, vec!["http://f/rest/p".to_string()]);
        assert_eq!(relation.kind, LiteralKind::Uri);
        assert!(triples.get(&vocab::HAS_PART).is_none());
    }
}
