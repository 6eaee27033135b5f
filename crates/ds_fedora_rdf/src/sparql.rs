//! SPARQL update rendering.

use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, NamedNodeRef};

use crate::Error;
use crate::triples::{LiteralKind, RdfRelation, TripleSet};
use crate::vocab::Iri;

/// How values are written into the update body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quoting {
    /// N-Triples string escaping for literals and IRI validation for `uri`
    /// objects, so no value can break the statement.
    #[default]
    Escaped,
    /// Values are placed between quotes or angle brackets as they are.
    Verbatim,
}

/// Renders `triples` as an `INSERT { ... } WHERE {}` update, one line per
/// predicate in insertion order.
///
/// With [`Quoting::Escaped`] a `uri` object that is not a valid IRI fails
/// with [`Error::InvalidIri`].
pub fn insert_request(triples: &TripleSet, quoting: Quoting) -> Result<String, Error> {
    let mut body = String::from("INSERT {\n");
    for (predicate, relation) in triples.iter() {
        body.push_str(&format_triple(predicate, relation, quoting)?);
        body.push('\n');
    }
    body.push_str("} \nWHERE {}");
    Ok(body)
}

fn format_triple(
    predicate: &Iri,
    relation: &RdfRelation,
    quoting: Quoting,
) -> Result<String, Error> {
    let objects = relation
        .objects
        .iter()
        .map(|object| format_object(object, &relation.kind, quoting))
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");
    Ok(format!("<{}> <{}> {} .", relation.subject, predicate, objects))
}

fn format_object(value: &str, kind: &LiteralKind, quoting: Quoting) -> Result<String, Error> {
    let object = match kind {
        LiteralKind::Uri => match quoting {
            Quoting::Escaped => NamedNode::new(value)
                .map_err(|_| Error::InvalidIri(value.to_owned()))?
                .to_string(),
            Quoting::Verbatim => format!("<{value}>"),
        },
        LiteralKind::DateTime => typed_literal(value, xsd::DATE_TIME, quoting),
        LiteralKind::Integer => typed_literal(value, xsd::INTEGER, quoting),
        LiteralKind::Decimal => typed_literal(value, xsd::DECIMAL, quoting),
        LiteralKind::String | LiteralKind::Other(_) => match quoting {
            Quoting::Escaped => Literal::new_simple_literal(value).to_string(),
            Quoting::Verbatim => format!("\"{value}\""),
        },
    };
    Ok(object)
}

fn typed_literal(value: &str, datatype: NamedNodeRef<'_>, quoting: Quoting) -> String {
    match quoting {
        Quoting::Escaped => Literal::new_typed_literal(value, datatype).to_string(),
        Quoting::Verbatim => format!("\"{value}\"^^<{}>", datatype.as_str()),
    }
}
