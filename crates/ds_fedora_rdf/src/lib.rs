//! Turns DesignSafe project metadata records into Dublin Core triples.
//!
//! A record passes through three steps before it reaches Fedora:
//!
//! 1. [`FieldMapper::map`] collects the record's properties into a
//!    [`TripleSet`] keyed by predicate.
//! 2. [`resolve_paths`] computes the container path from the record type and
//!    the ancestor identifiers stored in the record, and [`containment`]
//!    turns the parent path into a `dcterms:isPartOf` relation.
//! 3. [`insert_request`] renders the merged triples as a SPARQL update body.
//!
//! Nothing here performs I/O.

mod classify;
mod error;
mod mapping;
mod path;
mod record;
mod relation;
mod sparql;
mod triples;
pub mod vocab;

pub use self::classify::{ObjectType, classify};
pub use self::error::Error;
pub use self::mapping::{FieldMapper, MappingRule, split_keywords};
pub use self::path::{PathPair, resolve_paths};
pub use self::record::{Record, RecordType};
pub use self::relation::containment;
pub use self::sparql::{Quoting, insert_request};
pub use self::triples::{LiteralKind, RdfRelation, TripleSet};
