//! Dublin Core terms used as predicates.

use std::borrow::Cow;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(Cow<'static, str>);

impl Iri {
    pub fn new(iri: &str) -> Iri {
        Iri(Cow::Owned(iri.to_owned()))
    }

    pub const fn const_iri(iri: &'static str) -> Iri {
        Iri(Cow::Borrowed(iri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn join(&self, term: &str) -> Iri {
        Iri(Cow::Owned(format!("{}{}", self.0, term)))
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const DCTERMS_NS: Iri = Iri::const_iri("http://purl.org/dc/terms/");

pub const IDENTIFIER: Iri = Iri::const_iri("http://purl.org/dc/terms/identifier");
pub const TYPE: Iri = Iri::const_iri("http://purl.org/dc/terms/type");
pub const DATE: Iri = Iri::const_iri("http://purl.org/dc/terms/date");
pub const TITLE: Iri = Iri::const_iri("http://purl.org/dc/terms/title");
pub const CREATOR: Iri = Iri::const_iri("http://purl.org/dc/terms/creator");
pub const DESCRIPTION: Iri = Iri::const_iri("http://purl.org/dc/terms/description");
pub const SUBJECT: Iri = Iri::const_iri("http://purl.org/dc/terms/subject");
pub const CONTRIBUTOR: Iri = Iri::const_iri("http://purl.org/dc/terms/contributor");
pub const IS_PART_OF: Iri = Iri::const_iri("http://purl.org/dc/terms/isPartOf");
pub const HAS_PART: Iri = Iri::const_iri("http://purl.org/dc/terms/hasPart");

#[cfg(test)]
mod tests {
    use super::{DCTERMS_NS, IS_PART_OF, TITLE};

    #[test]
    fn terms_live_in_dcterms_namespace() {
        assert_eq!(DCTERMS_NS.join("title"), TITLE);
        assert_eq!(DCTERMS_NS.join("isPartOf"), IS_PART_OF);
    }
}
