/// A publication linked to one or more authors
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paper {
    pub id: String,
    pub name: String,
}

/// Bibliographic citation text for a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexRecord {
    pub paper_id: String,
    pub text: String,
}

/// Membership of an author in a paper's authorship list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Association {
    pub author_id: String,
    pub paper_id: String,
}
