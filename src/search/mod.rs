//! Company search.
//!
//! Search produces an ordered [`SearchResultSet`] that the classifier
//! intersects its sector groups with. An empty set means "no filter active",
//! so the whole listing shows. Queries shorter than two characters never
//! activate a filter; single keystrokes narrow nothing useful and flicker
//! the tree.
//!
//! Matching is layered: an exact ticker match outranks a ticker prefix,
//! which outranks a name/sector substring match. Near-miss tickers are
//! rescued with Jaro-Winkler similarity.

use crate::model::{Company, CompanyId, Listing};
use strsim::jaro_winkler;

/// Minimum query length before a search activates.
pub const MIN_QUERY_LEN: usize = 2;

/// Jaro-Winkler floor for fuzzy ticker rescue.
const FUZZY_THRESHOLD: f64 = 0.88;

/// Ordered set of company identities matching the current query.
///
/// Empty signifies "no filter" everywhere downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultSet {
    ids: Vec<CompanyId>,
}

impl SearchResultSet {
    #[must_use]
    pub fn new(ids: Vec<CompanyId>) -> Self {
        Self { ids }
    }

    /// The inactive set: no filter applied.
    #[must_use]
    pub fn inactive() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn contains(&self, id: &CompanyId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[CompanyId] {
        &self.ids
    }
}

impl FromIterator<CompanyId> for SearchResultSet {
    fn from_iter<T: IntoIterator<Item = CompanyId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Rank bucket for one match. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MatchRank {
    ExactCode,
    CodePrefix,
    NameOrSector(usize), // substring position
    Fuzzy(f64),          // stored as 1.0 - similarity so lower is better
}

impl MatchRank {
    fn weight(self) -> (u8, f64) {
        match self {
            Self::ExactCode => (0, 0.0),
            Self::CodePrefix => (1, 0.0),
            Self::NameOrSector(pos) => (2, pos as f64),
            Self::Fuzzy(inv) => (3, inv),
        }
    }
}

/// Stateless search over a listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine;

impl SearchEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run a query and return the matching identities, best match first.
    ///
    /// Ties keep listing order, so results are deterministic for identical
    /// inputs.
    #[must_use]
    pub fn search(&self, listing: &Listing, query: &str) -> SearchResultSet {
        let query = query.trim();
        // Counted in chars, matching the search bar's validity rule.
        if query.chars().count() < MIN_QUERY_LEN {
            return SearchResultSet::inactive();
        }
        let needle = query.to_lowercase();

        let mut matches: Vec<(usize, MatchRank, CompanyId)> = listing
            .companies()
            .iter()
            .enumerate()
            .filter_map(|(idx, company)| {
                self.rank(company, &needle)
                    .map(|rank| (idx, rank, company.identity()))
            })
            .collect();

        matches.sort_by(|(ai, ar, _), (bi, br, _)| {
            let (ab, af) = ar.weight();
            let (bb, bf) = br.weight();
            ab.cmp(&bb)
                .then_with(|| af.partial_cmp(&bf).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| ai.cmp(bi))
        });

        matches.into_iter().map(|(_, _, id)| id).collect()
    }

    fn rank(&self, company: &Company, needle: &str) -> Option<MatchRank> {
        let code = company.code.to_lowercase();
        if code == needle {
            return Some(MatchRank::ExactCode);
        }
        if code.starts_with(needle) {
            return Some(MatchRank::CodePrefix);
        }

        let name = company.name.to_lowercase();
        let sector = company.sector.to_lowercase();
        let name_pos = name.find(needle);
        let sector_pos = sector.find(needle);
        if let Some(pos) = match (name_pos, sector_pos) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        } {
            return Some(MatchRank::NameOrSector(pos));
        }

        // Fuzzy rescue on the ticker only; names are long enough that
        // substring matching already covers typos worth covering.
        let similarity = jaro_winkler(&code, needle);
        if similarity >= FUZZY_THRESHOLD {
            return Some(MatchRank::Fuzzy(1.0 - similarity));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Company;

    fn listing() -> Listing {
        [
            Company::new("BHP", "BHP Group", "Materials"),
            Company::new("CBA", "Commonwealth Bank", "Banks"),
            Company::new("CSL", "CSL Limited", "Health Care"),
            Company::new("WTC", "WiseTech Global", "Software"),
            Company::new("XRO", "Xero", "Software"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_short_query_is_inactive() {
        let engine = SearchEngine::new();
        assert!(engine.search(&listing(), "b").is_empty());
        assert!(engine.search(&listing(), "").is_empty());
        assert!(engine.search(&listing(), " x ").is_empty());
    }

    #[test]
    fn test_single_multibyte_char_is_inactive() {
        // One char even though it is two bytes; must stay below the minimum.
        let engine = SearchEngine::new();
        assert!(engine.search(&listing(), "é").is_empty());
    }

    #[test]
    fn test_exact_code_ranks_first() {
        let engine = SearchEngine::new();
        let results = engine.search(&listing(), "csl");
        assert_eq!(results.ids()[0], CompanyId::new("CSL"));
    }

    #[test]
    fn test_sector_substring_matches() {
        let engine = SearchEngine::new();
        let results = engine.search(&listing(), "software");
        assert_eq!(results.len(), 2);
        assert!(results.contains(&CompanyId::new("WTC")));
        assert!(results.contains(&CompanyId::new("XRO")));
    }

    #[test]
    fn test_name_substring_case_insensitive() {
        let engine = SearchEngine::new();
        let results = engine.search(&listing(), "WISETECH");
        assert_eq!(results.ids(), &[CompanyId::new("WTC")]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let engine = SearchEngine::new();
        assert!(engine.search(&listing(), "zzzz").is_empty());
    }

    #[test]
    fn test_deterministic_ordering() {
        let engine = SearchEngine::new();
        let a = engine.search(&listing(), "software");
        let b = engine.search(&listing(), "software");
        assert_eq!(a, b);
        // ties keep listing order
        assert_eq!(a.ids()[0], CompanyId::new("WTC"));
    }
}
