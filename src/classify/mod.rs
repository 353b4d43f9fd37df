//! The group classifier: partitions a company listing into industry groups,
//! intersected with the active search result set.
//!
//! This is pure, deterministic code with no hidden state. The same three
//! inputs always produce structurally equal output, the rendered tree only
//! ever sees non-empty groups, and the classifier never invents or drops
//! duplicates: what is duplicated in the listing stays duplicated in the
//! groups.

use crate::model::{Company, GroupKey, IndustryCatalog, Listing};
use crate::search::SearchResultSet;
use indexmap::IndexMap;

/// One industry group after sector matching and search filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGroup {
    pub key: GroupKey,
    /// Display title, already resolved with the key-as-title fallback.
    pub title: String,
    /// Member companies in listing order. Never empty in classifier output.
    pub companies: Vec<Company>,
}

impl FilteredGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// Classify companies into industry groups.
///
/// For each key in `industries` (catalog order is preserved via the caller's
/// slice order), a company is kept when its sector appears in that group's
/// sector list, and - if `results` is non-empty - when its identity appears
/// in `results`. Only non-empty groups are emitted.
///
/// Companies whose sector matches no group are silently excluded; sector
/// lists that overlap across groups place a company in every matching group.
#[must_use]
pub fn classify(
    listing: &Listing,
    catalog: &IndustryCatalog,
    industries: &[GroupKey],
    results: &SearchResultSet,
) -> IndexMap<GroupKey, FilteredGroup> {
    let mut groups = IndexMap::new();

    for key in industries {
        let Some(group) = catalog.get(key) else {
            // Restriction names a key the catalog does not know; skip it
            // rather than failing the whole classification.
            continue;
        };

        let companies: Vec<Company> = listing
            .companies()
            .iter()
            .filter(|company| group.sectors.iter().any(|s| *s == company.sector))
            .filter(|company| results.is_empty() || results.contains(&company.identity()))
            .cloned()
            .collect();

        if !companies.is_empty() {
            groups.insert(
                key.clone(),
                FilteredGroup {
                    key: key.clone(),
                    title: catalog.title_for(key),
                    companies,
                },
            );
        }
    }

    groups
}

/// A computed classification plus the revision of inputs it was built from.
///
/// Reclassification is idempotent and cheap, but there is no reason to rerun
/// it on every keystroke that changed nothing; callers bump `revision`
/// whenever the listing, catalog, restriction or search results change and
/// [`Classification::refresh`] recomputes only on a mismatch.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    groups: IndexMap<GroupKey, FilteredGroup>,
    revision: Option<u64>,
}

impl Classification {
    /// Compute a classification over all catalog keys.
    #[must_use]
    pub fn compute(listing: &Listing, catalog: &IndustryCatalog, results: &SearchResultSet) -> Self {
        Self {
            groups: classify(listing, catalog, &catalog.keys(), results),
            revision: Some(0),
        }
    }

    /// Recompute if `revision` differs from the stored one (or nothing has
    /// been computed yet).
    pub fn refresh(
        &mut self,
        revision: u64,
        listing: &Listing,
        catalog: &IndustryCatalog,
        industries: &[GroupKey],
        results: &SearchResultSet,
    ) {
        if self.revision != Some(revision) {
            self.groups = classify(listing, catalog, industries, results);
            self.revision = Some(revision);
        }
    }

    #[must_use]
    pub fn groups(&self) -> &IndexMap<GroupKey, FilteredGroup> {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&FilteredGroup> {
        self.groups.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &GroupKey) -> bool {
        self.groups.contains_key(key)
    }

    /// Total companies across all groups (double-counts overlap members).
    #[must_use]
    pub fn company_count(&self) -> usize {
        self.groups.values().map(FilteredGroup::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Company, CompanyId, IndustryGroup};
    use indexmap::IndexMap as Map;

    fn catalog() -> IndustryCatalog {
        let mut groups = Map::new();
        groups.insert(
            GroupKey::new("tech"),
            IndustryGroup {
                title: "Technology".to_string(),
                sectors: vec!["Software".to_string()],
            },
        );
        groups.insert(
            GroupKey::new("min"),
            IndustryGroup {
                title: "Mining".to_string(),
                sectors: vec!["Resources".to_string()],
            },
        );
        IndustryCatalog::new(groups)
    }

    fn companies() -> Listing {
        [
            Company::new("1", "One", "Software"),
            Company::new("2", "Two", "Resources"),
            Company::new("3", "Three", "Unknown"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_partitions_by_sector_without_filter() {
        let cat = catalog();
        let groups = classify(&companies(), &cat, &cat.keys(), &SearchResultSet::inactive());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&GroupKey::new("tech")].companies[0].code, "1");
        assert_eq!(groups[&GroupKey::new("min")].companies[0].code, "2");
        // company 3 appears nowhere
        assert!(groups
            .values()
            .all(|g| g.companies.iter().all(|c| c.code != "3")));
    }

    #[test]
    fn test_search_filter_narrows_to_matching_group() {
        let cat = catalog();
        let results: SearchResultSet = [CompanyId::new("2")].into_iter().collect();
        let groups = classify(&companies(), &cat, &cat.keys(), &results);

        assert_eq!(groups.len(), 1);
        let min = &groups[&GroupKey::new("min")];
        assert_eq!(min.companies.len(), 1);
        assert_eq!(min.companies[0].code, "2");
    }

    #[test]
    fn test_filter_is_strict_intersection() {
        let cat = catalog();
        let results: SearchResultSet = [CompanyId::new("1"), CompanyId::new("99")]
            .into_iter()
            .collect();
        let groups = classify(&companies(), &cat, &cat.keys(), &results);

        for group in groups.values() {
            for company in &group.companies {
                assert!(results.contains(&company.identity()));
            }
        }
    }

    #[test]
    fn test_overlapping_sectors_duplicate_membership() {
        let mut map = Map::new();
        map.insert(
            GroupKey::new("a"),
            IndustryGroup {
                title: "A".to_string(),
                sectors: vec!["Shared".to_string()],
            },
        );
        map.insert(
            GroupKey::new("b"),
            IndustryGroup {
                title: "B".to_string(),
                sectors: vec!["Shared".to_string(), "OnlyB".to_string()],
            },
        );
        let cat = IndustryCatalog::new(map);
        let listing: Listing = [Company::new("X", "X Ltd", "Shared")].into_iter().collect();

        let groups = classify(&listing, &cat, &cat.keys(), &SearchResultSet::inactive());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&GroupKey::new("a")].companies[0].code, "X");
        assert_eq!(groups[&GroupKey::new("b")].companies[0].code, "X");
    }

    #[test]
    fn test_duplicates_preserved() {
        let cat = catalog();
        let listing: Listing = [
            Company::new("1", "One", "Software"),
            Company::new("1", "One", "Software"),
        ]
        .into_iter()
        .collect();

        let groups = classify(&listing, &cat, &cat.keys(), &SearchResultSet::inactive());
        assert_eq!(groups[&GroupKey::new("tech")].companies.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let cat = catalog();
        let listing = companies();
        let a = classify(&listing, &cat, &cat.keys(), &SearchResultSet::inactive());
        let b = classify(&listing, &cat, &cat.keys(), &SearchResultSet::inactive());
        assert_eq!(a, b);
    }

    #[test]
    fn test_restriction_limits_groups() {
        let cat = catalog();
        let only_tech = vec![GroupKey::new("tech")];
        let groups = classify(&companies(), &cat, &only_tech, &SearchResultSet::inactive());
        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key(&GroupKey::new("tech")));
    }

    #[test]
    fn test_unknown_restriction_key_skipped() {
        let cat = catalog();
        let keys = vec![GroupKey::new("tech"), GroupKey::new("ghost")];
        let groups = classify(&companies(), &cat, &keys, &SearchResultSet::inactive());
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_empty_inputs_are_not_errors() {
        let cat = catalog();
        let empty = Listing::default();
        let groups = classify(&empty, &cat, &cat.keys(), &SearchResultSet::inactive());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_classification_refresh_tracks_revision() {
        let cat = catalog();
        let listing = companies();
        let mut class = Classification::compute(&listing, &cat, &SearchResultSet::inactive());
        assert_eq!(class.groups().len(), 2);

        let results: SearchResultSet = [CompanyId::new("2")].into_iter().collect();
        class.refresh(1, &listing, &cat, &cat.keys(), &results);
        assert_eq!(class.groups().len(), 1);

        // same revision: no change even with different inputs
        class.refresh(1, &listing, &cat, &cat.keys(), &SearchResultSet::inactive());
        assert_eq!(class.groups().len(), 1);
    }
}
