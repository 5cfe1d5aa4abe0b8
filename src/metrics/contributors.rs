//! Deduplicated contributor identities.
//!
//! Contributor counts across repositories are always sizes of unions, never sums of
//! per-repository counts, so someone active in two repositories is counted once.

use super::classification::{Affiliation, affiliation, is_first_time_contributor};
use crate::facts::AuthorAssociation;
use std::collections::BTreeSet;

/// A set of author logins. Missing or empty logins are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorSet(BTreeSet<String>);

impl ContributorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `login` to the set. Deleted accounts (`None`) and empty logins are ignored.
    pub fn insert(&mut self, login: Option<&str>) {
        if let Some(login) = login
            && !login.is_empty()
        {
            let _ = self.0.insert(login.to_string());
        }
    }

    #[must_use]
    pub fn contains(&self, login: &str) -> bool {
        self.0.contains(login)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ContributorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for login in iter {
            set.insert(Some(login.as_ref()));
        }
        set
    }
}

/// Union of any number of sets, starting from the empty set.
#[must_use]
pub fn union<'a>(sets: impl IntoIterator<Item = &'a ContributorSet>) -> ContributorSet {
    sets.into_iter().fold(ContributorSet::new(), |mut acc, set| {
        acc.0.extend(set.0.iter().cloned());
        acc
    })
}

/// Number of distinct logins across `sets`. Zero for no sets.
#[must_use]
pub fn union_size<'a>(sets: impl IntoIterator<Item = &'a ContributorSet>) -> usize {
    union(sets).len()
}

/// Contributor sets partitioned the way reports break them down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contributors {
    pub all_time: ContributorSet,
    pub all_time_internal: ContributorSet,
    pub all_time_external: ContributorSet,
    pub this_period: ContributorSet,
    pub this_period_internal: ContributorSet,
    pub this_period_external: ContributorSet,
    pub this_period_first_time_contributor: ContributorSet,
}

impl Contributors {
    /// Record an author of one issue or pull request.
    ///
    /// `in_period` says whether the record was created inside the reporting window.
    pub fn record(&mut self, login: Option<&str>, association: AuthorAssociation, in_period: bool) {
        let affiliation = affiliation(association);

        self.all_time.insert(login);
        match affiliation {
            Affiliation::Internal => self.all_time_internal.insert(login),
            Affiliation::External => self.all_time_external.insert(login),
        }

        if !in_period {
            return;
        }

        self.this_period.insert(login);
        match affiliation {
            Affiliation::Internal => self.this_period_internal.insert(login),
            Affiliation::External => self.this_period_external.insert(login),
        }

        if is_first_time_contributor(association) {
            self.this_period_first_time_contributor.insert(login);
        }
    }

    /// Partition-wise union of several groups.
    #[must_use]
    pub fn union<'a>(groups: impl IntoIterator<Item = &'a Self> + Clone) -> Self {
        Self {
            all_time: union(groups.clone().into_iter().map(|g| &g.all_time)),
            all_time_internal: union(groups.clone().into_iter().map(|g| &g.all_time_internal)),
            all_time_external: union(groups.clone().into_iter().map(|g| &g.all_time_external)),
            this_period: union(groups.clone().into_iter().map(|g| &g.this_period)),
            this_period_internal: union(groups.clone().into_iter().map(|g| &g.this_period_internal)),
            this_period_external: union(groups.clone().into_iter().map(|g| &g.this_period_external)),
            this_period_first_time_contributor: union(groups.into_iter().map(|g| &g.this_period_first_time_contributor)),
        }
    }
}

/// Sizes of each partition of a [`Contributors`] union.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributorCounts {
    pub all_time: u64,
    pub all_time_internal: u64,
    pub all_time_external: u64,
    pub this_period: u64,
    pub this_period_internal: u64,
    pub this_period_external: u64,
    pub this_period_first_time_contributor: u64,
}

impl ContributorCounts {
    /// Deduplicated counts across all of `groups`.
    #[must_use]
    pub fn of_union<'a>(groups: &[&'a Contributors]) -> Self {
        let size = |select: fn(&'a Contributors) -> &'a ContributorSet| -> u64 {
            union_size(groups.iter().map(|g| select(*g))) as u64
        };

        Self {
            all_time: size(|g| &g.all_time),
            all_time_internal: size(|g| &g.all_time_internal),
            all_time_external: size(|g| &g.all_time_external),
            this_period: size(|g| &g.this_period),
            this_period_internal: size(|g| &g.this_period_internal),
            this_period_external: size(|g| &g.this_period_external),
            this_period_first_time_contributor: size(|g| &g.this_period_first_time_contributor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(logins: &[&str]) -> ContributorSet {
        logins.iter().collect()
    }

    #[test]
    fn test_insert_skips_missing_logins() {
        let mut s = ContributorSet::new();
        s.insert(None);
        s.insert(Some(""));
        s.insert(Some("alice"));
        s.insert(Some("alice"));
        assert_eq!(s.len(), 1);
        assert!(s.contains("alice"));
    }

    #[test]
    fn test_union_size_empty() {
        let sets: Vec<&ContributorSet> = Vec::new();
        assert_eq!(union_size(sets), 0);
    }

    #[test]
    fn test_union_size_overlapping() {
        let a = set(&["a", "b"]);
        let b = set(&["b", "c"]);
        assert_eq!(union_size([&a, &b]), 3);
    }

    #[test]
    fn test_union_is_idempotent_and_order_independent() {
        let a = set(&["alice", "bob"]);
        let b = set(&["bob", "carol"]);
        assert_eq!(union([&a, &b]), union([&b, &a]));
        assert_eq!(union([&a, &a]), a);
        assert_eq!(union([&union([&a, &b]), &b]), union([&a, &b]));
    }

    #[test]
    fn test_record_partitions() {
        let mut c = Contributors::default();
        c.record(Some("owner"), AuthorAssociation::Owner, false);
        c.record(Some("newbie"), AuthorAssociation::FirstTimeContributor, true);
        c.record(Some("helper"), AuthorAssociation::Contributor, true);
        c.record(None, AuthorAssociation::None, true);

        assert_eq!(c.all_time, set(&["owner", "newbie", "helper"]));
        assert_eq!(c.all_time_internal, set(&["owner"]));
        assert_eq!(c.all_time_external, set(&["newbie", "helper"]));
        assert_eq!(c.this_period, set(&["newbie", "helper"]));
        assert!(c.this_period_internal.is_empty());
        assert_eq!(c.this_period_external, set(&["newbie", "helper"]));
        assert_eq!(c.this_period_first_time_contributor, set(&["newbie"]));
    }

    #[test]
    fn test_contributors_union_and_counts() {
        let mut a = Contributors::default();
        a.record(Some("alice"), AuthorAssociation::Member, true);
        a.record(Some("bob"), AuthorAssociation::Contributor, false);

        let mut b = Contributors::default();
        b.record(Some("bob"), AuthorAssociation::Contributor, true);
        b.record(Some("carol"), AuthorAssociation::FirstTimer, true);

        let merged = Contributors::union([&a, &b]);
        assert_eq!(merged.all_time.len(), 3);
        assert_eq!(merged.this_period.len(), 3);

        let counts = ContributorCounts::of_union(&[&a, &b]);
        assert_eq!(counts.all_time, 3);
        assert_eq!(counts.all_time_internal, 1);
        assert_eq!(counts.all_time_external, 2);
        assert_eq!(counts.this_period, 3);
        assert_eq!(counts.this_period_first_time_contributor, 1);
    }
}
