//! Author classification by repository association.
//!
//! Every association is either internal or external. First-time contributors are a subset
//! of external authors.

use crate::facts::AuthorAssociation;

/// Whether an author belongs to the organization that owns the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affiliation {
    Internal,
    External,
}

#[must_use]
pub const fn affiliation(association: AuthorAssociation) -> Affiliation {
    match association {
        AuthorAssociation::Owner | AuthorAssociation::Member | AuthorAssociation::Collaborator => Affiliation::Internal,
        AuthorAssociation::Contributor
        | AuthorAssociation::FirstTimer
        | AuthorAssociation::FirstTimeContributor
        | AuthorAssociation::None => Affiliation::External,
    }
}

#[must_use]
pub const fn is_internal(association: AuthorAssociation) -> bool {
    matches!(affiliation(association), Affiliation::Internal)
}

#[must_use]
pub const fn is_external(association: AuthorAssociation) -> bool {
    matches!(affiliation(association), Affiliation::External)
}

#[must_use]
pub const fn is_first_time_contributor(association: AuthorAssociation) -> bool {
    matches!(association, AuthorAssociation::FirstTimer | AuthorAssociation::FirstTimeContributor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal() {
        assert!(is_internal(AuthorAssociation::Owner));
        assert!(is_internal(AuthorAssociation::Member));
        assert!(is_internal(AuthorAssociation::Collaborator));
        assert!(!is_internal(AuthorAssociation::Contributor));
        assert!(!is_internal(AuthorAssociation::None));
    }

    #[test]
    fn test_external() {
        assert!(is_external(AuthorAssociation::Contributor));
        assert!(is_external(AuthorAssociation::FirstTimer));
        assert!(is_external(AuthorAssociation::FirstTimeContributor));
        assert!(is_external(AuthorAssociation::None));
        assert!(!is_external(AuthorAssociation::Owner));
    }

    #[test]
    fn test_internal_and_external_partition() {
        for association in AuthorAssociation::ALL {
            assert_ne!(is_internal(association), is_external(association), "{association}");
        }
    }

    #[test]
    fn test_first_time_contributors_are_external() {
        for association in AuthorAssociation::ALL {
            if is_first_time_contributor(association) {
                assert!(is_external(association), "{association}");
            }
        }

        assert!(is_first_time_contributor(AuthorAssociation::FirstTimer));
        assert!(is_first_time_contributor(AuthorAssociation::FirstTimeContributor));
        assert!(!is_first_time_contributor(AuthorAssociation::Contributor));
        assert!(!is_first_time_contributor(AuthorAssociation::None));
    }
}
