use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// How the author of an issue or pull request is associated with the repository.
///
/// Mirrors GitHub's `CommentAuthorAssociation` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorAssociation {
    Owner,
    Member,
    Collaborator,
    Contributor,
    FirstTimer,
    FirstTimeContributor,

    /// Also used for GitHub's `MANNEQUIN` placeholder accounts of imported content.
    #[serde(alias = "MANNEQUIN")]
    None,
}

impl AuthorAssociation {
    pub const ALL: [Self; 7] = [
        Self::Owner,
        Self::Member,
        Self::Collaborator,
        Self::Contributor,
        Self::FirstTimer,
        Self::FirstTimeContributor,
        Self::None,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
            Self::Collaborator => "COLLABORATOR",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::None => "NONE",
        }
    }
}

impl Display for AuthorAssociation {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
