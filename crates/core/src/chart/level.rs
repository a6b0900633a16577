//! Hierarchy levels of the chart of accounts.

use serde::{Deserialize, Serialize};

/// One of the five fixed levels of the chart of accounts.
///
/// Serialized as its number (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AccountLevel {
    /// Level 1, e.g. `1000000000` (assets).
    Class,
    /// Level 2, e.g. `1100000000`.
    Group,
    /// Level 3, e.g. `1101000000`.
    Account,
    /// Level 4, e.g. `1101010000`.
    Subaccount,
    /// Level 5, posting accounts.
    Auxiliary,
}

impl AccountLevel {
    /// All levels, top to bottom.
    pub const ALL: [Self; 5] = [
        Self::Class,
        Self::Group,
        Self::Account,
        Self::Subaccount,
        Self::Auxiliary,
    ];

    /// Level number, 1 for the top of the tree.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Class => 1,
            Self::Group => 2,
            Self::Account => 3,
            Self::Subaccount => 4,
            Self::Auxiliary => 5,
        }
    }

    /// Number of leading code characters shared by every account below this one.
    ///
    /// `None` for the leaf level, which aggregates on its full code.
    #[must_use]
    pub const fn prefix_len(self) -> Option<usize> {
        match self {
            Self::Class => Some(1),
            Self::Group => Some(2),
            Self::Account => Some(4),
            Self::Subaccount => Some(6),
            Self::Auxiliary => None,
        }
    }

    /// Exact trailing-zero run that identifies this level in a 10-character code.
    #[must_use]
    pub const fn zero_run(self) -> Option<usize> {
        match self {
            Self::Class => Some(9),
            Self::Group => Some(8),
            Self::Account => Some(6),
            Self::Subaccount => Some(4),
            Self::Auxiliary => None,
        }
    }

    /// The level directly above, `None` for level 1.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Class => None,
            Self::Group => Some(Self::Class),
            Self::Account => Some(Self::Group),
            Self::Subaccount => Some(Self::Account),
            Self::Auxiliary => Some(Self::Subaccount),
        }
    }

    /// True for level 5, the only level whose totals are summed in the trial balance.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Auxiliary)
    }
}

impl From<AccountLevel> for u8 {
    fn from(level: AccountLevel) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for AccountLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.number() == value)
            .ok_or_else(|| format!("Invalid account level: {value}"))
    }
}

impl std::fmt::Display for AccountLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
