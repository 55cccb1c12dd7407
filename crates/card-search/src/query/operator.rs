//! Canonical operators and predicate tokens.
//!
//! These identifiers are locale-independent. The words a user actually types
//! are mapped onto them by the [`super::vocabulary::Vocabulary`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A filter dimension of the card search language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "board")]
    Board,
    #[serde(rename = "swimlane")]
    Swimlane,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "label")]
    Label,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "assignee")]
    Assignee,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "dueAt")]
    Due,
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "modifiedAt")]
    ModifiedAt,
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "has")]
    Has,
    #[serde(rename = "sort")]
    Sort,
    #[serde(rename = "limit")]
    Limit,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Swimlane => "swimlane",
            Self::List => "list",
            Self::Label => "label",
            Self::User => "user",
            Self::Member => "member",
            Self::Assignee => "assignee",
            Self::Status => "status",
            Self::Due => "dueAt",
            Self::CreatedAt => "createdAt",
            Self::ModifiedAt => "modifiedAt",
            Self::Comment => "comment",
            Self::Has => "has",
            Self::Sort => "sort",
            Self::Limit => "limit",
            Self::Unknown => "unknown",
        }
    }

    /// Operators whose values name things that are resolved against live data
    /// after parsing.
    pub fn is_name_lookup(self) -> bool {
        matches!(
            self,
            Self::Board
                | Self::Swimlane
                | Self::List
                | Self::Label
                | Self::User
                | Self::Member
                | Self::Assignee
                | Self::Comment
        )
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::Due | Self::CreatedAt | Self::ModifiedAt)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Predicate tokens
// ---------------------------------------------------------------------------

/// Calendar periods understood by the date operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

/// Keywords accepted by `due:` besides periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueKeyword {
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Archived,
    All,
    Open,
    Ended,
    Public,
    Private,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Archived => "archived",
            Self::All => "all",
            Self::Open => "open",
            Self::Ended => "ended",
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Card date fields a result set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "dueAt")]
    DueAt,
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "modifiedAt")]
    ModifiedAt,
}

/// Card fields whose presence can be tested with `has:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HasField {
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "checklist")]
    Checklist,
    #[serde(rename = "attachment")]
    Attachment,
    #[serde(rename = "startAt")]
    StartAt,
    #[serde(rename = "endAt")]
    EndAt,
    #[serde(rename = "dueAt")]
    DueAt,
    #[serde(rename = "assignees")]
    Assignees,
    #[serde(rename = "members")]
    Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}
