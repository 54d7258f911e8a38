//! Status and priority enums stored as TEXT columns.
//!
//! Each enum serializes to the same snake_case string that the database
//! `CHECK` constraints accept, so the wire format and the column values
//! never diverge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string did not name any variant of the expected enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The column / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Whether a client is currently being worked with.
    ClientStatus ("client status") {
        Active = "active",
        NonActive = "non_active",
    }
}

define_text_enum! {
    /// Project completion state.
    ProjectStatus ("project status") {
        Completed = "completed",
        NonCompleted = "non_completed",
    }
}

define_text_enum! {
    /// Task workflow state.
    TaskStatus ("task status") {
        Open = "open",
        InProgress = "in_progress",
        OnHold = "on_hold",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Task priority.
    TaskPriority ("task priority") {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

impl ClientStatus {
    /// The opposite status, used by the status toggle.
    pub fn toggled(self) -> Self {
        match self {
            ClientStatus::Active => ClientStatus::NonActive,
            ClientStatus::NonActive => ClientStatus::Active,
        }
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::NonCompleted
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Open
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}
