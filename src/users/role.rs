use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The closed set of account roles. No row and no token ever carries a role
/// outside this set; inputs are parsed before they reach the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    User,
    Admin,
    Manager,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::User => "user",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Guest => "guest",
        }
    }

    /// Roles allowed to read other users' records.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    // Matching is exact and case-sensitive; callers trim first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "guest" => Ok(Role::Guest),
            _ => Err(()),
        }
    }
}
