//! Per-entity, per-action entitlements.
//!
//! A permission is the string `"<segment>:<action>"`, e.g. `"building:read"`.
//! Grants carried in a token may be exact permissions or wildcard forms:
//! `*` (everything), `building:*` (every action on one entity), `*:read`
//! (one action on every entity).

/// The four actions an entity endpoint can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Role assigned to newly created admin accounts.
pub const ROLE_ADMIN: &str = "admin";
/// Role with read access to every entity and nothing else.
pub const ROLE_AUDITOR: &str = "auditor";

/// The permission string required for one action on one entity.
#[must_use]
pub fn permission_for(segment: &str, action: Action) -> String {
    format!("{}:{}", segment, action.as_str())
}

/// Permission grants for a named role. Unknown roles get no grants.
#[must_use]
pub fn grants_for_role(role: &str) -> Vec<String> {
    match role {
        ROLE_ADMIN => vec!["*".to_string()],
        ROLE_AUDITOR => vec!["*:read".to_string()],
        _ => Vec::new(),
    }
}

/// Returns true when any grant covers the required permission.
#[must_use]
pub fn is_granted(granted: &[String], permission: &str) -> bool {
    granted.iter().any(|grant| grant_matches(grant, permission))
}

fn grant_matches(grant: &str, permission: &str) -> bool {
    if grant == "*" || grant == permission {
        return true;
    }
    match (grant.split_once(':'), permission.split_once(':')) {
        (Some((grant_entity, grant_action)), Some((entity, action))) => {
            (grant_entity == "*" || grant_entity == entity)
                && (grant_action == "*" || grant_action == action)
        }
        _ => false,
    }
}
