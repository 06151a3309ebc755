use uuid::Uuid;

/// Effective capability of a caller on a writing. Ordered so that
/// `role >= Role::Editor` reads as "may edit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    None,
    Viewer,
    Editor,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Owner => "owner",
        }
    }

    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "owner" => Some(Role::Owner),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    pub fn may_view(&self) -> bool {
        *self >= Role::Viewer
    }

    pub fn may_edit(&self) -> bool {
        *self >= Role::Editor
    }
}

#[derive(Debug, Clone)]
pub struct Collaborator {
    pub id: Uuid,
    pub writing_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
}

/// Bearer capability granting editor access to a writing, bounded by an
/// optional expiry and a headcount cap (owner included in the count).
#[derive(Debug, Clone)]
pub struct ShareLink {
    pub id: Uuid,
    pub writing_id: Uuid,
    pub token: String,
    pub created_by: Uuid,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_users: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ShareLink {
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.map(|exp| exp < now).unwrap_or(false)
    }

    /// Whether presenting this link can still admit one more collaborator,
    /// given the current collaborator count (owner excluded).
    pub fn can_admit(&self, collaborator_count: i64, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.is_active && !self.is_expired(now) && collaborator_count + 1 < self.max_users as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_matches_capabilities() {
        assert!(Role::Owner > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
        assert!(Role::Viewer > Role::None);
        assert!(Role::Owner.may_edit());
        assert!(Role::Editor.may_edit());
        assert!(!Role::Viewer.may_edit());
        assert!(Role::Viewer.may_view());
        assert!(!Role::None.may_view());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Owner, Role::Editor, Role::Viewer] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("admin"), None);
    }

    fn link(max_users: i32, expires_at: Option<chrono::DateTime<chrono::Utc>>) -> ShareLink {
        ShareLink {
            id: Uuid::new_v4(),
            writing_id: Uuid::new_v4(),
            token: "t".into(),
            created_by: Uuid::new_v4(),
            expires_at,
            max_users,
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn admission_counts_the_owner() {
        let now = chrono::Utc::now();
        let l = link(3, None);
        // owner + 1 collaborator leaves one seat
        assert!(l.can_admit(1, now));
        // owner + 2 collaborators is full
        assert!(!l.can_admit(2, now));
    }

    #[test]
    fn expired_or_inactive_links_admit_nobody() {
        let now = chrono::Utc::now();
        let expired = link(10, Some(now - chrono::Duration::minutes(1)));
        assert!(!expired.can_admit(0, now));
        let mut inactive = link(10, None);
        inactive.is_active = false;
        assert!(!inactive.can_admit(0, now));
    }
}
