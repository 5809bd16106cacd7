//! Access policy: the single place ownership and share records are turned
//! into view/mutate/delete decisions. Pure functions; callers translate a
//! denial into "not found" so task existence never leaks to unauthorized
//! users.

use crate::models::{Task, TaskShare};

/// The owner and any grantee (at any permission level) may view.
pub fn can_view(task: &Task, shares: &[TaskShare], user_id: &str) -> bool {
    task.created_by == user_id
        || shares
            .iter()
            .any(|s| s.task_id == task.task_id && s.grantee_id == user_id)
}

/// The owner and grantees holding `edit` or `admin` may mutate.
pub fn can_mutate(task: &Task, shares: &[TaskShare], user_id: &str) -> bool {
    task.created_by == user_id
        || shares.iter().any(|s| {
            s.task_id == task.task_id && s.grantee_id == user_id && s.permission.allows_mutation()
        })
}

/// Only the owner may delete; shares never grant delete.
pub fn can_delete(task: &Task, user_id: &str) -> bool {
    task.created_by == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SharePermission, TaskPriority, TaskStatus};
    use chrono::Utc;

    fn task(owner: &str) -> Task {
        Task {
            task_id: "t1".to_string(),
            title: "title".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            team_id: None,
            created_by: owner.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: None,
        }
    }

    fn share(task_id: &str, grantee: &str, permission: SharePermission) -> TaskShare {
        TaskShare {
            share_id: "s1".to_string(),
            task_id: task_id.to_string(),
            grantee_id: grantee.to_string(),
            granter_id: "owner".to_string(),
            permission,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_has_full_access() {
        let t = task("alice");
        assert!(can_view(&t, &[], "alice"));
        assert!(can_mutate(&t, &[], "alice"));
        assert!(can_delete(&t, "alice"));
    }

    #[test]
    fn stranger_has_no_access() {
        let t = task("alice");
        assert!(!can_view(&t, &[], "bob"));
        assert!(!can_mutate(&t, &[], "bob"));
        assert!(!can_delete(&t, "bob"));
    }

    #[test]
    fn view_share_grants_view_only() {
        let t = task("alice");
        let shares = vec![share("t1", "bob", SharePermission::View)];
        assert!(can_view(&t, &shares, "bob"));
        assert!(!can_mutate(&t, &shares, "bob"));
        assert!(!can_delete(&t, "bob"));
    }

    #[test]
    fn edit_and_admin_shares_grant_mutation_but_not_delete() {
        let t = task("alice");
        for permission in [SharePermission::Edit, SharePermission::Admin] {
            let shares = vec![share("t1", "bob", permission)];
            assert!(can_view(&t, &shares, "bob"));
            assert!(can_mutate(&t, &shares, "bob"));
            assert!(!can_delete(&t, "bob"));
        }
    }

    #[test]
    fn share_on_another_task_does_not_leak() {
        let t = task("alice");
        let shares = vec![share("other-task", "bob", SharePermission::Admin)];
        assert!(!can_view(&t, &shares, "bob"));
        assert!(!can_mutate(&t, &shares, "bob"));
    }
}
