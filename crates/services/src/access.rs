//! Access-level management. Levels are changed only by privileged actors;
//! an actor can never grant a level at or above their own.

use std::sync::Arc;

use tracing::info;

use domains::{AccessLevel, DomainError, DomainResult, UserDirectory, UserId};

pub struct AccessService {
    users: Arc<dyn UserDirectory>,
}

impl AccessService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Sets `target`'s access level. The target is created on first
    /// contact if unknown.
    pub async fn promote(
        &self,
        actor: UserId,
        target: UserId,
        level: AccessLevel,
    ) -> DomainResult<()> {
        let actor_user = self.users.get_user(actor).await?;
        if !actor_user.access_level.can_confirm() {
            return Err(DomainError::PermissionDenied(format!(
                "user {actor} may not change access levels"
            )));
        }
        if level.rank() >= actor_user.access_level.rank() {
            return Err(DomainError::PermissionDenied(format!(
                "user {actor} may not grant level {} at or above their own",
                level.as_str()
            )));
        }

        self.users.ensure_user(target).await?;
        self.users.set_access_level(target, level).await?;
        info!(%actor, %target, level = level.as_str(), "access level changed");
        Ok(())
    }
}
