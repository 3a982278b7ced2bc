use crate::error::{ServiceError, ServiceResult};
use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// The authenticated caller, as established by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub role: Role,
}

pub const STAFF: &[Role] = &[Role::Admin, Role::Warden];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STUDENT_ONLY: &[Role] = &[Role::Student];

impl Principal {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Grants access when the caller owns the resource or holds one of `allowed_roles`.
///
/// `owner_user_id` is the user id owning the resource; pass `None` for resources
/// with no owner, which makes this a plain role check.
pub fn require_owner_or_role(
    principal: &Principal,
    owner_user_id: Option<i64>,
    allowed_roles: &[Role],
) -> ServiceResult<()> {
    if owner_user_id == Some(principal.user_id) || allowed_roles.contains(&principal.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

pub fn require_role(principal: &Principal, allowed_roles: &[Role]) -> ServiceResult<()> {
    require_owner_or_role(principal, None, allowed_roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_without_role() {
        let p = Principal::new(7, Role::Student);
        assert!(require_owner_or_role(&p, Some(7), STAFF).is_ok());
    }

    #[test]
    fn staff_passes_for_foreign_resource() {
        let p = Principal::new(1, Role::Warden);
        assert!(require_owner_or_role(&p, Some(7), STAFF).is_ok());
    }

    #[test]
    fn other_student_is_forbidden() {
        let p = Principal::new(8, Role::Student);
        assert!(matches!(
            require_owner_or_role(&p, Some(7), STAFF),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            require_role(&p, ADMIN_ONLY),
            Err(ServiceError::Forbidden)
        ));
    }
}
