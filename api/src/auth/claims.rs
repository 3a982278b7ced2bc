use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::access::Principal;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn principal(&self) -> Principal {
        Principal::new(self.0.sub, self.0.role)
    }
}
