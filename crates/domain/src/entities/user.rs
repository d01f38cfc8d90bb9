use serde::{Deserialize, Serialize};

/// Core User entity - represents the business domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,      // 0 until storage assigns one
    pub uuid: String, // empty until storage assigns one
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl User {
    /// A bare user that has not been persisted yet.
    pub fn new(username: String, email: String, full_name: String) -> Self {
        Self {
            id: 0,
            uuid: String::new(),
            username,
            email,
            full_name,
        }
    }

    pub fn with_id(
        id: i64,
        uuid: String,
        username: String,
        email: String,
        full_name: String,
    ) -> Self {
        Self {
            id,
            uuid,
            username,
            email,
            full_name,
        }
    }

    /// Overwrite every field the request supplies. Empty fields keep the
    /// current value; there is no way to clear a field here.
    pub fn apply(&mut self, request: &UpdateUserRequest) {
        overwrite_if_provided(&mut self.username, &request.username);
        overwrite_if_provided(&mut self.email, &request.email);
        overwrite_if_provided(&mut self.full_name, &request.full_name);
    }
}

fn overwrite_if_provided(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
}
