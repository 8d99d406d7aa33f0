use serde::{Deserialize, Serialize};
use std::fmt;

/// Account details as returned by `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.user_name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_names() {
        let json = r#"{"userName": "ada", "email": "ada@example.com"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_name, "ada");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_profile_display() {
        let profile = UserProfile {
            user_name: "ada".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(format!("{}", profile), "ada <ada@example.com>");
    }
}
