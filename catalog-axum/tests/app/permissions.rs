use catalog_sqlite::types::UserId;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

// To exercise the identity checks in our endpoints without minting real
// tokens, the caller's identity is encoded as plain text into the
// `Authorization: Bearer <...>` header.
#[derive(Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub admin: bool,
}

impl Permissions {
    pub fn user(user_id: UserId, name: &str) -> Self {
        Self {
            user_id: Some(user_id),
            name: name.to_owned(),
            admin: false,
        }
    }

    pub fn admin(user_id: UserId, name: &str) -> Self {
        Self {
            admin: true,
            ..Self::user(user_id, name)
        }
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_html_form::to_string(self).unwrap())
    }
}

impl FromStr for Permissions {
    type Err = serde_html_form::de::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer = serde_html_form::Deserializer::new(form_urlencoded::parse(s.as_bytes()));
        Self::deserialize(deserializer)
    }
}
