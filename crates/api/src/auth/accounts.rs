//! Fixed accounts of the mock backend. There is no user store: these three
//! are the only credentials the login endpoint accepts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub real_name: &'static str,
    pub role: &'static str,
}

pub const MOCK_ACCOUNTS: &[MockAccount] = &[
    MockAccount {
        username: "vben",
        password: "123456",
        real_name: "Vben",
        role: "super",
    },
    MockAccount {
        username: "admin",
        password: "123456",
        real_name: "Admin",
        role: "admin",
    },
    MockAccount {
        username: "jack",
        password: "123456",
        real_name: "Jack",
        role: "user",
    },
];

/// Look up an account by exact username and password.
pub fn authenticate(username: &str, password: &str) -> Option<&'static MockAccount> {
    MOCK_ACCOUNTS
        .iter()
        .find(|a| a.username == username && a.password == password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_accounts_authenticate() {
        for name in ["vben", "admin", "jack"] {
            assert_eq!(authenticate(name, "123456").map(|a| a.username), Some(name));
        }
    }

    #[test]
    fn wrong_password_or_unknown_user_fails() {
        assert!(authenticate("vben", "654321").is_none());
        assert!(authenticate("mallory", "123456").is_none());
        assert!(authenticate("VBEN", "123456").is_none());
    }
}
