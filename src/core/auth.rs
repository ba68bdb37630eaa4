//! Admin credential check.

/// Anything able to tell whether a username/password pair is an admin.
pub trait CredentialVerifier {
    fn verify(&self, user: &str, pass: &str) -> bool;
}

/// Plain equality against the configured pair.
pub struct PlainCredentials {
    user: String,
    pass: String,
}

impl PlainCredentials {
    pub fn new(user: &str, pass: &str) -> Self {
        Self {
            user: user.to_string(),
            pass: pass.to_string(),
        }
    }

    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self::new(&cfg.admin_user, &cfg.admin_password)
    }
}

impl CredentialVerifier for PlainCredentials {
    fn verify(&self, user: &str, pass: &str) -> bool {
        user == self.user && pass == self.pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let c = PlainCredentials::new("admin", "doorbell");
        assert!(c.verify("admin", "doorbell"));
        assert!(!c.verify("admin", "Doorbell"));
        assert!(!c.verify("admin ", "doorbell"));
        assert!(!c.verify("", ""));
    }
}
