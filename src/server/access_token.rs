//! Identifies the owner of one open session. A fresh token is issued for every
//! successful open, independent of whichever thread or task made the call.
use std::fmt;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct AccessToken(Uuid);

impl AccessToken {
    pub fn new() -> AccessToken {
        AccessToken(Uuid::new_v4())
    }

    pub fn get_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccessToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let first = AccessToken::new();
        let second = AccessToken::new();

        assert_ne!(first, second);
        let copied = first;
        assert_eq!(first, copied);
        assert_eq!(first.to_string(), first.get_uuid().to_string());
    }
}
