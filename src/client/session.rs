/// Bearer credentials for the current user, handed over by the external
/// identity collaborator after login. The token rides on every write request;
/// the email drives the ownership gating of card controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    email: String,
}

impl Session {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
