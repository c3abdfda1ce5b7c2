use base64::Engine;

/// Credentials attached to every outgoing request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// Bearer token, sent as `Authorization: Bearer <token>`
    Bearer(String),
    /// Elastic-style API key, sent as `Authorization: ApiKey <key>`
    Apikey(String),
    /// Use username and password authentication via Basic Auth headers
    Basic(String, String),
    /// Don't use any authentication
    None,
}

impl Auth {
    /// Pick credentials from optional parts
    ///
    /// A bearer token wins over an API key, which wins over Basic.
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        apikey: Option<String>,
        token: Option<String>,
    ) -> Self {
        match (username, password, apikey, token) {
            (_, _, _, Some(token)) => Self::Bearer(token),
            (_, _, Some(apikey), None) => Self::Apikey(apikey),
            (Some(username), Some(password), None, None) => Self::Basic(username, password),
            _ => Self::None,
        }
    }

    /// Value of the `Authorization` header, if any
    pub fn header(&self) -> Option<String> {
        match self {
            Self::Bearer(token) => Some(format!("Bearer {}", token)),
            Self::Apikey(apikey) => Some(format!("ApiKey {}", apikey)),
            Self::Basic(username, password) => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                Some(format!("Basic {}", credentials))
            }
            Self::None => None,
        }
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => write!(f, "Bearer"),
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::Basic(_, _) => write!(f, "Basic"),
            Self::None => write!(f, "None"),
        }
    }
}
