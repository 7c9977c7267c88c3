use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// HTTP verb an endpoint answers to.
///
/// `All` matches every verb; it is kept as its own value so the runtime can
/// decide how to expand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    Trace,
    All,
}

impl HttpVerb {
    /// Every verb, `All` included, in declaration order.
    pub const VARIANTS: [HttpVerb; 9] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Patch,
        HttpVerb::Delete,
        HttpVerb::Options,
        HttpVerb::Head,
        HttpVerb::Trace,
        HttpVerb::All,
    ];

    /// Upper-case wire name (`"GET"`, `"ALL"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::Head => "HEAD",
            HttpVerb::Trace => "TRACE",
            HttpVerb::All => "ALL",
        }
    }

    /// The concrete verbs this value stands for. `All` expands to the eight
    /// concrete verbs.
    pub fn expand(&self) -> Vec<HttpVerb> {
        match self {
            HttpVerb::All => HttpVerb::VARIANTS[..8].to_vec(),
            other => vec![*other],
        }
    }

    /// Convert to an [`http::Method`]. Returns `None` for `All`.
    pub fn to_method(&self) -> Option<http::Method> {
        let method = match self {
            HttpVerb::Get => http::Method::GET,
            HttpVerb::Post => http::Method::POST,
            HttpVerb::Put => http::Method::PUT,
            HttpVerb::Patch => http::Method::PATCH,
            HttpVerb::Delete => http::Method::DELETE,
            HttpVerb::Options => http::Method::OPTIONS,
            HttpVerb::Head => http::Method::HEAD,
            HttpVerb::Trace => http::Method::TRACE,
            HttpVerb::All => return None,
        };
        Some(method)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpVerb::VARIANTS
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetadataError::UnknownVerb(s.to_string()))
    }
}

impl TryFrom<&http::Method> for HttpVerb {
    type Error = MetadataError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpVerb>().unwrap(), HttpVerb::Get);
        assert_eq!("All".parse::<HttpVerb>().unwrap(), HttpVerb::All);
    }

    #[test]
    fn parse_unknown_verb_fails() {
        assert_eq!(
            "CONNECT".parse::<HttpVerb>(),
            Err(MetadataError::UnknownVerb("CONNECT".into()))
        );
    }

    #[test]
    fn all_expands_to_concrete_verbs() {
        let verbs = HttpVerb::All.expand();
        assert_eq!(verbs.len(), 8);
        assert!(!verbs.contains(&HttpVerb::All));
        assert_eq!(HttpVerb::Post.expand(), vec![HttpVerb::Post]);
    }

    #[test]
    fn to_method() {
        assert_eq!(HttpVerb::Patch.to_method(), Some(http::Method::PATCH));
        assert_eq!(HttpVerb::All.to_method(), None);
        assert_eq!(HttpVerb::try_from(&http::Method::HEAD).unwrap(), HttpVerb::Head);
    }
}
