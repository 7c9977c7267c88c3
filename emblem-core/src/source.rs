use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::MetadataError;

/// Location of a value the runtime extracts for a parameter, as a list of
/// segments walked from the handler context (`request.query.page`,
/// `request.body`, `logger`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePath {
    segments: Vec<Cow<'static, str>>,
}

/// Where a single-value parameter lives in an HTTP request, using the
/// OpenAPI parameter locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl SourcePath {
    pub const REQUEST: &'static str = "request";
    pub const RESPONSE: &'static str = "response";
    pub const LOGGER: &'static str = "logger";
    pub const BODY: &'static str = "body";
    pub const QUERY: &'static str = "query";
    pub const PARAMS: &'static str = "params";
    pub const HEADERS: &'static str = "headers";
    pub const COOKIES: &'static str = "cookies";

    /// Build a path from its segments. Fails on an empty list.
    pub fn new<I, S>(segments: I) -> Result<Self, MetadataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let segments: Vec<_> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(MetadataError::EmptySourcePath);
        }
        Ok(Self { segments })
    }

    /// Path rooted at the incoming request.
    pub fn request() -> Self {
        Self {
            segments: vec![Cow::Borrowed(Self::REQUEST)],
        }
    }

    pub fn response() -> Self {
        Self {
            segments: vec![Cow::Borrowed(Self::RESPONSE)],
        }
    }

    pub fn logger() -> Self {
        Self {
            segments: vec![Cow::Borrowed(Self::LOGGER)],
        }
    }

    /// Append a segment.
    pub fn join(mut self, segment: impl Into<Cow<'static, str>>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, which is the parameter name for single-value sources.
    pub fn name(&self) -> &str {
        self.segments.last().map(|s| s.as_ref()).unwrap_or_default()
    }

    /// Replace the last segment through `f`.
    pub(crate) fn map_name(mut self, f: impl FnOnce(&str) -> String) -> Self {
        if let Some(last) = self.segments.last_mut() {
            let renamed = f(last.as_ref());
            *last = Cow::Owned(renamed);
        }
        self
    }

    /// Whether the path starts with `prefix`, segment by segment.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.segments.len()
            && self.segments.iter().zip(prefix).all(|(a, b)| a == b)
    }

    /// The OpenAPI location of a named parameter, when the path points at one
    /// (`request.<collection>.<name>`).
    pub fn location(&self) -> Option<ParamLocation> {
        if self.segments.len() != 3 || self.segments[0] != Self::REQUEST {
            return None;
        }
        match self.segments[1].as_ref() {
            Self::QUERY => Some(ParamLocation::Query),
            Self::PARAMS => Some(ParamLocation::Path),
            Self::HEADERS => Some(ParamLocation::Header),
            Self::COOKIES => Some(ParamLocation::Cookie),
            _ => None,
        }
    }

    /// Whether the path points at the request body or a part of it.
    pub fn is_body(&self) -> bool {
        self.starts_with(&[Self::REQUEST, Self::BODY])
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for SourcePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
