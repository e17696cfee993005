//! Channel URI handling for the cluster log stream.
//!
//! A channel URI has the shape `scheme:media?key=value|key=value`. The
//! election rewrites the base log channel into the follower subscription
//! form and the live-log destination form.

use std::fmt;

use crate::NetworkError;
use crate::Result;

pub const ENDPOINT_PARAM_NAME: &str = "endpoint";
pub const CONTROL_PARAM_NAME: &str = "control";
pub const CONTROL_MODE_PARAM_NAME: &str = "control-mode";
pub const CONTROL_MODE_MANUAL: &str = "manual";
pub const SESSION_ID_PARAM_NAME: &str = "session-id";
pub const TAGS_PARAM_NAME: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelUri {
    scheme: String,
    media: String,
    params: Vec<(String, String)>,
}

impl ChannelUri {
    pub fn parse(uri: &str) -> Result<Self> {
        let (scheme, rest) = uri
            .split_once(':')
            .ok_or_else(|| NetworkError::InvalidUri(format!("missing scheme: {}", uri)))?;

        if scheme.is_empty() {
            return Err(NetworkError::InvalidUri(format!("empty scheme: {}", uri)).into());
        }

        let (media, query) = match rest.split_once('?') {
            Some((media, query)) => (media, Some(query)),
            None => (rest, None),
        };

        if media.is_empty() {
            return Err(NetworkError::InvalidUri(format!("empty media: {}", uri)).into());
        }

        let mut params = Vec::new();
        if let Some(query) = query {
            for pair in query.split('|') {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| NetworkError::InvalidUri(format!("malformed param '{}' in: {}", pair, uri)))?;

                if key.is_empty() {
                    return Err(NetworkError::InvalidUri(format!("empty param key in: {}", uri)).into());
                }

                params.push((key.to_string(), value.to_string()));
            }
        }

        Ok(Self {
            scheme: scheme.to_string(),
            media: media.to_string(),
            params,
        })
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the value for `key`, appending the param when absent.
    pub fn put(
        &mut self,
        key: &str,
        value: &str,
    ) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(
        &mut self,
        key: &str,
    ) {
        self.params.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for ChannelUri {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.media)?;

        for (index, (key, value)) in self.params.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '|' };
            write!(f, "{}{}={}", separator, key, value)?;
        }

        Ok(())
    }
}
