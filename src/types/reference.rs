// ABOUTME: Repository reference parsing for pull and push requests.
// ABOUTME: Splits "registry/repo:tag" and names the registry that owns it.

use std::fmt;
use thiserror::Error;

/// Registry assumed when a repository carries no registry host.
pub const DEFAULT_REGISTRY: &str = "docker.io";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseReferenceError {
    #[error("repository cannot be empty")]
    Empty,

    #[error("invalid character in repository: {0:?}")]
    InvalidChar(char),

    #[error("digest cannot be empty")]
    EmptyDigest,
}

/// A repository with an optional tag or digest, e.g. `ghcr.io/org/app:v1`
/// or `alpine@sha256:...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageReference {
    /// Parse a repository string, splitting off an embedded tag and digest.
    ///
    /// A colon followed by a path segment belongs to a registry port
    /// (`localhost:5000/app`), not a tag.
    pub fn parse(input: &str) -> Result<Self, ParseReferenceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseReferenceError::Empty);
        }

        if let Some(c) = input
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !"/:.-_@".contains(*c))
        {
            return Err(ParseReferenceError::InvalidChar(c));
        }

        let (name, digest) = match input.split_once('@') {
            Some((_, "")) => return Err(ParseReferenceError::EmptyDigest),
            Some((name, digest)) => (name, Some(digest.to_string())),
            None => (input, None),
        };
        if name.is_empty() {
            return Err(ParseReferenceError::Empty);
        }

        let (repository, tag) = match name.rsplit_once(':') {
            Some((repository, tag)) if !tag.contains('/') => {
                (repository.to_string(), Some(tag.to_string()))
            }
            _ => (name.to_string(), None),
        };
        Ok(Self {
            repository,
            tag,
            digest,
        })
    }

    /// Take `input` as the repository unchanged, for the daemon to judge.
    pub fn verbatim(input: &str) -> Self {
        Self {
            repository: input.to_string(),
            tag: None,
            digest: None,
        }
    }

    /// Replace the tag. `None` keeps whatever tag the repository carried;
    /// a digest pins the image, so a pinned reference keeps no tag.
    pub fn with_tag(mut self, tag: Option<&str>) -> Self {
        if self.digest.is_some() {
            self.tag = None;
        } else if let Some(tag) = tag {
            self.tag = Some(tag.to_string());
        }
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// What to ask the registry for: the digest, else the tag, else `latest`.
    pub fn remote_tag(&self) -> &str {
        self.digest
            .as_deref()
            .or(self.tag.as_deref())
            .unwrap_or("latest")
    }

    /// Host of the registry that serves this repository.
    ///
    /// The first path component is a registry when it contains a dot or a
    /// port, or is `localhost`; otherwise the image lives on Docker Hub.
    pub fn registry_host(&self) -> &str {
        match self.repository.split_once('/') {
            Some((first, _))
                if first.contains('.') || first.contains(':') || first == "localhost" =>
            {
                first
            }
            _ => DEFAULT_REGISTRY,
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
