//! Aspect model URNs and workspace paths.
//!
//! An aspect model URN has the shape `urn:samm:<namespace>:<version>#<name>`.
//! The `<namespace>:<version>` pair is what the editor calls the namespace of a
//! file and is the first half of a file's absolute name.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{Result, SammError};
use crate::model::ontology::URN_PREFIX;

/// Characters that need percent-encoding in a workspace path segment.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A parsed `urn:samm:<namespace>:<version>#<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AspectUrn {
    namespace: String,
    version: String,
    name: String,
}

impl AspectUrn {
    pub fn new(namespace: &str, version: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            version: version.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse a full URN. The name part may be empty (`urn:samm:ns:1.0.0#`).
    pub fn parse(urn: &str) -> Result<Self> {
        let invalid = || SammError::InvalidUrn(urn.to_string());
        let rest = urn.strip_prefix(URN_PREFIX).ok_or_else(invalid)?;
        let (qualified, name) = rest.split_once('#').ok_or_else(invalid)?;
        let (namespace, version) = qualified.rsplit_once(':').ok_or_else(invalid)?;
        if namespace.is_empty() || version.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(namespace, version, name))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<namespace>:<version>`, the key files are grouped by.
    pub fn namespace_key(&self) -> String {
        format!("{}:{}", self.namespace, self.version)
    }

    /// The URN prefix shared by every element of this namespace.
    pub fn namespace_urn(&self) -> String {
        namespace_urn(&self.namespace_key())
    }
}

impl fmt::Display for AspectUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{URN_PREFIX}{}:{}#{}",
            self.namespace, self.version, self.name
        )
    }
}

/// `urn:samm:<namespace_key>#`
pub fn namespace_urn(namespace_key: &str) -> String {
    format!("{URN_PREFIX}{namespace_key}#")
}

/// Recover `<namespace>:<version>` from a `urn:samm:<namespace>:<version>#` IRI.
pub fn namespace_key_of(namespace_iri: &str) -> Option<String> {
    namespace_iri
        .strip_prefix(URN_PREFIX)
        .and_then(|rest| rest.strip_suffix('#'))
        .filter(|key| key.contains(':'))
        .map(str::to_string)
}

/// The local name after `#`, if any.
pub fn local_name(urn: &str) -> Option<&str> {
    urn.rsplit_once('#')
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
}

/// Escape a string for use in a workspace path segment.
fn escape(value: &str) -> String {
    utf8_percent_encode(value, PATH_ENCODE_SET).to_string()
}

/// Location of a model file inside a workspace package: `namespace/version/file`.
pub fn workspace_path(namespace: &str, version: &str, file_name: &str) -> String {
    format!("{}/{}/{}", escape(namespace), escape(version), escape(file_name))
}
