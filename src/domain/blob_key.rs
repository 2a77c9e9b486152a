use std::fmt;

use super::{ApplicantId, TenantId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobKey(String);

impl BlobKey {
    /// `{tenant}/{owner}/{unix_millis}_{sanitized_file_name}`
    pub fn new(tenant_id: &TenantId, owner_id: &ApplicantId, file_name: &str, millis: i64) -> Self {
        Self(format!(
            "{}/{}/{}_{}",
            tenant_id,
            owner_id,
            millis,
            sanitize_file_name(file_name)
        ))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
