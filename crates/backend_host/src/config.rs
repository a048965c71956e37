//! Hosted-backend endpoint configuration.

/// Default record table holding one row per published app.
pub const DEFAULT_RECORDS_TABLE: &str = "apps";

/// Default table mapping user identifiers to access roles.
pub const DEFAULT_ROLES_TABLE: &str = "user_roles";

/// Default public bucket holding uploaded package blobs.
pub const DEFAULT_PACKAGE_BUCKET: &str = "apk-files";

/// Default public bucket holding uploaded icon blobs.
pub const DEFAULT_ICON_BUCKET: &str = "app-icons";

/// Connection and naming configuration for the hosted backend project.
///
/// The base URL and publishable key identify one hosted project; table names
/// default to the catalog schema and only change for test projects. Bucket
/// names are fixed contract constants passed by blob-store callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without a trailing slash.
    pub base_url: String,
    /// Publishable API key sent with every request; authenticated calls add a
    /// bearer token on top.
    pub publishable_key: String,
    /// Record table name.
    pub records_table: String,
    /// Role table name used by the admin probe.
    pub roles_table: String,
}

impl BackendConfig {
    /// Builds a configuration for one hosted project with the default table
    /// names.
    pub fn new(base_url: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.into(),
            records_table: DEFAULT_RECORDS_TABLE.to_string(),
            roles_table: DEFAULT_ROLES_TABLE.to_string(),
        }
    }

    /// Reads the backend project from build-time environment variables.
    ///
    /// `CATALOG_BACKEND_URL` and `CATALOG_BACKEND_KEY` are captured when the
    /// crate compiles; returns `None` when either is unset so callers can
    /// fall back to a clearly-broken offline composition instead of panicking
    /// at boot.
    pub fn from_build_env() -> Option<Self> {
        let base_url = option_env!("CATALOG_BACKEND_URL")?;
        let publishable_key = option_env!("CATALOG_BACKEND_KEY")?;
        Some(Self::new(base_url, publishable_key))
    }

    /// Returns the REST endpoint for a table.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Returns the upload endpoint for an object in a bucket.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }

    /// Returns the public download URL for an object in a public bucket.
    pub fn public_object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{key}", self.base_url)
    }

    /// Returns the auth endpoint for a grant or action such as
    /// `token?grant_type=password` or `logout`.
    pub fn auth_url(&self, action: &str) -> String {
        format!("{}/auth/v1/{action}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_trims_trailing_slash_and_builds_endpoints() {
        let config = BackendConfig::new("https://project.example.co/", "pk-test");
        assert_eq!(config.base_url, "https://project.example.co");
        assert_eq!(
            config.rest_url(&config.records_table),
            "https://project.example.co/rest/v1/apps"
        );
        assert_eq!(
            config.object_url("apk-files", "123-abc-notes.apk"),
            "https://project.example.co/storage/v1/object/apk-files/123-abc-notes.apk"
        );
        assert_eq!(
            config.public_object_url("app-icons", "123-abc-icon.png"),
            "https://project.example.co/storage/v1/object/public/app-icons/123-abc-icon.png"
        );
        assert_eq!(
            config.auth_url("token?grant_type=password"),
            "https://project.example.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn config_defaults_catalog_schema_names() {
        let config = BackendConfig::new("https://project.example.co", "pk-test");
        assert_eq!(config.records_table, "apps");
        assert_eq!(config.roles_table, "user_roles");
        assert_eq!(DEFAULT_PACKAGE_BUCKET, "apk-files");
        assert_eq!(DEFAULT_ICON_BUCKET, "app-icons");
    }
}
