//! External-name strategies per Terraform resource.

use regex::Regex;

/// Template rendered with the resource's external name
pub const EXTERNAL_NAME_TEMPLATE: &str = "{{ .external_name }}";

/// How the external name of a managed resource maps onto its Terraform identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalNameStrategy {
    /// The provider assigns the identifier; it is read back after creation
    IdentifierFromProvider,
    /// The `name` argument is the identifier
    NameAsIdentifier,
    /// The given argument is set from the template and used as the identifier
    TemplatedStringAsIdentifier {
        field: &'static str,
        template: &'static str,
    },
}

const fn templated(field: &'static str) -> ExternalNameStrategy {
    ExternalNameStrategy::TemplatedStringAsIdentifier {
        field,
        template: EXTERNAL_NAME_TEMPLATE,
    }
}

/// External-name configuration of every managed resource
pub static EXTERNAL_NAME_CONFIGS: &[(&str, ExternalNameStrategy)] = &[
    // bucket is named by its "bucket" argument, which the provider echoes back
    ("minio_s3_bucket", ExternalNameStrategy::IdentifierFromProvider),
    ("minio_s3_bucket_policy", templated("bucket")),
    ("minio_s3_object", templated("object_name")),
    ("minio_iam_user", ExternalNameStrategy::NameAsIdentifier),
    ("minio_iam_policy", ExternalNameStrategy::NameAsIdentifier),
    ("minio_iam_group", ExternalNameStrategy::NameAsIdentifier),
    ("minio_s3_bucket_versioning", templated("bucket")),
    ("minio_s3_bucket_notification", templated("bucket")),
    ("minio_kms_key", templated("key_id")),
    // access_key is computed by the server
    ("minio_iam_service_account", ExternalNameStrategy::IdentifierFromProvider),
];

/// External-name strategy for a Terraform resource name
pub fn external_name_for(resource: &str) -> Option<ExternalNameStrategy> {
    EXTERNAL_NAME_CONFIGS
        .iter()
        .find(|(name, _)| *name == resource)
        .map(|(_, strategy)| *strategy)
}

/// Anchored patterns of every resource with a configured external name.
///
/// The engine treats these as regular expressions, hence the trailing `$`.
pub fn external_name_configured() -> Vec<String> {
    EXTERNAL_NAME_CONFIGS
        .iter()
        .map(|(name, _)| format!("{name}$"))
        .collect()
}

/// Whether a resource name is matched by any configured pattern
pub fn is_external_name_configured(resource: &str) -> bool {
    external_name_configured().iter().any(|pattern| {
        Regex::new(pattern)
            .map(|re| re.is_match(resource))
            .unwrap_or(false)
    })
}
