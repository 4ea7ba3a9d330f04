//! API group and kind assignment per Terraform resource.

/// Suffix appended to a short group to form the full API group
pub const ROOT_GROUP: &str = "minio.crossplane.io";

/// A field of one resource referring to another resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceReference {
    pub field: &'static str,
    pub terraform_name: &'static str,
}

/// Kubernetes identity of a managed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub terraform_name: &'static str,
    pub short_group: &'static str,
    pub kind: &'static str,
    pub references: &'static [ResourceReference],
}

impl ResourceKind {
    /// Fully qualified API group, e.g. `s3.minio.crossplane.io`
    pub fn api_group(&self) -> String {
        format!("{}.{ROOT_GROUP}", self.short_group)
    }
}

const BUCKET_REF: &[ResourceReference] = &[ResourceReference {
    field: "bucket",
    terraform_name: "minio_s3_bucket",
}];

const BUCKET_NAME_REF: &[ResourceReference] = &[ResourceReference {
    field: "bucket_name",
    terraform_name: "minio_s3_bucket",
}];

const fn kind(
    terraform_name: &'static str,
    short_group: &'static str,
    kind: &'static str,
    references: &'static [ResourceReference],
) -> ResourceKind {
    ResourceKind {
        terraform_name,
        short_group,
        kind,
        references,
    }
}

/// Every managed resource, grouped s3, iam, kms
pub static RESOURCE_KINDS: &[ResourceKind] = &[
    kind("minio_s3_bucket", "s3", "Bucket", &[]),
    kind("minio_s3_bucket_policy", "s3", "BucketPolicy", BUCKET_REF),
    kind("minio_s3_object", "s3", "Object", BUCKET_NAME_REF),
    kind("minio_s3_bucket_versioning", "s3", "BucketVersioning", BUCKET_REF),
    kind("minio_s3_bucket_notification", "s3", "BucketNotification", BUCKET_REF),
    kind("minio_iam_user", "iam", "User", &[]),
    kind("minio_iam_policy", "iam", "Policy", &[]),
    kind("minio_iam_group", "iam", "Group", &[]),
    kind("minio_iam_service_account", "iam", "ServiceAccount", &[]),
    kind("minio_kms_key", "kms", "Key", &[]),
];

/// Kind of a Terraform resource name
pub fn resource_kind(terraform_name: &str) -> Option<&'static ResourceKind> {
    RESOURCE_KINDS
        .iter()
        .find(|k| k.terraform_name == terraform_name)
}

/// Kinds served under a short group, in table order
pub fn kinds_in_group(short_group: &str) -> impl Iterator<Item = &'static ResourceKind> + '_ {
    RESOURCE_KINDS
        .iter()
        .filter(move |k| k.short_group == short_group)
}
