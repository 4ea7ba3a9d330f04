//! # Resource Catalog
//!
//! Declarative tables describing the MinIO managed resources served by the
//! provider: how each resource's external name is derived and which API group
//! and kind it is exposed under. The generic resource engine consumes these
//! tables; nothing here performs I/O.

mod external_name;
mod groups;

pub use external_name::*;
pub use groups::*;

use anyhow::Result;

/// Check that both tables describe the same set of resources.
///
/// Every grouped kind needs an external-name strategy and every strategy must
/// belong to a grouped kind, otherwise the engine would serve a kind it cannot
/// name (or name a kind it never serves).
pub fn validate_catalog() -> Result<()> {
    let missing_strategy: Vec<&str> = RESOURCE_KINDS
        .iter()
        .map(|kind| kind.terraform_name)
        .filter(|name| external_name_for(name).is_none())
        .collect();
    if !missing_strategy.is_empty() {
        anyhow::bail!(
            "resources without an external-name strategy: {}",
            missing_strategy.join(", ")
        );
    }

    let missing_kind: Vec<&str> = EXTERNAL_NAME_CONFIGS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| resource_kind(name).is_none())
        .collect();
    if !missing_kind.is_empty() {
        anyhow::bail!(
            "external-name strategies without a resource kind: {}",
            missing_kind.join(", ")
        );
    }

    for kind in RESOURCE_KINDS {
        for reference in kind.references {
            if resource_kind(reference.terraform_name).is_none() {
                anyhow::bail!(
                    "{} field {} references unknown resource {}",
                    kind.terraform_name,
                    reference.field,
                    reference.terraform_name
                );
            }
        }
    }

    Ok(())
}
