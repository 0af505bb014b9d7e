//! Private module registry.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::http::{
    ApiCore, Attributes, EncodeResource, Included, Payload, Resource, ResourceObject, segment,
};
use crate::validation::{IsEmpty, ensure_id, require, require_string};

use super::organizations::Organization;

/// Setup status of a registry module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryModuleStatus {
    /// Waiting for the first ingress.
    Pending,
    /// The repository has no version tags.
    NoVersionTag,
    /// Setup failed.
    SetupFailed,
    /// Setup finished.
    SetupComplete,
    /// A status this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A module in the private registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryModule {
    /// Server-assigned identifier.
    pub id: String,
    /// Module name.
    pub name: String,
    /// Provider the module targets.
    pub provider: String,
    /// Setup status.
    pub status: RegistryModuleStatus,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Owning organization.
    pub organization: Option<Organization>,
}

impl Resource for RegistryModule {
    const TYPE: &'static str = "registry-modules";

    fn decode(object: &ResourceObject, included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            name: object.attr("name")?,
            provider: object.attr("provider")?,
            status: object.attr("status")?,
            created_at: object.attr_opt("created-at")?,
            updated_at: object.attr_opt("updated-at")?,
            organization: object.related("organization", included)?,
        })
    }
}

/// A published version of a registry module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryModuleVersion {
    /// Server-assigned identifier.
    pub id: String,
    /// Where the version came from.
    pub source: String,
    /// Upload status.
    pub status: String,
    /// Semantic version string.
    pub version: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for RegistryModuleVersion {
    const TYPE: &'static str = "registry-module-versions";

    fn decode(object: &ResourceObject, _included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            source: object.attr("source")?,
            status: object.attr("status")?,
            version: object.attr("version")?,
            created_at: object.attr_opt("created-at")?,
            updated_at: object.attr_opt("updated-at")?,
        })
    }
}

/// VCS repository a module is published from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleVcsOptions {
    /// Repository reference, e.g. `org/terraform-aws-vpc`.
    pub identifier: String,
    /// OAuth token giving access to the repository.
    #[serde(rename = "oauth-token-id")]
    pub oauth_token_id: String,
    /// Repository reference shown in the UI.
    pub display_identifier: String,
}

impl IsEmpty for ModuleVcsOptions {
    /// A repository without an identifier or OAuth token cannot be imported.
    fn is_empty(&self) -> bool {
        self.identifier.is_empty() || self.oauth_token_id.is_empty()
    }
}

/// Options for publishing a module from a VCS repository.
#[derive(Debug, Clone, Default)]
pub struct ModulePublishOptions {
    /// Source repository. Required.
    pub vcs_repo: Option<ModuleVcsOptions>,
}

impl EncodeResource for ModulePublishOptions {
    const TYPE: &'static str = RegistryModule::TYPE;

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new().set_opt("vcs-repo", self.vcs_repo.as_ref())
    }
}

/// Options for creating a module without a VCS connection.
#[derive(Debug, Clone, Default)]
pub struct ModuleCreateOptions {
    /// Module name. Required.
    pub name: Option<String>,
    /// Provider name. Required.
    pub provider: Option<String>,
}

impl ModuleCreateOptions {
    fn valid(&self) -> Result<()> {
        require_string(self.name.as_deref(), "Name")?;
        require_string(self.provider.as_deref(), "Provider")
    }
}

impl EncodeResource for ModuleCreateOptions {
    const TYPE: &'static str = RegistryModule::TYPE;

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("provider", self.provider.as_ref())
    }
}

/// Options for creating a module version.
#[derive(Debug, Clone, Default)]
pub struct ModuleCreateVersionOptions {
    /// Semantic version string. Required.
    pub version: Option<String>,
}

impl EncodeResource for ModuleCreateVersionOptions {
    const TYPE: &'static str = RegistryModuleVersion::TYPE;

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new().set_opt("version", self.version.as_ref())
    }
}

/// Registry operations.
#[derive(Debug, Clone)]
pub struct Registry {
    core: Arc<ApiCore>,
}

impl Registry {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Publishes a module from a VCS repository.
    ///
    /// # Errors
    ///
    /// Returns `VCS repo is required` without a repository or when its
    /// identifier or OAuth token is empty, or any request error.
    pub async fn publish(&self, options: &ModulePublishOptions) -> Result<RegistryModule> {
        require(options.vcs_repo.as_ref(), "VCS repo")?;

        self.core
            .send_one(Method::POST, "registry-modules", Payload::document(options)?)
            .await
    }

    /// Creates a module in an organization's registry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank organization or a missing name
    /// or provider, or any request error.
    pub async fn create_module(
        &self,
        organization: &str,
        options: &ModuleCreateOptions,
    ) -> Result<RegistryModule> {
        ensure_id(organization, "organization")?;
        options.valid()?;

        let path = format!("organizations/{}/registry-modules", segment(organization));
        self.core
            .send_one(Method::POST, &path, Payload::document(options)?)
            .await
    }

    /// Creates a new version of a module.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier or a missing version,
    /// or any request error.
    pub async fn create_module_version(
        &self,
        organization: &str,
        module: &str,
        provider: &str,
        options: &ModuleCreateVersionOptions,
    ) -> Result<RegistryModuleVersion> {
        ensure_ids(organization, module, provider)?;
        require_string(options.version.as_deref(), "Version")?;

        let path = format!(
            "registry-modules/{}/{}/{}/versions",
            segment(organization),
            segment(module),
            segment(provider)
        );
        self.core
            .send_one(Method::POST, &path, Payload::document(options)?)
            .await
    }

    /// Reads a module by organization, name and provider.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn read_module(
        &self,
        organization: &str,
        module: &str,
        provider: &str,
    ) -> Result<RegistryModule> {
        ensure_ids(organization, module, provider)?;

        let path = format!(
            "registry-modules/show/{}/{}/{}",
            segment(organization),
            segment(module),
            segment(provider)
        );
        self.core.send_one(Method::GET, &path, Payload::None).await
    }

    /// Deletes a module with every provider and version.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn delete_module(&self, organization: &str, module: &str) -> Result<()> {
        ensure_id(organization, "organization")?;
        ensure_id(module, "module")?;

        let path = format!(
            "registry-modules/actions/delete/{}/{}",
            segment(organization),
            segment(module)
        );
        self.core.send_empty(Method::POST, &path, Payload::None).await
    }

    /// Deletes one provider of a module with all its versions.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn delete_module_provider(
        &self,
        organization: &str,
        module: &str,
        provider: &str,
    ) -> Result<()> {
        ensure_ids(organization, module, provider)?;

        let path = format!(
            "registry-modules/actions/delete/{}/{}/{}",
            segment(organization),
            segment(module),
            segment(provider)
        );
        self.core.send_empty(Method::POST, &path, Payload::None).await
    }

    /// Deletes a single version of a module provider.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn delete_module_version(
        &self,
        organization: &str,
        module: &str,
        provider: &str,
        version: &str,
    ) -> Result<()> {
        ensure_ids(organization, module, provider)?;
        ensure_id(version, "version")?;

        let path = format!(
            "registry-modules/actions/delete/{}/{}/{}/{}",
            segment(organization),
            segment(module),
            segment(provider),
            segment(version)
        );
        self.core.send_empty(Method::POST, &path, Payload::None).await
    }
}

fn ensure_ids(organization: &str, module: &str, provider: &str) -> Result<()> {
    ensure_id(organization, "organization")?;
    ensure_id(module, "module")?;
    ensure_id(provider, "provider")
}
