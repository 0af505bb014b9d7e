//! Workspaces inside an organization.

use chrono::{DateTime, Utc};
use reqwest::Method;
use std::sync::Arc;

use crate::error::Result;
use crate::http::{
    ApiCore, Attributes, EncodeResource, Included, ListOptions, Payload, Resource, ResourceObject,
    segment,
};
use crate::validation::{ensure_id, require_string};

use super::organizations::Organization;

/// A workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    /// Server-assigned identifier.
    pub id: String,
    /// Name, unique inside the organization.
    pub name: String,
    /// Apply automatically after a successful plan.
    pub auto_apply: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the workspace is locked.
    pub locked: bool,
    /// Terraform version used for runs.
    pub terraform_version: String,
    /// Directory runs are executed from, relative to the configuration root.
    pub working_directory: String,
    /// Owning organization.
    pub organization: Option<Organization>,
}

impl Resource for Workspace {
    const TYPE: &'static str = "workspaces";

    fn decode(object: &ResourceObject, included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            name: object.attr("name")?,
            auto_apply: object.attr("auto-apply")?,
            created_at: object.attr_opt("created-at")?,
            locked: object.attr("locked")?,
            terraform_version: object.attr("terraform-version")?,
            working_directory: object.attr("working-directory")?,
            organization: object.related("organization", included)?,
        })
    }
}

/// Options for listing workspaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceListOptions {
    /// Pagination.
    pub page: ListOptions,
    /// Only return workspaces whose name contains this string.
    pub search: Option<String>,
}

impl WorkspaceListOptions {
    fn payload(&self) -> Payload {
        let mut pairs = self.page.query_pairs();
        if let Some(search) = &self.search {
            pairs.push((String::from("search[name]"), search.clone()));
        }
        Payload::Query(pairs)
    }
}

/// Options for creating a workspace.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceCreateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Workspace name. Required.
    pub name: Option<String>,
    /// Apply automatically after a successful plan.
    pub auto_apply: Option<bool>,
    /// Terraform version to use.
    pub terraform_version: Option<String>,
    /// Directory runs are executed from.
    pub working_directory: Option<String>,
}

impl EncodeResource for WorkspaceCreateOptions {
    const TYPE: &'static str = Workspace::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("auto-apply", self.auto_apply.as_ref())?
            .set_opt("terraform-version", self.terraform_version.as_ref())?
            .set_opt("working-directory", self.working_directory.as_ref())
    }
}

/// Options for updating a workspace. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceUpdateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// New name.
    pub name: Option<String>,
    /// Apply automatically after a successful plan.
    pub auto_apply: Option<bool>,
    /// Terraform version to use.
    pub terraform_version: Option<String>,
    /// Directory runs are executed from.
    pub working_directory: Option<String>,
}

impl EncodeResource for WorkspaceUpdateOptions {
    const TYPE: &'static str = Workspace::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("auto-apply", self.auto_apply.as_ref())?
            .set_opt("terraform-version", self.terraform_version.as_ref())?
            .set_opt("working-directory", self.working_directory.as_ref())
    }
}

/// Workspace operations.
#[derive(Debug, Clone)]
pub struct Workspaces {
    core: Arc<ApiCore>,
}

impl Workspaces {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Lists the workspaces of an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank organization, or any request
    /// error.
    pub async fn list(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        ensure_id(organization, "organization")?;

        let path = format!("organizations/{}/workspaces", segment(organization));
        self.core
            .send_many(Method::GET, &path, options.payload())
            .await
    }

    /// Creates a workspace in an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank organization or a missing name,
    /// or any request error.
    pub async fn create(
        &self,
        organization: &str,
        mut options: WorkspaceCreateOptions,
    ) -> Result<Workspace> {
        ensure_id(organization, "organization")?;
        require_string(options.name.as_deref(), "Name")?;

        // Never send a caller-provided ID.
        options.id.clear();

        let path = format!("organizations/{}/workspaces", segment(organization));
        self.core
            .send_one(Method::POST, &path, Payload::document(&options)?)
            .await
    }

    /// Reads a workspace by organization and name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn read(&self, organization: &str, workspace: &str) -> Result<Workspace> {
        let path = workspace_path(organization, workspace)?;
        self.core.send_one(Method::GET, &path, Payload::None).await
    }

    /// Updates a workspace by organization and name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn update(
        &self,
        organization: &str,
        workspace: &str,
        mut options: WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        let path = workspace_path(organization, workspace)?;

        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(Method::PATCH, &path, Payload::document(&options)?)
            .await
    }

    /// Deletes a workspace by organization and name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank identifier, or any request
    /// error.
    pub async fn delete(&self, organization: &str, workspace: &str) -> Result<()> {
        let path = workspace_path(organization, workspace)?;
        self.core.send_empty(Method::DELETE, &path, Payload::None).await
    }
}

fn workspace_path(organization: &str, workspace: &str) -> Result<String> {
    ensure_id(organization, "organization")?;
    ensure_id(workspace, "workspace")?;

    Ok(format!(
        "organizations/{}/workspaces/{}",
        segment(organization),
        segment(workspace)
    ))
}
