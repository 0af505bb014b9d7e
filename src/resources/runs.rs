//! Runs: plans and applies executed in a workspace.
//!
//! The run lifecycle is driven by the server. The client reads the current
//! [`RunStatus`] and can ask for a transition with [`Runs::apply`],
//! [`Runs::cancel`] or [`Runs::discard`]; whether the transition is allowed
//! is decided remotely.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::http::document::null_as_default;
use crate::http::{
    ApiCore, Attributes, EncodeResource, Included, ListOptions, Payload, Resource,
    ResourceIdentifier, ResourceObject, segment,
};
use crate::validation::{ensure_id, require_string};

use super::workspaces::Workspace;

/// Status of a run as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Applied successfully.
    Applied,
    /// Apply in progress.
    Applying,
    /// Canceled by a user.
    Canceled,
    /// Confirmed, waiting to apply.
    Confirmed,
    /// Discarded by a user.
    Discarded,
    /// Failed.
    Errored,
    /// Queued, not started.
    Pending,
    /// Plan finished.
    Planned,
    /// Plan in progress.
    Planning,
    /// Policy checks finished.
    PolicyChecked,
    /// Policy checks in progress.
    PolicyChecking,
    /// A soft-mandatory policy failed and awaits an override.
    PolicyOverride,
    /// A status this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Applying => "applying",
            Self::Canceled => "canceled",
            Self::Confirmed => "confirmed",
            Self::Discarded => "discarded",
            Self::Errored => "errored",
            Self::Pending => "pending",
            Self::Planned => "planned",
            Self::Planning => "planning",
            Self::PolicyChecked => "policy_checked",
            Self::PolicyChecking => "policy_checking",
            Self::PolicyOverride => "policy_override",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What triggered a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunSource {
    /// Created through the API.
    #[serde(rename = "tfe-api")]
    Api,
    /// Created by uploading a configuration version.
    #[serde(rename = "tfe-configuration-version")]
    ConfigurationVersion,
    /// Queued from the web UI.
    #[serde(rename = "tfe-ui")]
    Ui,
    /// A source this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Actions currently available on a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunActions {
    /// The run can be canceled.
    #[serde(deserialize_with = "null_as_default")]
    pub is_cancelable: bool,
    /// The run can be confirmed (applied).
    #[serde(deserialize_with = "null_as_default")]
    pub is_confirmable: bool,
    /// The run can be discarded.
    #[serde(deserialize_with = "null_as_default")]
    pub is_discardable: bool,
}

/// What the current user may do with a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunPermissions {
    /// May apply.
    #[serde(deserialize_with = "null_as_default")]
    pub can_apply: bool,
    /// May cancel.
    #[serde(deserialize_with = "null_as_default")]
    pub can_cancel: bool,
    /// May discard.
    #[serde(deserialize_with = "null_as_default")]
    pub can_discard: bool,
    /// May force-execute.
    #[serde(deserialize_with = "null_as_default")]
    pub can_force_execute: bool,
}

/// Timestamps of notable status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunStatusTimestamps {
    /// When the run errored.
    pub errored_at: Option<DateTime<Utc>>,
    /// When the run finished.
    pub finished_at: Option<DateTime<Utc>>,
    /// When the run was queued.
    pub queued_at: Option<DateTime<Utc>>,
    /// When the run started.
    pub started_at: Option<DateTime<Utc>>,
}

/// A configuration version referenced by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationVersion {
    /// Server-assigned identifier.
    pub id: String,
    /// Upload status, when sideloaded.
    pub status: String,
    /// Upload source, when sideloaded.
    pub source: String,
}

impl Resource for ConfigurationVersion {
    const TYPE: &'static str = "configuration-versions";

    fn decode(object: &ResourceObject, _included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            status: object.attr("status")?,
            source: object.attr("source")?,
        })
    }
}

/// A run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// Server-assigned identifier.
    pub id: String,
    /// Available actions.
    pub actions: Option<RunActions>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the plan has changes.
    pub has_changes: bool,
    /// Whether this is a destroy plan.
    pub is_destroy: bool,
    /// Message associated with the run.
    pub message: String,
    /// Permissions of the current user.
    pub permissions: Option<RunPermissions>,
    /// What triggered the run.
    pub source: RunSource,
    /// Current status.
    pub status: RunStatus,
    /// Status change timestamps.
    pub status_timestamps: Option<RunStatusTimestamps>,
    /// Configuration version the run uses.
    pub configuration_version: Option<ConfigurationVersion>,
    /// Workspace the run belongs to.
    pub workspace: Option<Workspace>,
}

impl Resource for Run {
    const TYPE: &'static str = "runs";

    fn decode(object: &ResourceObject, included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            actions: object.attr_opt("actions")?,
            created_at: object.attr_opt("created-at")?,
            has_changes: object.attr("has-changes")?,
            is_destroy: object.attr("is-destroy")?,
            message: object.attr("message")?,
            permissions: object.attr_opt("permissions")?,
            source: object.attr("source")?,
            status: object.attr("status")?,
            status_timestamps: object.attr_opt("status-timestamps")?,
            configuration_version: object.related("configuration-version", included)?,
            workspace: object.related("workspace", included)?,
        })
    }
}

/// Options for listing runs.
pub type RunListOptions = ListOptions;

/// Options for creating a run.
#[derive(Debug, Clone, Default)]
pub struct RunCreateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Plan a destroy of every managed resource.
    pub is_destroy: Option<bool>,
    /// Message associated with the run.
    pub message: Option<String>,
    /// Configuration version to use; the workspace's latest when unset.
    pub configuration_version_id: Option<String>,
    /// Workspace to run in. Required.
    pub workspace_id: Option<String>,
}

impl EncodeResource for RunCreateOptions {
    const TYPE: &'static str = Run::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("is-destroy", self.is_destroy.as_ref())?
            .set_opt("message", self.message.as_ref())
    }

    fn relationships(&self) -> Vec<(&'static str, ResourceIdentifier)> {
        let mut relationships = Vec::new();
        if let Some(id) = &self.configuration_version_id {
            relationships.push((
                "configuration-version",
                ResourceIdentifier::new(ConfigurationVersion::TYPE, id.clone()),
            ));
        }
        if let Some(id) = &self.workspace_id {
            relationships.push(("workspace", ResourceIdentifier::new(Workspace::TYPE, id.clone())));
        }
        relationships
    }
}

/// Options for applying a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunApplyOptions {
    /// Optional comment about the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Options for canceling a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunCancelOptions {
    /// Optional explanation for the cancellation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Options for discarding a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunDiscardOptions {
    /// Optional explanation for the discard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Run operations.
#[derive(Debug, Clone)]
pub struct Runs {
    core: Arc<ApiCore>,
}

impl Runs {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Lists the runs of a workspace, newest first as ordered by the server.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank workspace ID, or any request
    /// error.
    pub async fn list(&self, workspace_id: &str, options: &RunListOptions) -> Result<Vec<Run>> {
        ensure_id(workspace_id, "workspace ID")?;

        let path = format!("workspaces/{}/runs", segment(workspace_id));
        self.core
            .send_many(Method::GET, &path, Payload::list(options))
            .await
    }

    /// Creates a run.
    ///
    /// # Errors
    ///
    /// Returns `Workspace is required` without a workspace, or any request
    /// error.
    pub async fn create(&self, mut options: RunCreateOptions) -> Result<Run> {
        require_string(options.workspace_id.as_deref(), "Workspace")?;

        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(Method::POST, "runs", Payload::document(&options)?)
            .await
    }

    /// Reads a run by its ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank run ID, or any request error.
    pub async fn read(&self, run_id: &str) -> Result<Run> {
        ensure_id(run_id, "run ID")?;

        let path = format!("runs/{}", segment(run_id));
        self.core.send_one(Method::GET, &path, Payload::None).await
    }

    /// Asks the server to apply a run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank run ID, or any request error.
    pub async fn apply(&self, run_id: &str, options: &RunApplyOptions) -> Result<()> {
        self.action(run_id, "apply", Payload::json(options)?).await
    }

    /// Asks the server to cancel a run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank run ID, or any request error.
    pub async fn cancel(&self, run_id: &str, options: &RunCancelOptions) -> Result<()> {
        self.action(run_id, "cancel", Payload::json(options)?).await
    }

    /// Asks the server to discard a run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank run ID, or any request error.
    pub async fn discard(&self, run_id: &str, options: &RunDiscardOptions) -> Result<()> {
        self.action(run_id, "discard", Payload::json(options)?).await
    }

    async fn action(&self, run_id: &str, verb: &str, payload: Payload) -> Result<()> {
        ensure_id(run_id, "run ID")?;

        let path = format!("runs/{}/actions/{verb}", segment(run_id));
        self.core.send_empty(Method::POST, &path, payload).await
    }
}
