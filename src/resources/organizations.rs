//! Organizations.

use chrono::{DateTime, Utc};
use reqwest::Method;
use std::sync::Arc;

use crate::error::Result;
use crate::http::{
    ApiCore, Attributes, EncodeResource, Included, ListOptions, Payload, Resource, ResourceObject,
    segment,
};
use crate::validation::{ensure_id, require_string};

/// An organization. Its name doubles as its identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Identifier, equal to the name.
    pub id: String,
    /// Organization name.
    pub name: String,
    /// Admin email address.
    pub email: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Authentication policy enforced on members.
    pub collaborator_auth_policy: String,
    /// Session timeout in minutes.
    pub session_timeout: u32,
    /// Session expiration in minutes.
    pub session_remember: u32,
}

impl Resource for Organization {
    const TYPE: &'static str = "organizations";

    fn decode(object: &ResourceObject, _included: &Included<'_>) -> Result<Self> {
        let id = object.id().to_owned();
        let mut name: String = object.attr("name")?;
        if name.is_empty() {
            name.clone_from(&id);
        }

        Ok(Self {
            id,
            name,
            email: object.attr("email")?,
            created_at: object.attr_opt("created-at")?,
            collaborator_auth_policy: object.attr("collaborator-auth-policy")?,
            session_timeout: object.attr("session-timeout")?,
            session_remember: object.attr("session-remember")?,
        })
    }
}

/// Options for creating an organization.
#[derive(Debug, Clone, Default)]
pub struct OrganizationCreateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Organization name. Required.
    pub name: Option<String>,
    /// Admin email address. Required.
    pub email: Option<String>,
}

impl OrganizationCreateOptions {
    fn valid(&self) -> Result<()> {
        require_string(self.name.as_deref(), "Name")?;
        require_string(self.email.as_deref(), "Email")
    }
}

impl EncodeResource for OrganizationCreateOptions {
    const TYPE: &'static str = Organization::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("email", self.email.as_ref())
    }
}

/// Options for updating an organization. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct OrganizationUpdateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// New name.
    pub name: Option<String>,
    /// New admin email address.
    pub email: Option<String>,
    /// New session timeout in minutes.
    pub session_timeout: Option<u32>,
    /// New session expiration in minutes.
    pub session_remember: Option<u32>,
}

impl EncodeResource for OrganizationUpdateOptions {
    const TYPE: &'static str = Organization::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("email", self.email.as_ref())?
            .set_opt("session-timeout", self.session_timeout.as_ref())?
            .set_opt("session-remember", self.session_remember.as_ref())
    }
}

/// Organization operations.
#[derive(Debug, Clone)]
pub struct Organizations {
    core: Arc<ApiCore>,
}

impl Organizations {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Lists the organizations visible to the token.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Organization>> {
        self.core
            .send_many(Method::GET, "organizations", Payload::list(options))
            .await
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name or email, or any request
    /// error.
    pub async fn create(&self, mut options: OrganizationCreateOptions) -> Result<Organization> {
        options.valid()?;

        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(Method::POST, "organizations", Payload::document(&options)?)
            .await
    }

    /// Reads an organization by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or any request error.
    pub async fn read(&self, organization: &str) -> Result<Organization> {
        ensure_id(organization, "organization")?;

        let path = format!("organizations/{}", segment(organization));
        self.core.send_one(Method::GET, &path, Payload::None).await
    }

    /// Updates an organization by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or any request error.
    pub async fn update(
        &self,
        organization: &str,
        mut options: OrganizationUpdateOptions,
    ) -> Result<Organization> {
        ensure_id(organization, "organization")?;

        // Never send a caller-provided ID.
        options.id.clear();

        let path = format!("organizations/{}", segment(organization));
        self.core
            .send_one(Method::PATCH, &path, Payload::document(&options)?)
            .await
    }

    /// Deletes an organization by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or any request error.
    pub async fn delete(&self, organization: &str) -> Result<()> {
        ensure_id(organization, "organization")?;

        let path = format!("organizations/{}", segment(organization));
        self.core.send_empty(Method::DELETE, &path, Payload::None).await
    }
}
