//! SSH keys stored in an organization.

use reqwest::Method;
use std::sync::Arc;

use crate::error::Result;
use crate::http::{
    ApiCore, Attributes, EncodeResource, Included, ListOptions, Payload, Resource, ResourceObject,
    segment,
};
use crate::validation::{ensure_id, require_string};

/// An SSH key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshKey {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Resource for SshKey {
    const TYPE: &'static str = "ssh-keys";

    fn decode(object: &ResourceObject, _included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            name: object.attr("name")?,
        })
    }
}

/// Options for listing SSH keys.
pub type SshKeyListOptions = ListOptions;

/// Options for creating an SSH key.
#[derive(Debug, Clone, Default)]
pub struct SshKeyCreateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Display name of the key.
    pub name: Option<String>,
    /// Private key material.
    pub value: Option<String>,
}

impl SshKeyCreateOptions {
    fn valid(&self) -> Result<()> {
        require_string(self.name.as_deref(), "Name")?;
        require_string(self.value.as_deref(), "Value")
    }
}

impl EncodeResource for SshKeyCreateOptions {
    const TYPE: &'static str = SshKey::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("value", self.value.as_ref())
    }
}

/// Options for updating an SSH key. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct SshKeyUpdateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// New display name.
    pub name: Option<String>,
    /// New private key material.
    pub value: Option<String>,
}

impl EncodeResource for SshKeyUpdateOptions {
    const TYPE: &'static str = SshKey::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("name", self.name.as_ref())?
            .set_opt("value", self.value.as_ref())
    }
}

/// SSH key operations.
#[derive(Debug, Clone)]
pub struct SshKeys {
    core: Arc<ApiCore>,
}

impl SshKeys {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Lists the SSH keys of an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank organization, or any request
    /// error.
    pub async fn list(&self, organization: &str, options: &SshKeyListOptions) -> Result<Vec<SshKey>> {
        ensure_id(organization, "organization")?;

        let path = format!("organizations/{}/ssh-keys", segment(organization));
        self.core
            .send_many(Method::GET, &path, Payload::list(options))
            .await
    }

    /// Creates an SSH key in an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank organization or a missing name
    /// or value, or any request error.
    pub async fn create(&self, organization: &str, mut options: SshKeyCreateOptions) -> Result<SshKey> {
        ensure_id(organization, "organization")?;
        options.valid()?;

        // Never send a caller-provided ID.
        options.id.clear();

        let path = format!("organizations/{}/ssh-keys", segment(organization));
        self.core
            .send_one(Method::POST, &path, Payload::document(&options)?)
            .await
    }

    /// Reads an SSH key by its ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank ID, [`crate::ApiError::NotFound`]
    /// if the key does not exist, or any request error.
    pub async fn read(&self, key_id: &str) -> Result<SshKey> {
        ensure_id(key_id, "SSH key ID")?;

        let path = format!("ssh-keys/{}", segment(key_id));
        self.core.send_one(Method::GET, &path, Payload::None).await
    }

    /// Updates an SSH key by its ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank ID, or any request error.
    pub async fn update(&self, key_id: &str, mut options: SshKeyUpdateOptions) -> Result<SshKey> {
        ensure_id(key_id, "SSH key ID")?;

        // Never send a caller-provided ID.
        options.id.clear();

        let path = format!("ssh-keys/{}", segment(key_id));
        self.core
            .send_one(Method::PATCH, &path, Payload::document(&options)?)
            .await
    }

    /// Deletes an SSH key by its ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank ID, [`crate::ApiError::NotFound`]
    /// if the key does not exist, or any request error.
    pub async fn delete(&self, key_id: &str) -> Result<()> {
        ensure_id(key_id, "SSH key ID")?;

        let path = format!("ssh-keys/{}", segment(key_id));
        self.core.send_empty(Method::DELETE, &path, Payload::None).await
    }
}
