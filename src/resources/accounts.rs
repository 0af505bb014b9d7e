//! The currently authenticated account.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::http::document::null_as_default;
use crate::http::{ApiCore, Attributes, EncodeResource, Included, Payload, Resource, ResourceObject};
use crate::validation::require_string;

/// The account behind the configured token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Server-assigned identifier.
    pub id: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Confirmed email address.
    pub email: String,
    /// Whether this is a service account.
    pub is_service_account: bool,
    /// Two-factor authentication settings.
    pub two_factor: Option<TwoFactor>,
    /// Email address awaiting confirmation.
    pub unconfirmed_email: String,
    /// Login name.
    pub username: String,
    /// Whether the account only has access to the v2 platform.
    pub v2_only: bool,
}

/// How two-factor codes are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Authenticator application.
    App,
    /// Text message.
    Sms,
    /// A value this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Two-factor authentication state of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TwoFactor {
    /// Delivery method, if configured.
    pub delivery: Option<DeliveryType>,
    /// Whether two-factor is enabled.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// URL used to provision an authenticator app.
    #[serde(deserialize_with = "null_as_default")]
    pub provisioning_url: String,
    /// Unused recovery codes.
    #[serde(deserialize_with = "null_as_default")]
    pub recovery_codes: Vec<String>,
    /// Number receiving SMS codes.
    #[serde(deserialize_with = "null_as_default")]
    pub sms_number: String,
    /// Recovery codes already consumed.
    #[serde(deserialize_with = "null_as_default")]
    pub used_recovery_codes: Vec<String>,
    /// Whether the setup was verified.
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
}

impl Resource for Account {
    const TYPE: &'static str = "users";

    fn decode(object: &ResourceObject, _included: &Included<'_>) -> Result<Self> {
        Ok(Self {
            id: object.id().to_owned(),
            avatar_url: object.attr("avatar-url")?,
            email: object.attr("email")?,
            is_service_account: object.attr("is-service-account")?,
            two_factor: object.attr_opt("two-factor")?,
            unconfirmed_email: object.attr("unconfirmed-email")?,
            username: object.attr("username")?,
            v2_only: object.attr("v2-only")?,
        })
    }
}

/// Options for updating the account. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdateOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// New username.
    pub username: Option<String>,
    /// New email address; takes effect once confirmed.
    pub email: Option<String>,
}

impl EncodeResource for AccountUpdateOptions {
    const TYPE: &'static str = Account::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("username", self.username.as_ref())?
            .set_opt("email", self.email.as_ref())
    }
}

/// Options for enabling two-factor authentication.
#[derive(Debug, Clone, Default)]
pub struct TwoFactorEnableOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Preferred delivery method. Required.
    pub delivery: Option<DeliveryType>,
    /// Number to text codes to, for SMS delivery.
    pub sms_number: Option<String>,
}

impl EncodeResource for TwoFactorEnableOptions {
    const TYPE: &'static str = Account::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new()
            .set_opt("delivery", self.delivery.as_ref())?
            .set_opt("sms-number", self.sms_number.as_ref())
    }
}

/// Options for verifying two-factor authentication.
#[derive(Debug, Clone, Default)]
pub struct TwoFactorVerifyOptions {
    /// For internal use only; cleared before the request is sent.
    pub id: String,
    /// Code received by SMS or from the authenticator app. Required.
    pub code: Option<String>,
}

impl EncodeResource for TwoFactorVerifyOptions {
    const TYPE: &'static str = Account::TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> Result<Attributes> {
        Attributes::new().set_opt("code", self.code.as_ref())
    }
}

/// Account operations.
#[derive(Debug, Clone)]
pub struct Accounts {
    core: Arc<ApiCore>,
}

impl Accounts {
    /// Creates the module on top of a shared core.
    #[must_use]
    pub const fn new(core: Arc<ApiCore>) -> Self {
        Self { core }
    }

    /// Reads the details of the currently authenticated user.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn read(&self) -> Result<Account> {
        self.core
            .send_one(Method::GET, "account/details", Payload::None)
            .await
    }

    /// Updates attributes of the currently authenticated user.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn update(&self, mut options: AccountUpdateOptions) -> Result<Account> {
        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(Method::PATCH, "account/update", Payload::document(&options)?)
            .await
    }

    /// Enables two-factor authentication.
    ///
    /// # Errors
    ///
    /// Returns `Delivery is required` when no delivery method is set,
    /// `Invalid value for Delivery` for [`DeliveryType::Unknown`], or any
    /// request error.
    pub async fn enable_two_factor(&self, mut options: TwoFactorEnableOptions) -> Result<Account> {
        match options.delivery {
            None => return Err(ValidationError::Required { field: "Delivery" }.into()),
            Some(DeliveryType::Unknown) => {
                return Err(ValidationError::InvalidValue { field: "Delivery" }.into());
            }
            Some(DeliveryType::App | DeliveryType::Sms) => {}
        }

        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(
                Method::POST,
                "account/actions/two-factor-enable",
                Payload::document(&options)?,
            )
            .await
    }

    /// Disables two-factor authentication.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn disable_two_factor(&self) -> Result<Account> {
        self.core
            .send_one(Method::POST, "account/actions/two-factor-disable", Payload::None)
            .await
    }

    /// Verifies two-factor authentication with a received code.
    ///
    /// # Errors
    ///
    /// Returns `Code is required` when the code is missing or empty, or any
    /// request error.
    pub async fn verify_two_factor(&self, mut options: TwoFactorVerifyOptions) -> Result<Account> {
        require_string(options.code.as_deref(), "Code")?;

        // Never send a caller-provided ID.
        options.id.clear();

        self.core
            .send_one(
                Method::POST,
                "account/actions/two-factor-verify",
                Payload::document(&options)?,
            )
            .await
    }

    /// Resends the two-factor verification code.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn resend_verification_code(&self) -> Result<()> {
        self.core
            .send_empty(
                Method::POST,
                "account/actions/two-factor-resend-verification-code",
                Payload::None,
            )
            .await
    }
}
