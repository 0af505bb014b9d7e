//! Resource modules, one per API area.
//!
//! Every module wraps a shared [`crate::http::ApiCore`] and exposes typed
//! async operations. Local validation runs before a request is built.

mod accounts;
mod organizations;
mod registry;
mod runs;
mod ssh_keys;
mod workspaces;

pub use accounts::{
    Account, AccountUpdateOptions, Accounts, DeliveryType, TwoFactor, TwoFactorEnableOptions,
    TwoFactorVerifyOptions,
};
pub use organizations::{
    Organization, OrganizationCreateOptions, OrganizationUpdateOptions, Organizations,
};
pub use registry::{
    ModuleCreateOptions, ModuleCreateVersionOptions, ModulePublishOptions, ModuleVcsOptions,
    Registry, RegistryModule, RegistryModuleStatus, RegistryModuleVersion,
};
pub use runs::{
    ConfigurationVersion, Run, RunActions, RunApplyOptions, RunCancelOptions, RunCreateOptions,
    RunDiscardOptions, RunListOptions, RunPermissions, RunSource, RunStatus, RunStatusTimestamps,
    Runs,
};
pub use ssh_keys::{SshKey, SshKeyCreateOptions, SshKeyListOptions, SshKeyUpdateOptions, SshKeys};
pub use workspaces::{
    Workspace, WorkspaceCreateOptions, WorkspaceListOptions, WorkspaceUpdateOptions, Workspaces,
};
