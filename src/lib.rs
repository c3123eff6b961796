// ============================================================================
// Panel Survey Library
// ============================================================================

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod service;
pub mod storage;
pub mod web;

pub use auth::{BcryptSecretVerifier, CredentialVerifier, InitiatorSecret, SharedSecretVerifier};
pub use config::{AppConfig, InitiatorCredential};
pub use core::{
    Distribution, Result, Settings, Submission, SurveyError, SurveyStore, ValidationError,
};
pub use service::{ResultsView, SurveyService};
pub use storage::JsonDocumentStore;
pub use web::{AppState, build_router};
