//! lti-core: Core library for the LTI demo tool provider
//!
//! This crate holds the protocol side of a minimal LTI 1.1 tool:
//!
//! - **OAuth 1.0** - [`oauth::SignatureVerifier`] and [`oauth::OAuthSigner`] for
//!   HMAC-SHA1 request signing, including the body hash extension
//! - **Launches** - [`LaunchVerifier`] checks a consumer launch and extracts the
//!   outcome service URL and learner details
//! - **Sessions** - [`SessionStore`] remembers each launch under its own [`SessionId`]
//! - **Outcomes** - [`OutcomePoster`] sends `replaceResultRequest` messages back
//!   to the consumer
//!
//! # Flow
//!
//! ```text
//!  consumer ──signed POST──▶ LaunchVerifier ──▶ SessionStore
//!                                                   │
//!  learner ◀── form ◀───────────────────────────────┘
//!     │
//!     └── score ──▶ OutcomePoster ──signed XML POST──▶ consumer
//! ```

pub mod error;
pub mod launch;
pub mod markup;
pub mod oauth;
pub mod outcome;
pub mod session;

pub use error::{Error, Result};
pub use launch::{LaunchError, LaunchParams, LaunchVerifier};
pub use oauth::{OAuthConfig, OAuthSigner, SignatureError, SignatureVerifier, ToolCredentials};
pub use outcome::{
    OutcomeError, OutcomePoster, PostedOutcome, ReplaceResultRequest, ScoreSubmission,
    SubmissionError,
};
pub use session::{LaunchSession, SessionId, SessionStore};
