//! memeforge — session workflow engine for AI-generated meme token launch
//! kits.
//!
//! Walks one user session through a linear pipeline — brand identity, visual
//! assets, marketing copy — by sequencing calls to a generative provider. The
//! crate owns the workflow state machine and the provider boundary; rendering
//! and user input belong to the embedding display layer, which drives the
//! [`controller::WorkflowController`] and reads back
//! [`controller::SessionSnapshot`]s.

pub mod artifacts;
pub mod config;
pub mod controller;
pub mod error;
pub mod event_log;
pub mod gateway;
pub mod project;
pub mod prompts;
pub mod schema;
pub mod stage;

pub use artifacts::{BrandKit, ContentPackage, RoadmapStage, WebCopy};
pub use config::GeminiConfig;
pub use controller::{SessionSnapshot, WorkflowController};
pub use error::{GatewayError, WorkflowError};
pub use gateway::{AspectRatio, GeminiGateway, GenerativeGateway};
pub use project::ProjectDescriptor;
pub use stage::WorkflowStage;
