//! Core types for SiteForge.
//!
//! Provides the project artifact model ([`artifact::Artifact`]) with its
//! required-file contract, the classifier's [`requirements::Requirements`],
//! the [`quality::QualityReport`], and configuration loading.

pub mod artifact;
pub mod config;
pub mod quality;
pub mod requirements;

pub use artifact::{Artifact, FileContent, RequiredFile};
pub use quality::QualityReport;
pub use requirements::{Requirements, Section, WebsiteType};
