//! Mermend Core Types and Definitions
//!
//! This crate provides the foundational types for the mermend diagram
//! sanitizer. It includes:
//!
//! - **Lines**: Classified source lines ([`line`] module)
//! - **Attributes**: The entity-attribute model for ER blocks ([`attribute`] module)
//! - **Diagrams**: The diagram-kind vocabulary ([`diagram`] module)
//! - **Options**: Sanitizer tuning knobs ([`options`] module)

pub mod attribute;
pub mod diagram;
pub mod line;
pub mod options;
