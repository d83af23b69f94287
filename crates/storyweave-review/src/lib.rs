//! Storyweave Review — the pull-request workflow.
//!
//! Owns the pull-request entity and its review/merge state machine, the
//! proposal validator that gates submissions, the line diff that records
//! what a proposal changes, and the handlers that drive proposals from
//! `OPEN` through review to an atomic merge into the chapter tree.

pub mod application;
pub mod domain;
pub mod repository;
