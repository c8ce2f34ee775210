//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the blob storage and webhook clients the complaint workflow talks to.

pub mod storage;
pub mod webhook;
