//! Data models for NFS-e extraction.

pub mod config;
pub mod record;
