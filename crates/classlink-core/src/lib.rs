//! Core types and storage for classlink.
//!
//! Provides qualified class names and namespace filtering ([`names`]), the
//! persistent class-path cache ([`cache::ClassPathCache`]), the dependency
//! graph model ([`graph::DependencyGraph`]), and configuration loading.

pub mod cache;
pub mod config;
pub mod graph;
pub mod names;
