/*
 * lib.rs
 * Copyright (c) 2025 Letterpress Contributors
 */

//! Template storage seam, compiled-template cache and rendering service for
//! Letterpress.
//!
//! This crate wraps the pure engine from `letterpress-template` with the
//! stateful pieces a multi-threaded serving process needs:
//!
//! - [`TemplateCache`]: concurrency-safe compiled-template cache with
//!   at-most-one-compilation-per-key and explicit invalidation
//! - [`TemplateStore`] / [`TemplateRepository`]: the persistence seam, with an
//!   in-memory implementation
//! - [`resolver`]: `template_*` parameter expansion (embedding one stored
//!   template's raw content into another's render parameters)
//! - [`validator`]: required-parameter enforcement against the stored schema
//! - [`TemplateService`]: the façade tying it all together, owning cache
//!   invalidation on content update, delete and rename
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use letterpress_service::{CreateTemplateRequest, MemoryStore, TemplateService};
//!
//! let service = TemplateService::with_defaults(Arc::new(MemoryStore::new()));
//! service
//!     .create_template(CreateTemplateRequest {
//!         template_id: "welcome".to_string(),
//!         name: "Welcome mail".to_string(),
//!         content: "Hello, {{name}}!".to_string(),
//!         ..CreateTemplateRequest::default()
//!     })
//!     .unwrap();
//!
//! let params = serde_json::json!({"name": "World"});
//! let html = service
//!     .render("welcome", None, params.as_object().cloned().unwrap())
//!     .unwrap();
//! assert_eq!(html, "Hello, World!");
//! ```

pub mod cache;
pub mod config;
pub mod definition;
pub mod error;
pub mod resolver;
pub mod service;
pub mod store;
pub mod validator;

// Re-export main types at crate root
pub use cache::{CacheKey, TemplateCache};
pub use config::{ServiceConfig, DEFAULT_LANGUAGE};
pub use definition::{
    CreateTemplateRequest, TemplateDefinition, TemplateMetadata, UpdateTemplateRequest,
};
pub use error::{ServiceError, ServiceResult};
pub use resolver::{resolve_params, TEMPLATE_REF_PREFIX};
pub use service::TemplateService;
pub use store::{MemoryStore, TemplateRepository, TemplateStore};
pub use validator::check_required_params;
