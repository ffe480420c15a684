//! Cloud Controller API interaction module
//!
//! This module provides the resource clients for the Cloud Controller v2
//! API: transport, pagination, resource decoding and warning collection.
//!
//! # Module Structure
//!
//! - [`http`] - `Connection` trait and the reqwest-backed transport
//! - [`request`] - Request descriptors, routes and `q=` filters
//! - [`paginate`] - Sequential page walking over `next_url` links
//! - [`resource`] - Typed decoding of v2 resource envelopes
//! - [`warnings`] - Server advisories and the `Warned` result type
//! - [`client`] - `Client`, the entry point for resource operations
//!
//! Resource operations are grouped per resource: [`organization`],
//! [`space`], [`application`], [`service_instance`], [`space_quota`] and
//! [`security_group`].
//!
//! # Example
//!
//! ```ignore
//! use cfsummary::cloudcontroller::{Client, ClientConfig, Filter};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = Client::new(&ClientConfig::new("https://api.example.com").with_token("token"))?;
//!     let orgs = client.get_organizations(&[Filter::name("org1")]).await;
//!     for warning in &orgs.warnings {
//!         eprintln!("{warning}");
//!     }
//!     let orgs = orgs.value?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod client;
pub mod error;
pub mod http;
pub mod organization;
pub mod paginate;
pub mod request;
pub mod resource;
pub mod security_group;
pub mod service_instance;
pub mod space;
pub mod space_quota;
pub mod warnings;

pub use application::Application;
pub use client::Client;
pub use error::{format_error, Error, TransportError};
pub use http::{ClientConfig, CloudControllerConnection, Connection, Response};
pub use organization::Organization;
pub use request::{Filter, FilterField, FilterOperator, Request, Route};
pub use resource::{Resource, ResourceKind};
pub use security_group::{Rule, SecurityGroup};
pub use service_instance::ServiceInstance;
pub use space::Space;
pub use space_quota::SpaceQuota;
pub use warnings::{Warned, Warnings};
