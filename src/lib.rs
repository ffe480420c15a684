//! cfsummary - Cloud Controller client with aggregate views
//!
//! Two layers:
//!
//! - [`cloudcontroller`] - resource clients over the paginated v2 API
//! - [`actor`] - operations composing several calls, such as the space summary
//!
//! Every operation returns a [`cloudcontroller::Warned`] value so server
//! warnings reach the caller on success and on failure.

pub mod actor;
pub mod cloudcontroller;
pub mod config;

pub use actor::{Actor, Lifecycle, SecurityGroupRule, SpaceSummary};
pub use cloudcontroller::{Client, ClientConfig, Error, Warned, Warnings};
