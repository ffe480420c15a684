//! Security group rules
//!
//! A space has running and staging security groups with identical shapes.
//! For display both are flattened into one list of [`SecurityGroupRule`],
//! each tagged with the [`Lifecycle`] it came from.

use crate::cloudcontroller::SecurityGroup;
use serde::Serialize;
use std::fmt;

/// Which security group collection a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Running,
    Staging,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Running => f.write_str("running"),
            Lifecycle::Staging => f.write_str("staging"),
        }
    }
}

/// One rule of one group, flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityGroupRule {
    /// Name of the owning security group
    pub name: String,
    pub description: String,
    pub destination: String,
    pub lifecycle: Lifecycle,
    pub ports: String,
    pub protocol: String,
}

impl SecurityGroupRule {
    fn sort_key(&self) -> (&str, Lifecycle, &str, &str, &str, &str) {
        (
            &self.name,
            self.lifecycle,
            &self.destination,
            &self.protocol,
            &self.ports,
            &self.description,
        )
    }
}

/// Flatten the rules of one group
pub fn extract_rules(group: &SecurityGroup, lifecycle: Lifecycle) -> Vec<SecurityGroupRule> {
    group
        .rules
        .iter()
        .map(|rule| SecurityGroupRule {
            name: group.name.clone(),
            description: rule.description.clone(),
            destination: rule.destination.clone(),
            lifecycle,
            ports: rule.ports.clone(),
            protocol: rule.protocol.clone(),
        })
        .collect()
}

/// Order by group name, then lifecycle, then the rule's own fields
pub fn sort_rules(rules: &mut [SecurityGroupRule]) {
    rules.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
