//! Column Resolver Module
//! Maps logical roles (origin, destination, mode) onto the columns a file actually has.

use crate::config::{ColumnAliases, Role};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Missing required columns: {}", format_roles(.roles))]
    MissingRequiredColumn { roles: Vec<Role> },
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Role to column mapping for one input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSchema {
    pub origin: String,
    pub destination: String,
    pub mode: Option<String>,
}

/// Resolves role columns against an ordered alias list.
pub struct ColumnResolver<'a> {
    aliases: &'a ColumnAliases,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(aliases: &'a ColumnAliases) -> Self {
        Self { aliases }
    }

    /// First alias (in alias order) present among `columns`, compared
    /// case-insensitively. Returns the column name as spelled in the file.
    pub fn pick(columns: &[String], candidates: &[String]) -> Option<String> {
        candidates.iter().find_map(|candidate| {
            columns
                .iter()
                .find(|c| c.eq_ignore_ascii_case(candidate))
                .cloned()
        })
    }

    pub fn resolve_role(&self, columns: &[String], role: Role) -> Option<String> {
        Self::pick(columns, self.aliases.for_role(role))
    }

    /// Resolve every role. Origin and destination are required.
    pub fn resolve(&self, columns: &[String]) -> Result<ResolvedSchema, ResolveError> {
        let origin = self.resolve_role(columns, Role::Origin);
        let destination = self.resolve_role(columns, Role::Destination);
        let mode = self.resolve_role(columns, Role::Mode);

        match (origin, destination) {
            (Some(origin), Some(destination)) => Ok(ResolvedSchema {
                origin,
                destination,
                mode,
            }),
            (origin, destination) => {
                let mut roles = Vec::new();
                if origin.is_none() {
                    roles.push(Role::Origin);
                }
                if destination.is_none() {
                    roles.push(Role::Destination);
                }
                Err(ResolveError::MissingRequiredColumn { roles })
            }
        }
    }
}
