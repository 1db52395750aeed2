//! Pairing of optional fields with their presence flags.
//!
//! Binary ticket schemas declare an optional field `X` followed by a boolean
//! `XIsSet`. Schemas may also name the flag explicitly on the descriptor.

use crate::logging::OPTIONAL_FIELDS;
use crate::schema::{FieldDescriptor, FieldKind};
use serde::{Deserialize, Serialize};

pub const PRESENCE_SUFFIX: &str = "IsSet";

/// How presence flags are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionalPolicy {
    /// Explicit annotations plus the `XIsSet` naming convention.
    #[default]
    NameConvention,
    /// Only explicit annotations pair fields.
    ExplicitOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Hidden,
    Plain,
    Optional { flag: usize },
    PresenceFlag,
}

impl FieldRole {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FieldRole::Plain | FieldRole::Optional { .. })
    }
}

/// Whether `candidate` is the conventional presence flag of `field`.
pub fn is_presence_flag_for(field: &FieldDescriptor, candidate: &FieldDescriptor) -> bool {
    candidate.kind == FieldKind::Bool
        && candidate.name.len() == field.name.len() + PRESENCE_SUFFIX.len()
        && candidate
            .name
            .strip_prefix(&*field.name)
            .is_some_and(|suffix| suffix == PRESENCE_SUFFIX)
}

fn is_unpaired(role: FieldRole) -> bool {
    matches!(role, FieldRole::Plain | FieldRole::Hidden)
}

/// Assigns a role to every field of a schema, index for index.
pub fn resolve_roles(fields: &[FieldDescriptor], policy: OptionalPolicy) -> Vec<FieldRole> {
    let mut roles: Vec<FieldRole> = fields
        .iter()
        .map(|field| {
            if field.stored {
                FieldRole::Plain
            } else {
                FieldRole::Hidden
            }
        })
        .collect();

    for (index, field) in fields.iter().enumerate() {
        let Some(flag_name) = field.presence.as_deref() else {
            continue;
        };
        if roles[index] != FieldRole::Plain {
            continue;
        }
        let flag = fields.iter().enumerate().position(|(other, candidate)| {
            other != index
                && candidate.name == flag_name
                && candidate.kind == FieldKind::Bool
                && is_unpaired(roles[other])
        });
        match flag {
            Some(flag) => {
                roles[index] = FieldRole::Optional { flag };
                roles[flag] = FieldRole::PresenceFlag;
            }
            None => tracing::warn!(
                target: OPTIONAL_FIELDS,
                field = %field.name,
                flag = flag_name,
                "presence annotation does not name an unpaired boolean field"
            ),
        }
    }

    if policy == OptionalPolicy::NameConvention {
        let mut index = 0;
        while index + 1 < fields.len() {
            let next = index + 1;
            if roles[index] == FieldRole::Plain
                && is_unpaired(roles[next])
                && is_presence_flag_for(&fields[index], &fields[next])
            {
                roles[index] = FieldRole::Optional { flag: next };
                roles[next] = FieldRole::PresenceFlag;
                tracing::trace!(
                    target: OPTIONAL_FIELDS,
                    field = %fields[index].name,
                    flag = %fields[next].name,
                    "paired optional field by name"
                );
                index += 2;
                continue;
            }
            index += 1;
        }
    }

    roles
}
