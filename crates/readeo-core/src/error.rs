//! Error types for `readeo-core`.

use thiserror::Error;

use crate::entity::FieldKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("field {field:?} does not belong to entity {entity:?}")]
  ForeignField {
    entity: &'static str,
    field:  &'static str,
  },

  #[error("invalid {kind} value for {param:?}: {raw:?}")]
  InvalidValue {
    param: &'static str,
    kind:  FieldKind,
    raw:   String,
  },

  #[error("no fields to write")]
  NoFields,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
