use derive_more::Display;
use serde::Serialize;
use std::ops::Not;

///
/// Property
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Property {
    name: String,
    kind: PropertyKind,

    #[serde(default, skip_serializing_if = "Not::not")]
    required: bool,

    #[serde(default)]
    value_generated: ValueGenerated,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value_generated: ValueGenerated::Never,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn value_generated(&self) -> ValueGenerated {
        self.value_generated
    }

    pub(crate) const fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub(crate) const fn set_value_generated(&mut self, value_generated: ValueGenerated) {
        self.value_generated = value_generated;
    }
}

///
/// PropertyKind
///
/// Scalar storage shape of a property.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum PropertyKind {
    Blob,
    Bool,
    Date,
    Decimal,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Text,
    Timestamp,
    Ulid,
}

impl PropertyKind {
    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::Nat8 | Self::Nat16 | Self::Nat32 | Self::Nat64)
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    // floats have no total order and blobs have no stable hash
    #[must_use]
    pub const fn supports_key(self) -> bool {
        !matches!(self, Self::Blob | Self::Float32 | Self::Float64)
    }
}

///
/// ValueGenerated
///
/// When the store is expected to produce a value for the property.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
pub enum ValueGenerated {
    #[default]
    Never,
    OnAdd,
}
