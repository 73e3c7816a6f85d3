mod bytes;
mod decl;
mod error;
mod factory;
mod layout;
mod platform;
mod registry;
mod schema;
mod ty;
mod value;

/// Stateless scalar buffer accessors.
pub use bytes::ScalarCodec;
/// Error and result aliases.
pub use error::{ErrorCategory, Result, TyppoError};
/// Factory entry point and its limits.
pub use factory::{Factory, FactoryOptions};
/// Field placement introspection.
pub use layout::FieldLayout;
/// Target platform and native word width.
pub use platform::Platform;
/// Named type storage and resolution.
pub use registry::TypeRegistry;
/// Schema document loading.
pub use schema::{SchemaFormat, load_type_file, parse_types};
/// Schema data model.
pub use ty::{Endianness, Kind, Repr, Scalar, Slot, Type, TypeSize};
/// Typed values and wrap inputs.
pub use value::{ArrayValue, Input, ScalarValue, StructValue, UnionValue, Value};
