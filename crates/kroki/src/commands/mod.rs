//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod version;

pub(crate) use convert::ConvertArgs;
pub(crate) use decode::DecodeArgs;
pub(crate) use encode::EncodeArgs;
