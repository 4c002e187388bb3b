use crate::error::CodecError;

/// Common Result type alias
pub type CommonResult<T> = Result<T, CodecError>;
