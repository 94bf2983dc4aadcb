use crate::error::WekanError;

pub type WekanResult<T> = Result<T, WekanError>;
