use thiserror::Error;

#[derive(Error, Debug)]
pub enum FamilyError {
    #[error("unknown family member: {0}")]
    UnknownMember(String),
}

pub type FamilyResult<T> = Result<T, FamilyError>;
