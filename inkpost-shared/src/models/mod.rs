/// Domain records for Inkpost
///
/// Plain data types only. Persistence lives behind the repository traits
/// in [`crate::store`], which keeps the record shapes independent of any
/// particular backend.
///
/// # Models
///
/// - `user`: user accounts (credential records)
/// - `article`: articles authored by users

pub mod article;
pub mod user;
