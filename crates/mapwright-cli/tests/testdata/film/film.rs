use super::model::{ExternalFilm, ExternalUser, InternalUser, InternalUserFilm};

/// Converts films from the partner catalogue.
///
/// +mapwright:mapper
pub trait Mapper {
    /// +mapwright:link:ef.title->title
    /// +mapwright:link:ef.runtime->runtime
    /// +mapwright:ignore:director
    /// +mapwright:linkfunc:eu->to_internal_user->user
    fn to_internal_user_film(&self, ef: &ExternalFilm, eu: &ExternalUser) -> InternalUserFilm;

    /// +mapwright:link:eu.username->username
    fn to_internal_user(&self, eu: &ExternalUser) -> InternalUser;
}
