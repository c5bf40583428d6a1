// Code generated by mapwright from film. DO NOT EDIT.

use super::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct MapperImpl;

#[allow(unused_variables)]
impl MapperImpl {
    pub fn to_internal_user_film(&self, ef: ExternalFilm, eu: ExternalUser) -> InternalUserFilm {
        InternalUserFilm {
            title: ef.title,
            runtime: ef.runtime,
            // director: (ignored)
            user: self.to_internal_user(eu),
        }
    }

    pub fn to_internal_user(&self, eu: ExternalUser) -> InternalUser {
        InternalUser {
            username: eu.username,
        }
    }
}
