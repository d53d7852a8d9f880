//! Request-side authorization helpers.
//!
//! ## Module Organization
//!
//! - `bearer`: `Authorization: Bearer <token>` extraction
//! - `depot`: Authos API injection and authenticated-user lookups in the Salvo depot

pub mod bearer;
pub mod depot;

pub use bearer::extract_bearer_token;
pub use depot::{
    AuthosApiHandler, depot_keys, get_authos_api_from_depot, get_user_id_from_depot,
    insert_user_id,
};
