use salvo::Router;

pub(super) mod auth;
pub(super) mod healthcheck;
mod whoami;

#[must_use]
pub fn routes() -> Router {
    Router::with_path("app").push(whoami::routes())
}
