//! Auth middleware.

use std::sync::Arc;

use harvest_app::domain::users::UsersServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve the bearer token to an identity, rejecting the request without one.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("No token, authorization denied"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let identity = match state.app.users.authenticate_bearer(token).await {
        Ok(identity) => identity,
        Err(UsersServiceError::Sql(source)) => {
            error!("failed to validate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
        Err(_invalid) => {
            res.render(StatusError::unauthorized().brief("Token is not valid"));
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

/// Only let administrators through. Must run after [`handler`].
#[salvo::handler]
pub(crate) async fn admin(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    match depot.identity() {
        Some(identity) if identity.is_admin() => {}
        Some(_) => {
            res.render(StatusError::forbidden().brief("Access denied: Admins only"));
            ctrl.skip_rest();
        }
        None => {
            res.render(StatusError::unauthorized().brief("No token, authorization denied"));
            ctrl.skip_rest();
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
