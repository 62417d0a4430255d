use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{
    spotify,
    types::{AuthContext, AuthOutcome},
};

/// OAuth callback handler.
///
/// Entered when the authorization server redirects back after the user
/// grants or denies access. The `handled` flag gates entry: a second
/// delivery of the callback (UI re-render, browser refresh) returns
/// immediately without a network call and cannot disturb the recorded
/// outcome or consume the authorization code twice.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(ctx): Extension<Arc<AuthContext>>,
) -> Html<&'static str> {
    let mut state = ctx.state.lock().await;
    if state.handled {
        return Html("<h4>Login already handled. You can close this browser window.</h4>");
    }
    state.handled = true;

    match spotify::auth::complete_login(&params, ctx.store.as_ref()).await {
        Ok(token) => {
            state.outcome = Some(AuthOutcome::Success(token));
            Html("<h2>Authentication successful.</h2><p>You can close this browser window.</p>")
        }
        Err(failure) => {
            state.outcome = Some(AuthOutcome::Failure(failure));
            Html("<h4>Login failed. Return to the terminal for details.</h4>")
        }
    }
}
