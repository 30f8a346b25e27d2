//! Session lifecycle: sign in, sign out, restore on startup, and who is
//! signed in.

use crate::client::{RefreshTrigger, SessionClient};
use crate::error::{ClientError, ClientResult, RefreshError};
use crate::request::RequestSpec;
use digital_eval_core::{AccessClaims, CurrentUser, LoginRequest, LoginResponse, User};
use tracing::{debug, info, warn};

impl SessionClient {
    /// Sign in with a user id or email and a password.
    ///
    /// Stores the returned access token. The server sets the refresh cookie
    /// on the same response. A 401 here means bad credentials and is reported
    /// as [`ClientError::Transport`]; it never triggers a refresh.
    pub async fn login(&self, login: &str, password: &str) -> ClientResult<LoginResponse> {
        let spec = RequestSpec::post(self.config().login_path.as_str())
            .json(&LoginRequest::new(login, password))?
            .without_refresh();

        let response: LoginResponse = self.request_json(&spec).await?;
        if response.access_token.is_empty() {
            return Err(ClientError::UnexpectedResponse(
                "login response has no access token".to_string(),
            ));
        }

        self.session().set_access_token(response.access_token.clone());
        info!(
            user_id = %response.user.user_id,
            role = %response.user.role,
            "Signed in"
        );
        Ok(response)
    }

    /// Sign out.
    ///
    /// The local session is cleared whatever the server says. A 401 from the
    /// server counts as already signed out.
    pub async fn logout(&self) -> ClientResult<()> {
        let spec = RequestSpec::post(self.config().logout_path.as_str())
            .json_value(serde_json::json!({}))
            .without_refresh();

        let result = self.request(&spec).await;
        self.session().clear();

        match result {
            Ok(_) => {
                info!("Signed out");
                Ok(())
            }
            Err(ClientError::Transport { status: 401, .. }) => {
                debug!("Server session already gone");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Logout request failed; local session cleared");
                Err(err)
            }
        }
    }

    /// Restore the session on startup.
    ///
    /// A stored token that decodes and is not about to expire is used as is.
    /// Otherwise the session's refresh is run, or joined if one is already in
    /// flight. A refused refresh leaves the client signed out and returns
    /// `Ok(None)`; a refresh started here never notifies the listener. A
    /// refresh that cannot reach the server is reported as
    /// [`ClientError::Refresh`], which counts as a network error.
    pub async fn restore(&self) -> ClientResult<Option<CurrentUser>> {
        if let Some(user) = self.stored_user_if_fresh() {
            debug!(user_id = %user.user_id, "Restored session from stored token");
            return Ok(Some(user));
        }

        self.config().refresh_url()?;
        let result = match self.run_refresh(RefreshTrigger::Restore).await {
            Ok(result) => result,
            Err(RefreshError::Rejected { status, .. }) => {
                debug!(status, "Refresh refused, starting signed out");
                return Ok(None);
            }
            Err(RefreshError::Decode(msg)) => return Err(ClientError::UnexpectedResponse(msg)),
            Err(err @ RefreshError::Network(_)) => return Err(ClientError::Refresh(err)),
        };

        match AccessClaims::decode(&result.access_token) {
            Ok(claims) => {
                let user = claims.to_user();
                info!(user_id = %user.user_id, "Restored session by refresh");
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "Refreshed token has unreadable claims");
                Ok(None)
            }
        }
    }

    /// The signed-in user as decoded from the stored token, without a
    /// network call.
    pub fn current_user(&self) -> ClientResult<Option<CurrentUser>> {
        match self.session().access_token() {
            Some(token) => Ok(Some(AccessClaims::decode(&token)?.to_user())),
            None => Ok(None),
        }
    }

    /// Fetch the full profile of the signed-in user.
    pub async fn me(&self) -> ClientResult<User> {
        self.get_json(self.config().me_path.as_str()).await
    }

    fn stored_user_if_fresh(&self) -> Option<CurrentUser> {
        let token = self.session().access_token()?;
        let claims = AccessClaims::decode(&token).ok()?;
        let leeway = chrono::Duration::from_std(self.config().expiry_leeway)
            .unwrap_or_else(|_| chrono::Duration::zero());
        if claims.is_expired_at(chrono::Utc::now(), leeway) {
            return None;
        }
        Some(claims.to_user())
    }
}
