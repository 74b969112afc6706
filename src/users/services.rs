use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    users::{
        dto::{CreateUserRequest, LoginRequest, PublicUser},
        repo::{DuplicateEmail, UserStore},
        repo_types::NewUser,
        validation::validate_registration,
    },
};

pub(crate) const MSG_ALL_FIELDS: &str = "All fields are required";
pub(crate) const MSG_LOGIN_FIELDS: &str = "Email and password are required";
const MSG_DUPLICATE: &str = "User with this email already exists";
const MSG_BAD_CREDENTIALS: &str = "Invalid email or password";
const MSG_ID_REQUIRED: &str = "User ID is required";
const MSG_NOT_AUTHENTICATED: &str = "User not authenticated";

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Register a user. With `strict` set the form rules run after the presence
/// check and before the duplicate check.
pub fn register(
    store: &UserStore,
    req: CreateUserRequest,
    strict: bool,
) -> Result<PublicUser, ApiError> {
    let (Some(full_name), Some(email), Some(phone), Some(password)) = (
        present(req.full_name),
        present(req.email),
        present(req.phone),
        present(req.password),
    ) else {
        warn!("registration with missing fields");
        return Err(ApiError::validation(MSG_ALL_FIELDS));
    };

    let new = NewUser {
        full_name,
        email,
        phone,
        password,
    };

    if strict {
        if let Some(first) = validate_registration(&new).into_iter().next() {
            warn!(email = %new.email, field = ?first.field, "registration failed form rules");
            return Err(ApiError::validation(first.message));
        }
    }

    match store.insert(new) {
        Ok(user) => {
            info!(
                user_id = %user.id,
                email = %user.email,
                created_at = %user.created_at,
                total = store.len(),
                "user registered"
            );
            Ok(user.into())
        }
        Err(DuplicateEmail) => {
            warn!("email already registered");
            Err(ApiError::conflict(MSG_DUPLICATE))
        }
    }
}

/// Check credentials and open a session for the matched user.
pub fn login(store: &UserStore, req: LoginRequest) -> Result<PublicUser, ApiError> {
    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        warn!("login with missing fields");
        return Err(ApiError::validation(MSG_LOGIN_FIELDS));
    };

    match store.open_session(&email, &password) {
        Some(user) => {
            info!(user_id = %user.id, sessions = store.session_count(), "user logged in");
            Ok(user.into())
        }
        None => {
            warn!(email = %email, "login rejected");
            Err(ApiError::auth(MSG_BAD_CREDENTIALS))
        }
    }
}

/// Resolve a self-reported caller id to a logged-in user id.
pub fn authenticate(store: &UserStore, caller: Option<&str>) -> Result<Uuid, ApiError> {
    let raw = caller
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::auth(MSG_ID_REQUIRED))?;

    match Uuid::parse_str(raw) {
        Ok(id) if store.has_session(&id) => Ok(id),
        _ => {
            warn!(caller = %raw, "caller has no session");
            Err(ApiError::auth(MSG_NOT_AUTHENTICATED))
        }
    }
}

/// List every user, in registration order, for an authenticated caller.
pub fn list_users(store: &UserStore, caller: Option<&str>) -> Result<Vec<PublicUser>, ApiError> {
    let caller_id = authenticate(store, caller)?;
    let users: Vec<PublicUser> = store.list().into_iter().map(PublicUser::from).collect();
    debug!(%caller_id, count = users.len(), "users listed");
    Ok(users)
}
