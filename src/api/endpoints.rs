//! Backend endpoint paths, kept in one place so feature clients never build
//! them by hand. Identifiers are appended as encoded path segments by the
//! client.

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_CREATE_USER: &str = "/api/auth/user";
pub const AUTH_PROFILE: &str = "/api/auth/profile";
pub const AUTH_REQUEST_PASSWORD_RESET: &str = "/api/auth/request-password-reset";
pub const AUTH_RESET_PASSWORD: &str = "/api/auth/reset-password";

pub const ADMIN_USERS: &str = "/api/admin/users";
