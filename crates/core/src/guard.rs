//! Route authorization
//!
//! [`authorize`] is the only place that decides whether a route may render
//! for the current auth status.

use crate::auth::AuthStatus;
use crate::routes::{FlatRoute, RouteTable, RouteTarget, paths};
use tracing::debug;

/// Outcome of a guard check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Status not determined yet; show a placeholder and check again later
    Loading,
    Redirect(&'static str),
}

/// Decide what to do with a matched route (or `None` for an unmatched path)
pub fn authorize(route: Option<&FlatRoute>, status: AuthStatus) -> GuardDecision {
    let Some(route) = route else {
        return GuardDecision::Redirect(paths::PAGE_NOT_FOUND);
    };

    if route.is_protected {
        match status {
            AuthStatus::Unauthorized => {
                debug!(route = %route.template, "Protected route without session");
                return GuardDecision::Redirect(paths::LOGIN);
            }
            AuthStatus::Unknown => return GuardDecision::Loading,
            AuthStatus::Authorized => {}
        }
    }

    if route.is_on_auth_flow && status.is_authorized() && !route.is_post_auth_info {
        return GuardDecision::Redirect(paths::DASHBOARD);
    }

    match route.target {
        RouteTarget::Redirect(to) => GuardDecision::Redirect(to),
        _ => GuardDecision::Render,
    }
}

/// Resolve `path` against `table` and authorize the result
pub fn authorize_path(table: &RouteTable, path: &str, status: AuthStatus) -> GuardDecision {
    let matched = table.resolve(path);
    authorize(matched.as_ref().map(|m| m.route), status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concrete(template: &str) -> String {
        template
            .replace(":projectId", "p-1")
            .replace(":templateId", "t-1")
    }

    #[test]
    fn test_protected_routes_redirect_unauthorized_to_login() {
        let table = RouteTable::standard();
        assert!(!table.protected_templates().is_empty());

        for template in table.protected_templates() {
            let path = concrete(template);
            assert_eq!(
                authorize_path(table, &path, AuthStatus::Unauthorized),
                GuardDecision::Redirect(paths::LOGIN),
                "{path}"
            );
        }
    }

    #[test]
    fn test_protected_routes_wait_for_unknown_status() {
        let table = RouteTable::standard();
        for template in table.protected_templates() {
            assert_eq!(
                authorize_path(table, &concrete(template), AuthStatus::Unknown),
                GuardDecision::Loading
            );
        }
    }

    #[test]
    fn test_auth_flow_redirects_authorized_to_dashboard() {
        let table = RouteTable::standard();

        for template in table.auth_flow_templates() {
            let decision = authorize_path(table, template, AuthStatus::Authorized);
            if template == paths::REGISTER_SUCCESS {
                assert_eq!(decision, GuardDecision::Render);
            } else {
                assert_eq!(decision, GuardDecision::Redirect(paths::DASHBOARD), "{template}");
            }
        }
    }

    #[test]
    fn test_auth_flow_renders_for_unauthenticated_users() {
        let table = RouteTable::standard();
        for status in [AuthStatus::Unknown, AuthStatus::Unauthorized] {
            assert_eq!(
                authorize_path(table, paths::LOGIN, status),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn test_public_routes_always_render() {
        let table = RouteTable::standard();
        for status in [AuthStatus::Unknown, AuthStatus::Authorized, AuthStatus::Unauthorized] {
            for path in ["/", "/about", "/docs", "/support"] {
                assert_eq!(authorize_path(table, path, status), GuardDecision::Render);
            }
        }
    }

    #[test]
    fn test_app_redirects_after_protection_check() {
        let table = RouteTable::standard();
        assert_eq!(
            authorize_path(table, "/app", AuthStatus::Authorized),
            GuardDecision::Redirect(paths::DASHBOARD)
        );
        assert_eq!(
            authorize_path(table, "/app", AuthStatus::Unauthorized),
            GuardDecision::Redirect(paths::LOGIN)
        );
    }

    #[test]
    fn test_unmatched_path_goes_to_not_found() {
        assert_eq!(
            authorize(None, AuthStatus::Authorized),
            GuardDecision::Redirect(paths::PAGE_NOT_FOUND)
        );
        assert_eq!(
            authorize_path(RouteTable::standard(), "/missing/page", AuthStatus::Unknown),
            GuardDecision::Redirect(paths::PAGE_NOT_FOUND)
        );
    }
}
