//! Admin gate.

use salvo::prelude::*;

use crate::extensions::*;

/// Reject callers without the admin role. Must run after the auth middleware.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.principal_or_401() {
        Ok(principal) if principal.is_admin() => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(principal) => {
            tracing::warn!(user_uuid = %principal.user_uuid, "admin route refused");

            res.render(StatusError::forbidden().brief("Admin access required"));
        }
        Err(error) => res.render(error),
    }
}
