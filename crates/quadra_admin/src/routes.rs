// --- File: crates/quadra_admin/src/routes.rs ---

use crate::auth::admin_auth_middleware;
use crate::handlers::{
    admin_delete_handler, admin_list_handler, admin_stats_handler, login_handler, AdminState,
};

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use quadra_booking::BookingService;
use quadra_common::services::CredentialService;
use quadra_db::ReservationRepository;
use std::sync::Arc;

/// Creates a router containing the admin routes.
///
/// `/admin/login` is public; everything else requires a bearer token.
pub fn routes<R>(
    credentials: Arc<dyn CredentialService>,
    bookings: Arc<BookingService<R>>,
) -> Router
where
    R: ReservationRepository + 'static,
{
    let state = AdminState {
        credentials: credentials.clone(),
        bookings,
    };

    let protected = Router::new()
        .route("/admin/agendamentos", get(admin_list_handler::<R>))
        .route("/admin/agendamentos/{id}", delete(admin_delete_handler::<R>))
        .route("/admin/estatisticas", get(admin_stats_handler::<R>))
        .route_layer(middleware::from_fn_with_state(
            credentials,
            admin_auth_middleware,
        ));

    Router::new()
        .route("/admin/login", post(login_handler::<R>))
        .merge(protected)
        .with_state(state)
}
