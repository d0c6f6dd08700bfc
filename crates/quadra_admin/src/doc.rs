// --- File: crates/quadra_admin/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy functions used by utoipa macros
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::logic::{
    AdminReservation, BookingStats, DeleteResponse, LoginRequest, LoginResponse,
    RemovedReservation,
};

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body(content = LoginRequest, example = json!({ "password": "minha-senha" })),
    responses(
        (status = 200, description = "Session token for the admin panel", body = LoginResponse,
         example = json!({
             "token": "MTczNjIwMDAwMA.5f2b...",
             "message": "Login realizado com sucesso",
             "expiraEm": "2025-01-06T22:00:00"
         })
        ),
        (status = 400, description = "Malformed body", body = String),
        (status = 401, description = "Wrong password or login disabled", body = String,
         example = json!("Senha inválida."))
    ),
    tag = "admin"
)]
fn doc_login_handler() {}

#[utoipa::path(
    get,
    path = "/admin/agendamentos",
    params(
        ("Authorization" = String, Header, description = "Bearer token from /admin/login", example = "Bearer MTczNjIwMDAwMA.5f2b...")
    ),
    responses(
        (status = 200, description = "All reservations sorted by start time", body = [AdminReservation]),
        (status = 401, description = "Missing, invalid or expired token", body = String)
    ),
    tag = "admin"
)]
fn doc_admin_list_handler() {}

#[utoipa::path(
    delete,
    path = "/admin/agendamentos/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id"),
        ("Authorization" = String, Header, description = "Bearer token from /admin/login")
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = DeleteResponse),
        (status = 401, description = "Missing, invalid or expired token", body = String),
        (status = 404, description = "Reservation not found", body = String)
    ),
    tag = "admin"
)]
fn doc_admin_delete_handler() {}

#[utoipa::path(
    get,
    path = "/admin/estatisticas",
    params(
        ("Authorization" = String, Header, description = "Bearer token from /admin/login")
    ),
    responses(
        (status = 200, description = "Reservation counters for the dashboard", body = BookingStats,
         example = json!({
             "totalAgendamentos": 42,
             "agendamentosSemana": 9,
             "agendamentosHoje": 2
         })
        ),
        (status = 401, description = "Missing, invalid or expired token", body = String)
    ),
    tag = "admin"
)]
fn doc_admin_stats_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_login_handler,
        doc_admin_list_handler,
        doc_admin_delete_handler,
        doc_admin_stats_handler
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        AdminReservation,
        DeleteResponse,
        RemovedReservation,
        BookingStats
    )),
    tags(
        (name = "admin", description = "Admin panel API")
    )
)]
pub struct AdminApiDoc;
