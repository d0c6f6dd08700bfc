// File: crates/quadra_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::ReservationRequest;
use quadra_common::Reservation;

#[utoipa::path(
    get,
    path = "/agendamentos",
    responses(
        (status = 200, description = "All reservations ordered by start time", body = [Reservation]),
        (status = 503, description = "Store unavailable", body = String)
    ),
    tag = "agendamentos"
)]
fn doc_list_reservations_handler() {}

#[utoipa::path(
    get,
    path = "/agendamentos/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, description = "The reservation", body = Reservation),
        (status = 404, description = "Reservation not found", body = String)
    ),
    tag = "agendamentos"
)]
fn doc_get_reservation_handler() {}

#[utoipa::path(
    post,
    path = "/agendamentos",
    request_body(content = ReservationRequest, example = json!({
        "id": 0,
        "nomeResponsavel": "Maria Souza",
        "contato": "(11) 98765-4321",
        "cidadeBairro": "Centro",
        "dataHoraInicio": "2025-01-06T14:00",
        "dataHoraFim": "2025-01-06T15:00",
        "cor": ""
    })),
    responses(
        (status = 200, description = "Stored reservation with its one-hour slot", body = Reservation,
         example = json!({
             "id": 1,
             "nomeResponsavel": "Maria Souza",
             "contato": "(11) 98765-4321",
             "cidadeBairro": "Centro",
             "dataHoraInicio": "2025-01-06T14:00:00",
             "dataHoraFim": "2025-01-06T15:00:00",
             "cor": "#3788d8"
         })
        ),
        (status = 400, description = "Malformed body or start time", body = String),
        (status = 409, description = "Slot already booked", body = String,
         example = json!("Horário indisponível: já existe um agendamento em 06/01/2025 das 14:00 às 15:00.")
        )
    ),
    tag = "agendamentos"
)]
fn doc_create_reservation_handler() {}

#[utoipa::path(
    put,
    path = "/agendamentos/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id, must match the body id when given")
    ),
    request_body = ReservationRequest,
    responses(
        (status = 204, description = "Reservation replaced"),
        (status = 400, description = "Id mismatch or malformed body", body = String),
        (status = 404, description = "Reservation not found", body = String),
        (status = 409, description = "New slot overlaps another reservation", body = String)
    ),
    tag = "agendamentos"
)]
fn doc_update_reservation_handler() {}

#[utoipa::path(
    delete,
    path = "/agendamentos/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id")
    ),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 404, description = "Reservation not found", body = String)
    ),
    tag = "agendamentos"
)]
fn doc_delete_reservation_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_reservations_handler,
        doc_get_reservation_handler,
        doc_create_reservation_handler,
        doc_update_reservation_handler,
        doc_delete_reservation_handler
    ),
    components(schemas(Reservation, ReservationRequest)),
    tags(
        (name = "agendamentos", description = "Court reservations")
    ),
    servers(
        (url = "/api", description = "Booking API")
    )
)]
pub struct BookingApiDoc;
