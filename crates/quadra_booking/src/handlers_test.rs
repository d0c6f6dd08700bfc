#[cfg(test)]
mod tests {
    use crate::mock_repository::InMemoryRepository;
    use crate::routes::routes;
    use crate::service::BookingService;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use quadra_common::Reservation;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<BookingService<InMemoryRepository>>) {
        let service = Arc::new(BookingService::new(InMemoryRepository::new()));
        (routes(service.clone()), service)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_create_reservation_handler_normalizes() {
        let (app, _) = app();

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/agendamentos",
                json!({
                    "id": 0,
                    "nomeResponsavel": "Maria",
                    "contato": "1199999",
                    "cidadeBairro": "Centro",
                    "dataHoraInicio": "2025-01-06T14:00",
                    "dataHoraFim": "2025-01-06T17:00",
                    "cor": "  "
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let stored: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(stored["dataHoraInicio"], "2025-01-06T14:00:00");
        assert_eq!(stored["dataHoraFim"], "2025-01-06T15:00:00");
        assert_eq!(stored["cor"], "#3788d8");
        assert!(stored["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_reservation_handler_conflict_is_plain_text() {
        let (app, _) = app();
        let first = json!({ "nomeResponsavel": "A", "dataHoraInicio": "2025-01-06T14:00" });
        let second = json!({ "nomeResponsavel": "B", "dataHoraInicio": "2025-01-06T14:30" });

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/agendamentos", first))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(Method::POST, "/agendamentos", second))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(body_text(response).await.contains("14:00"));
    }

    #[tokio::test]
    async fn test_create_reservation_handler_rejects_malformed_body() {
        let (app, _) = app();

        let missing_start = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/agendamentos",
                json!({ "nomeResponsavel": "A" }),
            ))
            .await
            .unwrap();
        assert_eq!(missing_start.status(), StatusCode::BAD_REQUEST);

        let not_json = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/agendamentos")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_reservation_handler_rejects_unstorable_years() {
        let (app, service) = app();

        for start in ["+262142-12-31T23:30", "9999-12-31T23:30"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    Method::POST,
                    "/agendamentos",
                    json!({ "nomeResponsavel": "A", "dataHoraInicio": start }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", start);
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reservations_handler() {
        let (app, service) = app();
        for start in ["2025-01-06T18:00", "2025-01-06T08:00"] {
            let req = serde_json::from_value(json!({ "dataHoraInicio": start })).unwrap();
            service.create(req).await.unwrap();
        }

        let response = app
            .oneshot(empty_request(Method::GET, "/agendamentos"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed: Vec<Reservation> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].start_time < listed[1].start_time);
    }

    #[tokio::test]
    async fn test_get_reservation_handler() {
        let (app, service) = app();
        let req = serde_json::from_value(json!({ "dataHoraInicio": "2025-01-06T09:00" })).unwrap();
        let stored = service.create(req).await.unwrap();

        let found = app
            .clone()
            .oneshot(empty_request(Method::GET, &format!("/agendamentos/{}", stored.id)))
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);

        let missing = app
            .clone()
            .oneshot(empty_request(Method::GET, "/agendamentos/999"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_id = app
            .oneshot(empty_request(Method::GET, "/agendamentos/abc"))
            .await
            .unwrap();
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_reservation_handler_statuses() {
        let (app, service) = app();
        let a = service
            .create(serde_json::from_value(json!({ "dataHoraInicio": "2025-01-06T14:00" })).unwrap())
            .await
            .unwrap();
        service
            .create(serde_json::from_value(json!({ "dataHoraInicio": "2025-01-06T16:00" })).unwrap())
            .await
            .unwrap();
        let uri = format!("/agendamentos/{}", a.id);

        let moved = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &uri,
                json!({ "id": a.id, "nomeResponsavel": "A", "dataHoraInicio": "2025-01-06T14:30" }),
            ))
            .await
            .unwrap();
        assert_eq!(moved.status(), StatusCode::NO_CONTENT);

        let overlapping = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &uri,
                json!({ "id": a.id, "dataHoraInicio": "2025-01-06T15:30" }),
            ))
            .await
            .unwrap();
        assert_eq!(overlapping.status(), StatusCode::CONFLICT);

        let mismatch = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &uri,
                json!({ "id": a.id + 1, "dataHoraInicio": "2025-01-06T10:00" }),
            ))
            .await
            .unwrap();
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

        let missing = app
            .oneshot(json_request(
                Method::PUT,
                "/agendamentos/999",
                json!({ "id": 999, "dataHoraInicio": "2025-01-06T10:00" }),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_reservation_handler() {
        let (app, service) = app();
        let a = service
            .create(serde_json::from_value(json!({ "dataHoraInicio": "2025-01-06T14:00" })).unwrap())
            .await
            .unwrap();
        let uri = format!("/agendamentos/{}", a.id);

        let deleted = app
            .clone()
            .oneshot(empty_request(Method::DELETE, &uri))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = app.oneshot(empty_request(Method::DELETE, &uri)).await.unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_outage_maps_to_503() {
        let (app, service) = app();
        service.repository().set_unavailable(true);

        let response = app
            .oneshot(empty_request(Method::GET, "/agendamentos"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        // Internal details stay out of the body
        assert!(!body_text(response).await.contains("pool timed out"));
    }
}
