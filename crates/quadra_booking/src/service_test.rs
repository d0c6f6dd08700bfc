#[cfg(test)]
mod tests {
    use crate::logic::{BookingError, ReservationRequest, DEFAULT_COLOR};
    use crate::mock_repository::InMemoryRepository;
    use crate::service::BookingService;
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
    use quadra_db::ReservationRepository;
    use std::sync::Arc;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn request(name: &str, start: NaiveDateTime) -> ReservationRequest {
        ReservationRequest {
            id: None,
            responsible_name: name.to_string(),
            contact: "contato".to_string(),
            neighborhood: "Centro".to_string(),
            start_time: start,
            end_time: None,
            color: None,
        }
    }

    fn service() -> BookingService<InMemoryRepository> {
        BookingService::new(InMemoryRepository::new())
    }

    #[tokio::test]
    async fn test_booking_scenario() {
        let service = service();

        let a = service.create(request("A", at(6, 14, 0))).await.unwrap();
        assert_eq!(a.end_time, at(6, 15, 0));
        assert_eq!(a.color, DEFAULT_COLOR);

        let b = service.create(request("B", at(6, 14, 30))).await;
        assert!(matches!(b, Err(BookingError::Conflict(_))));

        let c = service.create(request("C", at(6, 15, 0))).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![a, c]);
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let service = service();
        let mut req = request("A", at(6, 8, 0));
        req.id = Some(999);

        let stored = service.create(req).await.unwrap();
        assert_ne!(stored.id, 999);
        assert_eq!(service.get(stored.id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_rejected_create_is_not_persisted() {
        let service = service();
        service.create(request("A", at(6, 14, 0))).await.unwrap();
        let _ = service.create(request("B", at(6, 13, 30))).await;

        assert_eq!(service.repository().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_within_own_slot_succeeds() {
        let service = service();
        let a = service.create(request("A", at(6, 14, 0))).await.unwrap();

        let mut req = request("A", at(6, 14, 30));
        req.id = Some(a.id);
        req.color = Some("#00ff00".to_string());
        let updated = service.update(a.id, req).await.unwrap();

        assert_eq!(updated.end_time, at(6, 15, 30));
        assert_eq!(service.get(a.id).await.unwrap().color, "#00ff00");
    }

    #[tokio::test]
    async fn test_update_into_other_slot_conflicts() {
        let service = service();
        let a = service.create(request("A", at(6, 14, 0))).await.unwrap();
        let b = service.create(request("B", at(6, 16, 0))).await.unwrap();

        let result = service.update(b.id, request("B", at(6, 14, 30))).await;
        assert!(matches!(result, Err(BookingError::Conflict(_))));

        // Both reservations keep their slots
        assert_eq!(service.get(a.id).await.unwrap(), a);
        assert_eq!(service.get(b.id).await.unwrap(), b);
    }

    #[tokio::test]
    async fn test_update_checks_id_and_existence() {
        let service = service();
        let a = service.create(request("A", at(6, 14, 0))).await.unwrap();

        let mut mismatched = request("A", at(6, 10, 0));
        mismatched.id = Some(a.id + 1);
        assert!(matches!(
            service.update(a.id, mismatched).await,
            Err(BookingError::IdMismatch { .. })
        ));

        assert!(matches!(
            service.update(42, request("X", at(6, 10, 0))).await,
            Err(BookingError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_set_unchanged() {
        let service = service();
        let a = service.create(request("A", at(6, 14, 0))).await.unwrap();

        assert!(matches!(service.delete(a.id + 10).await, Err(BookingError::NotFound(_))));
        assert_eq!(service.list().await.unwrap(), vec![a.clone()]);

        let removed = service.delete(a.id).await.unwrap();
        assert_eq!(removed, a);
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(service.get(a.id).await, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let service = service();
        service.repository().set_unavailable(true);

        let err = service.create(request("A", at(6, 14, 0))).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(ref e) if e.is_unavailable()));
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_creates_admit_one() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create(request(&format!("R{}", i), at(6, 14, i * 5)))
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_current_week_limit() {
        let limited = BookingService::new(InMemoryRepository::new()).with_current_week_limit(true);
        let today = Local::now().date_naive().and_hms_opt(23, 0, 0).unwrap();

        limited.create(request("Hoje", today)).await.unwrap();
        assert!(matches!(
            limited.create(request("Depois", today + Duration::days(8))).await,
            Err(BookingError::BeyondCurrentWeek)
        ));
        assert_eq!(limited.list().await.unwrap().len(), 1);

        // Off by default
        service()
            .create(request("Depois", today + Duration::days(8)))
            .await
            .unwrap();
    }
}
