#[cfg(test)]
mod tests {
    use crate::logic::{
        find_conflict, normalize, normalize_color, overlaps, slot_end, ReservationRequest,
        DEFAULT_COLOR,
    };
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use quadra_common::Reservation;

    // Minute offsets within roughly one year from a fixed base date
    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn start_at(offset_minutes: i64) -> NaiveDateTime {
        base() + Duration::minutes(offset_minutes)
    }

    fn end(start: NaiveDateTime) -> NaiveDateTime {
        slot_end(start).unwrap()
    }

    fn request(start: NaiveDateTime, color: Option<String>) -> ReservationRequest {
        ReservationRequest {
            id: None,
            responsible_name: "Teste".to_string(),
            contact: String::new(),
            neighborhood: String::new(),
            start_time: start,
            end_time: None,
            color,
        }
    }

    proptest! {
        #[test]
        fn test_normalized_end_is_start_plus_one_hour(
            offset in 0..525_600i64,
            client_end in proptest::option::of("[0-9T:-]{0,20}"),
        ) {
            let start = start_at(offset);
            let mut req = request(start, None);
            req.end_time = client_end.map(serde_json::Value::String);

            let normalized = normalize(req).unwrap();
            prop_assert_eq!(normalized.end_time - normalized.start_time, Duration::hours(1));
            prop_assert_eq!(Some(normalized.end_time), slot_end(start));
        }

        #[test]
        fn test_blank_colors_get_default(spaces in "[ \t\n]{0,8}") {
            prop_assert_eq!(normalize_color(Some(spaces)), DEFAULT_COLOR);
        }

        #[test]
        fn test_non_blank_colors_are_preserved(color in "[ ]{0,2}[#a-zA-Z0-9]{1,10}[ ]{0,2}") {
            prop_assert_eq!(normalize_color(Some(color.clone())), color);
        }

        #[test]
        fn test_overlap_is_symmetric(a in 0..10_000i64, b in 0..10_000i64) {
            let (a_start, b_start) = (start_at(a), start_at(b));
            prop_assert_eq!(
                overlaps(a_start, end(a_start), b_start, end(b_start)),
                overlaps(b_start, end(b_start), a_start, end(a_start))
            );
        }

        #[test]
        fn test_one_hour_slots_overlap_iff_starts_closer_than_an_hour(
            a in 0..10_000i64,
            b in 0..10_000i64,
        ) {
            let (a_start, b_start) = (start_at(a), start_at(b));
            let expected = (a - b).abs() < 60;
            prop_assert_eq!(
                overlaps(a_start, end(a_start), b_start, end(b_start)),
                expected
            );
        }

        #[test]
        fn test_accepted_schedule_never_overlaps(
            offsets in proptest::collection::vec(0..2_000i64, 1..40),
        ) {
            // Feed candidates through the conflict check the way the service does
            let mut accepted: Vec<Reservation> = Vec::new();
            for (i, offset) in offsets.into_iter().enumerate() {
                let candidate = normalize(request(start_at(offset), None)).unwrap();
                if find_conflict(&candidate, &accepted, None).is_none() {
                    accepted.push(candidate.with_id(i as i64 + 1));
                }
            }

            for (i, a) in accepted.iter().enumerate() {
                for b in accepted.iter().skip(i + 1) {
                    prop_assert!(
                        !overlaps(a.start_time, a.end_time, b.start_time, b.end_time),
                        "{:?} overlaps {:?}", a, b
                    );
                }
            }
        }
    }
}
