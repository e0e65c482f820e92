//! Rule sets for API request types
//!
//! Each domain object has a creation rule set (every field required) and an
//! update rule set derived from it (every field optional, same constraints).
//! Sets that carry a date range declare the dates and their ordering first,
//! so an inverted range is reported no matter what else is wrong.

use once_cell::sync::Lazy;
use shared::models::{
    BookingStatus, CreateBookingRequest, CreatePackageRequest, CreateTourRequest, Difficulty,
    TourCategory, UpdateBookingRequest, UpdateBookingStatusRequest, UpdatePackageRequest,
    UpdateTourRequest,
};

use super::extractors::Validatable;
use super::rules::{Check, FieldRule, RuleSet};

// ─────────────────────────────────────────────────────────────────────────────
// Packages
// ─────────────────────────────────────────────────────────────────────────────

pub static PACKAGE_CREATE: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("package.create")
        .rule(FieldRule::required("startDate", "Start date", Check::Date))
        .rule(FieldRule::required("endDate", "End date", Check::Date))
        .rule(FieldRule::date_order(
            "startDate",
            "Start date",
            "endDate",
            "End date",
        ))
        .rule(FieldRule::required("name", "Package name", Check::String))
        .rule(FieldRule::required("description", "Description", Check::String))
        .rule(FieldRule::required("price", "Price", Check::PositiveNumber))
        .rule(FieldRule::required("duration", "Duration", Check::PositiveNumber))
        .rule(FieldRule::required("destination", "Destination", Check::String))
        .rule(FieldRule::required(
            "inclusions",
            "Inclusions",
            Check::StringArray { allow_empty: false },
        ))
        .rule(FieldRule::required(
            "exclusions",
            "Exclusions",
            Check::StringArray { allow_empty: true },
        ))
        .rule(FieldRule::required(
            "itinerary",
            "Itinerary",
            Check::ObjectArray {
                allow_empty: false,
                trim_field: "description",
                count_field: Some("day"),
            },
        ))
        .rule(FieldRule::required(
            "maxPeople",
            "Max people",
            Check::Count { min: 1 },
        ))
});

pub static PACKAGE_UPDATE: Lazy<RuleSet> = Lazy::new(|| PACKAGE_CREATE.to_update("package.update"));

// ─────────────────────────────────────────────────────────────────────────────
// Tour listings
// ─────────────────────────────────────────────────────────────────────────────

pub static TOUR_CREATE: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("tour.create")
        .rule(FieldRule::required("startDate", "Start date", Check::Date))
        .rule(FieldRule::required("endDate", "End date", Check::Date))
        .rule(FieldRule::date_order(
            "startDate",
            "Start date",
            "endDate",
            "End date",
        ))
        .rule(FieldRule::required("title", "Title", Check::String))
        .rule(FieldRule::required("description", "Description", Check::String))
        .rule(FieldRule::required("location", "Location", Check::String))
        .rule(FieldRule::required(
            "category",
            "Category",
            Check::OneOf(&TourCategory::ALL),
        ))
        .rule(FieldRule::required(
            "difficulty",
            "Difficulty",
            Check::OneOf(&Difficulty::ALL),
        ))
        .rule(FieldRule::required("price", "Price", Check::PositiveNumber))
        .rule(FieldRule::required("duration", "Duration", Check::PositiveNumber))
        .rule(FieldRule::required(
            "maxGroupSize",
            "Max group size",
            Check::Count { min: 1 },
        ))
        .rule(FieldRule::required(
            "highlights",
            "Highlights",
            Check::StringArray { allow_empty: false },
        ))
        .rule(FieldRule::optional(
            "itinerary",
            "Itinerary",
            Check::ObjectArray {
                allow_empty: true,
                trim_field: "activity",
                count_field: Some("day"),
            },
        ))
});

pub static TOUR_UPDATE: Lazy<RuleSet> = Lazy::new(|| TOUR_CREATE.to_update("tour.update"));

// ─────────────────────────────────────────────────────────────────────────────
// Bookings
// ─────────────────────────────────────────────────────────────────────────────

pub static BOOKING_CREATE: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("booking.create")
        .rule(FieldRule::required("travelDate", "Travel date", Check::Date))
        .rule(FieldRule::required("packageId", "Package ID", Check::String))
        .rule(FieldRule::required("customerName", "Customer name", Check::String))
        .rule(FieldRule::required("customerEmail", "Customer email", Check::Email))
        .rule(FieldRule::required("customerPhone", "Customer phone", Check::String))
        .rule(FieldRule::required(
            "numberOfPeople",
            "Number of people",
            Check::Count { min: 1 },
        ))
        .rule(FieldRule::required("totalPrice", "Total price", Check::PositiveNumber))
        .rule(FieldRule::optional(
            "specialRequests",
            "Special requests",
            Check::String,
        ))
});

pub static BOOKING_UPDATE: Lazy<RuleSet> = Lazy::new(|| BOOKING_CREATE.to_update("booking.update"));

pub static BOOKING_STATUS: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("booking.status")
        .rule(FieldRule::required(
            "status",
            "Status",
            Check::OneOf(&BookingStatus::ALL),
        ))
        .rule(FieldRule::required_when(
            "cancellationReason",
            "Cancellation reason",
            "status",
            BookingStatus::Cancelled.as_str(),
            Check::String,
        ))
});

/// Every named rule set, for lookup by name
pub fn all_rule_sets() -> [&'static RuleSet; 7] {
    [
        &*PACKAGE_CREATE,
        &*PACKAGE_UPDATE,
        &*TOUR_CREATE,
        &*TOUR_UPDATE,
        &*BOOKING_CREATE,
        &*BOOKING_UPDATE,
        &*BOOKING_STATUS,
    ]
}

/// Find a rule set by its name (e.g. `package.create`)
pub fn rule_set_by_name(name: &str) -> Option<&'static RuleSet> {
    all_rule_sets().into_iter().find(|set| set.name() == name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed request bindings
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for CreatePackageRequest {
    fn rule_set() -> &'static RuleSet {
        &PACKAGE_CREATE
    }
}

impl Validatable for UpdatePackageRequest {
    fn rule_set() -> &'static RuleSet {
        &PACKAGE_UPDATE
    }
}

impl Validatable for CreateTourRequest {
    fn rule_set() -> &'static RuleSet {
        &TOUR_CREATE
    }
}

impl Validatable for UpdateTourRequest {
    fn rule_set() -> &'static RuleSet {
        &TOUR_UPDATE
    }
}

impl Validatable for CreateBookingRequest {
    fn rule_set() -> &'static RuleSet {
        &BOOKING_CREATE
    }
}

impl Validatable for UpdateBookingRequest {
    fn rule_set() -> &'static RuleSet {
        &BOOKING_UPDATE
    }
}

impl Validatable for UpdateBookingStatusRequest {
    fn rule_set() -> &'static RuleSet {
        &BOOKING_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn goa_package() -> Value {
        json!({
            "name": "  Goa Trip  ",
            "description": "Beach",
            "price": 100,
            "duration": 3,
            "destination": " Goa ",
            "inclusions": ["meals"],
            "exclusions": [],
            "itinerary": [{"day": 1, "description": " see beach "}],
            "maxPeople": 4,
            "startDate": "2025-01-01",
            "endDate": "2025-01-05"
        })
    }

    fn mountain_tour() -> Value {
        json!({
            "title": " Himalayan Trek ",
            "description": "Ten days above the clouds",
            "location": "Manali",
            "category": "mountain",
            "difficulty": "challenging",
            "price": 1200.5,
            "duration": 10,
            "maxGroupSize": 12,
            "highlights": [" Rohtang Pass ", "Solang Valley"],
            "itinerary": [{"day": 1, "activity": " acclimatise "}],
            "startDate": "2025-05-01",
            "endDate": "2025-05-10"
        })
    }

    fn booking() -> Value {
        json!({
            "packageId": " pkg-42 ",
            "customerName": " Asha Rao ",
            "customerEmail": " asha@example.com ",
            "customerPhone": "+91 98450 00000",
            "numberOfPeople": 2,
            "totalPrice": 200,
            "travelDate": "2025-03-14"
        })
    }

    #[test]
    fn test_goa_package_is_normalized() {
        let output = PACKAGE_CREATE.apply(&goa_package()).unwrap();

        assert_eq!(output["name"], "Goa Trip");
        assert_eq!(output["destination"], "Goa");
        assert_eq!(output["itinerary"][0]["description"], "see beach");
        assert_eq!(output["itinerary"][0]["day"], 1);
        assert_eq!(output["exclusions"], json!([]));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = PACKAGE_CREATE.apply(&goa_package()).unwrap();
        let twice = PACKAGE_CREATE.apply(&once).unwrap();
        assert_eq!(once, twice);

        let once = TOUR_CREATE.apply(&mountain_tour()).unwrap();
        assert_eq!(TOUR_CREATE.apply(&once).unwrap(), once);
    }

    #[test]
    fn test_inverted_dates_fail_regardless_of_other_fields() {
        let payload = json!({
            "name": "",
            "price": -1,
            "startDate": "2025-02-10",
            "endDate": "2025-02-01"
        });

        for rules in [&*PACKAGE_CREATE, &*PACKAGE_UPDATE, &*TOUR_CREATE, &*TOUR_UPDATE] {
            let err = rules.apply(&payload).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.field, "endDate");
            assert_eq!(err.message, "End date must be after Start date");
        }
    }

    #[test]
    fn test_equal_dates_fail() {
        let mut payload = goa_package();
        payload["endDate"] = json!("2025-01-01");
        assert!(PACKAGE_CREATE.apply(&payload).is_err());
    }

    #[test]
    fn test_missing_required_package_fields() {
        let fields = [
            ("name", "Package name is required"),
            ("description", "Description is required"),
            ("price", "Price is required"),
            ("duration", "Duration is required"),
            ("destination", "Destination is required"),
            ("inclusions", "Inclusions is required"),
            ("exclusions", "Exclusions is required"),
            ("itinerary", "Itinerary is required"),
            ("maxPeople", "Max people is required"),
            ("startDate", "Start date is required"),
            ("endDate", "End date is required"),
        ];

        for (field, message) in fields {
            let mut payload = goa_package();
            payload.as_object_mut().unwrap().remove(field);

            let err = PACKAGE_CREATE.apply(&payload).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.field, field);
            assert_eq!(err.message, message);
        }
    }

    #[test]
    fn test_package_constraints() {
        let mut payload = goa_package();
        payload["inclusions"] = json!([]);
        let err = PACKAGE_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.message, "Inclusions must be a non-empty array");

        let mut payload = goa_package();
        payload["maxPeople"] = json!(0);
        let err = PACKAGE_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.message, "Max people must be an integer of at least 1");

        let mut payload = goa_package();
        payload["price"] = json!("100");
        let err = PACKAGE_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.message, "Price must be a positive number");

        let mut payload = goa_package();
        payload["startDate"] = json!("soon");
        let err = PACKAGE_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.message, "Start date must be a valid date");
    }

    #[test]
    fn test_update_sets_accept_empty_and_partial_payloads() {
        for rules in [&*PACKAGE_UPDATE, &*TOUR_UPDATE, &*BOOKING_UPDATE] {
            assert_eq!(rules.apply(&json!({})).unwrap(), json!({}));
        }

        let output = PACKAGE_UPDATE.apply(&json!({"name": "  Goa  "})).unwrap();
        assert_eq!(output, json!({"name": "Goa"}));

        let err = PACKAGE_UPDATE.apply(&json!({"price": 0})).unwrap_err();
        assert_eq!(err.field, "price");
    }

    #[test]
    fn test_update_keeps_creation_constraints() {
        assert_eq!(PACKAGE_UPDATE.rules().len(), PACKAGE_CREATE.rules().len());
        let err = TOUR_UPDATE
            .apply(&json!({"category": "volcano"}))
            .unwrap_err();
        assert_eq!(
            err.message,
            "Category must be one of: adventure, beach, cultural, wildlife, mountain, city"
        );
    }

    #[test]
    fn test_tour_is_normalized() {
        let output = TOUR_CREATE.apply(&mountain_tour()).unwrap();
        assert_eq!(output["title"], "Himalayan Trek");
        assert_eq!(output["highlights"], json!(["Rohtang Pass", "Solang Valley"]));
        assert_eq!(output["itinerary"][0]["activity"], "acclimatise");
    }

    #[test]
    fn test_tour_itinerary_is_optional() {
        let mut payload = mountain_tour();
        payload.as_object_mut().unwrap().remove("itinerary");
        assert!(TOUR_CREATE.apply(&payload).is_ok());
    }

    #[test]
    fn test_booking_is_normalized() {
        let output = BOOKING_CREATE.apply(&booking()).unwrap();
        assert_eq!(output["packageId"], "pkg-42");
        assert_eq!(output["customerName"], "Asha Rao");
        assert_eq!(output["customerEmail"], "asha@example.com");
    }

    #[test]
    fn test_booking_constraints() {
        let mut payload = booking();
        payload["numberOfPeople"] = json!(0);
        let err = BOOKING_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.field, "numberOfPeople");

        let mut payload = booking();
        payload["customerEmail"] = json!("not-an-email");
        let err = BOOKING_CREATE.apply(&payload).unwrap_err();
        assert_eq!(err.message, "Customer email must be a valid email address");

        let mut payload = booking();
        payload["specialRequests"] = json!("   ");
        assert!(BOOKING_CREATE.apply(&payload).is_err());
    }

    #[test]
    fn test_cancelled_status_requires_reason() {
        let err = BOOKING_STATUS
            .apply(&json!({"status": "cancelled"}))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.field, "cancellationReason");
        assert_eq!(err.message, "Cancellation reason is required");

        assert!(BOOKING_STATUS.apply(&json!({"status": "confirmed"})).is_ok());

        let output = BOOKING_STATUS
            .apply(&json!({"status": "cancelled", "cancellationReason": " weather "}))
            .unwrap();
        assert_eq!(output["cancellationReason"], "weather");
    }

    #[test]
    fn test_status_must_be_known() {
        let err = BOOKING_STATUS.apply(&json!({"status": "refunded"})).unwrap_err();
        assert_eq!(
            err.message,
            "Status must be one of: pending, confirmed, cancelled, completed"
        );
        let err = BOOKING_STATUS.apply(&json!({})).unwrap_err();
        assert_eq!(err.message, "Status is required");
    }

    #[test]
    fn test_normalized_payloads_deserialize() {
        let output = PACKAGE_CREATE.apply(&goa_package()).unwrap();
        let req: CreatePackageRequest = serde_json::from_value(output).unwrap();
        assert_eq!(req.name, "Goa Trip");
        assert_eq!(req.max_people, 4);

        let output = TOUR_CREATE.apply(&mountain_tour()).unwrap();
        let req: CreateTourRequest = serde_json::from_value(output).unwrap();
        assert_eq!(req.category, TourCategory::Mountain);

        let output = BOOKING_CREATE.apply(&booking()).unwrap();
        let req: CreateBookingRequest = serde_json::from_value(output).unwrap();
        assert_eq!(req.number_of_people, 2);
    }

    #[test]
    fn test_padded_dates_are_trimmed() {
        let mut payload = goa_package();
        payload["startDate"] = json!(" 2025-01-01 ");
        payload["endDate"] = json!("2025-01-05 ");
        let output = PACKAGE_CREATE.apply(&payload).unwrap();
        assert_eq!(output["startDate"], "2025-01-01");
        assert_eq!(output["endDate"], "2025-01-05");

        let mut payload = mountain_tour();
        payload["startDate"] = json!("\t2025-05-01");
        let req: CreateTourRequest =
            serde_json::from_value(TOUR_CREATE.apply(&payload).unwrap()).unwrap();
        assert_eq!(req.start_date, "2025-05-01");

        let mut payload = booking();
        payload["travelDate"] = json!("  2025-03-14  ");
        let req: CreateBookingRequest =
            serde_json::from_value(BOOKING_CREATE.apply(&payload).unwrap()).unwrap();
        assert_eq!(req.travel_date, "2025-03-14");

        let output = PACKAGE_UPDATE
            .apply(&json!({"endDate": " 2025-02-01 "}))
            .unwrap();
        assert_eq!(output["endDate"], "2025-02-01");
    }

    #[test]
    fn test_rule_set_lookup() {
        for set in all_rule_sets() {
            assert_eq!(rule_set_by_name(set.name()).map(RuleSet::name), Some(set.name()));
        }
        assert!(rule_set_by_name("invoice.create").is_none());
    }
}
