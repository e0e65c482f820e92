//! Input Validation Module
//!
//! This module validates and normalizes request bodies for the tour booking
//! API before any handler runs.
//!
//! # Overview
//!
//! The validation system consists of five components:
//!
//! 1. **Rules** - `RuleSet`, an ordered list of field rules that stops at the
//!    first failure and returns a normalized copy of the payload
//! 2. **Requests** - the rule sets for packages, tours and bookings
//! 3. **Extractors** - `ValidatedJson<T>`, which runs `T`'s rule set
//! 4. **Validators** - reusable checks over untyped JSON values
//! 5. **Sanitizers** - trimming helpers that build normalized values
//!
//! # Usage
//!
//! ```ignore
//! use crate::validation::ValidatedJson;
//! use shared::CreatePackageRequest;
//!
//! pub async fn create_package(
//!     ValidatedJson(req): ValidatedJson<CreatePackageRequest>,
//! ) -> impl IntoResponse {
//!     // req.name, req.destination, ... are trimmed and validated
//! }
//! ```
//!
//! # Validation Error Response
//!
//! Only the first violated rule is reported:
//!
//! ```json
//! {
//!   "error": "ValidationError",
//!   "message": "End date must be after Start date",
//!   "field": "endDate",
//!   "code": 400,
//!   "timestamp": "2026-02-20T10:30:00Z",
//!   "correlation_id": "uuid-here"
//! }
//! ```

pub mod extractors;
pub mod requests;
pub mod rules;
pub mod sanitizers;
pub mod validators;

pub use extractors::{run_rule_set, Validatable, ValidatedJson, ValidationError};
pub use requests::{all_rule_sets, rule_set_by_name};
pub use rules::{Check, FieldRule, Presence, RuleSet};
pub use sanitizers::{trim, trim_object_field, trim_string_items, trim_value};
pub use validators::{parse_date, validate_date_order};
