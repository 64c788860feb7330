//! Bill generation model: periods, bill items, computed rows and snapshots

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Billing period as requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillPeriod {
    /// A calendar month
    Month { year: i32, month: u32 },
    /// Explicit dates, both inclusive
    Range { from: NaiveDate, to: NaiveDate },
}

impl BillPeriod {
    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(invalid_period());
        }
        Ok(BillPeriod::Month { year, month })
    }

    pub fn range(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if from > to {
            return Err(invalid_period());
        }
        Ok(BillPeriod::Range { from, to })
    }

    /// First and last calendar day covered
    pub fn days(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            BillPeriod::Month { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                };
                let last = next.and_then(|d| d.pred_opt()).unwrap_or(first);
                (first, last)
            }
            BillPeriod::Range { from, to } => (from, to),
        }
    }

    /// Concrete instants: start of the first day to 23:59:59.999 of the last day
    pub fn window(&self) -> BillWindow {
        let (first, last) = self.days();
        let end_of_day =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        BillWindow {
            start: first.and_time(NaiveTime::MIN).and_utc(),
            end: last.and_time(end_of_day).and_utc(),
        }
    }

    /// `2024-03` for a month, `2024-03-01_to_2024-03-15` for a range
    pub fn label(&self) -> String {
        match *self {
            BillPeriod::Month { year, month } => format!("{:04}-{:02}", year, month),
            BillPeriod::Range { from, to } => format!("{}_to_{}", from, to),
        }
    }
}

fn invalid_period() -> AppError {
    AppError::Validation("invalid or missing period".to_string())
}

/// Resolved `[start, end]` instants of a billing period.
///
/// Meal records are matched on the closed interval while extra orders are
/// matched on `[start, end)`. Both ledgers have always been queried this way
/// and historical bills depend on it, so the two checks stay separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BillWindow {
    pub fn includes_meal(&self, served_at: DateTime<Utc>) -> bool {
        self.start <= served_at && served_at <= self.end
    }

    pub fn includes_extra_order(&self, ordered_at: DateTime<Utc>) -> bool {
        self.start <= ordered_at && ordered_at < self.end
    }
}

/// Ad-hoc charge applied during bill generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillItem {
    pub name: String,
    #[schema(value_type = String, example = "100")]
    pub amount: Decimal,
    /// Student ids the item applies to; `None` means every student
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_students: Option<Vec<String>>,
}

impl BillItem {
    pub fn applies_to(&self, student_id: i32) -> bool {
        match &self.selected_students {
            None => true,
            Some(ids) => {
                let id = student_id.to_string();
                ids.iter().any(|s| *s == id)
            }
        }
    }

    /// Build an item from untrusted JSON. Never fails: a bad amount counts as 0,
    /// a missing name becomes `Item {n}`, and an absent or empty selection
    /// means the item applies to everyone. A non-empty selection with no
    /// usable id selects nobody.
    pub fn from_value(position: usize, value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Item {}", position + 1));

        let amount = value.get("amount").map(parse_amount).unwrap_or(Decimal::ZERO);

        let selected_students = value
            .get("selected_students")
            .or_else(|| value.get("selectedStudents"))
            .and_then(Value::as_array)
            .filter(|ids| !ids.is_empty())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| match id {
                        Value::String(s) => Some(s.trim().to_string()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            });

        BillItem {
            name,
            amount,
            selected_students,
        }
    }
}

/// Numeric coercion for bill item amounts: JSON numbers and numeric strings
/// keep their value, everything else is 0.
pub fn parse_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| Decimal::from_str(&n.to_string()).ok())
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => parse_decimal_str(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

pub fn amount_out_of_range() -> AppError {
    AppError::Validation("amount out of range".to_string())
}

/// Sum that reports overflow instead of panicking
pub fn checked_total<I>(amounts: I) -> AppResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(amount_out_of_range)
}

/// List of bill items from untrusted JSON; anything but an array is empty
pub fn bill_items_from_value(value: Option<&Value>) -> Vec<BillItem> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| BillItem::from_value(i, v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Bill generation request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateBillRequest {
    /// Hostel to bill (defaults to the caller's own hostel)
    #[schema(value_type = Option<String>)]
    pub hostel: Option<Value>,
    /// Month form: year, as a number or a numeric string
    #[schema(value_type = Option<i32>, example = 2024)]
    pub year: Option<Value>,
    /// Month form: month (1-12), as a number or a numeric string
    #[schema(value_type = Option<u32>, example = 3)]
    pub month: Option<Value>,
    /// Range form: first day (YYYY-MM-DD)
    #[schema(value_type = Option<String>)]
    pub from_date: Option<Value>,
    /// Range form: last day (YYYY-MM-DD)
    #[schema(value_type = Option<String>)]
    pub to_date: Option<Value>,
    /// Charge per diet unit; 0 is valid
    #[schema(value_type = Option<f64>, example = 20)]
    pub diet_rate: Option<Value>,
    /// Ad-hoc charges; anything but a list is ignored
    #[schema(value_type = Option<Vec<BillItem>>)]
    pub bill_items: Option<Value>,
}

fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_date(value: &Value) -> AppResult<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(invalid_period)
}

impl GenerateBillRequest {
    /// Requested hostel name; anything but a non-blank string counts as absent
    pub fn requested_hostel(&self) -> Option<&str> {
        present(&self.hostel)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    fn period(&self) -> AppResult<BillPeriod> {
        if let (Some(year), Some(month)) = (present(&self.year), present(&self.month)) {
            let year = coerce_int(year)
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(invalid_period)?;
            let month = coerce_int(month)
                .and_then(|m| u32::try_from(m).ok())
                .ok_or_else(invalid_period)?;
            return BillPeriod::month(year, month);
        }
        match (present(&self.from_date), present(&self.to_date)) {
            (Some(from), Some(to)) => BillPeriod::range(coerce_date(from)?, coerce_date(to)?),
            _ => Err(invalid_period()),
        }
    }

    fn diet_rate(&self) -> AppResult<Decimal> {
        // Absence is checked, not falsiness: an explicit 0 is a valid rate
        let raw = self
            .diet_rate
            .as_ref()
            .ok_or_else(|| AppError::Validation("diet rate required".to_string()))?;

        let rate = match raw {
            Value::Number(_) => Some(parse_amount(raw)),
            Value::String(s) => parse_decimal_str(s),
            _ => None,
        }
        .ok_or_else(|| AppError::Validation("invalid diet rate".to_string()))?;

        if rate < Decimal::ZERO {
            return Err(AppError::Validation("invalid diet rate".to_string()));
        }
        Ok(rate)
    }
}

/// Validated input of the bill calculator
#[derive(Debug, Clone, PartialEq)]
pub struct BillRequest {
    pub hostel: String,
    pub period: BillPeriod,
    pub diet_rate: Decimal,
    pub bill_items: Vec<BillItem>,
}

impl TryFrom<GenerateBillRequest> for BillRequest {
    type Error = AppError;

    fn try_from(body: GenerateBillRequest) -> AppResult<Self> {
        let hostel = body
            .requested_hostel()
            .ok_or_else(|| AppError::Validation("hostel scope required".to_string()))?
            .to_string();
        let period = body.period()?;
        let diet_rate = body.diet_rate()?;
        let bill_items = bill_items_from_value(body.bill_items.as_ref());

        Ok(BillRequest {
            hostel,
            period,
            diet_rate,
            bill_items,
        })
    }
}

/// Summed diet count of one student over a window
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DietTally {
    pub student_id: i32,
    pub diet_count: i64,
}

/// Summed extra-order amount of one student over a window
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExtraTally {
    pub student_id: i32,
    pub extra_total: Decimal,
}

/// Charge of one bill item on one student row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemCharge {
    pub name: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
}

/// One student's line on the bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillRow {
    /// 1-based position in the roster
    pub serial: u32,
    pub student_id: i32,
    pub room_no: String,
    pub name: String,
    pub roll_no: String,
    pub diet_count: i64,
    #[schema(value_type = String)]
    pub diet_rate: Decimal,
    #[schema(value_type = String)]
    pub diet_total: Decimal,
    #[schema(value_type = String)]
    pub extra_total: Decimal,
    /// One entry per bill item, in request order
    pub item_charges: Vec<ItemCharge>,
    #[schema(value_type = String)]
    pub total: Decimal,
}

impl BillRow {
    pub fn item_subtotal(&self) -> AppResult<Decimal> {
        checked_total(self.item_charges.iter().map(|c| c.amount))
    }
}

/// Result of a bill generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedBill {
    pub hostel: String,
    pub period: BillPeriod,
    pub period_label: String,
    #[schema(value_type = String)]
    pub diet_rate: Decimal,
    pub bill_items: Vec<BillItem>,
    pub student_count: i32,
    pub rows: Vec<BillRow>,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
}

/// Snapshot data written after a generation
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillSnapshot {
    pub hostel: String,
    pub period: BillPeriod,
    pub diet_rate: Decimal,
    pub bill_items: Vec<BillItem>,
    pub student_count: i32,
    pub total_amount: Decimal,
}

impl From<&GeneratedBill> for NewBillSnapshot {
    fn from(bill: &GeneratedBill) -> Self {
        NewBillSnapshot {
            hostel: bill.hostel.clone(),
            period: bill.period,
            diet_rate: bill.diet_rate,
            bill_items: bill.bill_items.clone(),
            student_count: bill.student_count,
            total_amount: bill.total_amount,
        }
    }
}

/// Internal row structure for snapshot queries
#[derive(Debug, Clone, FromRow)]
pub struct BillSnapshotRow {
    id: i32,
    hostel: String,
    period_year: Option<i32>,
    period_month: Option<i32>,
    period_from: Option<NaiveDate>,
    period_to: Option<NaiveDate>,
    diet_rate: Decimal,
    bill_items: Json<Vec<BillItem>>,
    student_count: i32,
    total_amount: Decimal,
    generated_at: DateTime<Utc>,
}

impl TryFrom<BillSnapshotRow> for BillSnapshot {
    type Error = AppError;

    fn try_from(row: BillSnapshotRow) -> AppResult<Self> {
        let period = match (row.period_year, row.period_month, row.period_from, row.period_to) {
            (Some(year), Some(month), _, _) => BillPeriod::Month {
                year,
                month: month as u32,
            },
            (_, _, Some(from), Some(to)) => BillPeriod::Range { from, to },
            _ => {
                return Err(AppError::Internal(format!(
                    "Bill snapshot {} has no period",
                    row.id
                )))
            }
        };

        Ok(BillSnapshot {
            id: row.id,
            hostel: row.hostel,
            period_label: period.label(),
            period,
            diet_rate: row.diet_rate,
            bill_items: row.bill_items.0,
            student_count: row.student_count,
            total_amount: row.total_amount,
            generated_at: row.generated_at,
        })
    }
}

/// Persisted record of one bill generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillSnapshot {
    pub id: i32,
    pub hostel: String,
    pub period: BillPeriod,
    pub period_label: String,
    #[schema(value_type = String)]
    pub diet_rate: Decimal,
    pub bill_items: Vec<BillItem>,
    pub student_count: i32,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub generated_at: DateTime<Utc>,
}

/// Query parameters for the bill history
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BillHistoryQuery {
    /// Hostel (defaults to the caller's own hostel)
    pub hostel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn body(value: Value) -> GenerateBillRequest {
        serde_json::from_value(value).unwrap()
    }

    fn validation_message(result: AppResult<BillRequest>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_month_window_spans_whole_month() {
        let window = BillPeriod::month(2024, 2).unwrap().window();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_december_window_ends_on_the_31st() {
        let window = BillPeriod::month(2023, 12).unwrap().window();
        assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_range_window_includes_both_days() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = BillPeriod::range(from, to).unwrap().window();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(window.end - window.start, Duration::days(1) - Duration::milliseconds(1));
    }

    #[test]
    fn test_window_boundary_asymmetry() {
        let window = BillPeriod::month(2024, 3).unwrap().window();
        assert!(window.includes_meal(window.start));
        assert!(window.includes_meal(window.end));
        assert!(window.includes_extra_order(window.start));
        assert!(!window.includes_extra_order(window.end));
        assert!(!window.includes_meal(window.end + Duration::milliseconds(1)));
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(BillPeriod::month(2024, 3).unwrap().label(), "2024-03");
        let range = BillPeriod::range(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
        .unwrap();
        assert_eq!(range.label(), "2024-03-01_to_2024-03-15");
    }

    #[test]
    fn test_parse_amount_coercion() {
        assert_eq!(parse_amount(&json!(100)), Decimal::from(100));
        assert_eq!(parse_amount(&json!(-25)), Decimal::from(-25));
        assert_eq!(parse_amount(&json!(12.5)), Decimal::new(125, 1));
        assert_eq!(parse_amount(&json!("40.25")), Decimal::new(4025, 2));
        assert_eq!(parse_amount(&json!(" 7 ")), Decimal::from(7));
        assert_eq!(parse_amount(&json!("abc")), Decimal::ZERO);
        assert_eq!(parse_amount(&json!(null)), Decimal::ZERO);
        assert_eq!(parse_amount(&json!(true)), Decimal::ZERO);
        assert_eq!(parse_amount(&json!({"value": 3})), Decimal::ZERO);
    }

    #[test]
    fn test_bill_items_non_list_is_empty() {
        assert!(bill_items_from_value(None).is_empty());
        assert!(bill_items_from_value(Some(&json!("Fine"))).is_empty());
        assert!(bill_items_from_value(Some(&json!({"name": "Fine", "amount": 5}))).is_empty());
    }

    #[test]
    fn test_bill_item_selection() {
        let items = bill_items_from_value(Some(&json!([
            {"name": "Fine", "amount": 100},
            {"name": "Event Fee", "amount": "50", "selected_students": ["3", 4]},
            {"amount": 10, "selectedStudents": []},
        ])));

        assert_eq!(items.len(), 3);
        assert!(items[0].applies_to(1));
        assert_eq!(items[1].selected_students, Some(vec!["3".to_string(), "4".to_string()]));
        assert!(items[1].applies_to(3));
        assert!(items[1].applies_to(4));
        assert!(!items[1].applies_to(5));
        assert_eq!(items[2].name, "Item 3");
        assert_eq!(items[2].selected_students, None);
        assert!(items[2].applies_to(5));
    }

    #[test]
    fn test_request_requires_hostel() {
        let msg = validation_message(BillRequest::try_from(body(json!({
            "year": 2024, "month": 3, "diet_rate": 20
        }))));
        assert_eq!(msg, "hostel scope required");

        let msg = validation_message(BillRequest::try_from(body(json!({
            "hostel": "   ", "year": 2024, "month": 3, "diet_rate": 20
        }))));
        assert_eq!(msg, "hostel scope required");
    }

    #[test]
    fn test_request_requires_valid_period() {
        for value in [
            json!({"hostel": "BH-1", "diet_rate": 20}),
            json!({"hostel": "BH-1", "year": 2024, "month": 13, "diet_rate": 20}),
            json!({"hostel": "BH-1", "year": 2024, "month": 0, "diet_rate": 20}),
            json!({"hostel": "BH-1", "from_date": "2024-03-01", "diet_rate": 20}),
            json!({"hostel": "BH-1", "from_date": "2024-03-10", "to_date": "2024-03-01", "diet_rate": 20}),
            json!({"hostel": "BH-1", "from_date": "March", "to_date": "2024-03-01", "diet_rate": 20}),
        ] {
            let msg = validation_message(BillRequest::try_from(body(value)));
            assert_eq!(msg, "invalid or missing period");
        }
    }

    #[test]
    fn test_period_fields_accept_numeric_strings() {
        let request = BillRequest::try_from(body(json!({
            "hostel": "BH-1", "year": "2024", "month": " 3 ", "diet_rate": 20
        })))
        .unwrap();
        assert_eq!(request.period, BillPeriod::Month { year: 2024, month: 3 });
    }

    #[test]
    fn test_mistyped_fields_are_validation_errors() {
        for value in [
            json!({"hostel": "BH-1", "year": "twenty", "month": 3, "diet_rate": 20}),
            json!({"hostel": "BH-1", "year": 2024, "month": 3.5, "diet_rate": 20}),
            json!({"hostel": "BH-1", "year": 2024, "month": -3, "diet_rate": 20}),
            json!({"hostel": "BH-1", "from_date": 20240301, "to_date": "2024-03-15", "diet_rate": 20}),
            json!({"hostel": "BH-1", "from_date": "2024-03-01", "to_date": ["2024-03-15"], "diet_rate": 20}),
        ] {
            let msg = validation_message(BillRequest::try_from(body(value)));
            assert_eq!(msg, "invalid or missing period");
        }

        let msg = validation_message(BillRequest::try_from(body(json!({
            "hostel": 12, "year": 2024, "month": 3, "diet_rate": 20
        }))));
        assert_eq!(msg, "hostel scope required");
    }

    #[test]
    fn test_unusable_selection_selects_nobody() {
        let items = bill_items_from_value(Some(&json!([
            {"name": "Fine", "amount": 100, "selected_students": [null]},
            {"name": "Fee", "amount": 50, "selectedStudents": [{"id": 1}, true]},
        ])));

        for item in &items {
            assert_eq!(item.selected_students, Some(Vec::new()));
            assert!(!item.applies_to(1));
        }
    }

    #[test]
    fn test_checked_total_reports_overflow() {
        assert_eq!(
            checked_total([Decimal::from(2), Decimal::from(3)]).unwrap(),
            Decimal::from(5)
        );
        assert!(matches!(
            checked_total([Decimal::MAX, Decimal::MAX]),
            Err(AppError::Validation(msg)) if msg == "amount out of range"
        ));
    }

    #[test]
    fn test_request_requires_diet_rate_but_accepts_zero() {
        let msg = validation_message(BillRequest::try_from(body(json!({
            "hostel": "BH-1", "year": 2024, "month": 3
        }))));
        assert_eq!(msg, "diet rate required");

        let msg = validation_message(BillRequest::try_from(body(json!({
            "hostel": "BH-1", "year": 2024, "month": 3, "diet_rate": null
        }))));
        assert_eq!(msg, "diet rate required");

        let request = BillRequest::try_from(body(json!({
            "hostel": "BH-1", "year": 2024, "month": 3, "diet_rate": 0
        })))
        .unwrap();
        assert_eq!(request.diet_rate, Decimal::ZERO);
    }

    #[test]
    fn test_request_rejects_bad_diet_rate() {
        for rate in [json!(-5), json!("cheap"), json!([20])] {
            let msg = validation_message(BillRequest::try_from(body(json!({
                "hostel": "BH-1", "year": 2024, "month": 3, "diet_rate": rate
            }))));
            assert_eq!(msg, "invalid diet rate");
        }
    }

    #[test]
    fn test_request_month_takes_precedence_over_range() {
        let request = BillRequest::try_from(body(json!({
            "hostel": " BH-1 ",
            "year": 2024,
            "month": 3,
            "from_date": "2024-01-01",
            "to_date": "2024-01-31",
            "diet_rate": "22.5",
            "bill_items": "not a list"
        })))
        .unwrap();

        assert_eq!(request.hostel, "BH-1");
        assert_eq!(request.period, BillPeriod::Month { year: 2024, month: 3 });
        assert_eq!(request.diet_rate, Decimal::new(225, 1));
        assert!(request.bill_items.is_empty());
    }

    #[test]
    fn test_snapshot_row_requires_period() {
        let row = BillSnapshotRow {
            id: 9,
            hostel: "BH-1".into(),
            period_year: None,
            period_month: None,
            period_from: None,
            period_to: None,
            diet_rate: Decimal::from(20),
            bill_items: Json(vec![]),
            student_count: 2,
            total_amount: Decimal::from(450),
            generated_at: Utc::now(),
        };
        assert!(BillSnapshot::try_from(row).is_err());
    }
}
