//! Bill calculator and bill history

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{
        bill::{
            amount_out_of_range, checked_total, BillRequest, BillRow, BillSnapshot, BillWindow,
            DietTally, ExtraTally, GeneratedBill, ItemCharge, NewBillSnapshot,
        },
        student::RosterEntry,
    },
};

/// Source of the hostel roster
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Students whose hostel equals `hostel` case-insensitively, in load order
    async fn roster(&self, hostel: &str) -> AppResult<Vec<RosterEntry>>;
}

/// Meal ledger aggregation
#[async_trait]
pub trait MealLedger: Send + Sync {
    /// Diet counts summed per student over `start <= served_at <= end`
    async fn diet_counts(&self, student_ids: &[i32], window: &BillWindow) -> AppResult<Vec<DietTally>>;
}

/// Extra-order ledger aggregation
#[async_trait]
pub trait ExtraOrderLedger: Send + Sync {
    /// Order totals summed per student over `start <= ordered_at < end`
    async fn extra_totals(&self, student_ids: &[i32], window: &BillWindow) -> AppResult<Vec<ExtraTally>>;
}

/// Persistence of bill snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn create_snapshot(&self, snapshot: &NewBillSnapshot) -> AppResult<BillSnapshot>;
    async fn get_snapshot(&self, id: i32) -> AppResult<BillSnapshot>;
    /// Newest first
    async fn list_snapshots(&self, hostel: &str, limit: i64) -> AppResult<Vec<BillSnapshot>>;
    async fn delete_snapshot(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BillingService {
    students: Arc<dyn StudentDirectory>,
    meals: Arc<dyn MealLedger>,
    extra_orders: Arc<dyn ExtraOrderLedger>,
    snapshots: Arc<dyn SnapshotStore>,
    history_limit: i64,
}

impl BillingService {
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        meals: Arc<dyn MealLedger>,
        extra_orders: Arc<dyn ExtraOrderLedger>,
        snapshots: Arc<dyn SnapshotStore>,
        history_limit: i64,
    ) -> Self {
        Self {
            students,
            meals,
            extra_orders,
            snapshots,
            history_limit,
        }
    }

    /// Compute the bill without recording it
    pub async fn compute(&self, request: &BillRequest) -> AppResult<GeneratedBill> {
        let window = request.period.window();

        let roster = self.students.roster(&request.hostel).await?;
        if roster.is_empty() {
            return Err(AppError::EmptyRoster(format!(
                "no students found in hostel {}",
                request.hostel
            )));
        }

        let ids: Vec<i32> = roster.iter().map(|s| s.id).collect();
        let (diets, extras) = tokio::try_join!(
            self.meals.diet_counts(&ids, &window),
            self.extra_orders.extra_totals(&ids, &window),
        )?;

        assemble_bill(request, roster, diets, extras)
    }

    /// Compute the bill, then record a snapshot in the background.
    /// The snapshot write never affects the returned bill.
    pub async fn generate(&self, request: &BillRequest) -> AppResult<GeneratedBill> {
        let bill = self.compute(request).await?;

        tracing::info!(
            hostel = %bill.hostel,
            period = %bill.period_label,
            students = bill.student_count,
            total = %bill.total_amount,
            "Bill generated"
        );

        self.record_snapshot(&bill);
        Ok(bill)
    }

    /// Detached best-effort snapshot write; failures are only logged
    pub fn record_snapshot(&self, bill: &GeneratedBill) -> JoinHandle<()> {
        let store = Arc::clone(&self.snapshots);
        let snapshot = NewBillSnapshot::from(bill);

        tokio::spawn(async move {
            match store.create_snapshot(&snapshot).await {
                Ok(saved) => {
                    tracing::debug!(id = saved.id, hostel = %saved.hostel, "Bill snapshot saved");
                }
                Err(e) => {
                    tracing::warn!(
                        hostel = %snapshot.hostel,
                        period = %snapshot.period.label(),
                        "Failed to save bill snapshot: {}",
                        e
                    );
                }
            }
        })
    }

    /// Bill history of a hostel, newest first
    pub async fn history(&self, hostel: &str) -> AppResult<Vec<BillSnapshot>> {
        self.snapshots.list_snapshots(hostel, self.history_limit).await
    }

    pub async fn get_snapshot(&self, id: i32) -> AppResult<BillSnapshot> {
        self.snapshots.get_snapshot(id).await
    }

    pub async fn delete_snapshot(&self, id: i32) -> AppResult<()> {
        self.snapshots.delete_snapshot(id).await?;
        tracing::info!(id, "Bill snapshot deleted");
        Ok(())
    }
}

/// Combine the roster with the ledger tallies. Rows keep roster order.
/// Amounts beyond the decimal range are rejected, never wrapped.
pub fn assemble_bill(
    request: &BillRequest,
    roster: Vec<RosterEntry>,
    diets: Vec<DietTally>,
    extras: Vec<ExtraTally>,
) -> AppResult<GeneratedBill> {
    let diet_by_student: HashMap<i32, i64> = diets
        .into_iter()
        .map(|t| (t.student_id, t.diet_count))
        .collect();
    let extra_by_student: HashMap<i32, Decimal> = extras
        .into_iter()
        .map(|t| (t.student_id, t.extra_total))
        .collect();

    let rows: Vec<BillRow> = roster
        .into_iter()
        .enumerate()
        .map(|(i, student)| -> AppResult<BillRow> {
            let diet_count = diet_by_student.get(&student.id).copied().unwrap_or(0);
            let extra_total = extra_by_student
                .get(&student.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let diet_total = Decimal::from(diet_count)
                .checked_mul(request.diet_rate)
                .ok_or_else(amount_out_of_range)?;

            let item_charges: Vec<ItemCharge> = request
                .bill_items
                .iter()
                .map(|item| ItemCharge {
                    name: item.name.clone(),
                    amount: if item.applies_to(student.id) {
                        item.amount
                    } else {
                        Decimal::ZERO
                    },
                })
                .collect();

            let mut row = BillRow {
                serial: (i + 1) as u32,
                student_id: student.id,
                room_no: student.room_no,
                name: student.name,
                roll_no: student.roll_no,
                diet_count,
                diet_rate: request.diet_rate,
                diet_total,
                extra_total,
                item_charges,
                total: Decimal::ZERO,
            };
            row.total = checked_total([row.diet_total, row.extra_total, row.item_subtotal()?])?;
            Ok(row)
        })
        .collect::<AppResult<_>>()?;

    let total_amount = checked_total(rows.iter().map(|r| r.total))?;

    Ok(GeneratedBill {
        hostel: request.hostel.clone(),
        period: request.period,
        period_label: request.period.label(),
        diet_rate: request.diet_rate,
        bill_items: request.bill_items.clone(),
        student_count: rows.len() as i32,
        rows,
        total_amount,
    })
}
