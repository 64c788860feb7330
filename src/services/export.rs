//! Spreadsheet export of generated bills

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::bill::{BillPeriod, GeneratedBill},
};

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));

const LEADING_COLUMNS: [&str; 8] = [
    "S.No",
    "Room No",
    "Name",
    "Roll No",
    "Diet",
    "Diet Rate",
    "Diet Total",
    "Extra",
];

/// `{hostel}_{period}_Bill`, hostel reduced to ASCII letters, digits and `_`
pub fn export_file_name(hostel: &str, period: &BillPeriod) -> String {
    format!(
        "{}_{}_Bill",
        NON_ALPHANUMERIC.replace_all(hostel, "_"),
        period.label()
    )
}

/// Render the bill as CSV: one row per student, one column per bill item,
/// and a closing TOTAL row
pub fn render_csv(bill: &GeneratedBill) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(bill.bill_items.iter().map(|item| item.name.clone()));
    header.push("Total".to_string());
    writer.write_record(&header).map_err(export_error)?;

    for row in &bill.rows {
        let mut record = vec![
            row.serial.to_string(),
            row.room_no.clone(),
            row.name.clone(),
            row.roll_no.clone(),
            row.diet_count.to_string(),
            row.diet_rate.to_string(),
            row.diet_total.to_string(),
            row.extra_total.to_string(),
        ];
        record.extend(row.item_charges.iter().map(|c| c.amount.to_string()));
        record.push(row.total.to_string());
        writer.write_record(&record).map_err(export_error)?;
    }

    let mut footer = vec![String::new(); header.len()];
    footer[2] = "TOTAL".to_string();
    if let Some(last) = footer.last_mut() {
        *last = bill.total_amount.to_string();
    }
    writer.write_record(&footer).map_err(export_error)?;

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish bill export: {}", e)))
}

fn export_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("Failed to write bill export: {}", e))
}
