//! File-backed stores for products, users and the order ledger.
//!
//! Products and users are whole-file snapshots: each save writes a sibling temporary
//! file and renames it over the target. The ledger is append-only.
//!
//! Loaders are tolerant: a line that does not decode is logged and skipped.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use autoshop_auth::User;
use autoshop_catalog::Product;
use autoshop_core::{OrderId, PersistenceError};
use autoshop_sales::{Order, OrderJournal};

use crate::codec::{LedgerEntry, Record, decode_lines};

pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<Product>, PersistenceError> {
    load_records(path.as_ref())
}

pub fn save_products<'a>(
    path: impl AsRef<Path>,
    products: impl IntoIterator<Item = &'a Product>,
) -> Result<(), PersistenceError> {
    save_records(path.as_ref(), products)
}

pub fn load_users(path: impl AsRef<Path>) -> Result<Vec<User>, PersistenceError> {
    load_records(path.as_ref())
}

pub fn save_users<'a>(
    path: impl AsRef<Path>,
    users: impl IntoIterator<Item = &'a User>,
) -> Result<(), PersistenceError> {
    save_records(path.as_ref(), users)
}

pub fn load_ledger(path: impl AsRef<Path>) -> Result<Vec<LedgerEntry>, PersistenceError> {
    load_records(path.as_ref())
}

fn load_records<R: Record>(path: &Path) -> Result<Vec<R>, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for decoded in decode_lines::<R>(&text) {
        match decoded {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(path = %path.display(), line = err.line, error = %err.source, "skipping malformed record");
            }
        }
    }

    tracing::debug!(path = %path.display(), loaded = records.len(), skipped, "records loaded");
    Ok(records)
}

fn save_records<'a, R: Record + 'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a R>,
) -> Result<(), PersistenceError> {
    let mut body = String::new();
    let mut count = 0usize;
    for record in records {
        body.push_str(&record.encode());
        body.push('\n');
        count += 1;
    }

    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, body).map_err(|e| PersistenceError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistenceError::io(path, e))?;

    tracing::info!(path = %path.display(), records = count, "file saved");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn ensure_parent(path: &Path) -> Result<(), PersistenceError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))
        }
        _ => Ok(()),
    }
}

/// Append-only order ledger file.
#[derive(Debug, Clone)]
pub struct FileOrderJournal {
    path: PathBuf,
}

impl FileOrderJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every order recorded so far; an absent file is an empty ledger.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>, PersistenceError> {
        match load_ledger(&self.path) {
            Err(err) if err.is_missing() => Ok(Vec::new()),
            other => other,
        }
    }
}

impl OrderJournal for FileOrderJournal {
    fn append(&mut self, order: &Order) -> Result<(), PersistenceError> {
        let path = self.path.as_path();
        ensure_parent(path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| PersistenceError::io(path, e))?;
        let is_new = file
            .metadata()
            .map_err(|e| PersistenceError::io(path, e))?
            .len()
            == 0;

        let mut chunk = String::new();
        if is_new {
            if let Some(header) = LedgerEntry::HEADER {
                chunk.push_str(header);
                chunk.push('\n');
            }
        }
        chunk.push_str(&LedgerEntry::from(order).encode());
        chunk.push('\n');

        file.write_all(chunk.as_bytes())
            .map_err(|e| PersistenceError::io(path, e))?;
        tracing::info!(order_id = %order.order_id(), path = %path.display(), "order recorded");
        Ok(())
    }

    fn last_order_id(&self) -> Result<Option<OrderId>, PersistenceError> {
        Ok(self.entries()?.iter().map(|e| e.order_id).max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoshop_auth::Customer;
    use autoshop_catalog::{Catalog, PartDetails};
    use autoshop_core::{ProductCode, UserId};
    use autoshop_sales::{Cart, InMemoryJournal, OrderLedger};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn oil_filter(stock: i64) -> Product {
        Product::part(
            ProductCode::new("BP001").unwrap(),
            "Oil Filter",
            dec!(12.99),
            stock,
            PartDetails {
                manufacturer: "Bosch".into(),
                model_compatibility: "Toyota Camry/Corolla".into(),
                warranty_months: 12,
                is_original_equipment: true,
            },
        )
        .unwrap()
    }

    fn place_order(quantity: i64) -> Order {
        let mut catalog = Catalog::from_products([oil_filter(25)]);
        let mut cart = Cart::default();
        cart.add_line(catalog.find("BP001").unwrap(), quantity).unwrap();
        let mut customer = Customer::new(UserId::new("cathy").unwrap(), "cathy", "Cathy Customer");
        let mut ledger = OrderLedger::open(InMemoryJournal::new()).unwrap();
        ledger
            .commit(&mut cart, &mut customer, &mut catalog, Utc::now())
            .unwrap()
    }

    #[test]
    fn products_file_round_trips_and_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.txt");
        save_products(&path, [&oil_filter(25)]).unwrap();

        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("AutoPart,BP002,Air Filter\n");
        fs::write(&path, text).unwrap();

        let loaded = load_products(&path).unwrap();
        assert_eq!(loaded, vec![oil_filter(25)]);
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_users(dir.path().join("users.txt")).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn save_creates_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("products.txt");
        save_products(&path, [&oil_filter(3)]).unwrap();
        assert_eq!(load_products(&path).unwrap().len(), 1);
    }

    #[test]
    fn ledger_header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = FileOrderJournal::new(dir.path().join("orders.txt"));

        let order = place_order(5);
        journal.append(&order).unwrap();
        journal.append(&order).unwrap();

        let text = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "OrderID,Customer,Date,TotalAmount,Items");
        assert!(lines[1].starts_with("1,Cathy Customer,"));
        assert!(lines[1].ends_with(",64.95,BP001(5)"));
    }

    #[test]
    fn last_order_id_scans_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.txt");
        let journal = FileOrderJournal::new(&path);
        assert_eq!(journal.last_order_id().unwrap(), None);

        fs::write(
            &path,
            "OrderID,Customer,Date,TotalAmount,Items\n\
             4,Cathy,2026-01-02 10:00,12.99,BP001(1)\n\
             2,Cathy,2026-01-01 10:00,12.99,BP001(1)\n\
             garbage\n",
        )
        .unwrap();
        assert_eq!(journal.last_order_id().unwrap(), Some(OrderId::new(4).unwrap()));

        let ledger = OrderLedger::open(journal).unwrap();
        assert_eq!(ledger.next_order_id(), OrderId::new(5).unwrap());
    }
}
