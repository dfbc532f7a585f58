use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::params;

use crate::domain::entities::dataset::DatasetMeta;
use crate::domain::entities::record::Record;
use crate::infra::sqlite::schema::{init_db, open_connection};

pub fn insert_record_fields(
    tx: &rusqlite::Transaction<'_>,
    dataset_id: i64,
    keys: &[String],
) -> Result<()> {
    let mut insert_field = tx
        .prepare("INSERT INTO record_field(dataset_id, position, key) VALUES (?1, ?2, ?3)")
        .context("failed to prepare record field insert")?;

    for (position, key) in keys.iter().enumerate() {
        insert_field
            .execute(params![dataset_id, position as i64, key])
            .context("failed to insert record field")?;
    }

    Ok(())
}

/// Keys of all records in first-seen order.
pub fn record_keys(records: &[Record]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in records.iter().flat_map(Record::keys) {
        if !keys.iter().any(|existing| existing == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

pub fn create_dataset_from_records(
    db_path: &Path,
    name: &str,
    source_path: &str,
    records: &[Record],
) -> Result<i64> {
    init_db(db_path)?;
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start dataset create transaction")?;

    tx.execute(
        "INSERT INTO dataset(name, source_path, record_count) VALUES (?1, ?2, ?3)",
        params![name, source_path, records.len() as i64],
    )
    .context("failed to insert dataset")?;
    let dataset_id = tx.last_insert_rowid();

    let keys = record_keys(records);
    insert_record_fields(&tx, dataset_id, &keys)?;

    let mut insert_value = tx
        .prepare(
            "INSERT INTO record_value(dataset_id, record_idx, position, value)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .context("failed to prepare record value insert")?;
    for (record_idx, record) in records.iter().enumerate() {
        for (position, key) in keys.iter().enumerate() {
            // Records of one batch normally share keys; a missing key stores nothing.
            let Some(value) = record.get(key) else {
                continue;
            };
            insert_value
                .execute(params![dataset_id, record_idx as i64, position as i64, value])
                .context("failed to insert record value")?;
        }
    }
    drop(insert_value);

    tx.commit().context("failed to commit dataset create")?;
    Ok(dataset_id)
}

pub fn list_datasets(db_path: &Path) -> Result<Vec<DatasetMeta>> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, name, source_path, record_count, imported_at
             FROM dataset
             ORDER BY id DESC",
        )
        .context("failed to prepare datasets query")?;

    let datasets = stmt
        .query_map([], |row| {
            Ok(DatasetMeta {
                id: row.get::<_, i64>(0)?.into(),
                name: row.get(1)?,
                source_path: row.get(2)?,
                record_count: row.get(3)?,
                imported_at: row.get(4)?,
            })
        })
        .context("failed to query datasets")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect datasets")?;

    Ok(datasets)
}

/// Records of one dataset in insertion order, keys in field order.
pub fn load_dataset(db_path: &Path, dataset_id: i64) -> Result<Vec<Record>> {
    let conn = open_connection(db_path)?;

    let record_count: i64 = conn
        .query_row(
            "SELECT record_count FROM dataset WHERE id = ?1",
            [dataset_id],
            |row| row.get(0),
        )
        .with_context(|| format!("dataset {dataset_id} not found"))?;

    let mut stmt = conn
        .prepare(
            "SELECT v.record_idx, f.key, v.value
             FROM record_value v
             JOIN record_field f
               ON f.dataset_id = v.dataset_id AND f.position = v.position
             WHERE v.dataset_id = ?1
             ORDER BY v.record_idx, v.position",
        )
        .context("failed to prepare record values query")?;
    let values = stmt
        .query_map([dataset_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .context("failed to query record values")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect record values")?;

    let mut records = vec![Record::new(); record_count.max(0) as usize];
    for (record_idx, key, value) in values {
        if let Some(record) = records.get_mut(record_idx as usize) {
            record.insert(key, value);
        }
    }

    Ok(records)
}
