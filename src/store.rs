//! Persisted store operations
//!
//! This module implements the three stores backing the bot:
//! - Link Store: create / resolve / list / delete of short links
//! - User Store: first-contact registration with its metadata record
//! - Folder Store: flat folders with create / list only
//!
//! Every operation runs in a single redb transaction. redb serializes write
//! transactions, so a check-then-insert performed inside one write transaction
//! cannot race with another writer.

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable};
use sha2::{Digest, Sha256};

use crate::database::{
    TABLE_DELETED, TABLE_FOLDERS, TABLE_FOLDERS_BY_CREATOR, TABLE_LINKS,
    TABLE_LINKS_BY_CREATOR, TABLE_META, TABLE_USERS,
};
use crate::error::{Error, Result};
use crate::id::generate_id;
use crate::model::{DeletedLinkRecord, FolderRecord, LinkRecord, MetaRecord, UserRecord};

/// Maximum number of fresh identifiers tried when inserting a new row
/// before giving up with [`Error::IdSpaceExhausted`]
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Composite key for the per-creator index tables: "{creator_id}:{suffix}"
///
/// Generated ids are alphanumeric only, so a range from "{creator_id}:" up to
/// "{creator_id}:{" covers exactly the rows of one creator ('{' sorts after
/// every alphanumeric character).
fn creator_key(creator_id: u64, suffix: &str) -> String {
    format!("{}:{}", creator_id, suffix)
}

/// Lowercase hex SHA-256 digest of a URL, as retained in the audit table
pub fn url_digest(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

// --- Link Store ---

/// Creates a new short link for `creator_id`
///
/// A fresh identifier is generated and checked against the main table inside
/// the write transaction; on collision the transaction is aborted and a new
/// identifier is tried, up to [`MAX_ID_ATTEMPTS`] times. The main row and the
/// creator-index row are written in the same transaction.
///
/// The URL is stored as submitted; syntactic validation happens in the
/// handler before this is called.
pub fn create_link(db: &Database, url: &str, creator_id: u64) -> Result<LinkRecord> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let short_id = generate_id();
        let record = LinkRecord {
            short_id: short_id.clone(),
            original_url: url.to_string(),
            creator_id,
            folder_id: None,
            created_at: Utc::now(),
        };
        let record_json = serde_json::to_string(&record)?;

        let write_txn = db.begin_write()?;
        let inserted = {
            let mut table_main = write_txn.open_table(TABLE_LINKS)?;

            // Check for a collision with an existing row
            if table_main.get(short_id.as_str())?.is_some() {
                false
            } else {
                table_main.insert(short_id.as_str(), record_json.as_str())?;

                let index_key = creator_key(creator_id, &short_id);
                let mut table_index = write_txn.open_table(TABLE_LINKS_BY_CREATOR)?;
                table_index.insert(index_key.as_str(), record_json.as_str())?;
                true
            }
        };

        if inserted {
            write_txn.commit()?;
            return Ok(record);
        }

        // Collision: discard the transaction and retry with a fresh id
        write_txn.abort()?;
        tracing::warn!(short_id = %short_id, "generated id collided, retrying");
    }

    Err(Error::IdSpaceExhausted(MAX_ID_ATTEMPTS))
}

/// Resolves a short id back to its stored link record
pub fn resolve_link(db: &Database, short_id: &str) -> Result<LinkRecord> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_LINKS)?;

    match table.get(short_id)? {
        Some(guard) => Ok(serde_json::from_str(guard.value())?),
        None => Err(Error::NotFound(short_id.to_string())),
    }
}

/// Lists all links owned by `creator_id` using the creator index
pub fn links_by_creator(db: &Database, creator_id: u64) -> Result<Vec<LinkRecord>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_LINKS_BY_CREATOR)?;

    let start_key = creator_key(creator_id, "");
    let end_key = format!("{}:{{", creator_id);

    let mut links = Vec::new();
    for entry in table.range(start_key.as_str()..end_key.as_str())? {
        let (_, value) = entry?;
        links.push(serde_json::from_str(value.value())?);
    }
    Ok(links)
}

/// Deletes a short link, converting it into an audit row
///
/// Within a single write transaction:
/// 1. Read the link row; fail with NotFound if it does not exist
/// 2. Insert a `deleted_links_hash` row keyed by the same id, holding the
///    SHA-256 digest of the URL (the URL itself is discarded)
/// 3. Remove the link row and its creator-index row
///
/// A second delete of the same id observes NotFound and writes nothing, so
/// the audit trail never gets a duplicate row for one deletion event.
pub fn delete_link(db: &Database, short_id: &str) -> Result<DeletedLinkRecord> {
    let write_txn = db.begin_write()?;
    let deleted = {
        let mut table_main = write_txn.open_table(TABLE_LINKS)?;

        let record: LinkRecord = match table_main.get(short_id)? {
            Some(guard) => serde_json::from_str(guard.value())?,
            // Dropping the uncommitted transaction leaves the store untouched
            None => return Err(Error::NotFound(short_id.to_string())),
        };

        let deleted = DeletedLinkRecord {
            hash_id: short_id.to_string(),
            original_url_hash: url_digest(&record.original_url),
            deleted_at: Utc::now(),
            creator_id: record.creator_id,
        };
        let deleted_json = serde_json::to_string(&deleted)?;

        let mut table_deleted = write_txn.open_table(TABLE_DELETED)?;
        table_deleted.insert(short_id, deleted_json.as_str())?;

        table_main.remove(short_id)?;

        let index_key = creator_key(record.creator_id, short_id);
        let mut table_index = write_txn.open_table(TABLE_LINKS_BY_CREATOR)?;
        table_index.remove(index_key.as_str())?;

        deleted
    };
    write_txn.commit()?;

    Ok(deleted)
}

/// Returns the audit row for a deleted link, if one exists
pub fn deleted_record(db: &Database, short_id: &str) -> Result<Option<DeletedLinkRecord>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_DELETED)?;

    match table.get(short_id)? {
        Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
        None => Ok(None),
    }
}

// --- User Store ---

/// Returns whether a user with this Telegram id is already registered
pub fn user_exists(db: &Database, telegram_id: u64) -> Result<bool> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_USERS)?;
    Ok(table.get(telegram_id)?.is_some())
}

/// Registers a user on first contact, as an insert-if-absent primitive
///
/// The existence check and both inserts (metadata row, then user row) happen
/// in one write transaction, so two concurrent registrations of the same
/// Telegram id cannot both create rows: the second one observes the first
/// row and writes nothing.
///
/// Returns `true` if a new user was created, `false` if one already existed.
pub fn register_user(
    db: &Database,
    telegram_id: u64,
    username: Option<&str>,
    nickname: &str,
) -> Result<bool> {
    let write_txn = db.begin_write()?;
    let created = {
        let mut table_users = write_txn.open_table(TABLE_USERS)?;

        if table_users.get(telegram_id)?.is_some() {
            false
        } else {
            // Real client metadata is not exposed by the Bot API,
            // placeholders are stored instead
            let meta = MetaRecord {
                id: generate_id(),
                user_tg_reg_date: "Unknown".to_string(),
                user_bot_reg_date: Utc::now(),
                device_meta: "Mobile/Desktop".to_string(),
                browser: "In-App Telegram".to_string(),
            };
            let user = UserRecord {
                telegram_id,
                username: username.map(str::to_string),
                nickname: nickname.to_string(),
                meta_data_id: meta.id.clone(),
            };

            let meta_json = serde_json::to_string(&meta)?;
            let user_json = serde_json::to_string(&user)?;

            let mut table_meta = write_txn.open_table(TABLE_META)?;
            table_meta.insert(meta.id.as_str(), meta_json.as_str())?;
            table_users.insert(telegram_id, user_json.as_str())?;
            true
        }
    };
    write_txn.commit()?;

    Ok(created)
}

// --- Folder Store ---

/// Creates a folder for `creator_id`
///
/// Folder names are not validated and need not be unique. Uses the same
/// bounded id-collision retry as link creation.
pub fn create_folder(db: &Database, name: &str, creator_id: u64) -> Result<FolderRecord> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let record = FolderRecord {
            folder_id: generate_id(),
            name: name.to_string(),
            creator_id,
        };
        let record_json = serde_json::to_string(&record)?;

        let write_txn = db.begin_write()?;
        let inserted = {
            let mut table_main = write_txn.open_table(TABLE_FOLDERS)?;

            if table_main.get(record.folder_id.as_str())?.is_some() {
                false
            } else {
                table_main.insert(record.folder_id.as_str(), record_json.as_str())?;

                let index_key = creator_key(creator_id, &record.folder_id);
                let mut table_index = write_txn.open_table(TABLE_FOLDERS_BY_CREATOR)?;
                table_index.insert(index_key.as_str(), record_json.as_str())?;
                true
            }
        };

        if inserted {
            write_txn.commit()?;
            return Ok(record);
        }

        write_txn.abort()?;
        tracing::warn!(folder_id = %record.folder_id, "generated id collided, retrying");
    }

    Err(Error::IdSpaceExhausted(MAX_ID_ATTEMPTS))
}

/// Lists all folders owned by `creator_id` using the creator index
pub fn folders_by_creator(db: &Database, creator_id: u64) -> Result<Vec<FolderRecord>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(TABLE_FOLDERS_BY_CREATOR)?;

    let start_key = creator_key(creator_id, "");
    let end_key = format!("{}:{{", creator_id);

    let mut folders = Vec::new();
    for entry in table.range(start_key.as_str()..end_key.as_str())? {
        let (_, value) = entry?;
        folders.push(serde_json::from_str(value.value())?);
    }
    Ok(folders)
}
