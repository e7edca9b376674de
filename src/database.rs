//! Database initialization and table definitions
//!
//! This module handles the setup and configuration of the embedded redb database.
//! It defines all persisted tables of the bot and provides initialization functions.

use redb::{Database, TableDefinition};
use std::sync::Arc;

/// Main table for storing short link records
///
/// Key: Short link ID as string
/// Value: JSON-serialized LinkRecord as string
///
/// Example:
/// - Key: "aB3dE5fG7hJ9"
/// - Value: '{"short_id":"aB3dE5fG7hJ9","original_url":"https://example.com",...}'
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("short_links");

/// Index table for efficient querying of links by creator
///
/// This secondary index enables fast listing of all links owned by one user
/// without scanning the main table.
///
/// Key: Composite key in format "{creator_id}:{short_id}"
/// Value: JSON-serialized LinkRecord as string
///
/// Example:
/// - Key: "123456789:aB3dE5fG7hJ9"
/// - Value: '{"short_id":"aB3dE5fG7hJ9","creator_id":123456789,...}'
pub const TABLE_LINKS_BY_CREATOR: TableDefinition<&str, &str> =
    TableDefinition::new("short_links_by_creator");

/// Table for registered users
///
/// Key: Telegram user ID (numeric platform id)
/// Value: JSON-serialized UserRecord as string
pub const TABLE_USERS: TableDefinition<u64, &str> = TableDefinition::new("user");

/// Table for per-user metadata records
///
/// Key: Generated metadata ID as string
/// Value: JSON-serialized MetaRecord as string
///
/// Each user row references exactly one metadata row via `meta_data_id`.
pub const TABLE_META: TableDefinition<&str, &str> = TableDefinition::new("meta_data");

/// Table for folders
///
/// Key: Generated folder ID as string
/// Value: JSON-serialized FolderRecord as string
pub const TABLE_FOLDERS: TableDefinition<&str, &str> = TableDefinition::new("folders");

/// Index table for efficient querying of folders by creator
///
/// Key: Composite key in format "{creator_id}:{folder_id}"
/// Value: JSON-serialized FolderRecord as string
pub const TABLE_FOLDERS_BY_CREATOR: TableDefinition<&str, &str> =
    TableDefinition::new("folders_by_creator");

/// Audit table for deleted links
///
/// Key: The short ID of the deleted link
/// Value: JSON-serialized DeletedLinkRecord as string
///
/// Only the SHA-256 digest of the original URL is retained here;
/// the URL itself is discarded on deletion.
pub const TABLE_DELETED: TableDefinition<&str, &str> =
    TableDefinition::new("deleted_links_hash");

/// Application state shared across all request handlers
///
/// This struct wraps the database instance in an Arc for thread-safe sharing
/// across async handlers in the Axum web framework.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,

    /// Bot username used to compose t.me deep links
    pub bot_username: String,
}

/// Initializes the embedded database and creates required tables
///
/// This function:
/// 1. Creates or opens the database file at the specified path
/// 2. Opens every table so the schema exists before first use
/// 3. Commits the transaction to ensure tables are persisted
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "bot_database.db")
///
/// # Returns
///
/// * `Ok(Database)` - Successfully initialized database instance
/// * `Err(redb::Error)` - Database initialization error
///
/// # Example
///
/// ```no_run
/// # use shortbot::database::init_db;
/// let db = init_db("bot_database.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    // Create or open the database file
    let db = Database::create(db_path)?;

    // Begin a write transaction to create tables
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_LINKS)?;
        write_txn.open_table(TABLE_LINKS_BY_CREATOR)?;
        write_txn.open_table(TABLE_USERS)?;
        write_txn.open_table(TABLE_META)?;
        write_txn.open_table(TABLE_FOLDERS)?;
        write_txn.open_table(TABLE_FOLDERS_BY_CREATOR)?;
        write_txn.open_table(TABLE_DELETED)?;
    }

    // Commit the transaction to persist the table structures
    write_txn.commit()?;

    Ok(db)
}
