//! CSV catalog store for product rows.
//!
//! The catalog snapshot is the persisted source of resource rows: loaded
//! once at startup to seed the relevance index, appended to on ingestion.
//! Loads are lenient (malformed rows are skipped with a warning) and full
//! rewrites go through a temp file + rename so a crash never leaves a
//! half-written snapshot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kwrank_core::record::ProductRecord;
use parking_lot::RwLock;

/// In-memory view of the catalog snapshot plus its backing file.
///
/// Appends hold the write lock across the file write, so two ingestion
/// requests cannot interleave their rows or row numbers.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    products: RwLock<Vec<ProductRecord>>,
}

impl CatalogStore {
    /// Opens the catalog at `path`, loading any existing snapshot. A missing
    /// file is an empty catalog, not an error. Legacy six-column snapshots
    /// are rewritten in the current seven-column format on open.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let products = if path.exists() {
            let products = load_catalog(&path)?;
            if is_legacy_snapshot(&path)? {
                save_catalog(&path, &products)?;
                tracing::info!("Upgraded legacy catalog snapshot at {:?}", path);
            }
            products
        } else {
            tracing::info!("No catalog snapshot at {:?}, starting empty", path);
            Vec::new()
        };
        Ok(Self {
            path,
            products: RwLock::new(products),
        })
    }

    /// Snapshot of all rows, in catalog order.
    pub fn products(&self) -> Vec<ProductRecord> {
        self.products.read().clone()
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    /// Appends `rows` to the snapshot file and the in-memory view,
    /// numbering them after the current tail. Returns the rows as stored.
    pub fn append(&self, rows: Vec<ProductRecord>) -> io::Result<Vec<ProductRecord>> {
        let mut products = self.products.write();
        let mut next_no = products.last().map_or(1, |last| last.no + 1);
        let mut numbered = Vec::with_capacity(rows.len());
        for mut row in rows {
            row.no = next_no;
            next_no += 1;
            numbered.push(row);
        }
        append_rows(&self.path, &numbered)?;
        products.extend(numbered.iter().cloned());
        tracing::info!(
            added = numbered.len(),
            total = products.len(),
            "Appended products to catalog"
        );
        Ok(numbered)
    }
}

/// Reads the headered CSV snapshot at `path`. Rows that fail to parse are
/// skipped with a warning; legacy rows without a description column load
/// with an empty description.
pub fn load_catalog(path: &Path) -> io::Result<Vec<ProductRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(io_other)?;
    let mut products = Vec::new();
    for (row, result) in reader.deserialize::<ProductRecord>().enumerate() {
        match result {
            Ok(record) => products.push(record),
            // Header is line 1, so data row N sits on line N + 1.
            Err(e) => tracing::warn!("Skipping malformed catalog row on line {}: {}", row + 2, e),
        }
    }
    tracing::info!("Loaded {} products from {:?}", products.len(), path);
    Ok(products)
}

/// Rewrites the full snapshot atomically: write to a temp file in the same
/// directory, then rename over the target.
pub fn save_catalog(path: &Path, products: &[ProductRecord]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let tmp_path = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp_path).map_err(io_other)?;
        for row in products {
            writer.serialize(row).map_err(io_other)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Appends `rows` to the snapshot, writing the header only when the file is
/// missing or empty.
fn append_rows(path: &Path, rows: &[ProductRecord]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let needs_header = fs::metadata(path).map_or(true, |meta| meta.len() == 0);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(io_other)?;
    }
    writer.flush()?;
    Ok(())
}

/// A snapshot is legacy when its header predates the description column.
/// A file with no header row at all is an empty catalog, not a legacy one.
fn is_legacy_snapshot(path: &Path) -> io::Result<bool> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(io_other)?;
    let headers = reader.headers().map_err(io_other)?;
    Ok(!headers.is_empty() && !headers.iter().any(|column| column == "Description"))
}

fn io_other(e: csv::Error) -> io::Error {
    io::Error::other(format!("csv error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn product(name: &str, url: &str) -> ProductRecord {
        ProductRecord {
            no: 0,
            name: name.to_string(),
            brand: "Fresh Farms".to_string(),
            price: "$2.99".to_string(),
            image_url: "https://img.example.com/p.jpg".to_string(),
            url: url.to_string(),
            description: "Pantry staple".to_string(),
        }
    }

    #[test]
    fn test_open_without_snapshot_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path().join("products.csv")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_assigns_sequential_row_numbers() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path().join("products.csv")).unwrap();
        let stored = store
            .append(vec![
                product("Milk", "https://shop.example.com/milk"),
                product("Bread", "https://shop.example.com/bread"),
            ])
            .unwrap();
        assert_eq!(stored[0].no, 1);
        assert_eq!(stored[1].no, 2);

        let more = store
            .append(vec![product("Eggs", "https://shop.example.com/eggs")])
            .unwrap();
        assert_eq!(more[0].no, 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        {
            let store = CatalogStore::open(&path).unwrap();
            store
                .append(vec![product("Milk", "https://shop.example.com/milk")])
                .unwrap();
        }
        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.products()[0].name, "Milk");
        assert_eq!(reopened.products()[0].no, 1);

        let next = reopened
            .append(vec![product("Bread", "https://shop.example.com/bread")])
            .unwrap();
        assert_eq!(next[0].no, 2);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(
            &path,
            "No,Product Name,Brand,Price,Image URL,Product URL,Description\n\
             1,Milk,Dairyland,$4.99,https://img.example.com/1.jpg,https://shop.example.com/milk,Whole milk\n\
             not-a-number,Broken,X,$0.00,img,url,desc\n\
             2,Bread,BakeHouse,$3.49,https://img.example.com/2.jpg,https://shop.example.com/bread,Sourdough\n",
        )
        .unwrap();
        let products = load_catalog(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Milk");
        assert_eq!(products[1].name, "Bread");
    }

    #[test]
    fn test_legacy_six_column_snapshot_upgrades_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(
            &path,
            "No,Product Name,Brand,Price,Image URL,Product URL\n\
             1,Milk,Dairyland,$4.99,https://img.example.com/1.jpg,https://shop.example.com/milk\n",
        )
        .unwrap();
        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].description, "");

        let upgraded = fs::read_to_string(&path).unwrap();
        assert!(upgraded.lines().next().unwrap().contains("Description"));

        // Appends after the upgrade line up with the new header.
        store
            .append(vec![product("Bread", "https://shop.example.com/bread")])
            .unwrap();
        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.products()[1].description, "Pantry staple");
    }

    #[test]
    fn test_header_only_legacy_snapshot_upgrades_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(&path, "No,Product Name,Brand,Price,Image URL,Product URL\n").unwrap();
        let store = CatalogStore::open(&path).unwrap();
        assert!(store.is_empty());

        // Appends must not land under the stale six-column header.
        store
            .append(vec![product("Milk", "https://shop.example.com/milk")])
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.lines().next().unwrap().contains("Description"));

        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.products()[0].description, "Pantry staple");
    }

    #[test]
    fn test_append_to_empty_file_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(&path, "").unwrap();
        let store = CatalogStore::open(&path).unwrap();
        assert!(store.is_empty());

        store
            .append(vec![product("Milk", "https://shop.example.com/milk")])
            .unwrap();
        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.products()[0].name, "Milk");
    }

    #[test]
    fn test_save_catalog_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        let mut rows = vec![product("Milk", "https://shop.example.com/milk")];
        rows[0].no = 1;
        save_catalog(&path, &rows).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, rows);
        assert!(!path.with_extension("csv.tmp").exists());
    }
}
