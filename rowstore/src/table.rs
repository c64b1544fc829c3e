use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use crate::error::TableError;

pub type ScannerId = i32;

/// Cells of a single row, keyed by `family:qualifier`.
pub type Row = BTreeMap<String, Vec<u8>>;

/// Schema of one column family. Only `name` affects how data is stored here;
/// the tuning fields are kept so clients can read back what they asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamily {
    pub name: String,
    pub block_size: u32,
    pub max_versions: u32,
    pub in_memory: bool,
    pub block_cache: bool,
    pub compression: String,
    pub bloom_filter: String,
}

impl ColumnFamily {
    /// Family with a single version, no block cache, no compression and no bloom filter.
    pub fn new(name: impl Into<String>, block_size: u32) -> Self {
        Self {
            name: name.into(),
            block_size,
            max_versions: 1,
            in_memory: false,
            block_cache: false,
            compression: "NONE".into(),
            bloom_filter: "NONE".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub column: String,
    pub value: Vec<u8>,
}

impl Mutation {
    pub fn put(column: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowResult {
    pub row: String,
    pub cells: Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableOutcome {
    Disabled,
    AlreadyDisabled,
}

#[derive(Debug)]
struct Table {
    families: Vec<ColumnFamily>,
    enabled: bool,
    rows: BTreeMap<String, Row>,
}

impl Table {
    fn has_family(&self, family: &str) -> bool {
        self.families.iter().any(|cf| cf.name == family)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnSelector {
    Family(String),
    Column(String),
}

impl ColumnSelector {
    fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((family, "")) => ColumnSelector::Family(family.to_string()),
            Some(_) => ColumnSelector::Column(raw.to_string()),
            None => ColumnSelector::Family(raw.to_string()),
        }
    }

    fn matches(&self, column: &str) -> bool {
        match self {
            ColumnSelector::Column(name) => name == column,
            ColumnSelector::Family(family) => column
                .split_once(':')
                .is_some_and(|(cf, _)| cf == family),
        }
    }
}

#[derive(Debug)]
struct Scanner {
    table: String,
    resume: Bound<String>,
    // Empty selects every column.
    selectors: Vec<ColumnSelector>,
}

impl Scanner {
    fn project(&self, row: &Row) -> Row {
        if self.selectors.is_empty() {
            return row.clone();
        }
        row.iter()
            .filter(|(column, _)| self.selectors.iter().any(|s| s.matches(column)))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect()
    }
}

/// In-memory tables with HBase-style enable/disable lifecycle and
/// server-side scan cursors.
#[derive(Debug, Default)]
pub struct TableStore {
    tables: BTreeMap<String, Table>,
    scanners: HashMap<ScannerId, Scanner>,
    next_scanner: ScannerId,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn create_table(
        &mut self,
        name: &str,
        families: Vec<ColumnFamily>,
    ) -> Result<(), TableError> {
        if name.is_empty() || name.contains(':') {
            return Err(TableError::InvalidTableName(name.to_string()));
        }
        if self.tables.contains_key(name) {
            return Err(TableError::TableExists(name.to_string()));
        }
        if families.is_empty() {
            return Err(TableError::NoColumnFamilies(name.to_string()));
        }
        for (idx, cf) in families.iter().enumerate() {
            if cf.name.is_empty() || cf.name.contains(':') {
                return Err(TableError::InvalidFamilyName(cf.name.clone()));
            }
            if families[..idx].iter().any(|other| other.name == cf.name) {
                return Err(TableError::DuplicateFamily(cf.name.clone()));
            }
        }

        self.tables.insert(
            name.to_string(),
            Table {
                families,
                enabled: true,
                rows: BTreeMap::new(),
            },
        );
        Ok(())
    }

    pub fn column_descriptors(&self, name: &str) -> Result<Vec<ColumnFamily>, TableError> {
        Ok(self.table(name)?.families.clone())
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool, TableError> {
        Ok(self.table(name)?.enabled)
    }

    pub fn enable_table(&mut self, name: &str) -> Result<(), TableError> {
        self.table_mut(name)?.enabled = true;
        Ok(())
    }

    pub fn disable_table(&mut self, name: &str) -> Result<DisableOutcome, TableError> {
        let table = self.table_mut(name)?;
        if !table.enabled {
            return Ok(DisableOutcome::AlreadyDisabled);
        }
        table.enabled = false;
        Ok(DisableOutcome::Disabled)
    }

    pub fn delete_table(&mut self, name: &str) -> Result<(), TableError> {
        if self.table(name)?.enabled {
            return Err(TableError::TableNotDisabled(name.to_string()));
        }
        self.tables.remove(name);
        self.scanners.retain(|_, scanner| scanner.table != name);
        Ok(())
    }

    /// Applies every mutation or none of them.
    pub fn mutate_row(
        &mut self,
        name: &str,
        row: &str,
        mutations: Vec<Mutation>,
    ) -> Result<(), TableError> {
        let table = self.enabled_table_mut(name)?;
        for mutation in &mutations {
            let (family, _) = mutation
                .column
                .split_once(':')
                .ok_or_else(|| TableError::InvalidColumn(mutation.column.clone()))?;
            if !table.has_family(family) {
                return Err(TableError::UnknownFamily {
                    table: name.to_string(),
                    family: family.to_string(),
                });
            }
        }
        if mutations.is_empty() {
            return Ok(());
        }

        let cells = table.rows.entry(row.to_string()).or_default();
        for Mutation { column, value } in mutations {
            cells.insert(column, value);
        }
        Ok(())
    }

    pub fn delete_all_row(&mut self, name: &str, row: &str) -> Result<(), TableError> {
        self.enabled_table_mut(name)?.rows.remove(row);
        Ok(())
    }

    /// Opens a cursor positioned at `start_row` (empty for the first row),
    /// restricted to `columns` (`family`, `family:` or `family:qualifier`).
    pub fn scanner_open(
        &mut self,
        name: &str,
        start_row: &str,
        columns: &[String],
    ) -> Result<ScannerId, TableError> {
        let table = self.table(name)?;
        if !table.enabled {
            return Err(TableError::TableNotEnabled(name.to_string()));
        }

        let id = self.allocate_scanner_id();
        let resume = if start_row.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_row.to_string())
        };
        self.scanners.insert(
            id,
            Scanner {
                table: name.to_string(),
                resume,
                selectors: columns
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(|c| ColumnSelector::parse(c))
                    .collect(),
            },
        );
        Ok(id)
    }

    /// Returns up to `count` rows past the cursor. Rows without a matching
    /// column are skipped. An empty result means the scan is exhausted.
    pub fn scanner_get_list(
        &mut self,
        id: ScannerId,
        count: i32,
    ) -> Result<Vec<RowResult>, TableError> {
        if count <= 0 {
            return Err(TableError::InvalidFetchSize(count));
        }
        let scanner = self
            .scanners
            .get_mut(&id)
            .ok_or(TableError::UnknownScanner(id))?;
        let table = self
            .tables
            .get(&scanner.table)
            .ok_or_else(|| TableError::TableNotFound(scanner.table.clone()))?;
        if !table.enabled {
            return Err(TableError::TableNotEnabled(scanner.table.clone()));
        }

        let mut out = Vec::new();
        for (key, row) in table.rows.range((scanner.resume.clone(), Bound::Unbounded)) {
            let cells = scanner.project(row);
            if cells.is_empty() {
                continue;
            }
            out.push(RowResult {
                row: key.clone(),
                cells,
            });
            if out.len() == count as usize {
                break;
            }
        }

        if let Some(last) = out.last() {
            scanner.resume = Bound::Excluded(last.row.clone());
        }
        Ok(out)
    }

    pub fn scanner_close(&mut self, id: ScannerId) -> Result<(), TableError> {
        self.scanners
            .remove(&id)
            .map(|_| ())
            .ok_or(TableError::UnknownScanner(id))
    }

    pub fn open_scanners(&self) -> usize {
        self.scanners.len()
    }

    /// Next free id. Ids wrap around but never reuse one that is still open.
    fn allocate_scanner_id(&mut self) -> ScannerId {
        loop {
            let id = self.next_scanner;
            self.next_scanner = self.next_scanner.wrapping_add(1);
            if !self.scanners.contains_key(&id) {
                return id;
            }
        }
    }

    fn table(&self, name: &str) -> Result<&Table, TableError> {
        self.tables
            .get(name)
            .ok_or_else(|| TableError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, TableError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| TableError::TableNotFound(name.to_string()))
    }

    fn enabled_table_mut(&mut self, name: &str) -> Result<&mut Table, TableError> {
        let table = self.table_mut(name)?;
        if !table.enabled {
            return Err(TableError::TableNotEnabled(name.to_string()));
        }
        Ok(table)
    }
}
