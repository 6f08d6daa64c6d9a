use std::collections::HashMap;

/// One row of the region-name table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionRecord {
    pub id: u32,
    pub name: String,
    pub code: String,
}

/// Region id to name, and short code to region id.
///
/// Later records overwrite earlier ones on id or code collision.
#[derive(Clone, Debug, Default)]
pub struct LookupTable {
    names: HashMap<u32, String>,
    ids: HashMap<String, u32>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge records into the table in order
    pub fn extend(&mut self, records: impl IntoIterator<Item = RegionRecord>) {
        for record in records {
            let code = normalize_code(&record.code);
            if !code.is_empty() {
                self.ids.insert(code, record.id);
            }
            self.names.insert(record.id, record.name);
        }
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn id_for_code(&self, code: &str) -> Option<u32> {
        self.ids.get(&normalize_code(code)).copied()
    }

    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        self.id_for_code(code).and_then(|id| self.name(id))
    }

    /// Resolve the trailing `", XX"` code of a place description,
    /// e.g. `"12km NE of Ridgecrest, CA"`
    pub fn region_for_place(&self, place: &str) -> Option<&str> {
        let (_, code) = place.rsplit_once(',')?;
        self.name_for_code(code)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
