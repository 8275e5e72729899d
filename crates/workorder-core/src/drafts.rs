//! Named work order drafts stored as JSON files

use crate::limits::LineLimits;
use crate::model::WorkOrder;
use crate::types::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

const DRAFT_EXTENSION: &str = "json";

/// A directory of drafts, one `<name>.json` file per draft.
///
/// Loaded drafts are brought back within `limits` (quantities clamped).
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
    limits: LineLimits,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limits: LineLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: LineLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `order` under `name`, replacing any draft with the same name.
    pub async fn save(&self, name: &str, order: &WorkOrder) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        let order = order.clone();

        let json =
            tokio::task::spawn_blocking(move || serde_json::to_vec_pretty(&order)).await??;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, json).await?;
        log::debug!("Saved draft {name} to {}", path.display());
        Ok(path)
    }

    /// Load the draft `name`, migrating older layouts on the way.
    pub async fn load(&self, name: &str) -> Result<WorkOrder> {
        let path = self.path_for(name)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DraftError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let limits = self.limits;
        let order = tokio::task::spawn_blocking(move || {
            let mut value: Value = serde_json::from_slice(&bytes)?;
            migrate_draft(&mut value);
            let mut order: WorkOrder = serde_json::from_value(value)?;
            order.normalize(&limits);
            Ok::<_, DraftError>(order)
        })
        .await??;

        Ok(order)
    }

    /// Names of all stored drafts, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DRAFT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DraftError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed.starts_with('.')
            || trimmed.contains(['/', '\\', ':', '\0']);
        if invalid {
            return Err(DraftError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{trimmed}.{DRAFT_EXTENSION}")))
    }
}

/// Rewrite older draft layouts into the current one, in place.
///
/// Line items used to carry a single `serial_number` string and no id. Ids
/// left missing here are assigned when the order is normalized.
pub fn migrate_draft(value: &mut Value) {
    let Some(items) = value
        .get_mut("line_items")
        .and_then(|items| items.as_array_mut())
    else {
        return;
    };

    for item in items.iter_mut() {
        let Some(item) = item.as_object_mut() else {
            continue;
        };

        if !item.contains_key("serial_numbers") {
            let serial = match item.remove("serial_number") {
                Some(Value::String(serial)) => serial,
                _ => String::new(),
            };
            item.insert("serial_numbers".into(), Value::Array(vec![Value::String(serial)]));
        }
        item.entry("id").or_insert(Value::from(0));
        item.entry("name").or_insert(Value::from(""));
        item.entry("quantity").or_insert(Value::from(1));
    }
}
