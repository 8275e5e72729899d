use bytes::Bytes;
use chrono::{Local, NaiveDateTime};
use crate::limits::LineLimits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a line item, assigned once when the item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub u64);

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product row: a name, a quantity and one serial number per unit.
///
/// `serial_numbers().len() == quantity()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    quantity: u32,
    serial_numbers: Vec<String>,
}

impl LineItem {
    pub(crate) fn new(id: LineItemId) -> Self {
        Self {
            id,
            name: String::new(),
            quantity: 1,
            serial_numbers: vec![String::new()],
        }
    }

    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn serial_numbers(&self) -> &[String] {
        &self.serial_numbers
    }

    /// An item nobody has filled in; it takes no room in the report.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.serial_numbers.iter().all(|s| s.trim().is_empty())
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Grows with empty serials or truncates from the end.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.serial_numbers.resize(quantity as usize, String::new());
    }

    pub(crate) fn serial_mut(&mut self, index: usize) -> Option<&mut String> {
        self.serial_numbers.get_mut(index)
    }

    /// Clamp the quantity into `1..=max_quantity` and size the serials to it.
    pub(crate) fn normalize(&mut self, max_quantity: u32) {
        let quantity = self.quantity.clamp(1, max_quantity.max(1));
        if quantity != self.quantity {
            log::warn!(
                "Line item {}: quantity {} out of range, using {}",
                self.id,
                self.quantity,
                quantity
            );
        }
        self.quantity = quantity;
        self.serial_numbers.resize(quantity as usize, String::new());
    }
}

/// An uploaded photo. Its position in [`WorkOrder::photos`] decides where it
/// lands in the photo appendix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(with = "crate::payload")]
    pub data: Bytes,
}

impl Photo {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            name: None,
            data: data.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A freehand signature image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "crate::payload")]
    pub data: Bytes,
}

impl Signature {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureRole {
    Customer,
    Technician,
}

impl SignatureRole {
    pub fn label(self) -> &'static str {
        match self {
            SignatureRole::Customer => "Customer",
            SignatureRole::Technician => "Technician",
        }
    }
}

/// The four free-form content blocks of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentField {
    Tasks,
    Status,
    Products,
    Remarks,
}

impl ContentField {
    pub const ALL: [ContentField; 4] = [
        ContentField::Tasks,
        ContentField::Status,
        ContentField::Products,
        ContentField::Remarks,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ContentField::Tasks => "Tasks",
            ContentField::Status => "Status",
            ContentField::Products => "Products",
            ContentField::Remarks => "Remarks",
        }
    }
}

/// A single work order as filled in by a technician.
///
/// Snapshots are immutable from the outside: every change goes through
/// [`WorkOrder::apply`](crate::Edit) and produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub(crate) date_time: NaiveDateTime,
    #[serde(default)]
    pub(crate) service_unit: String,
    #[serde(default)]
    pub(crate) contact_person: String,
    #[serde(default)]
    pub(crate) contact_phone: String,
    #[serde(default)]
    pub(crate) line_items: Vec<LineItem>,
    #[serde(default)]
    pub(crate) tasks: String,
    #[serde(default)]
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) remarks: String,
    #[serde(default)]
    pub(crate) photos: Vec<Photo>,
    #[serde(default)]
    pub(crate) customer_signature: Option<Signature>,
    #[serde(default)]
    pub(crate) technician_signature: Option<Signature>,
    #[serde(default)]
    pub(crate) next_item_id: u64,
}

impl Default for WorkOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkOrder {
    /// A fresh order stamped with the current local time and one empty item.
    pub fn new() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(date_time: NaiveDateTime) -> Self {
        Self {
            date_time,
            service_unit: String::new(),
            contact_person: String::new(),
            contact_phone: String::new(),
            line_items: vec![LineItem::new(LineItemId(1))],
            tasks: String::new(),
            status: String::new(),
            remarks: String::new(),
            photos: Vec::new(),
            customer_signature: None,
            technician_signature: None,
            next_item_id: 2,
        }
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    pub fn service_unit(&self) -> &str {
        &self.service_unit
    }

    pub fn contact_person(&self) -> &str {
        &self.contact_person
    }

    pub fn contact_phone(&self) -> &str {
        &self.contact_phone
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    pub fn tasks(&self) -> &str {
        &self.tasks
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn signature(&self, role: SignatureRole) -> Option<&Signature> {
        match role {
            SignatureRole::Customer => self.customer_signature.as_ref(),
            SignatureRole::Technician => self.technician_signature.as_ref(),
        }
    }

    /// Free text of a text field. `Products` has no free text and yields `""`.
    pub fn text(&self, field: ContentField) -> &str {
        match field {
            ContentField::Tasks => &self.tasks,
            ContentField::Status => &self.status,
            ContentField::Remarks => &self.remarks,
            ContentField::Products => "",
        }
    }

    pub(crate) fn allocate_item_id(&mut self) -> LineItemId {
        let id = LineItemId(self.next_item_id.max(1));
        self.next_item_id = id.0 + 1;
        id
    }

    pub(crate) fn line_item_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.line_items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn signature_slot(&mut self, role: SignatureRole) -> &mut Option<Signature> {
        match role {
            SignatureRole::Customer => &mut self.customer_signature,
            SignatureRole::Technician => &mut self.technician_signature,
        }
    }

    /// Restores invariants on data that did not come through edits
    /// (deserialized drafts).
    pub(crate) fn normalize(&mut self, limits: &LineLimits) {
        let mut seen = std::collections::HashSet::new();
        let mut max_id = 0;
        for item in &self.line_items {
            max_id = max_id.max(item.id.0);
        }
        let mut next = max_id.max(self.next_item_id.saturating_sub(1)) + 1;
        for item in &mut self.line_items {
            item.normalize(limits.max_quantity);
            if item.id.0 == 0 || !seen.insert(item.id) {
                item.id = LineItemId(next);
                seen.insert(item.id);
                next += 1;
            }
        }
        self.next_item_id = next;
    }
}
