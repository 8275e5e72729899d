//! Edit transitions
//!
//! Each [`Edit`] is one user action on the form. [`WorkOrder::apply`] turns
//! a snapshot plus an edit into the next snapshot, or refuses the edit with a
//! [`ValidationError`] when it would break a line budget.

use crate::estimate::ContentLines;
use crate::limits::LineLimits;
use crate::model::{LineItem, LineItemId, Photo, Signature, SignatureRole, WorkOrder};
use crate::types::ValidationError;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetDateTime(NaiveDateTime),
    SetServiceUnit(String),
    SetContactPerson(String),
    SetContactPhone(String),
    SetTasks(String),
    SetStatus(String),
    SetRemarks(String),
    AddLineItem,
    RemoveLineItem(LineItemId),
    SetItemName {
        id: LineItemId,
        name: String,
    },
    SetQuantity {
        id: LineItemId,
        quantity: u32,
    },
    SetSerialNumber {
        id: LineItemId,
        index: usize,
        value: String,
    },
    AddPhoto(Photo),
    RemovePhoto(usize),
    SaveSignature {
        role: SignatureRole,
        signature: Signature,
    },
    ClearSignature(SignatureRole),
}

impl WorkOrder {
    /// Apply `edit` and return the resulting snapshot.
    ///
    /// An edit is refused only when it pushes a combined line count over its
    /// limit; edits that shrink an already oversized block still go through.
    pub fn apply(&self, edit: Edit, limits: &LineLimits) -> Result<WorkOrder, ValidationError> {
        let before = ContentLines::measure(self, limits.avg_chars_per_line);

        let mut next = self.clone();
        next.transition(edit, limits)?;

        let after = ContentLines::measure(&next, limits.avg_chars_per_line);
        check_growth(
            before.tasks_status(),
            after.tasks_status(),
            limits.tasks_status_limit,
        )
        .map_err(|lines| ValidationError::TasksStatusLimit {
            lines,
            limit: limits.tasks_status_limit,
        })?;
        check_growth(
            before.products_remarks(),
            after.products_remarks(),
            limits.products_remarks_limit,
        )
        .map_err(|lines| ValidationError::ProductsRemarksLimit {
            lines,
            limit: limits.products_remarks_limit,
        })?;

        Ok(next)
    }

    /// Apply a sequence of edits, stopping at the first refusal.
    pub fn apply_all(
        &self,
        edits: impl IntoIterator<Item = Edit>,
        limits: &LineLimits,
    ) -> Result<WorkOrder, ValidationError> {
        edits
            .into_iter()
            .try_fold(self.clone(), |order, edit| order.apply(edit, limits))
    }

    fn transition(&mut self, edit: Edit, limits: &LineLimits) -> Result<(), ValidationError> {
        match edit {
            Edit::SetDateTime(date_time) => self.date_time = date_time,
            Edit::SetServiceUnit(value) => self.service_unit = value,
            Edit::SetContactPerson(value) => self.contact_person = value,
            Edit::SetContactPhone(value) => self.contact_phone = value,
            Edit::SetTasks(value) => self.tasks = value,
            Edit::SetStatus(value) => self.status = value,
            Edit::SetRemarks(value) => self.remarks = value,
            Edit::AddLineItem => {
                let id = self.allocate_item_id();
                self.line_items.push(LineItem::new(id));
            }
            Edit::RemoveLineItem(id) => {
                let position = self
                    .line_items
                    .iter()
                    .position(|item| item.id() == id)
                    .ok_or(ValidationError::UnknownLineItem(id))?;
                self.line_items.remove(position);
            }
            Edit::SetItemName { id, name } => {
                self.item_mut(id)?.set_name(name);
            }
            Edit::SetQuantity { id, quantity } => {
                if quantity == 0 || quantity > limits.max_quantity {
                    return Err(ValidationError::QuantityOutOfRange {
                        quantity,
                        max: limits.max_quantity,
                    });
                }
                self.item_mut(id)?.set_quantity(quantity);
            }
            Edit::SetSerialNumber { id, index, value } => {
                let slot = self
                    .item_mut(id)?
                    .serial_mut(index)
                    .ok_or(ValidationError::SerialIndexOutOfRange { id, index })?;
                *slot = value;
            }
            Edit::AddPhoto(photo) => self.photos.push(photo),
            Edit::RemovePhoto(index) => {
                if index >= self.photos.len() {
                    return Err(ValidationError::PhotoIndexOutOfRange(index));
                }
                self.photos.remove(index);
            }
            Edit::SaveSignature { role, signature } => {
                *self.signature_slot(role) = Some(signature);
            }
            Edit::ClearSignature(role) => {
                *self.signature_slot(role) = None;
            }
        }
        Ok(())
    }

    fn item_mut(&mut self, id: LineItemId) -> Result<&mut LineItem, ValidationError> {
        self.line_item_mut(id)
            .ok_or(ValidationError::UnknownLineItem(id))
    }
}

fn check_growth(before: usize, after: usize, limit: usize) -> Result<(), usize> {
    if after > limit && after > before {
        Err(after)
    } else {
        Ok(())
    }
}
