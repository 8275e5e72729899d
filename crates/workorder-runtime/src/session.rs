use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use workorder_core::{Edit, LineLimits, ValidationError, WorkOrder};

/// Owner of the current work order snapshot.
pub struct Session {
    order: WorkOrder,
    limits: LineLimits,
    generating: Arc<AtomicBool>,
}

impl Session {
    pub fn new(order: WorkOrder, limits: LineLimits) -> Self {
        Self {
            order,
            limits,
            generating: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn order(&self) -> &WorkOrder {
        &self.order
    }

    pub fn limits(&self) -> &LineLimits {
        &self.limits
    }

    /// Apply an edit. On refusal the snapshot stays as it was.
    pub fn apply(&mut self, edit: Edit) -> Result<&WorkOrder, ValidationError> {
        self.order = self.order.apply(edit, &self.limits)?;
        Ok(&self.order)
    }

    pub fn replace(&mut self, order: WorkOrder) {
        self.order = order;
    }

    pub fn reset(&mut self) {
        self.order = WorkOrder::new();
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// Mark a generation as started. Returns `None` when one is already
    /// running; the flag clears when the returned guard is dropped.
    pub fn try_begin_generation(&self) -> Option<GenerationGuard> {
        self.generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GenerationGuard {
                flag: Arc::clone(&self.generating),
            })
    }
}

/// Holds the in-flight flag of a [`Session`] while a report is generated.
#[derive(Debug)]
pub struct GenerationGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
