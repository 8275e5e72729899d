//! Page planning
//!
//! Decides how many pages a report needs and what each page carries.
//! Text content gets one page, or two when the estimated line count is
//! over the total content limit. Photos follow on appendix pages of
//! [`PHOTOS_PER_PAGE`] each, in upload order.

use crate::constants::PHOTOS_PER_PAGE;
use workorder_core::{ContentField, ContentLines, LineLimits, WorkOrder};

/// Fields on the first page of a split report
pub const FIRST_PAGE_FIELDS: [ContentField; 2] = [ContentField::Tasks, ContentField::Status];

/// Fields on the second page of a split report
pub const SECOND_PAGE_FIELDS: [ContentField; 2] = [ContentField::Products, ContentField::Remarks];

/// One planned page
#[derive(Debug, Clone, PartialEq)]
pub enum PageDescriptor {
    Text {
        /// Fields shown on this page, in report order
        fields: Vec<ContentField>,
        /// Carries the order header (date, unit, contact)
        header: bool,
        /// Carries the signature boxes
        signatures: bool,
        page_number: usize,
        total_pages: usize,
    },
    Photos {
        /// Indices into the order's photo list
        photos: Vec<usize>,
        page_number: usize,
        total_pages: usize,
    },
}

impl PageDescriptor {
    /// 1-based page number
    pub fn page_number(&self) -> usize {
        match self {
            PageDescriptor::Text { page_number, .. } | PageDescriptor::Photos { page_number, .. } => {
                *page_number
            }
        }
    }

    pub fn total_pages(&self) -> usize {
        match self {
            PageDescriptor::Text { total_pages, .. } | PageDescriptor::Photos { total_pages, .. } => {
                *total_pages
            }
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, PageDescriptor::Text { .. })
    }
}

/// Ordered page plan for one report
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub pages: Vec<PageDescriptor>,
    /// The estimates the plan was made from
    pub lines: ContentLines,
}

impl PagePlan {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn text_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_text()).count()
    }

    pub fn photo_pages(&self) -> usize {
        self.total_pages() - self.text_pages()
    }

    /// Whether text content was split over two pages
    pub fn is_split(&self) -> bool {
        self.text_pages() > 1
    }
}

/// Plan the pages of a report. Never fails and always yields at least one
/// text page.
pub fn plan(order: &WorkOrder, limits: &LineLimits) -> PagePlan {
    let lines = ContentLines::measure(order, limits.avg_chars_per_line);

    let text_groups: Vec<Vec<ContentField>> = if lines.total() > limits.total_content_limit {
        vec![FIRST_PAGE_FIELDS.to_vec(), SECOND_PAGE_FIELDS.to_vec()]
    } else {
        vec![ContentField::ALL.to_vec()]
    };

    let photo_indices: Vec<usize> = (0..order.photos().len()).collect();
    let photo_chunks: Vec<&[usize]> = photo_indices.chunks(PHOTOS_PER_PAGE).collect();

    let text_count = text_groups.len();
    let total_pages = text_count + photo_chunks.len();

    let mut pages = Vec::with_capacity(total_pages);
    for (i, fields) in text_groups.into_iter().enumerate() {
        pages.push(PageDescriptor::Text {
            fields,
            header: i == 0,
            signatures: i + 1 == text_count,
            page_number: pages.len() + 1,
            total_pages,
        });
    }
    for chunk in photo_chunks {
        pages.push(PageDescriptor::Photos {
            photos: chunk.to_vec(),
            page_number: pages.len() + 1,
            total_pages,
        });
    }

    log::debug!(
        "Planned {} page(s): {} lines of content against a limit of {}, {} photo(s)",
        total_pages,
        lines.total(),
        limits.total_content_limit,
        order.photos().len()
    );

    PagePlan { pages, lines }
}
