//! Shared offset pagination helpers.

use serde::{Deserialize, Serialize};

/// Largest page size a caller may request; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Field a post listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Ordering of a post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn created_desc() -> Self {
        Self::new(SortField::CreatedAt, SortDirection::Desc)
    }

    /// Stable token used in cache keys. Fixed casing and separator so two
    /// requests with the same logical ordering produce byte-identical keys.
    pub fn as_key(&self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::CreatedAt, SortDirection::Desc) => "created_at.desc",
            (SortField::CreatedAt, SortDirection::Asc) => "created_at.asc",
            (SortField::UpdatedAt, SortDirection::Desc) => "updated_at.desc",
            (SortField::UpdatedAt, SortDirection::Asc) => "updated_at.asc",
            (SortField::Title, SortDirection::Desc) => "title.desc",
            (SortField::Title, SortDirection::Asc) => "title.asc",
        }
    }
}

/// A page request with a zero-based page index and a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: SortSpec,
}

impl PageRequest {
    /// Build a request, clamping the size into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32, sort: SortSpec) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, SortSpec::default())
    }
}

/// One page of results plus its envelope metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Build a page envelope; `total_pages` is `ceil(total_elements / page_size)`,
    /// zero when there are no elements.
    pub fn new(items: Vec<T>, page_number: u32, page_size: u32, total_elements: u64) -> Self {
        debug_assert!(page_size > 0);
        debug_assert!(items.len() as u64 <= u64::from(page_size));
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(page_size)) as u32
        };
        Self {
            items,
            page_number,
            page_size,
            total_elements,
            total_pages,
            first: page_number == 0,
            last: total_pages == 0 || page_number + 1 >= total_pages,
        }
    }

    /// Map the page's items, keeping the envelope intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}
