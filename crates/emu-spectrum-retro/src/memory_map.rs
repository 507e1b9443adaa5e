//! The 64K address space as the host sees it: sixteen 4 KiB pages.

use crate::core::SpectrumCore;

pub const PAGE_SIZE: usize = 0x1000;
pub const PAGE_COUNT: usize = 16;

/// One page of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryDescriptor<'a> {
    pub start: usize,
    pub len: usize,
    /// `None` while nothing is paged in at `start`.
    pub page: Option<&'a [u8]>,
}

/// One descriptor per page, in address order, mapped or not.
pub fn memory_map<C: SpectrumCore>(core: &C) -> [MemoryDescriptor<'_>; PAGE_COUNT] {
    std::array::from_fn(|i| MemoryDescriptor {
        start: i * PAGE_SIZE,
        len: PAGE_SIZE,
        page: core.memory_page(i),
    })
}
