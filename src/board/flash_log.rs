//! Event log on the nRF52840's internal flash.
//!
//! Uses `sequential-storage`'s queue: every appended line is one queue
//! item, so the on-flash order is the write order and nothing is ever
//! rewritten in place. The queue never overwrites old items; once the
//! region is full, appends fail with `StorageError::Full`.
//!
//! `sequential-storage` is async. The flash behind it is the blocking NVMC
//! wrapped in `BlockingAsync`, so every future completes on its first poll
//! and `block_on` just drives it inline.

use core::ops::Range;

use embassy_futures::block_on;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::queue;
use tally::config::{MAX_RECORD_LEN, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use tally::{LogStore, StorageError};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::FullStorage => StorageError::Full,
        sequential_storage::Error::ItemTooBig => StorageError::RecordTooLong,
        _ => StorageError::Io,
    }
}

pub struct FlashLogStore<F> {
    flash: F,
    cache: NoCache,
}

impl<F: NorFlash> FlashLogStore<F> {
    pub fn new(flash: F) -> Self {
        Self {
            flash,
            cache: NoCache::new(),
        }
    }
}

impl<F: NorFlash> LogStore for FlashLogStore<F> {
    /// The log exists once its header item is on flash.
    fn exists(&mut self) -> Result<bool, StorageError> {
        let mut buf = [0u8; MAX_RECORD_LEN];
        block_on(queue::peek(
            &mut self.flash,
            flash_range(),
            &mut self.cache,
            &mut buf,
        ))
        .map(|item| item.is_some())
        .map_err(storage_error)
    }

    fn create(&mut self, initial: &[u8]) -> Result<(), StorageError> {
        block_on(sequential_storage::erase_all(&mut self.flash, flash_range()))
            .map_err(storage_error)?;
        self.cache = NoCache::new();
        block_on(queue::push(
            &mut self.flash,
            flash_range(),
            &mut self.cache,
            initial,
            false,
        ))
        .map_err(storage_error)
    }

    fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        block_on(queue::push(
            &mut self.flash,
            flash_range(),
            &mut self.cache,
            bytes,
            false,
        ))
        .map_err(storage_error)
    }

    fn read_all(&mut self, sink: &mut dyn FnMut(&[u8])) -> Result<(), StorageError> {
        block_on(async {
            let mut items = queue::iter(&mut self.flash, flash_range(), &mut self.cache).await?;
            let mut buf = [0u8; MAX_RECORD_LEN];
            while let Some(item) = items.next(&mut buf).await? {
                sink(&item);
            }
            Ok::<(), sequential_storage::Error<F::Error>>(())
        })
        .map_err(storage_error)
    }
}
