//! Backend implementation for MemoryStore

use std::io::Read;

use crate::blob::WriteBuffer;
use crate::engine::MemoryStore;
use crate::error::Result;
use crate::key::{Category, Handle};
use crate::listing::CancelToken;

use super::{Backend, Blob, BlobInfo};

impl Blob for WriteBuffer {
    fn size(&self) -> usize {
        WriteBuffer::size(self)
    }

    fn finalize(self: Box<Self>, category: Category, name: &str) -> Result<()> {
        WriteBuffer::finalize(*self, category, name)
    }
}

impl Backend for MemoryStore {
    fn location(&self) -> String {
        MemoryStore::location(self).to_string()
    }

    fn test(&self, category: Category, name: &str) -> Result<bool> {
        Ok(self.exists(category, name))
    }

    fn create(&self) -> Result<Box<dyn Blob>> {
        Ok(Box::new(MemoryStore::create(self)))
    }

    fn get_reader(
        &self,
        category: Category,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<Box<dyn Read + Send>> {
        let reader = self.reader(category, name, offset, length)?;
        Ok(Box::new(reader))
    }

    fn load(&self, handle: &Handle, buf: &mut [u8], offset: u64) -> Result<usize> {
        handle.validate()?;
        self.read_into(handle.category, &handle.name, offset, buf)
    }

    fn stat(&self, handle: &Handle) -> Result<BlobInfo> {
        handle.validate()?;
        let size = MemoryStore::stat(self, handle.category, &handle.name)?;
        Ok(BlobInfo { size })
    }

    fn remove(&self, category: Category, name: &str) -> Result<()> {
        MemoryStore::remove(self, category, name)
    }

    fn list(&self, category: Category, cancel: &CancelToken) -> Box<dyn Iterator<Item = String> + Send> {
        Box::new(MemoryStore::list(self, category, cancel))
    }

    fn delete(&self) -> Result<()> {
        self.reset();
        Ok(())
    }
}
