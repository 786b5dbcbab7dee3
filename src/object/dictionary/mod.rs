//! Sorted table of entries addressed by (index, sub-index).
use crate::error::ObjError;
use crate::object::entry::ObjEntry;
use crate::object::notify::NodeContext;

/// Object dictionary view over caller-owned entries.
///
/// Entries must be strictly ascending by `(index, sub)`; lookups use binary search.
pub struct ObjDict<'d, 'a> {
    entries: &'d mut [ObjEntry<'a>],
}

impl<'d, 'a> ObjDict<'d, 'a> {
    /// Wrap `entries`, checking the ordering.
    ///
    /// # Errors
    ///
    /// [`ObjError::Unsorted`] naming the first entry that is out of order or duplicated.
    pub fn new(entries: &'d mut [ObjEntry<'a>]) -> Result<Self, ObjError> {
        if let Some(pair) = entries
            .windows(2)
            .find(|pair| address(&pair[0]) >= address(&pair[1]))
        {
            let key = pair[1].key();
            #[cfg(feature = "defmt")]
            defmt::error!("Dictionary unsorted at {=u16:#x}:{=u8}", key.index(), key.sub());
            return Err(ObjError::Unsorted {
                index: key.index(),
                sub: key.sub(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjEntry<'a>> {
        self.entries.iter()
    }

    fn position(&self, index: u16, sub: u8) -> Result<usize, ObjError> {
        self.entries
            .binary_search_by_key(&(index, sub), address)
            .map_err(|_| ObjError::NotFound { index, sub })
    }

    pub fn find(&self, index: u16, sub: u8) -> Result<&ObjEntry<'a>, ObjError> {
        let pos = self.position(index, sub)?;
        Ok(&self.entries[pos])
    }

    pub fn find_mut(&mut self, index: u16, sub: u8) -> Result<&mut ObjEntry<'a>, ObjError> {
        let pos = self.position(index, sub)?;
        Ok(&mut self.entries[pos])
    }

    /// Run every descriptor's `init`; stops at the first failure.
    pub fn init_all(&self, node: &NodeContext<'_>) -> Result<(), ObjError> {
        self.entries.iter().try_for_each(|entry| entry.init(node))
    }

    pub fn read(
        &self,
        node: &NodeContext<'_>,
        index: u16,
        sub: u8,
        buffer: &mut [u8],
    ) -> Result<(), ObjError> {
        self.find(index, sub)?.read(node, buffer)
    }

    pub fn write(
        &mut self,
        node: &NodeContext<'_>,
        index: u16,
        sub: u8,
        buffer: &[u8],
    ) -> Result<(), ObjError> {
        self.find_mut(index, sub)?.write(node, buffer)
    }
}

fn address(entry: &ObjEntry<'_>) -> (u16, u8) {
    let key = entry.key();
    (key.index(), key.sub())
}
