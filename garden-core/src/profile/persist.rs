//! Profile persistence
//!
//! The whole profile set lives in one erase unit:
//!
//! ```text
//! [A5 5A A5 5A][active index, u32 LE][postcard-encoded profiles][0xFF padding]
//! ```
//!
//! Saving erases the unit and programs the full image. A save interrupted
//! between erase and program leaves no magic, which reads back as "no data".

use crate::traits::storage::{NonVolatileStore, StoreError, REGION_SIZE};

use super::{Profile, ProfileSet, PROFILE_COUNT};

/// Marker at the start of a valid image
pub const MAGIC: [u8; 4] = [0xA5, 0x5A, 0xA5, 0x5A];

/// Magic plus active index
const HEADER_LEN: usize = 8;

/// Errors from saving profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Output buffer too small for the encoded set
    BufferTooSmall,
    /// Serialization failed
    Encode,
    /// Storage operation failed
    Store(StoreError),
}

impl From<StoreError> for PersistError {
    fn from(e: StoreError) -> Self {
        PersistError::Store(e)
    }
}

/// Encode a profile set into `buf`
///
/// Returns the number of meaningful bytes. Bytes after that are left
/// untouched, so callers fill `buf` with `0xFF` first to get an erased-flash
/// image.
pub fn encode_image(set: &ProfileSet, buf: &mut [u8]) -> Result<usize, PersistError> {
    if buf.len() < HEADER_LEN {
        return Err(PersistError::BufferTooSmall);
    }

    buf[..4].copy_from_slice(&MAGIC);
    buf[4..HEADER_LEN].copy_from_slice(&(set.active_index() as u32).to_le_bytes());

    let body = postcard::to_slice(&set.profiles, &mut buf[HEADER_LEN..]).map_err(|e| match e {
        postcard::Error::SerializeBufferFull => PersistError::BufferTooSmall,
        _ => PersistError::Encode,
    })?;

    Ok(HEADER_LEN + body.len())
}

/// Decode and validate an image
///
/// Returns `None` if the magic is missing, the body does not decode, or any
/// field is out of range. An out-of-range active index is not fatal and
/// selects the first profile instead.
pub fn decode_image(bytes: &[u8]) -> Option<ProfileSet> {
    if bytes.len() < HEADER_LEN || bytes[..4] != MAGIC {
        return None;
    }

    let mut index = [0u8; 4];
    index.copy_from_slice(&bytes[4..HEADER_LEN]);
    let active = u32::from_le_bytes(index) as usize;

    let profiles: [Profile; PROFILE_COUNT] = postcard::from_bytes(&bytes[HEADER_LEN..]).ok()?;
    if !profiles.iter().all(Profile::is_valid) {
        return None;
    }

    Some(ProfileSet::new(profiles, active))
}

/// Write the profile set to the store
pub fn save<S: NonVolatileStore>(store: &mut S, set: &ProfileSet) -> Result<(), PersistError> {
    let mut image = [0xFFu8; REGION_SIZE];
    encode_image(set, &mut image)?;

    store.erase_unit(0)?;
    store.program(0, &image)?;
    Ok(())
}

/// Read the profile set from the store
///
/// Read failures and invalid data both yield `None`.
pub fn load<S: NonVolatileStore>(store: &mut S) -> Option<ProfileSet> {
    let mut image = [0u8; REGION_SIZE];
    store.read_bytes(0, &mut image).ok()?;
    decode_image(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Period;

    /// In-memory erase unit
    struct MemStore {
        data: [u8; REGION_SIZE],
        fail_program: bool,
        erases: usize,
    }

    impl MemStore {
        fn erased() -> Self {
            Self {
                data: [0xFF; REGION_SIZE],
                fail_program: false,
                erases: 0,
            }
        }
    }

    impl NonVolatileStore for MemStore {
        fn erase_unit(&mut self, offset: u32) -> Result<(), StoreError> {
            if offset != 0 {
                return Err(StoreError::OutOfBounds);
            }
            self.erases += 1;
            self.data = [0xFF; REGION_SIZE];
            Ok(())
        }

        fn program(&mut self, offset: u32, bytes: &[u8]) -> Result<(), StoreError> {
            if self.fail_program {
                return Err(StoreError::Flash);
            }
            let start = offset as usize;
            let end = start + bytes.len();
            if end > REGION_SIZE {
                return Err(StoreError::OutOfBounds);
            }
            self.data[start..end].copy_from_slice(bytes);
            Ok(())
        }

        fn read_bytes(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
            let start = offset as usize;
            let end = start + buf.len();
            if end > REGION_SIZE {
                return Err(StoreError::OutOfBounds);
            }
            buf.copy_from_slice(&self.data[start..end]);
            Ok(())
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemStore::erased();
        let mut set = ProfileSet::factory();
        set.set_active(3);
        set.profiles[3].periods[0] = Period::new(120, 55, 20);

        save(&mut store, &set).unwrap();
        assert_eq!(store.erases, 1);
        assert_eq!(store.data[..4], MAGIC);
        assert_eq!(store.data[4..8], [3, 0, 0, 0]);
        assert_eq!(store.data[REGION_SIZE - 1], 0xFF);

        assert_eq!(load(&mut store), Some(set));
    }

    #[test]
    fn test_erased_region_is_empty() {
        let mut store = MemStore::erased();
        assert_eq!(load(&mut store), None);
    }

    #[test]
    fn test_zeroed_region_is_empty() {
        assert_eq!(decode_image(&[0u8; REGION_SIZE]), None);
    }

    #[test]
    fn test_short_image_rejected() {
        assert_eq!(decode_image(&MAGIC), None);
    }

    #[test]
    fn test_out_of_range_active_index_resets() {
        let mut image = [0xFFu8; REGION_SIZE];
        encode_image(&ProfileSet::factory(), &mut image).unwrap();
        image[4..8].copy_from_slice(&7u32.to_le_bytes());

        let set = decode_image(&image).unwrap();
        assert_eq!(set.active_index(), 0);
        assert_eq!(set.profiles, ProfileSet::factory().profiles);
    }

    #[test]
    fn test_out_of_range_power_rejected() {
        let mut set = ProfileSet::factory();
        set.profiles[1].periods[2].blue = 101;

        let mut image = [0xFFu8; REGION_SIZE];
        encode_image(&set, &mut image).unwrap();
        assert_eq!(decode_image(&image), None);
    }

    #[test]
    fn test_out_of_range_duration_rejected() {
        let mut set = ProfileSet::factory();
        set.profiles[4].periods[5].duration_minutes = 1441;

        let mut image = [0xFFu8; REGION_SIZE];
        encode_image(&set, &mut image).unwrap();
        assert_eq!(decode_image(&image), None);
    }

    #[test]
    fn test_truncated_body_rejected() {
        let mut image = [0xFFu8; REGION_SIZE];
        let len = encode_image(&ProfileSet::factory(), &mut image).unwrap();
        assert_eq!(decode_image(&image[..len - 1]), None);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 16];
        assert_eq!(
            encode_image(&ProfileSet::factory(), &mut buf),
            Err(PersistError::BufferTooSmall)
        );
    }

    #[test]
    fn test_program_failure_reported() {
        let mut store = MemStore::erased();
        store.fail_program = true;
        assert_eq!(
            save(&mut store, &ProfileSet::factory()),
            Err(PersistError::Store(StoreError::Flash))
        );
        assert_eq!(load(&mut store), None);
    }
}
