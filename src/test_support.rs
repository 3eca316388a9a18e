//! Shared fixtures for unit tests

use anyhow::{Result, bail};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::texture::{Dimensions, ImageTransform};

const MAGIC: &[u8; 4] = b"FAKE";

/// In-memory stand-in for the image library.
///
/// "Images" are the magic bytes followed by little-endian width and height;
/// anything else fails to identify.
#[derive(Debug, Default)]
pub struct FakeTransform {
    identify_calls: AtomicUsize,
    resize_calls: Mutex<Vec<(u32, u32)>>,
}

impl FakeTransform {
    pub fn encode(width: u32, height: u32) -> Vec<u8> {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data
    }

    fn decode(data: &[u8]) -> Result<Dimensions> {
        if data.len() != 12 || &data[..4] != MAGIC {
            bail!("not a fake image");
        }
        let width = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        let height = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        Ok(Dimensions { width, height })
    }

    pub fn identify_calls(&self) -> usize {
        self.identify_calls.load(Ordering::Relaxed)
    }

    pub fn resize_calls(&self) -> Vec<(u32, u32)> {
        self.resize_calls.lock().unwrap().clone()
    }
}

impl ImageTransform for FakeTransform {
    fn identify(&self, data: &[u8]) -> Result<Dimensions> {
        self.identify_calls.fetch_add(1, Ordering::Relaxed);
        Self::decode(data)
    }

    fn resize(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        Self::decode(data)?;
        self.resize_calls.lock().unwrap().push((width, height));
        Ok(Self::encode(width, height))
    }
}
