//! Little-endian f32 vector blobs.

use cbie_core::errors::StorageError;

pub fn encode_vector(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn decode_vector(id: &str, bytes: &[u8]) -> Result<Vec<f32>, StorageError> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::CorruptRecord {
            id: id.to_string(),
            reason: format!("vector blob of {} bytes is not a multiple of 4", bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
