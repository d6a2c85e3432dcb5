//! FIT binary writer for workout files.
//!
//! `fitparser` only decodes, so encoding is done here: file header, one
//! definition record ahead of each data record, and the trailing CRC-16
//! described by the FIT SDK.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};

use super::messages::{FileIdMessage, FitFile, FitMessage, WorkoutMessage, WorkoutStepMessage};
use super::CodecError;

/// FIT epoch offset: FIT timestamps are seconds since 1989-12-31 00:00:00 UTC
const FIT_EPOCH_OFFSET: i64 = 631065600;

/// FIT file header size (14 bytes, header CRC included)
const FIT_HEADER_SIZE: u8 = 14;

/// FIT protocol version
const FIT_PROTOCOL_VERSION: u8 = 0x20; // 2.0

/// FIT profile version (21.00)
const FIT_PROFILE_VERSION: u16 = 2100;

/// Longest string payload that still leaves room for the terminator
const MAX_STRING_BYTES: usize = 254;

/// FIT global message numbers
mod message_type {
    pub const FILE_ID: u16 = 0;
    pub const WORKOUT: u16 = 26;
    pub const WORKOUT_STEP: u16 = 27;
}

/// Local message slots
mod local {
    pub const FILE_ID: u8 = 0;
    pub const WORKOUT: u8 = 1;
    pub const WORKOUT_STEP: u8 = 2;
}

/// FIT base types
mod base_type {
    pub const ENUM: u8 = 0x00;
    pub const STRING: u8 = 0x07;
    pub const UINT16: u8 = 0x84;
    pub const UINT32: u8 = 0x86;
}

/// Invalid values per base type
mod invalid {
    pub const ENUM: u8 = 0xFF;
    pub const UINT16: u16 = 0xFFFF;
    pub const UINT32: u32 = 0xFFFF_FFFF;
}

/// FIT file writer
struct FitWriter {
    buffer: Cursor<Vec<u8>>,
    data_size: u32,
}

impl FitWriter {
    fn new() -> Self {
        Self {
            buffer: Cursor::new(Vec::new()),
            data_size: 0,
        }
    }

    /// Write the FIT file header
    fn write_header(&mut self) -> Result<(), CodecError> {
        self.put(&[FIT_HEADER_SIZE, FIT_PROTOCOL_VERSION])?;
        self.put(&FIT_PROFILE_VERSION.to_le_bytes())?;

        // Data size and header CRC placeholders (patched in finalize)
        self.put(&0u32.to_le_bytes())?;
        self.put(b".FIT")?;
        self.put(&0u16.to_le_bytes())?;

        Ok(())
    }

    /// Write a definition message
    fn write_definition(
        &mut self,
        local_mesg_num: u8,
        global_mesg_num: u16,
        fields: &[(u8, u8, u8)], // (field_def_num, size, base_type)
    ) -> Result<(), CodecError> {
        // Record header: definition message (bit 6 set), local message num in bits 0-3
        self.write_byte(0x40 | (local_mesg_num & 0x0F))?;

        // Reserved, then architecture (0 = little endian)
        self.write_byte(0)?;
        self.write_byte(0)?;

        self.write_u16(global_mesg_num)?;

        let count = u8::try_from(fields.len())
            .map_err(|_| CodecError::Encode("too many fields in definition".into()))?;
        self.write_byte(count)?;

        for (field_num, size, base_type) in fields {
            self.write_byte(*field_num)?;
            self.write_byte(*size)?;
            self.write_byte(*base_type)?;
        }

        Ok(())
    }

    /// Write a data message header
    fn write_data_header(&mut self, local_mesg_num: u8) -> Result<(), CodecError> {
        self.write_byte(local_mesg_num & 0x0F)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), CodecError> {
        self.write_bytes(&[value])
    }

    fn write_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.write_bytes(&value.to_le_bytes())
    }

    fn write_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.write_bytes(&value.to_le_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.put(bytes)?;
        self.data_size += bytes.len() as u32;
        Ok(())
    }

    /// Raw write that does not count towards the data size
    fn put(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.buffer
            .write_all(bytes)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Convert DateTime to FIT timestamp
    fn datetime_to_fit_timestamp(dt: DateTime<Utc>) -> u32 {
        (dt.timestamp() - FIT_EPOCH_OFFSET).clamp(0, u32::MAX as i64 - 1) as u32
    }

    /// Finalize the file (update data size, header CRC, and append CRC)
    fn finalize(self) -> Vec<u8> {
        let data_size = self.data_size;
        let mut data = self.buffer.into_inner();

        data[4..8].copy_from_slice(&data_size.to_le_bytes());

        // Header CRC covers the data size, so it is only known now
        let header_crc = calculate_crc(&data[0..12]);
        data[12..14].copy_from_slice(&header_crc.to_le_bytes());

        let file_crc = calculate_crc(&data[..]);
        data.extend_from_slice(&file_crc.to_le_bytes());

        data
    }
}

/// Calculate CRC-16 for FIT file
pub(crate) fn calculate_crc(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    let crc_table: [u16; 16] = [
        0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
        0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
    ];

    for byte in data {
        let tmp = crc_table[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc = crc ^ tmp ^ crc_table[(*byte & 0xF) as usize];

        let tmp = crc_table[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc = crc ^ tmp ^ crc_table[((*byte >> 4) & 0xF) as usize];
    }

    crc
}

/// NUL-terminated FIT string payload, truncated on a char boundary.
fn fit_string(value: &str) -> Vec<u8> {
    let mut end = value.len().min(MAX_STRING_BYTES);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut bytes = value.as_bytes()[..end].to_vec();
    bytes.push(0);
    bytes
}

/// Encode a message sequence into a complete FIT file.
///
/// The first message must be the `file_id`.
pub fn encode(file: &FitFile) -> Result<Vec<u8>, CodecError> {
    match file.messages.first() {
        Some(FitMessage::FileId(_)) => {}
        Some(_) => {
            return Err(CodecError::Encode(
                "file_id must be the first message".into(),
            ))
        }
        None => return Err(CodecError::Encode("no messages to encode".into())),
    }

    let mut writer = FitWriter::new();
    writer.write_header()?;

    for message in &file.messages {
        match message {
            FitMessage::FileId(id) => write_file_id(&mut writer, id)?,
            FitMessage::Workout(workout) => write_workout(&mut writer, workout)?,
            FitMessage::WorkoutStep(step) => write_workout_step(&mut writer, step)?,
        }
    }

    let bytes = writer.finalize();
    tracing::debug!(
        messages = file.messages.len(),
        bytes = bytes.len(),
        "Encoded FIT file"
    );
    Ok(bytes)
}

/// Write File ID message
fn write_file_id(writer: &mut FitWriter, id: &FileIdMessage) -> Result<(), CodecError> {
    let fields = [
        (0, 1, base_type::ENUM),   // type
        (1, 2, base_type::UINT16), // manufacturer
        (2, 2, base_type::UINT16), // product
        (3, 4, base_type::UINT32), // serial_number
        (4, 4, base_type::UINT32), // time_created
    ];
    writer.write_definition(local::FILE_ID, message_type::FILE_ID, &fields)?;

    writer.write_data_header(local::FILE_ID)?;
    writer.write_byte(id.kind.to_fit())?;
    writer.write_u16(id.manufacturer.unwrap_or(invalid::UINT16))?;
    writer.write_u16(id.product.unwrap_or(invalid::UINT16))?;
    writer.write_u32(id.serial_number.unwrap_or(invalid::UINT32))?;
    writer.write_u32(
        id.time_created
            .map(FitWriter::datetime_to_fit_timestamp)
            .unwrap_or(invalid::UINT32),
    )?;

    Ok(())
}

/// Write Workout message
fn write_workout(writer: &mut FitWriter, workout: &WorkoutMessage) -> Result<(), CodecError> {
    let name = fit_string(&workout.name);
    let fields = [
        (4, 1, base_type::ENUM),                 // sport
        (6, 2, base_type::UINT16),               // num_valid_steps
        (8, name.len() as u8, base_type::STRING), // wkt_name
    ];
    writer.write_definition(local::WORKOUT, message_type::WORKOUT, &fields)?;

    writer.write_data_header(local::WORKOUT)?;
    writer.write_byte(workout.sport.unwrap_or(invalid::ENUM))?;
    writer.write_u16(workout.num_valid_steps.unwrap_or(invalid::UINT16))?;
    writer.write_bytes(&name)?;

    Ok(())
}

/// Write Workout Step message
///
/// Strings change size from step to step, so every step carries its own
/// definition on the same local slot.
fn write_workout_step(
    writer: &mut FitWriter,
    step: &WorkoutStepMessage,
) -> Result<(), CodecError> {
    let name = fit_string(&step.name);
    let notes = fit_string(&step.notes);
    let fields = [
        (254, 2, base_type::UINT16),              // message_index
        (0, name.len() as u8, base_type::STRING), // wkt_step_name
        (1, 1, base_type::ENUM),                  // duration_type
        (2, 4, base_type::UINT32),                // duration_value
        (3, 1, base_type::ENUM),                  // target_type
        (4, 4, base_type::UINT32),                // target_value
        (5, 4, base_type::UINT32),                // custom_target_value_low
        (6, 4, base_type::UINT32),                // custom_target_value_high
        (7, 1, base_type::ENUM),                  // intensity
        (8, notes.len() as u8, base_type::STRING), // notes
    ];
    writer.write_definition(local::WORKOUT_STEP, message_type::WORKOUT_STEP, &fields)?;

    writer.write_data_header(local::WORKOUT_STEP)?;
    writer.write_u16(step.message_index)?;
    writer.write_bytes(&name)?;
    writer.write_byte(step.duration_type.unwrap_or(invalid::ENUM))?;
    writer.write_u32(step.duration_value.unwrap_or(invalid::UINT32))?;
    writer.write_byte(step.target_type.unwrap_or(invalid::ENUM))?;
    writer.write_u32(step.target_value.unwrap_or(invalid::UINT32))?;
    writer.write_u32(step.custom_target_value_low.unwrap_or(invalid::UINT32))?;
    writer.write_u32(step.custom_target_value_high.unwrap_or(invalid::UINT32))?;
    writer.write_byte(step.intensity.unwrap_or(invalid::ENUM))?;
    writer.write_bytes(&notes)?;

    Ok(())
}
