//! Structural verification
//!
//! Walks a buffer against the schema layouts before any field is read:
//! every present inline field must sit inside its table and the buffer,
//! every string must be in bounds and valid UTF-8, every sub-table must
//! itself verify. Slots beyond a known layout are ignored so that newer
//! writers that append fields stay readable.

use crate::decode::table::FlatTable;
use crate::flatbuf::FlatMessage;
use crate::schema::{FieldKind, slots};
use crate::{MessageType, ProtocolError, Result};

/// Deepest sub-table nesting the schema produces is 2; anything past this is hostile
const MAX_DEPTH: usize = 8;

/// Verify a buffer and return the record kind it carries
///
/// # Errors
///
/// - `UnknownMessageType` if the discriminant names no known record
/// - `MissingField("message")` if the envelope has no record table
/// - `InvalidFlatBuffer` / `MessageTooShort` for structural damage
pub fn verify(buf: &[u8]) -> Result<MessageType> {
    let msg = FlatMessage::parse(buf)?;

    // The discriminant itself must lie inside the root table before it is trusted
    verify_table(msg.root(), &[FieldKind::U8], 0)?;

    let raw = msg.raw_message_type();
    let message_type =
        MessageType::from_u8(raw).ok_or(ProtocolError::UnknownMessageType(raw))?;

    let main_layout = [
        FieldKind::U8,
        FieldKind::Table(message_type.layout()),
        FieldKind::U8,
    ];
    verify_table(msg.root(), &main_layout, 0)?;

    if msg.root().field_position(slots::main::MESSAGE).is_none() {
        return Err(ProtocolError::missing_field("message"));
    }

    Ok(message_type)
}

fn verify_table(table: &FlatTable<'_>, layout: &[FieldKind], depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(ProtocolError::invalid_flatbuffer("tables nested too deeply"));
    }

    for (slot, kind) in layout.iter().enumerate() {
        let Some(position) = table.field_position(slot) else {
            continue;
        };

        if position < 4 || position + kind.inline_size() > table.table_size() {
            return Err(ProtocolError::invalid_flatbuffer(format!(
                "field {slot} at {position} outside table of {} bytes",
                table.table_size()
            )));
        }

        match kind {
            FieldKind::Str => {
                table.read_string(slot)?;
            }
            FieldKind::Table(inner) => {
                if let Some(child) = table.read_table(slot)? {
                    verify_table(&child, inner, depth + 1)?;
                }
            }
            FieldKind::U8 | FieldKind::I16 | FieldKind::U32 | FieldKind::U64 | FieldKind::F64 => {}
        }
    }

    Ok(())
}
