//! dBase table decoding.
//!
//! Payroll extracts are dBase III style `.dbf` tables: a 32-byte header, one
//! 32-byte descriptor per column terminated by `0x0D`, then fixed-width
//! records each prefixed by a deletion flag.

use std::io::{self, Read, Write};

use crate::error::{EngineError, EngineResult};
use crate::models::{RawRow, RawValue};

const HEADER_LEN: usize = 32;
const DESCRIPTOR_LEN: usize = 32;
const HEADER_TERMINATOR: u8 = 0x0D;
const END_OF_FILE: u8 = 0x1A;
const DELETED: u8 = b'*';
const ACTIVE: u8 = b' ';

/// Version bytes accepted: dBase III/IV with or without memo, FoxPro, Visual FoxPro.
const SUPPORTED_VERSIONS: &[u8] = &[0x02, 0x03, 0x30, 0x31, 0x83, 0x8B, 0xF5];

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// `C`: space-padded text.
    Character,
    /// `N`: right-aligned decimal text.
    Numeric,
    /// `F`: right-aligned floating point text.
    Float,
    /// `D`: `YYYYMMDD` text.
    Date,
    /// `L`: one of `TtYyFfNn?`.
    Logical,
    /// `I`: little-endian 32-bit integer.
    Integer,
    /// Anything else, kept as text.
    Other(u8),
}

impl FieldType {
    fn from_byte(byte: u8) -> Self {
        match byte {
            b'C' => FieldType::Character,
            b'N' => FieldType::Numeric,
            b'F' => FieldType::Float,
            b'D' => FieldType::Date,
            b'L' => FieldType::Logical,
            b'I' => FieldType::Integer,
            other => FieldType::Other(other),
        }
    }

    fn as_byte(self) -> u8 {
        match self {
            FieldType::Character => b'C',
            FieldType::Numeric => b'N',
            FieldType::Float => b'F',
            FieldType::Date => b'D',
            FieldType::Logical => b'L',
            FieldType::Integer => b'I',
            FieldType::Other(byte) => byte,
        }
    }
}

/// A column descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbfField {
    /// Column code, at most 10 ASCII characters (e.g., "BASIC_P").
    pub name: String,
    /// Storage type.
    pub field_type: FieldType,
    /// Width in bytes.
    pub length: u8,
    /// Digits after the decimal point for numeric columns.
    pub decimal_count: u8,
}

impl DbfField {
    /// Creates a descriptor.
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        length: u8,
        decimal_count: u8,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            length,
            decimal_count,
        }
    }
}

/// The table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbfHeader {
    /// Version byte.
    pub version: u8,
    /// Record count declared by the header, deleted records included.
    pub record_count: u32,
    /// Offset of the first record.
    pub header_length: u16,
    /// Bytes per record, deletion flag included.
    pub record_length: u16,
    /// Column descriptors in table order.
    pub fields: Vec<DbfField>,
}

/// A decoded extract: its header and live rows in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extract {
    /// The table header.
    pub header: DbfHeader,
    /// Rows not flagged as deleted.
    pub rows: Vec<RawRow>,
    /// Number of records skipped because they were flagged as deleted.
    pub deleted: usize,
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidExtract {
        message: message.into(),
    }
}

fn read_exact_or(r: &mut impl Read, buf: &mut [u8], what: &str) -> EngineResult<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => invalid(format!("{} truncated", what)),
        _ => invalid(format!("failed reading {}: {}", what, e)),
    })
}

/// Upper bound on rows reserved up front; the header's record count is not
/// trusted for allocation.
const MAX_PREALLOCATED_ROWS: usize = 1024;

/// Decodes a whole table.
///
/// Deleted records are skipped. Reading stops after the declared record
/// count or at an end-of-file marker, whichever comes first.
///
/// # Returns
///
/// Returns `InvalidExtract` when the version byte is unsupported, the header
/// or a record is truncated, the descriptor list is not terminated, or the
/// columns do not fit the declared record length.
pub fn read_extract(mut r: impl Read) -> EngineResult<Extract> {
    let header = read_header(&mut r)?;

    let mut rows = Vec::with_capacity((header.record_count as usize).min(MAX_PREALLOCATED_ROWS));
    let mut deleted = 0;
    let mut record = vec![0u8; header.record_length as usize];

    for index in 0..header.record_count {
        let mut flag = [0u8; 1];
        match r.read(&mut flag) {
            Ok(0) => return Err(invalid(format!("record {} truncated", index + 1))),
            Ok(_) => {}
            Err(e) => return Err(invalid(format!("failed reading record {}: {}", index + 1, e))),
        }
        if flag[0] == END_OF_FILE {
            break;
        }

        record[0] = flag[0];
        read_exact_or(&mut r, &mut record[1..], &format!("record {}", index + 1))?;

        match record[0] {
            DELETED => deleted += 1,
            _ => rows.push(decode_record(&header.fields, &record[1..])),
        }
    }

    Ok(Extract {
        header,
        rows,
        deleted,
    })
}

/// Decodes the header and column descriptors, leaving `r` at the first record.
pub fn read_header(r: &mut impl Read) -> EngineResult<DbfHeader> {
    let mut head = [0u8; HEADER_LEN];
    read_exact_or(r, &mut head, "header")?;

    let version = head[0];
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(invalid(format!("unsupported version byte 0x{:02X}", version)));
    }
    let record_count = u32::from_le_bytes([head[4], head[5], head[6], head[7]]);
    let header_length = u16::from_le_bytes([head[8], head[9]]);
    let record_length = u16::from_le_bytes([head[10], head[11]]);

    let mut consumed = HEADER_LEN;
    let mut fields = Vec::new();
    loop {
        let mut first = [0u8; 1];
        read_exact_or(r, &mut first, "field descriptors")?;
        consumed += 1;
        if first[0] == HEADER_TERMINATOR {
            break;
        }

        let mut rest = [0u8; DESCRIPTOR_LEN - 1];
        read_exact_or(r, &mut rest, "field descriptors")?;
        consumed += rest.len();

        let mut name_bytes = Vec::with_capacity(11);
        name_bytes.push(first[0]);
        name_bytes.extend_from_slice(&rest[..10]);
        let name_end = name_bytes.iter().position(|b| *b == 0).unwrap_or(name_bytes.len());
        let name = String::from_utf8_lossy(&name_bytes[..name_end]).trim().to_string();

        fields.push(DbfField {
            name,
            field_type: FieldType::from_byte(rest[10]),
            length: rest[15],
            decimal_count: rest[16],
        });
    }

    let declared = header_length as usize;
    if declared < consumed {
        return Err(invalid(format!(
            "header length {} is shorter than its {} descriptor bytes",
            declared, consumed
        )));
    }
    // Visual FoxPro appends a backlink area before the first record.
    io::copy(&mut r.by_ref().take((declared - consumed) as u64), &mut io::sink())
        .map_err(|e| invalid(format!("failed skipping header padding: {}", e)))?;

    let data_width: usize = fields.iter().map(|f| f.length as usize).sum();
    if data_width + 1 > record_length as usize {
        return Err(invalid(format!(
            "columns need {} bytes but records are {} bytes",
            data_width + 1,
            record_length
        )));
    }

    Ok(DbfHeader {
        version,
        record_count,
        header_length,
        record_length,
        fields,
    })
}

fn decode_record(fields: &[DbfField], data: &[u8]) -> RawRow {
    let mut row = RawRow::new();
    let mut offset = 0;
    for field in fields {
        let end = offset + field.length as usize;
        row.insert(field.name.clone(), decode_value(field, &data[offset..end]));
        offset = end;
    }
    row
}

fn decode_value(field: &DbfField, bytes: &[u8]) -> RawValue {
    match field.field_type {
        FieldType::Character | FieldType::Date | FieldType::Other(_) => {
            let end = bytes
                .iter()
                .rposition(|b| *b != b' ' && *b != 0)
                .map_or(0, |p| p + 1);
            RawValue::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
        }
        FieldType::Numeric | FieldType::Float => decode_number(bytes),
        FieldType::Logical => match bytes.first() {
            Some(b'T' | b't' | b'Y' | b'y') => RawValue::Bool(true),
            Some(b'F' | b'f' | b'N' | b'n') => RawValue::Bool(false),
            _ => RawValue::Null,
        },
        FieldType::Integer => match <[u8; 4]>::try_from(bytes) {
            Ok(le) => RawValue::Integer(i64::from(i32::from_le_bytes(le))),
            Err(_) => RawValue::Null,
        },
    }
}

fn decode_number(bytes: &[u8]) -> RawValue {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_matches(|c: char| c == ' ' || c == '\0');
    if text.is_empty() || text.chars().all(|c| c == '*') {
        return RawValue::Null;
    }
    if let Ok(n) = text.parse::<i64>() {
        return RawValue::Integer(n);
    }
    match text.replace(',', ".").parse::<f64>() {
        Ok(f) => RawValue::Float(f),
        // Left for the normalizer, which defaults it to zero.
        Err(_) => RawValue::Text(text.to_string()),
    }
}

/// Encodes rows as a dBase III table.
///
/// Text columns are left-aligned and space-padded; numeric columns are
/// right-aligned with `decimal_count` digits. Values that do not fit their
/// column are truncated to its width.
pub fn write_extract(fields: &[DbfField], rows: &[RawRow], mut w: impl Write) -> EngineResult<()> {
    let record_length = 1 + fields.iter().map(|f| f.length as usize).sum::<usize>();
    let header_length = HEADER_LEN + fields.len() * DESCRIPTOR_LEN + 1;
    let record_length = u16::try_from(record_length).map_err(|_| invalid("records too wide"))?;
    let header_length = u16::try_from(header_length).map_err(|_| invalid("too many columns"))?;
    let record_count = u32::try_from(rows.len()).map_err(|_| invalid("too many records"))?;

    let io_err = |e: io::Error| invalid(format!("failed writing extract: {}", e));

    let mut head = [0u8; HEADER_LEN];
    head[0] = 0x03;
    head[4..8].copy_from_slice(&record_count.to_le_bytes());
    head[8..10].copy_from_slice(&header_length.to_le_bytes());
    head[10..12].copy_from_slice(&record_length.to_le_bytes());
    w.write_all(&head).map_err(io_err)?;

    for field in fields {
        let mut descriptor = [0u8; DESCRIPTOR_LEN];
        let name = field.name.as_bytes();
        let name_len = name.len().min(10);
        descriptor[..name_len].copy_from_slice(&name[..name_len]);
        descriptor[11] = field.field_type.as_byte();
        descriptor[16] = field.length;
        descriptor[17] = field.decimal_count;
        w.write_all(&descriptor).map_err(io_err)?;
    }
    w.write_all(&[HEADER_TERMINATOR]).map_err(io_err)?;

    for row in rows {
        w.write_all(&[ACTIVE]).map_err(io_err)?;
        for field in fields {
            w.write_all(&encode_value(field, row.get(&field.name)))
                .map_err(io_err)?;
        }
    }
    w.write_all(&[END_OF_FILE]).map_err(io_err)?;
    Ok(())
}

fn encode_value(field: &DbfField, value: Option<&RawValue>) -> Vec<u8> {
    let width = field.length as usize;
    let text = match value {
        None | Some(RawValue::Null) => String::new(),
        Some(RawValue::Bool(b)) => (if *b { "T" } else { "F" }).to_string(),
        Some(RawValue::Integer(n)) => match field.field_type {
            FieldType::Numeric | FieldType::Float if field.decimal_count > 0 => {
                format!("{:.*}", field.decimal_count as usize, *n as f64)
            }
            _ => n.to_string(),
        },
        Some(RawValue::Float(f)) => format!("{:.*}", field.decimal_count as usize, f),
        Some(RawValue::Text(s)) => s.clone(),
    };

    let mut bytes: Vec<u8> = text.into_bytes();
    bytes.truncate(width);
    let padding = vec![b' '; width - bytes.len()];
    match field.field_type {
        FieldType::Numeric | FieldType::Float => [padding, bytes].concat(),
        _ => [bytes, padding].concat(),
    }
}
