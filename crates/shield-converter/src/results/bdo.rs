//! Decoder for the engine's tagged binary detector output.
//!
//! ```text
//! "xSH12A" | "II"/"MM" | version[16] | record*
//! record = tag:u32 | dtype[8] ("f8" "i4" "S1") | count:u64 | payload
//! ```

use crate::error::BdoError;
use nom::{
    bytes::complete::{tag, take},
    multi::count,
    number::{complete as number, Endianness},
    sequence::tuple,
    IResult,
};
use sim_setup::{DetectorResult, Dimensions, Point};

pub const MAGIC: &[u8] = b"xSH12A";
const VERSION_LEN: usize = 16;
const DTYPE_LEN: usize = 8;

pub const TAG_ENGINE_VERSION: u32 = 0xAA00;
pub const TAG_BUILD_DATE: u32 = 0xAA01;
pub const TAG_GEOMETRY: u32 = 0xCC00;
pub const TAG_QUANTITY: u32 = 0xCC01;
pub const TAG_PARTICLE: u32 = 0xCC02;
pub const TAG_BINS: u32 = 0xCC03;
pub const TAG_START: u32 = 0xCC04;
pub const TAG_STOP: u32 = 0xCC05;
pub const TAG_PRIMARIES: u32 = 0xCC06;
pub const TAG_DATA: u32 = 0xEE00;

/// Decoded payload of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Floats(Vec<f64>),
    Ints(Vec<i32>),
    Text(String),
}

impl Payload {
    fn dtype(&self) -> &'static str {
        match self {
            Payload::Floats(_) => "f8",
            Payload::Ints(_) => "i4",
            Payload::Text(_) => "S1",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub tag: u32,
    pub payload: Payload,
}

/// Header plus every record in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct BdoFile {
    pub endianness: Endianness,
    pub version: String,
    pub records: Vec<Record>,
}

// ============================================================================
// Public API
// ============================================================================

/// Split a result file into its records.
pub fn read_bdo(bytes: &[u8]) -> Result<BdoFile, BdoError> {
    let (rest, _) = magic(bytes).map_err(|_| BdoError::BadMagic)?;
    let (rest, (marker, version)) =
        file_header(rest).map_err(|_| BdoError::Truncated { offset: MAGIC.len() })?;
    let endianness = match marker {
        b"II" => Endianness::Little,
        b"MM" => Endianness::Big,
        other => return Err(BdoError::BadEndianness(String::from_utf8_lossy(other).into_owned())),
    };

    let mut records = Vec::new();
    let mut input = rest;
    while !input.is_empty() {
        let offset = bytes.len() - input.len();
        let (rest, record) = record(input, endianness, offset)?;
        records.push(record);
        input = rest;
    }

    Ok(BdoFile {
        endianness,
        version: text(version),
        records,
    })
}

/// Decode a result file into a detector result. The detector id is left for
/// the caller to fill in.
pub fn parse_bdo(bytes: &[u8]) -> Result<DetectorResult, BdoError> {
    let file = read_bdo(bytes)?;
    let mut result = DetectorResult::default();
    result.metadata.insert("bdo_version".into(), file.version);

    let mut bins: Option<[usize; 3]> = None;
    let mut data: Option<Vec<f64>> = None;
    for Record { tag, payload } in file.records {
        match (tag, payload) {
            (TAG_ENGINE_VERSION, Payload::Text(s)) => insert(&mut result, "engine_version", s),
            (TAG_BUILD_DATE, Payload::Text(s)) => insert(&mut result, "build_date", s),
            (TAG_GEOMETRY, Payload::Text(s)) => insert(&mut result, "geometry", s),
            (TAG_QUANTITY, Payload::Text(s)) => insert(&mut result, "quantity", s),
            (TAG_PARTICLE, Payload::Ints(v)) => {
                let [code] = exactly::<1, _>(tag, v)?;
                insert(&mut result, "particle", code.to_string());
            }
            (TAG_PRIMARIES, Payload::Ints(v)) => {
                let [n] = exactly::<1, _>(tag, v)?;
                insert(&mut result, "primaries", n.to_string());
            }
            (TAG_BINS, Payload::Ints(v)) => {
                bins = Some(bin_counts(exactly::<3, _>(tag, v)?)?);
            }
            (TAG_START, Payload::Floats(v)) => {
                let [x, y, z] = exactly::<3, _>(tag, v)?;
                result.dimensions.start = Point::new(x, y, z);
            }
            (TAG_STOP, Payload::Floats(v)) => {
                let [x, y, z] = exactly::<3, _>(tag, v)?;
                result.dimensions.stop = Point::new(x, y, z);
            }
            (TAG_DATA, Payload::Floats(v)) => data = Some(v),
            (
                TAG_ENGINE_VERSION | TAG_BUILD_DATE | TAG_GEOMETRY | TAG_QUANTITY | TAG_PARTICLE
                | TAG_PRIMARIES | TAG_BINS | TAG_START | TAG_STOP | TAG_DATA,
                payload,
            ) => {
                return Err(BdoError::UnsupportedType {
                    tag,
                    dtype: payload.dtype().to_string(),
                })
            }
            // unknown tags are skipped
            _ => {}
        }
    }

    let [nx, ny, nz] = bins.ok_or(BdoError::MissingRecord(TAG_BINS))?;
    let data = data.ok_or(BdoError::MissingRecord(TAG_DATA))?;
    let expected = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .unwrap_or(usize::MAX);
    if data.len() != expected {
        return Err(BdoError::DataLength {
            expected,
            found: data.len(),
        });
    }
    result.dimensions = Dimensions {
        nx,
        ny,
        nz,
        ..result.dimensions
    };
    result.scored = to_grid(&data, nx, ny, nz);
    Ok(result)
}

// ============================================================================
// Records
// ============================================================================

fn magic(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(MAGIC)(input)
}

fn file_header(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    tuple((take(2usize), take(VERSION_LEN)))(input)
}

fn record_header(input: &[u8], endian: Endianness) -> IResult<&[u8], (u32, &[u8], u64)> {
    tuple((number::u32(endian), take(DTYPE_LEN), number::u64(endian)))(input)
}

fn record(input: &[u8], endian: Endianness, offset: usize) -> Result<(&[u8], Record), BdoError> {
    let truncated = |_| BdoError::Truncated { offset };
    let (rest, (tag, dtype, n)) = record_header(input, endian).map_err(truncated)?;
    let dtype = text(dtype);
    let item_size = match dtype.as_str() {
        "f8" => 8,
        "i4" => 4,
        "S1" => 1,
        _ => return Err(BdoError::UnsupportedType { tag, dtype }),
    };
    let n = usize::try_from(n).map_err(|_| BdoError::Truncated { offset })?;
    let len = n.checked_mul(item_size).ok_or(BdoError::Truncated { offset })?;
    let (rest, raw) = take_bytes(rest, len).map_err(truncated)?;

    let payload = match item_size {
        8 => Payload::Floats(floats(raw, n, endian).map_err(truncated)?.1),
        4 => Payload::Ints(ints(raw, n, endian).map_err(truncated)?.1),
        _ => Payload::Text(text(raw)),
    };
    Ok((rest, Record { tag, payload }))
}

fn take_bytes(input: &[u8], len: usize) -> IResult<&[u8], &[u8]> {
    take(len)(input)
}

fn floats(input: &[u8], n: usize, endian: Endianness) -> IResult<&[u8], Vec<f64>> {
    count(number::f64(endian), n)(input)
}

fn ints(input: &[u8], n: usize, endian: Endianness) -> IResult<&[u8], Vec<i32>> {
    count(number::i32(endian), n)(input)
}

/// NUL-padded ASCII to a string.
fn text(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim_end_matches('\0').to_string()
}

/// Every axis needs at least one bin.
fn bin_counts(counts: [i32; 3]) -> Result<[usize; 3], BdoError> {
    let mut bins = [0usize; 3];
    for (slot, &n) in bins.iter_mut().zip(&counts) {
        *slot = usize::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(BdoError::BadBins(counts))?;
    }
    Ok(bins)
}

fn exactly<const N: usize, T>(tag: u32, values: Vec<T>) -> Result<[T; N], BdoError> {
    let found = values.len();
    values.try_into().map_err(|_| BdoError::WrongCount {
        tag,
        expected: N,
        found,
    })
}

fn insert(result: &mut DetectorResult, key: &str, value: String) {
    result.metadata.insert(key.to_string(), value);
}

/// Reshape x-major flat data into `[x][y][z]`.
fn to_grid(data: &[f64], nx: usize, ny: usize, nz: usize) -> Vec<Vec<Vec<f64>>> {
    (0..nx)
        .map(|x| {
            (0..ny)
                .map(|y| {
                    let start = (x * ny + y) * nz;
                    data[start..start + nz].to_vec()
                })
                .collect()
        })
        .collect()
}
