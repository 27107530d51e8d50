//! Observation rendering.
//!
//! The plain-text layout puts the keyboard-reported value and the Wiegand
//! payload decimal side by side, then the raw bits, an annotated
//! Wiegand-26 breakdown when enough bits were captured, and the
//! facility/ID fields with their inverted counterparts. The extra debug
//! representations (raw/payload hex, decimal, text) sit behind the
//! `verbose` toggle instead of a second code path.
//!
//! Every line is total: an empty field prints its empty/zero form, so a
//! degraded short-frame decode renders without crashing.

use crate::watch::Observation;
use cardwatch_core::Result;
use cardwatch_decode::{BitString, DecodedFrame};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Output format for observation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text layout.
    #[default]
    Text,
    /// One JSON object per observation (machine-readable mode).
    Json,
}

/// Rendering configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Output format.
    pub format: OutputFormat,

    /// Also print the raw/payload debug representations.
    pub verbose: bool,
}

/// Flat, serializable map of every rendered representation of one
/// observation. This is the structured output mode used by `--json` and
/// by test harnesses.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub keyboard: String,
    pub observed_at: DateTime<Utc>,
    pub bit_length: usize,
    pub raw_bits: String,
    pub raw_decimal: String,
    pub raw_hex: String,
    pub raw_text: String,
    pub payload_bits: String,
    pub payload_decimal: String,
    pub payload_hex: String,
    pub payload_text: String,
    pub facility_decimal: String,
    pub facility_hex: String,
    pub id_decimal: String,
    pub id_hex: String,
    pub inverted_payload_bits: String,
    pub inverted_facility_decimal: String,
    pub inverted_facility_hex: String,
    pub inverted_id_decimal: String,
    pub inverted_id_hex: String,
}

impl DecodeReport {
    /// Build a report from a successfully decoded observation.
    #[must_use]
    pub fn new(keyboard: &str, observed_at: DateTime<Utc>, frame: &DecodedFrame) -> Self {
        DecodeReport {
            keyboard: keyboard.to_string(),
            observed_at,
            bit_length: frame.bit_length(),
            raw_bits: frame.raw.to_string(),
            raw_decimal: frame.raw.decimal(),
            raw_hex: frame.raw.hex(),
            raw_text: frame.raw.text(),
            payload_bits: frame.payload.to_string(),
            payload_decimal: frame.payload.decimal(),
            payload_hex: frame.payload.hex(),
            payload_text: frame.payload.text(),
            facility_decimal: frame.facility.decimal(),
            facility_hex: frame.facility.hex(),
            id_decimal: frame.id.decimal(),
            id_hex: frame.id.hex(),
            inverted_payload_bits: frame.inverted_payload.to_string(),
            inverted_facility_decimal: frame.inverted_facility.decimal(),
            inverted_facility_hex: frame.inverted_facility.hex(),
            inverted_id_decimal: frame.inverted_id.decimal(),
            inverted_id_hex: frame.inverted_id.hex(),
        }
    }
}

/// Error form of the structured output mode.
#[derive(Debug, Clone, Serialize)]
struct DecodeErrorReport<'a> {
    keyboard: &'a str,
    observed_at: DateTime<Utc>,
    raw: &'a str,
    error: String,
}

/// Write one observation to `out` in the configured format.
///
/// # Errors
///
/// Returns an error only for sink I/O failures; a malformed frame inside
/// the observation renders as a diagnostic line, not an error.
pub fn write_observation<W: Write>(
    out: &mut W,
    observation: &Observation,
    options: &RenderOptions,
) -> Result<()> {
    match options.format {
        OutputFormat::Text => write_text(out, observation, options.verbose),
        OutputFormat::Json => write_json(out, observation),
    }
}

fn write_json<W: Write>(out: &mut W, observation: &Observation) -> Result<()> {
    let line = match &observation.frame {
        Ok(frame) => serde_json::to_string(&DecodeReport::new(
            &observation.keyboard,
            observation.observed_at,
            frame,
        )),
        Err(error) => serde_json::to_string(&DecodeErrorReport {
            keyboard: &observation.keyboard,
            observed_at: observation.observed_at,
            raw: observation.raw.as_str(),
            error: error.to_string(),
        }),
    }
    .map_err(std::io::Error::other)?;
    writeln!(out, "{line}")?;
    Ok(())
}

fn write_text<W: Write>(out: &mut W, observation: &Observation, verbose: bool) -> Result<()> {
    let frame = match &observation.frame {
        Ok(frame) => frame,
        Err(error) => {
            writeln!(out)?;
            writeln!(out, "Received via USB \"keyboard\":    {}", observation.keyboard)?;
            writeln!(out, "!  undecodable Wiegand message:  {}", observation.raw)?;
            writeln!(out, "!  {error}")?;
            return Ok(());
        }
    };

    writeln!(out)?;
    writeln!(
        out,
        "Received via USB \"keyboard\" (binary to decimal):     {}",
        observation.keyboard
    )?;
    writeln!(
        out,
        "Received via Wiegand output (binary to decimal):     {}",
        frame.payload.decimal()
    )?;
    writeln!(out, "    raw bit length:       {}", frame.bit_length())?;
    writeln!(out, "    raw binary:           {}", frame.raw)?;
    writeln!(out)?;

    if frame.has_wiegand26_layout() {
        // Fixed Wiegand-26 positions: parity, facility byte, 16-bit ID, parity.
        writeln!(
            out,
            "                          {}   {}   {}   {}",
            frame.raw.slice(0..1),
            frame.raw.slice(1..9),
            frame.raw.slice(9..25),
            frame.raw.slice(25..26),
        )?;
        writeln!(
            out,
            "                          P   AAAAAAAA   BBBBBBBBBBBBBBBB   P"
        )?;
        writeln!(
            out,
            "                   facility code ^^^           ^^^ unique card ID"
        )?;
        writeln!(out)?;
    }

    if verbose {
        write_field_debug(out, "raw", &frame.raw)?;
        write_field_debug(out, "payload", &frame.payload)?;
        write_field_debug(out, "inv payload", &frame.inverted_payload)?;
        writeln!(out)?;
    }

    writeln!(out, " ---------------------------------")?;
    writeln!(
        out,
        "*  Wiegand facility code (binary to decimal):  {}",
        frame.facility.decimal()
    )?;
    writeln!(
        out,
        "*  Wiegand unique ID (binary to decimal):      {}",
        frame.id.decimal()
    )?;
    writeln!(out, " ---------------------------------")?;
    writeln!(out)?;
    writeln!(out, "   facility code as hex:  {}", frame.facility.hex())?;
    writeln!(out, "   unique ID as hex:      {}", frame.id.hex())?;
    writeln!(out)?;
    writeln!(
        out,
        "*  INVERTED facility code as dec:  {}",
        frame.inverted_facility.decimal()
    )?;
    writeln!(
        out,
        "*  INVERTED unique ID as dec:      {}",
        frame.inverted_id.decimal()
    )?;
    Ok(())
}

/// One debug block for the verbose toggle: length, bits, and the hex,
/// decimal, and text reinterpretations of a region.
fn write_field_debug<W: Write>(out: &mut W, label: &str, bits: &BitString) -> Result<()> {
    writeln!(out, "    {label} length:   {}", bits.len())?;
    writeln!(out, "    {label} binary:   {bits}")?;
    writeln!(out, "    {label} hex:      {}", bits.hex())?;
    writeln!(out, "    {label} decimal:  {}", bits.decimal())?;
    writeln!(out, "    {label} text:     {}", bits.text())?;
    Ok(())
}
