//! Deterministic reference backend.
//!
//! Real calculator backends interpret compiled circuit bytecode; this one
//! interprets a trivial container that declares which signals the "circuit"
//! requires and embeds the witness bytes to hand back. That is enough to
//! exercise every driver path (construction failure, incomplete assignment,
//! byte-for-byte passthrough) end to end, deterministically, in CI.
//!
//! Container layout, little-endian length-prefixed framing:
//!
//! ```text
//! magic  b"wcfx"
//! u32    version (currently 1)
//! u32    signal count, then per signal: u32 name length + UTF-8 name
//! u32    witness length, then the witness bytes
//! ```

use crate::{CalculatorError, CalculatorFactory, InputAssignment, WitnessCalculator};

pub const MAGIC: [u8; 4] = *b"wcfx";
pub const VERSION: u32 = 1;

/// Factory for [`FixtureCalculator`]s.
#[derive(Debug)]
pub struct FixtureFactory;

impl CalculatorFactory for FixtureFactory {
    fn build(&self, bytecode: &[u8]) -> Result<Box<dyn WitnessCalculator>, CalculatorError> {
        Ok(Box::new(FixtureCalculator::parse(bytecode)?))
    }
}

/// A calculator that checks the assignment against the container's declared
/// signals and returns the embedded witness verbatim.
#[derive(Debug)]
pub struct FixtureCalculator {
    required: Vec<String>,
    witness: Vec<u8>,
}

impl FixtureCalculator {
    pub fn parse(bytecode: &[u8]) -> Result<Self, CalculatorError> {
        let mut r = Reader {
            buf: bytecode,
            pos: 0,
        };

        if r.take(4)? != MAGIC.as_slice() {
            return Err(CalculatorError::InvalidBytecode(
                "bad magic, not a wcfx container".into(),
            ));
        }
        let version = r.u32()?;
        if version != VERSION {
            return Err(CalculatorError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let n_signals = r.u32()?;
        // The declared count is untrusted; cap the pre-allocation by what the
        // remaining bytes could possibly encode (one length prefix each) and
        // let the per-signal reads reject an overstated count.
        let mut required = Vec::with_capacity((n_signals as usize).min(r.remaining() / 4));
        for _ in 0..n_signals {
            let len = r.u32()? as usize;
            let name = std::str::from_utf8(r.take(len)?).map_err(|_| {
                CalculatorError::InvalidBytecode("signal name is not UTF-8".into())
            })?;
            required.push(name.to_owned());
        }

        let witness_len = r.u32()? as usize;
        let witness = r.take(witness_len)?.to_vec();
        if r.pos != bytecode.len() {
            return Err(CalculatorError::InvalidBytecode(
                "trailing bytes after witness payload".into(),
            ));
        }

        Ok(Self { required, witness })
    }

    pub fn required_signals(&self) -> &[String] {
        &self.required
    }
}

impl WitnessCalculator for FixtureCalculator {
    // `mode` is reserved; the fixture backend ignores it.
    fn calculate_wtns_bin(
        &mut self,
        inputs: &InputAssignment,
        _mode: u32,
    ) -> Result<Vec<u8>, CalculatorError> {
        for name in &self.required {
            if !inputs.contains(name) {
                return Err(CalculatorError::MissingSignal(name.clone()));
            }
        }
        Ok(self.witness.clone())
    }
}

/// Builds a fixture container declaring `signals` and embedding `witness`.
pub fn encode<S: AsRef<str>>(signals: &[S], witness: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(signals.len() as u32).to_le_bytes());
    for signal in signals {
        let name = signal.as_ref();
        out.extend_from_slice(&(name.len() as u32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
    }
    out.extend_from_slice(&(witness.len() as u32).to_le_bytes());
    out.extend_from_slice(witness);
    out
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CalculatorError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                CalculatorError::InvalidBytecode("unexpected end of container".into())
            })?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn u32(&mut self) -> Result<u32, CalculatorError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
