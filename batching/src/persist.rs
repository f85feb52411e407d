use crate::context::BatchingContext;
use crate::error::{BatchError, Result};
use crate::plaintext::Plaintext;
use crate::validation;

const MAGIC: &[u8; 4] = b"BPT1";
const HEADER_LEN: usize = MAGIC.len() + size_of::<u64>();

/// Conversion to and from a hex transport string.
pub trait Persist {
    fn save(&self) -> Result<String>;

    /// Replaces self with the decoded value, validated against context.
    /// self is left untouched on error.
    fn load<C: BatchingContext + ?Sized>(&mut self, context: &C, data: &str) -> Result<()>;
}

/// Layout: MAGIC, n as u64 LE, then n u64 LE coefficients.
impl Persist for Plaintext {
    fn save(&self) -> Result<String> {
        let mut bytes: Vec<u8> = Vec::with_capacity(HEADER_LEN + self.coeff_count() * size_of::<u64>());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&(self.coeff_count() as u64).to_le_bytes());
        self.coeffs()
            .iter()
            .for_each(|c| bytes.extend_from_slice(&c.to_le_bytes()));
        Ok(hex::encode(bytes))
    }

    fn load<C: BatchingContext + ?Sized>(&mut self, context: &C, data: &str) -> Result<()> {
        let bytes: Vec<u8> = hex::decode(data.trim()).map_err(|err| BatchError::Transport(err.to_string()))?;

        if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
            return Err(BatchError::Transport("missing plaintext header".to_string()));
        }

        let mut word: [u8; 8] = [0u8; 8];
        word.copy_from_slice(&bytes[MAGIC.len()..HEADER_LEN]);
        let n: u64 = u64::from_le_bytes(word);

        let body: &[u8] = &bytes[HEADER_LEN..];
        if body.len() as u64 != n.saturating_mul(size_of::<u64>() as u64) {
            return Err(BatchError::Transport(format!(
                "expected {} coefficients, found {} bytes",
                n,
                body.len()
            )));
        }

        let coeffs: Vec<u64> = body
            .chunks_exact(size_of::<u64>())
            .map(|chunk| {
                word.copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .collect();

        let plaintext: Plaintext = Plaintext::from_coeffs(&coeffs);
        validation::check_plaintext(&plaintext, context.poly_modulus_degree(), context.plain_modulus())?;
        *self = plaintext;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::parameters::Parameters;

    #[test]
    fn header_layout() {
        let plaintext: Plaintext = Plaintext::from_coeffs(&[1, 0]);
        assert_eq!(
            plaintext.save().unwrap(),
            "42505431020000000000000001000000000000000000000000000000"
        );
    }

    #[test]
    fn load_rejects_bad_input() {
        let context: Context = Context::new(Parameters::new(17, 8));
        let mut plaintext: Plaintext = Plaintext::new(8);

        assert!(matches!(
            plaintext.load(&context, "not hex"),
            Err(BatchError::Transport(_))
        ));
        assert!(matches!(
            plaintext.load(&context, "00112233"),
            Err(BatchError::Transport(_))
        ));

        let short: String = Plaintext::from_coeffs(&[1, 2, 3, 4]).save().unwrap();
        assert!(matches!(
            plaintext.load(&context, &short),
            Err(BatchError::MalformedPlaintext(_))
        ));

        let truncated: String = Plaintext::from_coeffs(&[1; 8]).save().unwrap();
        assert!(matches!(
            plaintext.load(&context, &truncated[..truncated.len() - 2]),
            Err(BatchError::Transport(_))
        ));

        let out_of_range: String = Plaintext::from_coeffs(&[17, 0, 0, 0, 0, 0, 0, 0]).save().unwrap();
        assert!(matches!(
            plaintext.load(&context, &out_of_range),
            Err(BatchError::MalformedPlaintext(_))
        ));

        assert!(plaintext.is_zero());
    }
}
