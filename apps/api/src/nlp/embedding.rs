//! Hashed character-trigram embeddings and vector helpers.
//!
//! Each whitespace-separated word of the case-folded phrase is padded as
//! `<word>` and every character trigram is hashed (FNV-1a) into one of
//! `dimensions` buckets. Phrases sharing spelling share buckets, so identical
//! skills embed identically and near-spellings ("Node.js" / "Nodejs") land close.

pub const DEFAULT_DIMENSIONS: usize = 300;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Embeds a phrase. Returns the zero vector when the phrase has no alphanumerics.
pub fn hashed_trigram_vector(phrase: &str, dimensions: usize) -> Vec<f32> {
    let mut vector = vec![0.0_f32; dimensions];
    if dimensions == 0 {
        return vector;
    }

    let folded = phrase.to_lowercase();
    if !folded.chars().any(char::is_alphanumeric) {
        return vector;
    }

    for word in folded.split_whitespace() {
        let padded: Vec<char> = std::iter::once('<')
            .chain(word.chars())
            .chain(std::iter::once('>'))
            .collect();
        for window in padded.windows(3) {
            let bucket = (fnv1a(window) % dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }
    }

    vector
}

fn fnv1a(chars: &[char]) -> u64 {
    let mut hash = FNV_OFFSET;
    for c in chars {
        let mut buf = [0u8; 4];
        for byte in c.encode_utf8(&mut buf).bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

pub fn vector_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt()
}

/// Cosine similarity. Returns 0.0 when either vector is zero or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let norm_a = vector_norm(a);
    let norm_b = vector_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    dot / (norm_a * norm_b)
}
