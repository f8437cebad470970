//! Cosine similarity for embedding vectors.

/// Cosine similarity between two vectors.
///
/// Mismatched lengths are truncated to the shorter vector, never padded
/// or rejected. Returns 0.0 whenever either operand has zero norm, which
/// covers empty and all-zero embeddings (documents whose enrichment
/// failed or was never run). Accumulates in f64 so the result is
/// reproducible regardless of input order or length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for i in 0..n {
        let (x, y) = (a[i] as f64, b[i] as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}
