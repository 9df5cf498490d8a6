//! Credit costs for billable operations.
//!
//! Image generation is billed at submission time; model training is billed
//! on completion so users are never charged for training that never
//! finishes.

/// Credits debited per generated image.
pub const IMAGE_GEN_CREDITS: i64 = 1;

/// Credits debited when a model finishes training.
pub const TRAIN_MODEL_CREDITS: i64 = 20;

/// Total cost of generating one image per prompt in a pack.
///
/// Pack generation debits this once, as a single ledger mutation, never
/// per-prompt.
pub fn pack_generation_cost(prompt_count: usize) -> i64 {
    IMAGE_GEN_CREDITS * prompt_count as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_cost_scales_with_prompt_count() {
        assert_eq!(pack_generation_cost(0), 0);
        assert_eq!(pack_generation_cost(1), IMAGE_GEN_CREDITS);
        assert_eq!(pack_generation_cost(12), 12 * IMAGE_GEN_CREDITS);
    }
}
