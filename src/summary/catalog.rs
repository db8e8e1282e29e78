//! Catalog of available T5 summarization models.

/// Metadata for a T5 summarization model.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryModelInfo {
    /// Short name used in config and CLI (e.g. "flan-t5-small").
    pub name: &'static str,
    /// Human-readable display name.
    pub display_name: &'static str,
    /// Approximate download size in MB.
    pub size_mb: u32,
    /// HuggingFace repository containing the model.
    pub hf_repo: &'static str,
    /// GGUF model filename within the repository.
    pub hf_filename: &'static str,
    /// JSON config filename within the repository.
    pub config_filename: &'static str,
    /// Short description with expected latency.
    pub description: &'static str,
}

/// Shared tokenizer filename — all Flan-T5 variants use the same tokenizer.
pub const TOKENIZER_FILENAME: &str = "tokenizer.json";

/// HuggingFace repository for quantized T5 models.
pub const SUMMARY_MODEL_REPO: &str = "lmz/candle-quantized-t5";

/// Available summarization models, ordered by size (smallest first).
pub const SUMMARY_MODELS: &[SummaryModelInfo] = &[
    SummaryModelInfo {
        name: "flan-t5-small",
        display_name: "Flan-T5 Small (64 MB)",
        size_mb: 64,
        hf_repo: SUMMARY_MODEL_REPO,
        hf_filename: "model.gguf",
        config_filename: "config.json",
        description: "Fast, lower quality. A few seconds per summary on CPU.",
    },
    SummaryModelInfo {
        name: "flan-t5-base",
        display_name: "Flan-T5 Base (263 MB)",
        size_mb: 263,
        hf_repo: SUMMARY_MODEL_REPO,
        hf_filename: "model-flan-t5-base.gguf",
        config_filename: "config-flan-t5-base.json",
        description: "Balanced speed and quality.",
    },
    SummaryModelInfo {
        name: "flan-t5-large",
        display_name: "Flan-T5 Large (852 MB)",
        size_mb: 852,
        hf_repo: SUMMARY_MODEL_REPO,
        hf_filename: "model-flan-t5-large.gguf",
        config_filename: "config-flan-t5-large.json",
        description: "Best quality, slowest. Expect tens of seconds on CPU.",
    },
];

/// Look up a summarization model by name.
pub fn get_summary_model(name: &str) -> Option<&'static SummaryModelInfo> {
    SUMMARY_MODELS.iter().find(|m| m.name == name)
}

/// List all available summarization models.
pub fn list_summary_models() -> &'static [SummaryModelInfo] {
    SUMMARY_MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_summary_model_small() {
        let model = get_summary_model("flan-t5-small").expect("flan-t5-small should exist");
        assert_eq!(model.name, "flan-t5-small");
        assert_eq!(model.size_mb, 64);
        assert_eq!(model.hf_repo, SUMMARY_MODEL_REPO);
        assert_eq!(model.hf_filename, "model.gguf");
    }

    #[test]
    fn test_get_summary_model_nonexistent() {
        assert!(get_summary_model("nonexistent").is_none());
    }

    #[test]
    fn test_list_summary_models_ordered_by_size() {
        let models = list_summary_models();
        for window in models.windows(2) {
            assert!(
                window[0].size_mb < window[1].size_mb,
                "{} ({} MB) should come before {} ({} MB)",
                window[0].name,
                window[0].size_mb,
                window[1].name,
                window[1].size_mb,
            );
        }
    }

    #[test]
    fn test_all_models_share_tokenizer_repo() {
        for model in SUMMARY_MODELS {
            assert_eq!(
                model.hf_repo, SUMMARY_MODEL_REPO,
                "{} should use shared repo",
                model.name
            );
        }
    }

    #[test]
    fn test_default_model_is_in_catalog() {
        assert!(get_summary_model(crate::defaults::DEFAULT_SUMMARY_MODEL).is_some());
    }
}
