//! Flan-T5 summarizer using candle quantized models.
//!
//! Downloads model artifacts from HuggingFace on first use, then runs greedy
//! T5 decoding with the service's length bounds to produce a summary.

use crate::error::{DictanoteError, Result};
use crate::summary::catalog::SummaryModelInfo;
use crate::summary::summarizer::{GenerationParams, Summarizer, SummaryChunk};

use candle_core::{Device, Tensor};
use candle_transformers::models::quantized_t5::{Config as T5Config, T5ForConditionalGeneration};
use candle_transformers::quantized_var_builder::VarBuilder;
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

/// T5 end-of-sequence token id.
const EOS_TOKEN: u32 = 1;

/// T5 decoder start token id (the pad token).
const DECODER_START_TOKEN: u32 = 0;

/// Task prefix that puts Flan-T5 into summarization mode.
const TASK_PREFIX: &str = "summarize: ";

/// Flan-T5 summarizer that runs quantized inference via candle.
pub struct CandleT5Summarizer {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
}

impl CandleT5Summarizer {
    /// Load a quantized Flan-T5 model from HuggingFace cache.
    ///
    /// Downloads model, config, and tokenizer on first call.
    pub fn load(info: &SummaryModelInfo) -> Result<Self> {
        let device = Device::Cpu;
        let api = Api::new().map_err(|e| DictanoteError::ModelLoadFailed {
            message: format!("HF Hub API init: {e}"),
        })?;
        let repo = api.model(info.hf_repo.to_string());

        // Download / resolve paths
        let model_path = repo
            .get(info.hf_filename)
            .map_err(|e| DictanoteError::ModelLoadFailed {
                message: format!("Download model {}: {e}", info.hf_filename),
            })?;

        let config_path =
            repo.get(info.config_filename)
                .map_err(|e| DictanoteError::ModelLoadFailed {
                    message: format!("Download config {}: {e}", info.config_filename),
                })?;

        let tokenizer_path = repo
            .get(crate::summary::catalog::TOKENIZER_FILENAME)
            .map_err(|e| DictanoteError::ModelLoadFailed {
                message: format!("Download tokenizer: {e}"),
            })?;

        // Load config
        let config_bytes =
            std::fs::read(&config_path).map_err(|e| DictanoteError::ModelLoadFailed {
                message: format!("Read config {}: {e}", config_path.display()),
            })?;
        let config: T5Config =
            serde_json::from_slice(&config_bytes).map_err(|e| DictanoteError::ModelLoadFailed {
                message: format!("Parse T5 config: {e}"),
            })?;

        // Load quantized model
        let vb = VarBuilder::from_gguf(&model_path, &device).map_err(|e| {
            DictanoteError::ModelLoadFailed {
                message: format!("Load GGUF model {}: {e}", model_path.display()),
            }
        })?;
        let model = T5ForConditionalGeneration::load(vb, &config).map_err(|e| {
            DictanoteError::ModelLoadFailed {
                message: format!("Init T5 model: {e}"),
            }
        })?;

        // Load tokenizer
        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| DictanoteError::ModelLoadFailed {
                message: format!("Load tokenizer {}: {e}", tokenizer_path.display()),
            })?;

        Ok(Self {
            model,
            tokenizer,
            device,
            model_name: info.name.to_string(),
        })
    }

    /// Encode the prefixed input and run greedy decoding within the length bounds.
    fn generate(&mut self, text: &str, params: &GenerationParams) -> Result<String> {
        let prompt = format!("{TASK_PREFIX}{text}");
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| generation_error(format!("Tokenize: {e}")))?;

        let input_ids: Vec<u32> = encoding.get_ids().to_vec();
        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .map_err(|e| generation_error(format!("Create input tensor: {e}")))?
            .unsqueeze(0)
            .map_err(|e| generation_error(format!("Unsqueeze input: {e}")))?;

        // Encode
        let encoder_output = self
            .model
            .encode(&input_tensor)
            .map_err(|e| generation_error(format!("Encoder forward: {e}")))?;

        // Greedy decode with incremental KV cache.
        // First step: feed the decoder start token. Subsequent steps: feed only
        // the new token; the KV cache accumulates key-value pairs across steps.
        let mut decoded_ids: Vec<u32> = vec![DECODER_START_TOKEN];
        let mut next_input = vec![DECODER_START_TOKEN];

        for _ in 0..params.max_new_tokens {
            let decoder_input = Tensor::new(next_input.as_slice(), &self.device)
                .map_err(|e| generation_error(format!("Create decoder input: {e}")))?
                .unsqueeze(0)
                .map_err(|e| generation_error(format!("Unsqueeze decoder: {e}")))?;

            let logits = self
                .model
                .decode(&decoder_input, &encoder_output)
                .map_err(|e| generation_error(format!("Decoder forward: {e}")))?;

            // Take last token logits (seq dim = last position)
            let seq_len = logits
                .dim(1)
                .map_err(|e| generation_error(format!("Get logits dim: {e}")))?;
            let next_logits = logits
                .get_on_dim(1, seq_len - 1)
                .map_err(|e| generation_error(format!("Slice logits: {e}")))?;
            let scores: Vec<f32> = next_logits
                .flatten_all()
                .map_err(|e| generation_error(format!("Flatten logits: {e}")))?
                .to_vec1()
                .map_err(|e| generation_error(format!("Read logits: {e}")))?;

            // EOS is suppressed until the minimum summary length is reached.
            let generated = decoded_ids.len() - 1;
            let allow_eos = generated >= params.min_new_tokens;
            let next_token = pick_next_token(&scores, allow_eos)
                .ok_or_else(|| generation_error("empty logits".to_string()))?;

            if next_token == EOS_TOKEN {
                break;
            }

            decoded_ids.push(next_token);
            next_input = vec![next_token]; // incremental: only the new token
        }

        // Skip the leading start token for decoding
        let output = self
            .tokenizer
            .decode(&decoded_ids[1..], true)
            .map_err(|e| generation_error(format!("Detokenize: {e}")))?;

        Ok(output)
    }
}

impl Summarizer for CandleT5Summarizer {
    fn summarize(&mut self, text: &str, params: &GenerationParams) -> Result<Vec<SummaryChunk>> {
        self.model.clear_kv_cache();
        let summary_text = self.generate(text, params)?;
        Ok(vec![SummaryChunk { summary_text }])
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

fn generation_error(message: String) -> DictanoteError {
    DictanoteError::GenerationFailed { message }
}

/// Greedy argmax over the vocabulary, optionally excluding EOS.
fn pick_next_token(scores: &[f32], allow_eos: bool) -> Option<u32> {
    let mut best: Option<(usize, f32)> = None;
    for (id, &score) in scores.iter().enumerate() {
        if !allow_eos && id == EOS_TOKEN as usize {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((id, score)),
        }
    }
    best.map(|(id, _)| id as u32)
}
