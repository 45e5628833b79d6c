//! WASM surface for the host page.

use std::rc::Rc;
use std::sync::Arc;

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::embed::JsEmbedder;
use crate::error::RagError;
use crate::rag::config::RetrievalConfig;
use crate::rag::context::to_context_json;
use crate::rag::prompt::{ChatMessage, PromptAssembler, SystemPrompt};
use crate::rag::service::RetrievalService;
use crate::store::{ArtifactSource, LazyStore};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Core errors go to JS as strings. Integrity failures are also echoed to the
/// console, since the browser build has no tracing subscriber by default.
fn report(e: RagError) -> JsValue {
    if let RagError::CorpusIntegrity { .. } = &e {
        web_sys::console::warn_1(&format!("[RagService] {}", e).into());
    }
    to_js(e)
}

/// Retrieval service exposed to TypeScript
///
/// # Example (TypeScript)
/// ```typescript
/// const extractor = await pipeline("feature-extraction", "Xenova/all-MiniLM-L6-v2");
/// const rag = new RagService(recordsJson, embeddingsJson,
///   async (text) => (await extractor(text)).tolist());
/// rag.setSystemPrompt(systemPrompt);
/// const context = await rag.topKContext(input);
/// const messages = rag.buildMessages(history, input, context);
/// ```
#[wasm_bindgen]
pub struct RagService {
    service: Rc<RetrievalService<JsEmbedder>>,
    config: RetrievalConfig,
    system_prompt: Option<LazyStore<SystemPrompt>>,
}

#[wasm_bindgen]
impl RagService {
    /// Artifacts are parsed lazily on the first query.
    ///
    /// # Arguments
    /// * `records_json` - `{ id: text }`
    /// * `embeddings_json` - `{ id: number[] }`
    /// * `embed_fn` - `(text) => Float32Array | number[] | number[][] | Promise<...>`
    #[wasm_bindgen(constructor)]
    pub fn new(records_json: String, embeddings_json: String, embed_fn: Function) -> RagService {
        let service = RetrievalService::new(
            Arc::new(JsEmbedder::new(embed_fn)),
            Arc::new(LazyStore::new(ArtifactSource::bytes(embeddings_json.into_bytes()))),
            Arc::new(LazyStore::new(ArtifactSource::bytes(records_json.into_bytes()))),
        );

        RagService {
            service: Rc::new(service),
            config: RetrievalConfig::default(),
            system_prompt: None,
        }
    }

    /// Replace retrieval settings, e.g. `{ topK: 8, threshold: 0.0 }`
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: RetrievalConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setSystemPrompt)]
    pub fn set_system_prompt(&mut self, prompt: String) {
        self.system_prompt = Some(LazyStore::preloaded(SystemPrompt { text: prompt }));
    }

    /// Set the system prompt artifact, `{ "SYSTEM_PROMPT": "..." }`. It is
    /// parsed on the next `buildMessages` and reused after that.
    #[wasm_bindgen(js_name = setSystemPromptJson)]
    pub fn set_system_prompt_json(&mut self, json: String) {
        self.system_prompt = Some(LazyStore::new(ArtifactSource::bytes(json.into_bytes())));
    }

    /// Load both artifacts now and check every embedding has a record.
    #[wasm_bindgen(js_name = verifyCorpus)]
    pub fn verify_corpus(&self) -> Result<(), JsValue> {
        self.service.check_integrity().map_err(report)?;

        let embeddings = self.service.embeddings().load().map_err(to_js)?;
        web_sys::console::log_1(&format!(
            "[RagService] Corpus verified ({} embeddings, {}d)",
            embeddings.len(),
            embeddings.dimension().unwrap_or(0)
        ).into());

        Ok(())
    }

    /// Resolves to the context JSON for the top `k` records at or above `threshold`.
    pub fn query(&self, text: String, k: usize, threshold: f32) -> Promise {
        let service = Rc::clone(&self.service);

        future_to_promise(async move {
            let records = service.query(&text, k, threshold).await.map_err(report)?;
            let json = to_context_json(&records).map_err(to_js)?;
            Ok(JsValue::from_str(&json))
        })
    }

    /// `query` with the configured `topK` and `threshold`
    #[wasm_bindgen(js_name = topKContext)]
    pub fn top_k_context(&self, text: String) -> Promise {
        self.query(text, self.config.top_k, self.config.threshold)
    }

    /// Message list for the next model call: fresh system message with the
    /// context first, prior history minus old system messages, then the input.
    #[wasm_bindgen(js_name = buildMessages)]
    pub fn build_messages(&self, history: JsValue, input: String, context: String) -> Result<JsValue, JsValue> {
        let prompt = self.system_prompt.as_ref()
            .ok_or_else(|| JsValue::from_str("System prompt not set"))?
            .load()
            .map_err(to_js)?;
        let assembler = PromptAssembler::from_artifact(&prompt);

        let history: Vec<ChatMessage> = if history.is_undefined() || history.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(history)
                .map_err(|e| JsValue::from_str(&format!("Invalid history: {}", e)))?
        };

        let messages = assembler.assemble(&history, &input, &context, chrono::Utc::now());
        serde_wasm_bindgen::to_value(&messages).map_err(to_js)
    }
}
