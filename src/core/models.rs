// embedding model catalog - passthrough data only, never affects control flow

use crate::Error;

pub const EMBEDDING_MODELS: &[&str] = &[
    "sentence-transformers/all-MiniLM-L6-v2",
    "ibm-granite/granite-embedding-small-english-r2",
    "nomic-ai/nomic-embed-text-v1.5",
    "mesolitica/llama2-embedding-600m-8k",
    "Lajavaness/bilingual-embedding-large",
    "embedding-light-128",
    "embedding-base-768",
    "embedding-xl-2048",
];

/// A fixed list of model ids with one selected entry.
#[derive(Debug, Clone)]
pub struct ModelPicker {
    models: Vec<String>,
    index: usize,
}

impl ModelPicker {
    pub fn new<I, S>(models: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let models: Vec<String> = models.into_iter().map(Into::into).collect();
        if models.is_empty() {
            return Err(Error::Config("model catalog is empty".to_string()));
        }
        Ok(Self { models, index: 0 })
    }

    pub fn builtin() -> Self {
        Self {
            models: EMBEDDING_MODELS.iter().map(|m| m.to_string()).collect(),
            index: 0,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> &str {
        &self.models[self.index]
    }

    pub fn select(&mut self, id: &str) -> Result<(), Error> {
        match self.models.iter().position(|m| m == id) {
            Some(i) => {
                self.index = i;
                Ok(())
            }
            None => Err(Error::Config(format!("unknown embedding model: {id}"))),
        }
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.models.len() {
            self.index = index;
        }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.index + 1 < self.models.len() {
            self.index += 1;
        }
    }
}
