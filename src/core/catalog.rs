//! Static model catalog shown in the sidebar.
//!
//! Purely informational: selecting an entry never changes which backend
//! model answers (see [`crate::core::prompt::BACKEND_MODEL`]).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    pub id: &'static str,
    pub description: &'static str,
}

impl ModelEntry {
    /// The id with its first character upper-cased, e.g. "Codellama".
    pub fn display_name(&self) -> String {
        let mut chars = self.id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLink {
    pub label: &'static str,
    pub url: &'static str,
}

const MODELS: &[ModelEntry] = &[
    ModelEntry {
        id: "codellama",
        description: "A model optimized for code generation and understanding.",
    },
    ModelEntry {
        id: "gemma",
        description: "A general-purpose language model for various NLP tasks.",
    },
    ModelEntry {
        id: "llava",
        description: "A vision-language model capable of image and text processing.",
    },
    ModelEntry {
        id: "llama2",
        description: "An advanced conversational AI model.",
    },
    ModelEntry {
        id: "qwen",
        description: "A multilingual model with extensive language support.",
    },
    ModelEntry {
        id: "bakllava",
        description: "A multimodal model for image reasoning.",
    },
    ModelEntry {
        id: "wizardcoder",
        description: "A model designed for code generation and debugging.",
    },
];

const LINKS: &[ReferenceLink] = &[
    ReferenceLink {
        label: "Ollama Setup",
        url: "https://ollama.com/download",
    },
    ReferenceLink {
        label: "Ollama GitHub",
        url: "https://github.com/ollama/ollama",
    },
    ReferenceLink {
        label: "Ollama Models",
        url: "https://ollama.com/library",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelCatalog;

impl ModelCatalog {
    pub fn entries(&self) -> &'static [ModelEntry] {
        MODELS
    }

    pub fn links(&self) -> &'static [ReferenceLink] {
        LINKS
    }

    pub fn lookup(&self, id: &str) -> Option<&'static ModelEntry> {
        MODELS.iter().find(|entry| entry.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&'static ModelEntry> {
        MODELS.get(index)
    }

    pub fn len(&self) -> usize {
        MODELS.len()
    }

    pub fn is_empty(&self) -> bool {
        MODELS.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_declared_order() {
        let ids: Vec<_> = ModelCatalog.entries().iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec!["codellama", "gemma", "llava", "llama2", "qwen", "bakllava", "wizardcoder"]
        );
    }

    #[test]
    fn lookup_finds_known_models_only() {
        let entry = ModelCatalog.lookup("qwen").expect("qwen is listed");
        assert_eq!(
            entry.description,
            "A multilingual model with extensive language support."
        );
        assert!(ModelCatalog.lookup("gpt-4o").is_none());
        assert!(ModelCatalog.lookup("").is_none());
    }

    #[test]
    fn display_name_capitalizes_first_letter() {
        assert_eq!(ModelCatalog.entries()[0].display_name(), "Codellama");
        assert_eq!(
            ModelCatalog.lookup("llama2").unwrap().display_name(),
            "Llama2"
        );
    }

    #[test]
    fn three_reference_links() {
        let links = ModelCatalog.links();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.url.starts_with("https://")));
    }
}
