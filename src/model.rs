//! [`Model`] and [`Provider`] to use for inference.
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Hosted model to use for inference. Serializes as the Hugging Face
/// repository id.
#[derive(
    Debug,
    Default,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum Model {
    /// Mistral 7B Instruct v0.3. This is the default model.
    #[default]
    #[display("Mistral-7B-Instruct-v0.3")]
    Mistral7B,
    /// Mixtral 8x7B Instruct v0.1
    #[display("Mixtral-8x7B-Instruct-v0.1")]
    Mixtral8x7B,
    /// Mistral Nemo Instruct 2407
    #[display("Mistral-Nemo-Instruct-2407")]
    MistralNemo,
    /// Qwen 2.5 7B Instruct
    #[display("Qwen2.5-7B-Instruct")]
    Qwen25_7B,
    /// Nous Hermes 2 Mixtral 8x7B DPO
    #[display("Nous-Hermes-2-Mixtral-8x7B-DPO")]
    NousHermes2Mixtral,
    /// Listed as "DeepSeek-Prover-V2-671B", but routed to DeepSeek V3 0324.
    #[display("DeepSeek-Prover-V2-671B")]
    DeepSeek,
    /// Any other text-generation repository id.
    #[display("{_0}")]
    Custom(Cow<'static, str>),
}

impl Model {
    /// Every selectable (non-[`Custom`]) model, in menu order.
    ///
    /// [`Custom`]: Model::Custom
    pub const ALL: [Model; 6] = [
        Model::Mistral7B,
        Model::Mixtral8x7B,
        Model::MistralNemo,
        Model::Qwen25_7B,
        Model::NousHermes2Mixtral,
        Model::DeepSeek,
    ];

    /// Hugging Face repository id, for example
    /// `mistralai/Mistral-7B-Instruct-v0.3`.
    pub fn repo_id(&self) -> &str {
        match self {
            Self::Mistral7B => "mistralai/Mistral-7B-Instruct-v0.3",
            Self::Mixtral8x7B => "mistralai/Mixtral-8x7B-Instruct-v0.1",
            Self::MistralNemo => "mistralai/Mistral-Nemo-Instruct-2407",
            Self::Qwen25_7B => "Qwen/Qwen2.5-7B-Instruct",
            Self::NousHermes2Mixtral => {
                "NousResearch/Nous-Hermes-2-Mixtral-8x7B-DPO"
            }
            Self::DeepSeek => "deepseek-ai/DeepSeek-V3-0324",
            Self::Custom(id) => id.as_ref(),
        }
    }

    /// Look up a model by its menu label (as [`Display`]ed). Unknown labels
    /// return `None`.
    ///
    /// [`Display`]: std::fmt::Display
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.to_string() == label)
    }
}

impl From<String> for Model {
    fn from(id: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.repo_id() == id)
            .unwrap_or(Self::Custom(Cow::Owned(id)))
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.repo_id().to_string()
    }
}

/// Hugging Face inference provider routing.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Let Hugging Face pick the provider (serverless Inference API).
    #[display("auto")]
    Auto,
    /// Hugging Face's own inference provider. This is the default.
    #[default]
    #[display("hf-inference")]
    HfInference,
}

impl Provider {
    /// Both providers, in menu order.
    pub const ALL: [Provider; 2] = [Provider::Auto, Provider::HfInference];

    /// Base URL that model paths (`/models/{repo_id}`) are appended to.
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Auto => "https://api-inference.huggingface.co",
            Self::HfInference => "https://router.huggingface.co/hf-inference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ids() {
        assert_eq!(Model::default().repo_id(), "mistralai/Mistral-7B-Instruct-v0.3");
        assert_eq!(Model::DeepSeek.repo_id(), "deepseek-ai/DeepSeek-V3-0324");
        assert_eq!(Model::DeepSeek.to_string(), "DeepSeek-Prover-V2-671B");
        assert_eq!(
            Model::Custom("gpt2".into()).repo_id(),
            "gpt2"
        );
    }

    #[test]
    fn test_from_label() {
        assert_eq!(
            Model::from_label("Qwen2.5-7B-Instruct"),
            Some(Model::Qwen25_7B)
        );
        assert_eq!(Model::from_label("nope"), None);
    }

    #[test]
    fn test_model_serde() {
        let json = serde_json::to_string(&Model::Mixtral8x7B).unwrap();
        assert_eq!(json, r#""mistralai/Mixtral-8x7B-Instruct-v0.1""#);

        let model: Model =
            serde_json::from_str(r#""Qwen/Qwen2.5-7B-Instruct""#).unwrap();
        assert_eq!(model, Model::Qwen25_7B);

        let model: Model = serde_json::from_str(r#""org/other""#).unwrap();
        assert_eq!(model, Model::Custom("org/other".into()));
    }

    #[test]
    fn test_provider() {
        assert_eq!(Provider::default(), Provider::HfInference);
        assert_eq!(Provider::HfInference.to_string(), "hf-inference");
        assert_eq!(
            serde_json::to_string(&Provider::Auto).unwrap(),
            r#""auto""#
        );
        assert_eq!(
            serde_json::from_str::<Provider>(r#""hf-inference""#).unwrap(),
            Provider::HfInference
        );
    }
}
