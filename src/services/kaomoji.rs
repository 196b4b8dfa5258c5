//! Kaomoji generation page.

use std::sync::Arc;

use tracing::error;

use crate::generation::{kaomoji_prompt, TextGenerator};
use crate::models::SiteMetadata;
use crate::views::IndexPage;

/// Builds the index page for a submitted `word`.
///
/// - Absent or empty `word`: base page, the generator is not called.
/// - Generation succeeds: page with the kaomoji.
/// - Generation fails: page with `error` set and the original word echoed;
///   the failure is logged.
pub async fn generate_kaomoji_page(
    seo: Arc<SiteMetadata>,
    generator: &dyn TextGenerator,
    word: Option<&str>,
) -> IndexPage {
    let Some(word) = word.filter(|w| !w.is_empty()) else {
        return IndexPage::base(seo);
    };

    match generator.generate(&kaomoji_prompt(word)).await {
        Ok(kaomoji) => IndexPage::generated(seo, kaomoji),
        Err(err) => {
            error!(word = %word, error = %err, "kaomoji generation failed");
            IndexPage::failed(seo, word.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generator returning a canned result and recording prompts.
    struct MockGenerator {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(GenerationError::NoCandidates)
        }
    }

    fn seo() -> Arc<SiteMetadata> {
        Arc::new(SiteMetadata {
            url: "https://example.com".to_string(),
            title: "Test".to_string(),
            description: "Test site".to_string(),
            image: None,
        })
    }

    #[tokio::test]
    async fn test_absent_or_empty_word_skips_generation() {
        let generator = MockGenerator::ok("(^▽^)");

        for word in [None, Some("")] {
            let page = generate_kaomoji_page(seo(), &generator, word).await;
            assert_eq!(page.kaomoji, None);
            assert_eq!(page.word, None);
            assert!(!page.error);
            assert_eq!(*page.seo, *seo());
        }

        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_word_is_sent() {
        let generator = MockGenerator::ok("(・_・)");

        let page = generate_kaomoji_page(seo(), &generator, Some("   ")).await;

        assert_eq!(page.kaomoji.as_deref(), Some("(・_・)"));
        assert_eq!(generator.calls(), 1);
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [kaomoji_prompt("   ")]);
    }

    #[tokio::test]
    async fn test_success_sets_kaomoji() {
        let generator = MockGenerator::ok("(^▽^)");

        let page = generate_kaomoji_page(seo(), &generator, Some("I am happy")).await;

        assert_eq!(page.kaomoji.as_deref(), Some("(^▽^)"));
        assert_eq!(page.word, None);
        assert!(!page.error);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_word() {
        let generator = MockGenerator::ok("(^_^)");

        generate_kaomoji_page(seo(), &generator, Some("dancing cat")).await;

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [kaomoji_prompt("dancing cat")]);
    }

    #[tokio::test]
    async fn test_failure_echoes_word() {
        let generator = MockGenerator::failing();

        let page = generate_kaomoji_page(seo(), &generator, Some("  I am sad ")).await;

        assert_eq!(page.kaomoji, None);
        assert_eq!(page.word.as_deref(), Some("  I am sad "));
        assert!(page.error);
        assert_eq!(generator.calls(), 1);
    }
}
