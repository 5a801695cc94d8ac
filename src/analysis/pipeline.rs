use {
    super::{compose_instruction, normalize_image, parse_analysis},
    crate::{
        config::{DF, IMAGE, constants::ImageConfig},
        data::{GenerationOptions, ModelRequest, VisionModel},
        domain::{AnalysisResult, Language},
        error::VisionError,
    },
};

/// Normalize → compose → invoke → extract & validate, one attempt per call.
pub struct AnalysisPipeline<M> {
    model: M,
    options: GenerationOptions,
    image: &'static ImageConfig,
}

impl<M: VisionModel> AnalysisPipeline<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: GenerationOptions::default(),
            image: &IMAGE,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Builds the request without sending it.
    pub fn prepare(
        &self,
        image_bytes: &[u8],
        language: Language,
        local_time: &str,
    ) -> Result<ModelRequest, VisionError> {
        let normalized = crate::trace_time!("normalize image", 200_000, {
            normalize_image(image_bytes, self.image)?
        });
        if DF.log_pipeline {
            log::info!(
                "Chart normalized to {}x{} ({} KiB jpeg)",
                normalized.width,
                normalized.height,
                normalized.encoded_len / 1024
            );
        }
        Ok(ModelRequest {
            instruction_text: compose_instruction(language, local_time),
            image: normalized.data,
            options: self.options,
        })
    }

    pub async fn analyze(
        &self,
        image_bytes: &[u8],
        language: Language,
        local_time: &str,
    ) -> Result<AnalysisResult, VisionError> {
        let request = self.prepare(image_bytes, language, local_time)?;

        let response = crate::trace_time!("vision model round-trip", 15_000_000, {
            self.model.generate(&request).await
        });
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::error!("Vision model call failed: {}", e);
                return Err(e);
            }
        };

        let result = parse_analysis(&response.text)?;
        if DF.log_pipeline {
            log::info!(
                "Analysis accepted: {} {} ({}%)",
                result.asset_class,
                result.market_bias.direction,
                result.market_bias.confidence
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ModelResponse;
    use crate::domain::{Direction, fixtures};
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: Result<String, VisionError>,
        seen: Mutex<Vec<ModelRequest>>,
    }

    impl ScriptedModel {
        fn replying(reply: Result<String, VisionError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VisionModel for ScriptedModel {
        async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, VisionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone().map(|text| ModelResponse { text })
        }
    }

    fn chart_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(64, 32))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn valid_reply_becomes_analysis() {
        let reply = serde_json::to_string(&fixtures::analysis(Direction::Buy, 72)).unwrap();
        let pipeline = AnalysisPipeline::new(ScriptedModel::replying(Ok(reply)));

        let result = pipeline
            .analyze(&chart_png(), Language::En, "2026-03-14 09:26")
            .await
            .unwrap();
        assert_eq!(result.market_bias.direction, Direction::Buy);
        assert_eq!(result.market_bias.confidence, 72);

        let seen = pipeline.model().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].image.mime_type, "image/jpeg");
        assert!(seen[0].instruction_text.contains("2026-03-14 09:26"));
        assert_eq!(seen[0].options, GenerationOptions::default());
    }

    #[tokio::test]
    async fn unreadable_image_never_reaches_model() {
        let pipeline = AnalysisPipeline::new(ScriptedModel::replying(Ok("{}".into())));
        let err = pipeline
            .analyze(b"not an image", Language::En, "2026-03-14 09:26")
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::InputInvalid(_)));
        assert!(pipeline.model().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_errors_pass_through() {
        let pipeline = AnalysisPipeline::new(ScriptedModel::replying(Err(
            VisionError::UpstreamFailure("503 UNAVAILABLE: overloaded".into()),
        )));
        let err = pipeline
            .analyze(&chart_png(), Language::Fr, "2026-03-14 09:26")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            VisionError::UpstreamFailure("503 UNAVAILABLE: overloaded".into())
        );
    }

    #[tokio::test]
    async fn partial_reply_is_malformed() {
        let pipeline = AnalysisPipeline::new(ScriptedModel::replying(Ok(
            "Sure! ```json\n{ \"asset_class\": \"Forex\" }\n```".into(),
        )));
        let err = pipeline
            .analyze(&chart_png(), Language::En, "2026-03-14 09:26")
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::MalformedResponse(_)));
    }
}
