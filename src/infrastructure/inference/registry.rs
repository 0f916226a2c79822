use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::info;

use super::hosted::HostedClassifier;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AnalysisType, ClassifierConfig};
use crate::domain::ports::ClassificationCapability;

type Loader =
    dyn Fn(AnalysisType) -> DomainResult<Arc<dyn ClassificationCapability>> + Send + Sync;

type Slot = Arc<OnceCell<Arc<dyn ClassificationCapability>>>;

/// Lazily constructs one capability per analysis type and keeps it.
///
/// Loading is blocking (tokenizer download) and runs on the blocking pool.
/// Each type has its own slot: concurrent requests for one type share a
/// single load, and a slow load never holds up another type.
pub struct CapabilityRegistry {
    loader: Arc<Loader>,
    slots: Mutex<HashMap<AnalysisType, Slot>>,
}

impl CapabilityRegistry {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn(AnalysisType) -> DomainResult<Arc<dyn ClassificationCapability>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            loader: Arc::new(loader),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Registry loading [`HostedClassifier`]s for the configured model ids.
    pub fn hosted(config: ClassifierConfig) -> Self {
        Self::new(move |analysis_type| {
            let capability =
                HostedClassifier::load(config.model_for(analysis_type), &config)?;
            Ok(Arc::new(capability) as Arc<dyn ClassificationCapability>)
        })
    }

    /// Pre-populate the cache, bypassing the loader.
    pub async fn insert(
        &self,
        analysis_type: AnalysisType,
        capability: Arc<dyn ClassificationCapability>,
    ) {
        let slot = Arc::new(OnceCell::new_with(Some(capability)));
        self.slots.lock().await.insert(analysis_type, slot);
    }

    pub async fn get(
        &self,
        analysis_type: AnalysisType,
    ) -> DomainResult<Arc<dyn ClassificationCapability>> {
        let slot = Arc::clone(self.slots.lock().await.entry(analysis_type).or_default());

        // A failed load leaves the slot empty so the next request retries.
        let capability = slot
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                let capability = tokio::task::spawn_blocking(move || loader(analysis_type))
                    .await
                    .map_err(|e| {
                        DomainError::CapabilityUnavailable(format!(
                            "{analysis_type} loader panicked: {e}"
                        ))
                    })??;
                info!(%analysis_type, model = capability.model_id(), "classification capability ready");
                Ok::<_, DomainError>(capability)
            })
            .await?;
        Ok(Arc::clone(capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Prediction;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;
    use tokio::sync::Notify;

    struct Fixed(&'static str);

    #[async_trait]
    impl ClassificationCapability for Fixed {
        fn model_id(&self) -> &str {
            self.0
        }
        fn max_input_length(&self) -> usize {
            16
        }
        fn encode(&self, _text: &str, _max_units: usize) -> DomainResult<Vec<u32>> {
            Ok(Vec::new())
        }
        fn decode(&self, _units: &[u32]) -> DomainResult<String> {
            Ok(String::new())
        }
        async fn infer(&self, _text: &str) -> DomainResult<Prediction> {
            Ok(Prediction {
                label: self.0.to_string(),
                score: 1.0,
            })
        }
    }

    #[tokio::test]
    async fn test_loads_once_per_type() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CapabilityRegistry::new(move |analysis_type| {
            counter.fetch_add(1, Ordering::SeqCst);
            let name = match analysis_type {
                AnalysisType::Sentiment => "sentiment-model",
                AnalysisType::Emotion => "emotion-model",
            };
            Ok(Arc::new(Fixed(name)) as Arc<dyn ClassificationCapability>)
        });

        let first = registry.get(AnalysisType::Sentiment).await.unwrap();
        let second = registry.get(AnalysisType::Sentiment).await.unwrap();
        let emotion = registry.get(AnalysisType::Emotion).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(emotion.model_id(), "emotion-model");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CapabilityRegistry::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::CapabilityUnavailable("offline".to_string()))
        });

        assert!(registry.get(AnalysisType::Emotion).await.is_err());
        assert!(registry.get(AnalysisType::Emotion).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_inserted_capability_skips_loader() {
        let registry = CapabilityRegistry::new(|_| {
            Err(DomainError::CapabilityUnavailable("should not load".to_string()))
        });
        registry
            .insert(AnalysisType::Sentiment, Arc::new(Fixed("preloaded")))
            .await;

        let capability = registry.get(AnalysisType::Sentiment).await.unwrap();
        assert_eq!(capability.model_id(), "preloaded");
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CapabilityRegistry::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(50));
            Ok(Arc::new(Fixed("emotion-model")) as Arc<dyn ClassificationCapability>)
        });

        let (a, b) = tokio::join!(
            registry.get(AnalysisType::Emotion),
            registry.get(AnalysisType::Emotion)
        );

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_slow_load_does_not_block_other_types() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Barrier::new(2));
        let (loader_started, loader_release) = (Arc::clone(&started), Arc::clone(&release));
        let registry = Arc::new(CapabilityRegistry::new(move |_| {
            loader_started.notify_one();
            loader_release.wait();
            Ok(Arc::new(Fixed("emotion-model")) as Arc<dyn ClassificationCapability>)
        }));
        registry
            .insert(AnalysisType::Sentiment, Arc::new(Fixed("sentiment-model")))
            .await;

        let loading = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.get(AnalysisType::Emotion).await }
        });
        started.notified().await;

        let sentiment = tokio::time::timeout(
            Duration::from_secs(5),
            registry.get(AnalysisType::Sentiment),
        )
        .await
        .expect("cached type waited on another type's load")
        .unwrap();
        assert_eq!(sentiment.model_id(), "sentiment-model");

        tokio::task::spawn_blocking(move || {
            release.wait();
        })
        .await
        .unwrap();
        let emotion = loading.await.unwrap().unwrap();
        assert_eq!(emotion.model_id(), "emotion-model");
    }
}
