use std::sync::Arc;
use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::action_items::ActionItemExtractor;
use crate::analysis::classifier::Classifier;
use crate::analysis::deadline::DeadlineExtractor;
use crate::analysis::summarizer::Summarizer;
use crate::config::PipelineConfig;
use crate::models::{IncomingMail, TriageResult, TriagedMail};
use crate::taxonomy::TriageTaxonomy;

pub struct TriagePipeline {
    classifier: Classifier,
    deadline_extractor: DeadlineExtractor,
    action_extractor: ActionItemExtractor,
    summarizer: Summarizer,
    config: PipelineConfig,
}

impl TriagePipeline {
    pub fn new(taxonomy: TriageTaxonomy, config: PipelineConfig) -> Self {
        Self {
            classifier: Classifier::new(taxonomy.keywords),
            deadline_extractor: DeadlineExtractor::new(taxonomy.date_patterns),
            action_extractor: ActionItemExtractor::new(taxonomy.actions),
            summarizer: Summarizer::new(config.summary_sentences),
            config,
        }
    }

    pub fn process(&self, subject: &str, body: &str) -> TriageResult {
        let full_text = format!("{}. {}", subject, body);

        let (category, priority_score) = self.classifier.classify(subject, body);
        let deadline = self.deadline_extractor.extract_deadline(&full_text);
        let action_items = self.action_extractor.extract_action_items(body);

        // A zero-sentence summary stays empty.
        let mut summary = self.summarizer.summarize(&full_text);
        if summary.is_empty() && self.summarizer.max_sentences() > 0 {
            summary = self.summarizer.short_summary(body);
        }

        tracing::debug!(
            %category,
            priority_score,
            action_items = action_items.len(),
            has_deadline = !deadline.is_empty(),
            "Triaged message"
        );

        TriageResult {
            summary,
            category,
            priority_score,
            action_items,
            deadline,
        }
    }

    pub fn process_mail(&self, mail: &IncomingMail) -> TriageResult {
        self.process(&mail.subject, &mail.body)
    }

    /// Triage many mails on the blocking pool, at most `concurrency_limit` at a time.
    /// Output order matches input order.
    pub async fn process_batch(self: &Arc<Self>, mails: Vec<IncomingMail>) -> Vec<TriagedMail> {
        tracing::info!("Triaging {} mail(s)", mails.len());

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = self.progress_bar(mails.len() as u64);

        let mut triage_futures = Vec::with_capacity(mails.len());

        for mail in mails {
            let pipeline = Arc::clone(self);
            let sem = semaphore.clone();
            let pb_clone = pb.clone();

            triage_futures.push(async move {
                let _permit = sem.acquire().await.ok();

                let input = mail.clone();
                let result = match tokio::task::spawn_blocking(move || pipeline.process_mail(&input)).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("Triage task failed for '{}': {}", mail.subject, e);
                        TriageResult::default()
                    }
                };

                pb_clone.inc(1);
                TriagedMail {
                    mail,
                    result,
                    triaged_at: Utc::now(),
                }
            });
        }

        let results = join_all(triage_futures).await;
        pb.finish_with_message("Triage complete");

        results
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} mails")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(len);
        pb.set_style(style);
        pb
    }
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::new(TriageTaxonomy::default(), PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_summary_falls_back_to_short_body() {
        let pipeline = TriagePipeline::default();
        let result = pipeline.process("Hello", "Hi there.");
        assert_eq!(result.summary, "Hi there.");
    }

    #[test]
    fn test_subject_feeds_summary_and_deadline() {
        let pipeline = TriagePipeline::default();
        let result = pipeline.process(
            "Convocation rehearsal on 04/05/2026",
            "All graduating students are expected in the main hall.",
        );
        assert_eq!(result.deadline, "04/05/2026");
        assert_eq!(
            result.summary,
            "Convocation rehearsal on 04/05/2026. All graduating students are expected in the main hall."
        );
    }

    #[test]
    fn test_action_items_ignore_subject() {
        let pipeline = TriagePipeline::default();
        let result = pipeline.process("Submit your thesis draft", "Drafts are reviewed weekly.");
        assert!(result.action_items.is_empty());
        assert_eq!(result.category, Category::Academic);
    }

    #[test]
    fn test_empty_input() {
        let pipeline = TriagePipeline::default();
        let result = pipeline.process("", "");
        assert_eq!(result, TriageResult::default());
    }

    #[test]
    fn test_summary_length_from_config() {
        let config = PipelineConfig {
            summary_sentences: 1,
            ..PipelineConfig::default()
        };
        let pipeline = TriagePipeline::new(TriageTaxonomy::default(), config);
        let result = pipeline.process(
            "Library hours update",
            "The central library will remain open until midnight. \
             Reading rooms on the second floor close at ten.",
        );
        assert_eq!(result.summary, "Library hours update.");
    }

    #[test]
    fn test_zero_sentence_summary_stays_empty() {
        let config = PipelineConfig {
            summary_sentences: 0,
            ..PipelineConfig::default()
        };
        let pipeline = TriagePipeline::new(TriageTaxonomy::default(), config);
        let result = pipeline.process(
            "Library hours update",
            "The central library will remain open until midnight. \
             Reading rooms on the second floor close at ten. \
             Silence is expected in all study areas. \
             Laptops may be borrowed from the front desk.",
        );
        assert_eq!(result.summary, "");

        let result = pipeline.process("Hello", "Hi there.");
        assert_eq!(result.summary, "");
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let pipeline = Arc::new(TriagePipeline::default());
        let mails = vec![
            IncomingMail::new("Hackathon registration open", "Register before 10 April."),
            IncomingMail::new("Hostel maintenance", "Water supply will be off on Sunday."),
            IncomingMail::new("Hello", "Hi there."),
        ];

        let triaged = pipeline.process_batch(mails.clone()).await;

        assert_eq!(triaged.len(), 3);
        for (out, mail) in triaged.iter().zip(&mails) {
            assert_eq!(&out.mail, mail);
            assert_eq!(out.result, pipeline.process_mail(mail));
        }
        assert_eq!(triaged[0].result.category, Category::Event);
        assert_eq!(triaged[1].result.category, Category::Administrative);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let pipeline = Arc::new(TriagePipeline::default());
        assert!(pipeline.process_batch(Vec::new()).await.is_empty());
    }
}
