//! RankTableHandler - Loads a table, ranks it, writes the result and
//! optionally delivers it.

use std::sync::Arc;
use thiserror::Error;

use crate::adapters::text::CriteriaTextParser;
use crate::domain::foundation::{EmailAddress, RankingRunId};
use crate::domain::topsis::{DecisionTable, RankedResult, ResultColumns, SchemaError, TopsisEngine};
use crate::ports::{
    DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt, DeliveryTemplate,
    ResultSink, SinkError, SinkReceipt, TableSource, TableSourceError,
};

/// Command to rank the table behind the handler's source.
#[derive(Debug, Clone)]
pub struct RankTableCommand {
    /// Comma-separated weights, e.g. `"1,1,1,2"`.
    pub weights: String,
    /// Comma-separated impact markers, e.g. `"+,+,-,+"`.
    pub impacts: String,
    /// Where to send the result file, if anywhere.
    pub recipient: Option<EmailAddress>,
}

/// What happened to the requested delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(DeliveryReceipt),
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered(_))
    }
}

/// Result of a successful ranking run.
///
/// `delivery` is `None` when no recipient was given. A failed delivery does
/// not fail the run: the result has already been written.
#[derive(Debug, Clone)]
pub struct RankTableResult {
    pub run_id: RankingRunId,
    pub ranking: RankedResult,
    pub receipt: SinkReceipt,
    pub delivery: Option<DeliveryOutcome>,
}

/// Errors that abort a ranking run before a result is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankTableError {
    #[error(transparent)]
    Source(#[from] TableSourceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Handler for ranking runs.
pub struct RankTableHandler {
    source: Arc<dyn TableSource>,
    sink: Arc<dyn ResultSink>,
    delivery: Option<Arc<dyn DeliveryChannel>>,
    engine: TopsisEngine,
    columns: ResultColumns,
    template: DeliveryTemplate,
}

impl RankTableHandler {
    pub fn new(source: Arc<dyn TableSource>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            source,
            sink,
            delivery: None,
            engine: TopsisEngine::default(),
            columns: ResultColumns::default(),
            template: DeliveryTemplate::default(),
        }
    }

    pub fn with_engine(mut self, engine: TopsisEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_columns(mut self, columns: ResultColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_delivery(
        mut self,
        channel: Arc<dyn DeliveryChannel>,
        template: DeliveryTemplate,
    ) -> Self {
        self.delivery = Some(channel);
        self.template = template;
        self
    }

    pub async fn handle(&self, cmd: RankTableCommand) -> Result<RankTableResult, RankTableError> {
        let run_id = RankingRunId::new();
        tracing::debug!(run_id = %run_id, source = %self.source.describe(), "Starting ranking run");

        // 1. Load and type the table
        let raw = self.source.load().await?;
        let table = DecisionTable::from_tabular(&raw)?;

        // 2. Parse criteria against the table, then rank
        let criteria =
            CriteriaTextParser::parse(&cmd.weights, &cmd.impacts, table.criteria_count())?;
        let ranking = self.engine.rank(&table, &criteria)?;

        // 3. Persist the augmented table
        let augmented = ranking.augment(&raw, &self.columns);
        let receipt = self.sink.write(&augmented).await?;

        tracing::info!(
            run_id = %run_id,
            alternatives = ranking.len(),
            path = %receipt.path.display(),
            "Ranking run completed"
        );

        // 4. Deliver, if asked
        let delivery = match cmd.recipient {
            Some(recipient) => Some(self.deliver(run_id, recipient, &receipt).await),
            None => None,
        };

        Ok(RankTableResult {
            run_id,
            ranking,
            receipt,
            delivery,
        })
    }

    async fn deliver(
        &self,
        run_id: RankingRunId,
        recipient: EmailAddress,
        receipt: &SinkReceipt,
    ) -> DeliveryOutcome {
        let Some(channel) = &self.delivery else {
            tracing::warn!(run_id = %run_id, "Delivery requested but no channel is configured");
            return DeliveryOutcome::Failed(DeliveryError::rejected(
                "result delivery is not enabled",
            ));
        };

        let message = DeliveryMessage::result_file(recipient, receipt.content.clone())
            .with_subject(self.template.subject.clone())
            .with_body(self.template.body.clone())
            .with_attachment_name(self.template.attachment_name.clone());

        match channel.deliver(message).await {
            Ok(delivered) => {
                tracing::info!(
                    run_id = %run_id,
                    delivery_id = %delivered.delivery_id,
                    recipient = %delivered.recipient,
                    "Result delivered"
                );
                DeliveryOutcome::Delivered(delivered)
            }
            Err(err) => {
                tracing::warn!(run_id = %run_id, error = %err, "Result delivery failed");
                DeliveryOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::delivery::InMemoryDeliveryChannel;
    use crate::domain::topsis::{SchemaErrorKind, TabularData, TiePolicy};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSource {
        result: Result<TabularData, TableSourceError>,
    }

    impl MockSource {
        fn table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Self {
            Self {
                result: Ok(TabularData::new(headers, rows)),
            }
        }

        fn failing(err: TableSourceError) -> Self {
            Self { result: Err(err) }
        }
    }

    #[async_trait]
    impl TableSource for MockSource {
        async fn load(&self) -> Result<TabularData, TableSourceError> {
            self.result.clone()
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    struct MockSink {
        written: Mutex<Vec<TabularData>>,
        fail_write: bool,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                fail_write: false,
            }
        }

        fn failing() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                fail_write: true,
            }
        }

        fn written(&self) -> Vec<TabularData> {
            self.written.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResultSink for MockSink {
        async fn write(&self, table: &TabularData) -> Result<SinkReceipt, SinkError> {
            if self.fail_write {
                return Err(SinkError::io("Simulated write failure"));
            }
            self.written.lock().unwrap().push(table.clone());
            Ok(SinkReceipt::new("result.csv", table.row_count(), b"encoded".to_vec()))
        }
    }

    fn phones() -> MockSource {
        MockSource::table(
            vec!["Model", "Price", "Storage", "Camera", "Looks"],
            vec![
                vec!["M1", "250", "16", "12", "5"],
                vec!["M2", "200", "16", "8", "3"],
                vec!["M3", "300", "32", "16", "4"],
            ],
        )
    }

    fn command(weights: &str, impacts: &str) -> RankTableCommand {
        RankTableCommand {
            weights: weights.to_string(),
            impacts: impacts.to_string(),
            recipient: None,
        }
    }

    fn recipient() -> EmailAddress {
        EmailAddress::parse("analyst@example.com").unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Success path
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn ranks_and_writes_augmented_table() {
        let sink = Arc::new(MockSink::new());
        let handler = RankTableHandler::new(Arc::new(phones()), sink.clone());

        let result = handler.handle(command("1,1,1,1", "+,+,-,+")).await.unwrap();

        assert_eq!(result.ranking.ranks(), vec![2.0, 3.0, 1.0]);
        assert!(result.delivery.is_none());

        let written = sink.written();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].headers[5..], ["Topsis Score", "Rank"]);
        assert_eq!(written[0].rows[2][0], "M3");
        assert_eq!(written[0].rows[2][6], "1");
    }

    #[tokio::test]
    async fn uses_configured_columns_and_tie_policy() {
        let sink = Arc::new(MockSink::new());
        let source = MockSource::table(
            vec!["Id", "A", "B"],
            vec![vec!["x", "1", "2"], vec!["y", "1", "2"]],
        );
        let handler = RankTableHandler::new(Arc::new(source), sink.clone())
            .with_engine(TopsisEngine::new(TiePolicy::RowOrder))
            .with_columns(ResultColumns {
                score: "Closeness".to_string(),
                rank: "Position".to_string(),
            });

        let result = handler.handle(command("1,1", "+,+")).await.unwrap();

        assert_eq!(result.ranking.ranks(), vec![1.0, 2.0]);
        assert_eq!(sink.written()[0].headers[3..], ["Closeness", "Position"]);
    }

    // ───────────────────────────────────────────────────────────────
    // Validation order
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn non_numeric_cell_is_reported_before_count_mismatch() {
        let source = MockSource::table(
            vec!["Id", "A", "B"],
            vec![vec!["x", "cheap", "2"], vec!["y", "1", "2"]],
        );
        let sink = Arc::new(MockSink::new());
        let handler = RankTableHandler::new(Arc::new(source), sink.clone());

        let err = handler.handle(command("1", "+")).await.unwrap_err();

        match err {
            RankTableError::Schema(e) => assert_eq!(e.kind, SchemaErrorKind::NonNumericValue),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(sink.written().is_empty());
    }

    #[tokio::test]
    async fn count_mismatch_writes_nothing() {
        let sink = Arc::new(MockSink::new());
        let handler = RankTableHandler::new(Arc::new(phones()), sink.clone());

        let err = handler.handle(command("1,1,1", "+,+,-,+")).await.unwrap_err();

        assert!(matches!(
            err,
            RankTableError::Schema(SchemaError { kind: SchemaErrorKind::CountMismatch, .. })
        ));
        assert!(sink.written().is_empty());
    }

    #[tokio::test]
    async fn source_error_is_propagated() {
        let handler = RankTableHandler::new(
            Arc::new(MockSource::failing(TableSourceError::not_found("data.csv"))),
            Arc::new(MockSink::new()),
        );

        let err = handler.handle(command("1,1", "+,+")).await.unwrap_err();
        assert_eq!(err.to_string(), "Input file not found: data.csv");
    }

    #[tokio::test]
    async fn sink_error_is_propagated() {
        let handler = RankTableHandler::new(Arc::new(phones()), Arc::new(MockSink::failing()));

        let err = handler.handle(command("1,1,1,1", "+,+,-,+")).await.unwrap_err();
        assert!(matches!(err, RankTableError::Sink(_)));
    }

    // ───────────────────────────────────────────────────────────────
    // Delivery
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn delivers_written_content_to_recipient() {
        let channel = InMemoryDeliveryChannel::new();
        let handler = RankTableHandler::new(Arc::new(phones()), Arc::new(MockSink::new()))
            .with_delivery(Arc::new(channel.clone()), DeliveryTemplate::default());

        let mut cmd = command("1,1,1,1", "+,+,-,+");
        cmd.recipient = Some(recipient());
        let result = handler.handle(cmd).await.unwrap();

        assert!(result.delivery.unwrap().is_delivered());
        let sent = channel.delivered().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, recipient());
        assert_eq!(sent[0].attachment.content, b"encoded".to_vec());
        assert_eq!(sent[0].subject, "TOPSIS Result File");
    }

    #[tokio::test]
    async fn delivery_uses_template() {
        let channel = InMemoryDeliveryChannel::new();
        let template = DeliveryTemplate {
            subject: "Weekly ranking".to_string(),
            body: "Here you go.".to_string(),
            attachment_name: "ranking.csv".to_string(),
        };
        let handler = RankTableHandler::new(Arc::new(phones()), Arc::new(MockSink::new()))
            .with_delivery(Arc::new(channel.clone()), template);

        let mut cmd = command("1,1,1,1", "+,+,-,+");
        cmd.recipient = Some(recipient());
        handler.handle(cmd).await.unwrap();

        let sent = channel.delivered().await;
        assert_eq!(sent[0].subject, "Weekly ranking");
        assert_eq!(sent[0].attachment.file_name, "ranking.csv");
    }

    #[tokio::test]
    async fn delivery_failure_keeps_written_result() {
        let sink = Arc::new(MockSink::new());
        let channel = InMemoryDeliveryChannel::failing(DeliveryError::rejected("no route"));
        let handler = RankTableHandler::new(Arc::new(phones()), sink.clone())
            .with_delivery(Arc::new(channel), DeliveryTemplate::default());

        let mut cmd = command("1,1,1,1", "+,+,-,+");
        cmd.recipient = Some(recipient());
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(
            result.delivery,
            Some(DeliveryOutcome::Failed(DeliveryError::rejected("no route")))
        );
        assert_eq!(sink.written().len(), 1);
    }

    #[tokio::test]
    async fn recipient_without_channel_fails_delivery_only() {
        let handler = RankTableHandler::new(Arc::new(phones()), Arc::new(MockSink::new()));

        let mut cmd = command("1,1,1,1", "+,+,-,+");
        cmd.recipient = Some(recipient());
        let result = handler.handle(cmd).await.unwrap();

        assert!(matches!(
            result.delivery,
            Some(DeliveryOutcome::Failed(DeliveryError::Rejected { .. }))
        ));
    }
}
