//! 파이프라인 오케스트레이션 -- 로그 열기/목적지 생명주기/라인 스트리밍
//!
//! [`ReplayPipeline`]은 한 번의 `parse` 호출로 로그 전체를 소진하는
//! 오프라인 세션을 실행합니다.
//!
//! # 세션 흐름
//! ```text
//! open -> start destinations -> (line -> match -> decode -> fan-out)* -> stop destinations
//! ```
//!
//! 처리 순서는 외부에서 관찰 가능한 계약입니다: 라인은 소스 순서대로,
//! 목적지는 등록 순서대로 처리됩니다. 한 라인의 매칭/디코딩/팬아웃이
//! 모두 끝난 뒤에야 다음 라인을 읽습니다.

use std::fmt;
use std::path::Path;

use metrics::counter;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use tracefan_core::config::ReplayConfig;
use tracefan_core::destination::Destination;
use tracefan_core::metrics::{
    LABEL_DESTINATION, REPLAY_DECODE_ERRORS_TOTAL, REPLAY_LINES_PROCESSED_TOTAL,
    REPLAY_LINES_TOTAL, REPLAY_WRITES_TOTAL,
};

use crate::error::ReplayError;
use crate::matcher::LineMatcher;

/// 한 파싱 세션의 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// 읽은 전체 라인 수
    pub total_lines: u64,
    /// 측정값으로 변환되어 팬아웃된 라인 수
    pub processed_lines: u64,
    /// 숫자 디코딩 실패로 건너뛴 라인 수
    pub decode_errors: u64,
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} out of {} lines ({} decode errors)",
            self.processed_lines, self.total_lines, self.decode_errors,
        )
    }
}

/// 측정 로그 리플레이 파이프라인
///
/// 목적지 목록은 세션 중에는 읽기 전용입니다. `register`와 `parse`가
/// 모두 `&mut self`를 요구하므로 세션 도중 등록은 타입 수준에서
/// 불가능합니다.
pub struct ReplayPipeline {
    config: ReplayConfig,
    destinations: Vec<Box<dyn Destination>>,
}

impl ReplayPipeline {
    /// 설정으로 빈 파이프라인을 생성합니다.
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            config,
            destinations: Vec::new(),
        }
    }

    /// 목적지를 등록합니다. 등록 순서가 곧 라우팅/호출 순서입니다.
    pub fn register(&mut self, destination: Box<dyn Destination>) {
        self.destinations.push(destination);
    }

    /// 등록된 목적지 수
    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// 현재 설정에 대한 불변 참조
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// 파일 경로로 한 번의 파싱 세션을 실행합니다.
    ///
    /// 파일을 열 수 없으면 I/O 에러로 실패합니다. 파일 핸들은 세션이
    /// 어떤 경로로 끝나든 반환 시점에 닫힙니다.
    pub async fn parse(&mut self, path: impl AsRef<Path>) -> Result<ParseSummary, ReplayError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "parsing measurement log");
        let file = tokio::fs::File::open(path).await?;
        self.parse_reader(BufReader::new(file)).await
    }

    /// 임의의 버퍼링된 UTF-8 소스로 한 번의 파싱 세션을 실행합니다.
    ///
    /// 1. 패턴을 컴파일합니다 (그룹 개수 포함, 실패 시 즉시 반환).
    /// 2. 모든 목적지를 등록 순서대로 `start`합니다. 실패는 전파되며,
    ///    이미 시작된 목적지는 시작된 채로 남습니다.
    /// 3. 라인을 순서대로 스트리밍합니다. 디코딩 실패만 라인 단위로
    ///    복구하고, 목적지 `write` 실패와 읽기 에러는 세션을 중단합니다.
    /// 4. 스트림이 정상 소진되면 모든 목적지를 등록 순서대로 `stop`합니다.
    ///    중단 경로에서는 `stop`이 호출되지 않습니다.
    ///
    /// 요약은 결과와 무관하게 세션당 한 번 로그로 남습니다.
    pub async fn parse_reader<R>(&mut self, reader: R) -> Result<ParseSummary, ReplayError>
    where
        R: AsyncBufRead + Unpin,
    {
        let matcher = LineMatcher::new(&self.config)?;

        for destination in &mut self.destinations {
            tracing::debug!(destination = destination.name(), "starting destination");
            destination.start().await?;
        }

        let mut summary = ParseSummary::default();
        let outcome =
            Self::stream_lines(reader, &matcher, &mut self.destinations, &mut summary).await;

        tracing::info!(
            total = summary.total_lines,
            processed = summary.processed_lines,
            decode_errors = summary.decode_errors,
            "parse session finished"
        );
        outcome?;

        for destination in &mut self.destinations {
            tracing::debug!(destination = destination.name(), "stopping destination");
            destination.stop().await?;
        }

        Ok(summary)
    }

    async fn stream_lines<R>(
        reader: R,
        matcher: &LineMatcher,
        destinations: &mut [Box<dyn Destination>],
        summary: &mut ParseSummary,
    ) -> Result<(), ReplayError>
    where
        R: AsyncBufRead + Unpin,
    {
        // 세션 스코프 플래그: 구분 기호 검사는 첫 매칭 라인에서 한 번만
        let mut separator_checked = false;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            summary.total_lines += 1;
            counter!(REPLAY_LINES_TOTAL).increment(1);

            let Some(matched) = matcher.match_line(&line) else {
                continue;
            };

            if !separator_checked {
                separator_checked = true;
                if !matcher.separator_present(&matched) {
                    tracing::warn!(
                        expected = %matcher.separator(),
                        found = matched.raw_transaction_time(),
                        "decimal separator not found in first matched line; \
                         configured separator may not match the log locale \
                         and fractional digits may be lost"
                    );
                }
            }

            let measurement = match matcher.decode(&matched) {
                Ok(measurement) => measurement,
                Err(err) => {
                    summary.decode_errors += 1;
                    counter!(REPLAY_DECODE_ERRORS_TOTAL).increment(1);
                    tracing::warn!(error = %err, "skipping line with undecodable numeric field");
                    continue;
                }
            };

            summary.processed_lines += 1;
            counter!(REPLAY_LINES_PROCESSED_TOTAL).increment(1);

            for destination in destinations.iter_mut() {
                if destination.matches(&measurement) {
                    destination.write(&measurement).await?;
                    counter!(REPLAY_WRITES_TOTAL, LABEL_DESTINATION => destination.name().to_owned())
                        .increment(1);
                }
            }
        }

        Ok(())
    }
}

/// 리플레이 파이프라인 빌더
pub struct ReplayPipelineBuilder {
    config: ReplayConfig,
    destinations: Vec<Box<dyn Destination>>,
}

impl ReplayPipelineBuilder {
    /// 기본 설정으로 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ReplayConfig::default(),
            destinations: Vec::new(),
        }
    }

    /// 파이프라인 설정을 지정합니다.
    pub fn config(mut self, config: ReplayConfig) -> Self {
        self.config = config;
        self
    }

    /// 추출 패턴만 교체합니다.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    /// 소수 구분 기호만 교체합니다.
    pub fn decimal_separator(mut self, separator: tracefan_core::config::DecimalSeparator) -> Self {
        self.config.decimal_separator = separator;
        self
    }

    /// 목적지를 추가합니다. 추가 순서가 등록 순서입니다.
    pub fn destination(mut self, destination: Box<dyn Destination>) -> Self {
        self.destinations.push(destination);
        self
    }

    /// 설정을 검증하고 파이프라인을 생성합니다.
    pub fn build(self) -> Result<ReplayPipeline, ReplayError> {
        self.config.validate()?;
        let mut pipeline = ReplayPipeline::new(self.config);
        for destination in self.destinations {
            pipeline.register(destination);
        }
        Ok(pipeline)
    }
}

impl Default for ReplayPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tracefan_core::Measurement;
    use tracefan_core::error::DestinationError;

    struct NullDestination;

    #[async_trait]
    impl Destination for NullDestination {
        fn name(&self) -> &str {
            "null"
        }

        async fn start(&mut self) -> Result<(), DestinationError> {
            Ok(())
        }

        async fn stop(&mut self) -> Result<(), DestinationError> {
            Ok(())
        }

        fn matches(&self, _measurement: &Measurement) -> bool {
            true
        }

        async fn write(&mut self, _measurement: &Measurement) -> Result<(), DestinationError> {
            Ok(())
        }
    }

    #[test]
    fn builder_creates_pipeline() {
        let pipeline = ReplayPipelineBuilder::new()
            .destination(Box::new(NullDestination))
            .build()
            .unwrap();
        assert_eq!(pipeline.destination_count(), 1);
    }

    #[test]
    fn builder_rejects_empty_pattern() {
        let result = ReplayPipelineBuilder::new().pattern("").build();
        assert!(result.is_err());
    }

    #[test]
    fn register_appends_in_order() {
        let mut pipeline = ReplayPipeline::new(ReplayConfig::default());
        pipeline.register(Box::new(NullDestination));
        pipeline.register(Box::new(NullDestination));
        assert_eq!(pipeline.destination_count(), 2);
    }

    #[tokio::test]
    async fn counts_matching_and_unrelated_lines() {
        let mut pipeline = ReplayPipelineBuilder::new().build().unwrap();
        let source = b"noise line\n\
            measurementPoint=<a>, parent=<b>, transactionTime=<1.000>, recordingTime=<1>\n\
            another noise line\n" as &[u8];

        let summary = pipeline.parse_reader(source).await.unwrap();
        assert_eq!(summary.total_lines, 3);
        assert_eq!(summary.processed_lines, 1);
        assert_eq!(summary.decode_errors, 0);
    }

    #[tokio::test]
    async fn empty_source_yields_zero_counts() {
        let mut pipeline = ReplayPipelineBuilder::new().build().unwrap();
        let summary = pipeline.parse_reader(b"" as &[u8]).await.unwrap();
        assert_eq!(summary, ParseSummary::default());
    }

    #[tokio::test]
    async fn bad_pattern_fails_before_reading() {
        let mut pipeline = ReplayPipeline::new(ReplayConfig {
            pattern: "(only)(two)".to_owned(),
            ..ReplayConfig::default()
        });
        let result = pipeline.parse_reader(b"anything" as &[u8]).await;
        assert!(matches!(result, Err(ReplayError::GroupCount { .. })));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let mut pipeline = ReplayPipelineBuilder::new().build().unwrap();
        let result = pipeline.parse("/nonexistent/measurements.log").await;
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }

    #[test]
    fn summary_display() {
        let summary = ParseSummary {
            total_lines: 7,
            processed_lines: 5,
            decode_errors: 1,
        };
        assert_eq!(
            summary.to_string(),
            "processed 5 out of 7 lines (1 decode errors)"
        );
    }
}
