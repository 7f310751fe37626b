//! 로그 목적지 -- 측정값을 tracing 이벤트로 출력하는 디버그 소비자

use async_trait::async_trait;

use tracefan_core::config::DecimalSeparator;
use tracefan_core::destination::Destination;
use tracefan_core::error::DestinationError;
use tracefan_core::types::Measurement;

use crate::decimal::DecimalDecoder;

/// tracing 기반 로그 목적지
///
/// 수신한 측정값을 info 레벨로 출력합니다. 기록 시각은 RFC 3339로,
/// 소요 시간은 업스트림 관례(소수부 3자리)로 렌더링합니다.
pub struct LogDestination {
    point_filter: Option<String>,
    decoder: DecimalDecoder,
    written: u64,
}

impl LogDestination {
    /// 모든 측정값을 받는 로그 목적지를 생성합니다.
    pub fn new() -> Self {
        Self {
            point_filter: None,
            decoder: DecimalDecoder::new(DecimalSeparator::Period),
            written: 0,
        }
    }

    /// 지정한 측정 지점 이름과 정확히 일치하는 측정값만 받습니다.
    pub fn with_point_filter(mut self, point: impl Into<String>) -> Self {
        self.point_filter = Some(point.into());
        self
    }

    /// 소요 시간 렌더링에 쓸 소수 구분 기호를 지정합니다.
    pub fn with_separator(mut self, separator: DecimalSeparator) -> Self {
        self.decoder = DecimalDecoder::new(separator);
        self
    }

    /// 이번 세션에 기록한 측정값 수
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Default for LogDestination {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Destination for LogDestination {
    fn name(&self) -> &str {
        "log"
    }

    async fn start(&mut self) -> Result<(), DestinationError> {
        self.written = 0;
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), DestinationError> {
        tracing::info!(written = self.written, "log destination stopped");
        Ok(())
    }

    fn matches(&self, measurement: &Measurement) -> bool {
        self.point_filter
            .as_deref()
            .map_or(true, |point| point == measurement.point)
    }

    async fn write(&mut self, measurement: &Measurement) -> Result<(), DestinationError> {
        let recorded_at = chrono::DateTime::from_timestamp_millis(measurement.recording_time as i64)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| measurement.recording_time.to_string());

        tracing::info!(
            point = %measurement.point,
            parent = measurement.parent.as_deref().unwrap_or("-"),
            transaction_time = %self.decoder.format(measurement.transaction_time),
            recorded_at = %recorded_at,
            "measurement"
        );
        self.written += 1;
        Ok(())
    }
}
