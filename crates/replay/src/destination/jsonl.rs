//! JSON Lines 목적지 -- 측정값을 줄 단위 JSON 파일로 내보내기

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufWriter};

use tracefan_core::destination::Destination;
use tracefan_core::error::DestinationError;
use tracefan_core::types::Measurement;

/// JSON Lines 내보내기 목적지
///
/// `start`에서 대상 파일을 생성(기존 내용은 덮어씀)하고, 측정값마다
/// 한 줄의 JSON 객체를 기록하며, `stop`에서 버퍼를 플러시합니다.
pub struct JsonLinesDestination {
    path: PathBuf,
    point_filter: Option<String>,
    writer: Option<BufWriter<tokio::fs::File>>,
}

impl JsonLinesDestination {
    /// 지정한 경로에 기록하는 목적지를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            point_filter: None,
            writer: None,
        }
    }

    /// 지정한 측정 지점 이름과 정확히 일치하는 측정값만 받습니다.
    pub fn with_point_filter(mut self, point: impl Into<String>) -> Self {
        self.point_filter = Some(point.into());
        self
    }
}

#[async_trait]
impl Destination for JsonLinesDestination {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn start(&mut self) -> Result<(), DestinationError> {
        let file = tokio::fs::File::create(&self.path)
            .await
            .map_err(|e| DestinationError::Start {
                name: self.name().to_owned(),
                reason: format!("cannot create '{}': {e}", self.path.display()),
            })?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), DestinationError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().await.map_err(|e| DestinationError::Stop {
                name: "jsonl".to_owned(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn matches(&self, measurement: &Measurement) -> bool {
        self.point_filter
            .as_deref()
            .map_or(true, |point| point == measurement.point)
    }

    async fn write(&mut self, measurement: &Measurement) -> Result<(), DestinationError> {
        let writer = self.writer.as_mut().ok_or_else(|| DestinationError::Write {
            name: "jsonl".to_owned(),
            reason: "destination not started".to_owned(),
        })?;

        let mut line = serde_json::to_vec(measurement).map_err(|e| DestinationError::Write {
            name: "jsonl".to_owned(),
            reason: format!("serialization failed: {e}"),
        })?;
        line.push(b'\n');

        writer
            .write_all(&line)
            .await
            .map_err(|e| DestinationError::Write {
                name: "jsonl".to_owned(),
                reason: e.to_string(),
            })
    }
}
